//! Weapon equip state machine.
//!
//! ```text
//! Sheathed --toggle--> Drawing --timer--> Drawn --toggle--> Sheathing --timer--> Sheathed
//!                                          |  ^
//!                       toggle while       |  | attack ends:
//!                       attacking: queue   v  | queued sheath starts
//! ```
//!
//! Drawing and Sheathing always run to completion; a toggle during either is
//! rejected. Completion is polled via [`WeaponEquip::take_completed`] or
//! returned from [`WeaponEquip::tick`].

use bevy::prelude::*;
use std::time::Duration;

use crate::abilities::PermissionStore;
use crate::animation::{PresentationSink, WeaponAnchor};
use crate::core::{EquipTiming, TransitionKind};

/// Where the weapon currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WeaponState {
    #[default]
    Sheathed,
    Drawing,
    Drawn,
    Sheathing,
}

impl WeaponState {
    pub fn is_transitional(self) -> bool {
        matches!(self, WeaponState::Drawing | WeaponState::Sheathing)
    }
}

/// Result of a sheath request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheathRequest {
    /// Sheathing has begun
    Started,
    /// Deferred until the current attack ends
    Queued,
    /// A guard failed; nothing changed
    Rejected,
}

/// What the equip gate reads from the rest of the character each tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct EquipContext {
    pub can_equip: bool,
    pub can_unequip: bool,
    /// Combat gate is mid-attack
    pub attacking: bool,
}

impl EquipContext {
    pub fn new(permissions: &PermissionStore, attacking: bool) -> Self {
        Self {
            can_equip: permissions.can_equip_weapon,
            can_unequip: permissions.can_unequip_weapon,
            attacking,
        }
    }
}

/// Draw/sheath state for one character.
#[derive(Component, Debug, Clone)]
pub struct WeaponEquip {
    state: WeaponState,
    timer: Timer,
    timing: EquipTiming,
    queued_sheath: bool,
    inert: bool,
    completed: Option<TransitionKind>,
}

impl WeaponEquip {
    pub fn new(timing: EquipTiming) -> Self {
        Self {
            state: WeaponState::Sheathed,
            timer: Timer::default(),
            timing,
            queued_sheath: false,
            inert: false,
            completed: None,
        }
    }

    pub fn current_state(&self) -> WeaponState {
        self.state
    }

    pub fn is_weapon_drawn(&self) -> bool {
        self.state == WeaponState::Drawn
    }

    pub fn is_transitioning(&self) -> bool {
        self.state.is_transitional()
    }

    pub fn queued_sheath(&self) -> bool {
        self.queued_sheath
    }

    /// Time spent in the current transition (zero when stable).
    pub fn transition_elapsed(&self) -> Duration {
        if self.is_transitioning() {
            self.timer.elapsed()
        } else {
            Duration::ZERO
        }
    }

    /// A rig without its weapon or anchors leaves the machine inert.
    pub fn is_inert(&self) -> bool {
        self.inert
    }

    pub fn make_inert(&mut self) {
        self.inert = true;
        self.queued_sheath = false;
    }

    /// Back to Sheathed with no pending work, for a freshly respawned weapon.
    pub fn reset(&mut self, sink: &mut impl PresentationSink) {
        self.state = WeaponState::Sheathed;
        self.timer.reset();
        self.queued_sheath = false;
        self.completed = None;
        sink.set_weapon_drawn(false);
    }

    /// Draw if sheathed, sheath if drawn.
    ///
    /// Returns true when a transition started or a sheath was queued behind
    /// the current attack.
    pub fn try_toggle(&mut self, ctx: EquipContext, sink: &mut impl PresentationSink) -> bool {
        if self.inert || self.is_transitioning() {
            return false;
        }

        match self.state {
            WeaponState::Sheathed => self.draw_weapon(ctx, sink),
            WeaponState::Drawn => self.sheath_weapon(ctx, sink) != SheathRequest::Rejected,
            _ => false,
        }
    }

    /// Start drawing. Returns whether the transition began.
    pub fn draw_weapon(&mut self, ctx: EquipContext, sink: &mut impl PresentationSink) -> bool {
        if self.inert || self.is_transitioning() || self.state != WeaponState::Sheathed {
            return false;
        }
        if !ctx.can_equip || ctx.attacking {
            return false;
        }

        self.begin(TransitionKind::Draw, sink);
        true
    }

    /// Start sheathing, or queue it behind the current attack.
    pub fn sheath_weapon(&mut self, ctx: EquipContext, sink: &mut impl PresentationSink) -> SheathRequest {
        if self.inert || self.is_transitioning() || self.state != WeaponState::Drawn {
            return SheathRequest::Rejected;
        }
        if !ctx.can_unequip {
            return SheathRequest::Rejected;
        }
        if ctx.attacking {
            self.queued_sheath = true;
            return SheathRequest::Queued;
        }

        self.begin(TransitionKind::Sheath, sink);
        SheathRequest::Started
    }

    /// Start a queued sheath once the attack holding it back has ended.
    pub fn process_queued_sheath(&mut self, ctx: EquipContext, sink: &mut impl PresentationSink) -> bool {
        if !self.queued_sheath || self.state != WeaponState::Drawn || ctx.attacking {
            return false;
        }

        self.queued_sheath = false;
        self.sheath_weapon(ctx, sink) == SheathRequest::Started
    }

    /// Advance the running transition. Returns the transition that finished
    /// this tick, if any.
    pub fn tick(&mut self, delta: Duration, sink: &mut impl PresentationSink) -> Option<TransitionKind> {
        let kind = match self.state {
            WeaponState::Drawing => TransitionKind::Draw,
            WeaponState::Sheathing => TransitionKind::Sheath,
            _ => return None,
        };

        self.timer.tick(delta);
        if !self.timer.finished() {
            return None;
        }

        self.complete(kind, sink);
        Some(kind)
    }

    /// Take the most recent completion, clearing it.
    pub fn take_completed(&mut self) -> Option<TransitionKind> {
        self.completed.take()
    }

    fn begin(&mut self, kind: TransitionKind, sink: &mut impl PresentationSink) {
        let duration = match kind {
            TransitionKind::Draw => {
                self.state = WeaponState::Drawing;
                sink.play_draw();
                self.timing.draw()
            }
            TransitionKind::Sheath => {
                self.state = WeaponState::Sheathing;
                sink.play_sheath();
                self.timing.sheath()
            }
        };
        self.timer = Timer::new(duration, TimerMode::Once);
        sink.set_weapon_drawn(false);
    }

    fn complete(&mut self, kind: TransitionKind, sink: &mut impl PresentationSink) {
        let (state, anchor) = match kind {
            TransitionKind::Draw => (WeaponState::Drawn, WeaponAnchor::Hand),
            TransitionKind::Sheath => (WeaponState::Sheathed, WeaponAnchor::Sheath),
        };

        sink.attach_weapon(anchor);
        self.state = state;
        self.queued_sheath = false;
        self.completed = Some(kind);
        sink.set_weapon_drawn(state == WeaponState::Drawn);
    }
}
