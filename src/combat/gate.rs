//! Combat gate - attack phases and the combo window.
//!
//! Each attack link runs windup, active and recovery back to back. While a
//! link plays, its clip markers report when the blade starts to strike and
//! when the combo window should open and close; the owning system feeds the
//! combo markers back through [`CombatGate::enable_combo`] /
//! [`CombatGate::disable_combo`], the same entry points an animation event
//! would call.

use bevy::prelude::*;
use std::time::Duration;

use crate::abilities::PermissionStore;
use crate::animation::PresentationSink;
use crate::core::AttackLink;

/// Where the current attack is in its clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AttackPhase {
    #[default]
    Idle,
    Windup,
    Active,
    Recovery,
}

/// Points in an attack clip that would carry animation events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipMarker {
    /// Windup is over and the active frames begin
    HitStart,
    ComboOpen,
    ComboClose,
}

/// What the combat gate reads from the rest of the character.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttackContext {
    pub can_attack: bool,
    pub grounded: bool,
    pub weapon_drawn: bool,
}

impl AttackContext {
    pub fn new(permissions: &PermissionStore, grounded: bool, weapon_drawn: bool) -> Self {
        Self {
            can_attack: permissions.can_attack,
            grounded,
            weapon_drawn,
        }
    }

    fn allows_attack(&self) -> bool {
        self.can_attack && self.grounded && self.weapon_drawn
    }
}

/// Attack and combo state for one character.
#[derive(Component, Debug, Clone)]
pub struct CombatGate {
    chain: Vec<AttackLink>,
    phase: AttackPhase,
    /// Time into the current link
    elapsed: Duration,
    chain_index: usize,
    combo_window_open: bool,
}

impl CombatGate {
    pub fn new(chain: Vec<AttackLink>) -> Self {
        Self {
            chain,
            phase: AttackPhase::Idle,
            elapsed: Duration::ZERO,
            chain_index: 0,
            combo_window_open: false,
        }
    }

    pub fn phase(&self) -> AttackPhase {
        self.phase
    }

    pub fn is_attacking(&self) -> bool {
        self.phase != AttackPhase::Idle
    }

    pub fn chain_index(&self) -> usize {
        self.chain_index
    }

    pub fn combo_window_open(&self) -> bool {
        self.combo_window_open
    }

    pub fn enable_combo(&mut self) {
        self.combo_window_open = true;
    }

    pub fn disable_combo(&mut self) {
        self.combo_window_open = false;
    }

    /// Start a chain, or continue it if the combo window is open.
    ///
    /// Returns whether an attack was triggered.
    pub fn try_attack(&mut self, ctx: AttackContext, sink: &mut impl PresentationSink) -> bool {
        if !ctx.allows_attack() || self.chain.is_empty() {
            return false;
        }

        if self.is_attacking() {
            if !self.combo_window_open {
                return false;
            }
            self.chain_index = (self.chain_index + 1) % self.chain.len();
        } else {
            self.chain_index = 0;
        }

        self.phase = AttackPhase::Windup;
        self.elapsed = Duration::ZERO;
        // Reopened only by the next clip's marker
        self.combo_window_open = false;

        sink.play_attack(self.chain_index);
        sink.set_attacking(true);
        true
    }

    /// Advance the current attack clip, returning the markers it passed.
    pub fn tick(&mut self, delta: Duration, sink: &mut impl PresentationSink) -> Vec<ClipMarker> {
        let mut markers = Vec::new();
        if !self.is_attacking() || delta.is_zero() {
            return markers;
        }

        let link = self.chain[self.chain_index];
        let total = link.total();
        let before = self.elapsed;
        self.elapsed = (before + delta).min(total);

        let passed = |at: Duration| (before.is_zero() || before < at) && at <= self.elapsed;
        if passed(Duration::from_secs_f32(link.windup)) {
            markers.push(ClipMarker::HitStart);
        }
        if let Some((open, close)) = link.combo_window {
            if passed(total.mul_f32(open)) {
                markers.push(ClipMarker::ComboOpen);
            }
            if passed(total.mul_f32(close)) {
                markers.push(ClipMarker::ComboClose);
            }
        }

        if self.elapsed >= total {
            self.finish(sink);
        } else {
            self.phase = phase_at(&link, self.elapsed);
        }

        markers
    }

    /// Drop the current attack, if any, without finishing its clip.
    pub fn interrupt(&mut self, sink: &mut impl PresentationSink) -> bool {
        if !self.is_attacking() {
            return false;
        }
        self.finish(sink);
        true
    }

    fn finish(&mut self, sink: &mut impl PresentationSink) {
        self.phase = AttackPhase::Idle;
        self.elapsed = Duration::ZERO;
        self.chain_index = 0;
        self.combo_window_open = false;
        sink.set_attacking(false);
    }
}

fn phase_at(link: &AttackLink, elapsed: Duration) -> AttackPhase {
    let t = elapsed.as_secs_f32();
    if t < link.windup {
        AttackPhase::Windup
    } else if t < link.windup + link.active {
        AttackPhase::Active
    } else {
        AttackPhase::Recovery
    }
}
