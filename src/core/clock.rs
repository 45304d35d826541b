//! Pausable gameplay clock.
//!
//! Transition and attack timers advance by [`GameplayClock::delta`], never by
//! `Time` directly. Progression systems hold the clock while a blocking
//! dialogue or tutorial panel is up; the menu pause is a separate concept
//! handled by [`GameState::Paused`](super::GameState).

use bevy::prelude::*;
use std::collections::HashSet;
use std::time::Duration;

/// Why the gameplay clock is currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PauseReason {
    /// A tutorial panel is on screen
    Tutorial,
    /// A dialogue line is waiting to be advanced
    Dialogue,
}

/// Gameplay clock resource.
///
/// Several holders may hold it at once; it only runs again once every
/// reason has been released.
#[derive(Resource, Debug, Default)]
pub struct GameplayClock {
    holds: HashSet<PauseReason>,
    delta: Duration,
}

impl GameplayClock {
    /// Hold the clock. Returns false if `reason` was already holding it.
    pub fn hold(&mut self, reason: PauseReason) -> bool {
        self.holds.insert(reason)
    }

    /// Release a hold. Returns false if `reason` was not holding it.
    pub fn release(&mut self, reason: PauseReason) -> bool {
        self.holds.remove(&reason)
    }

    pub fn is_running(&self) -> bool {
        self.holds.is_empty()
    }

    pub fn is_held_by(&self, reason: PauseReason) -> bool {
        self.holds.contains(&reason)
    }

    /// Gameplay time elapsed this tick (zero while held).
    pub fn delta(&self) -> Duration {
        self.delta
    }

    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Feed the real frame delta for this tick.
    pub fn advance(&mut self, real_delta: Duration) {
        self.delta = if self.is_running() {
            real_delta
        } else {
            Duration::ZERO
        };
    }
}

/// System that samples `Time` into the gameplay clock once per tick.
pub fn advance_gameplay_clock(time: Res<Time>, mut clock: ResMut<GameplayClock>) {
    clock.advance(time.delta());
}

/// Run condition: gameplay clock is not held.
pub fn clock_running(clock: Res<GameplayClock>) -> bool {
    clock.is_running()
}
