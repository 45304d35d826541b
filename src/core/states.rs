//! Game state definitions that control the overall flow of the game.
//!
//! States decide which systems run at all. Gameplay systems only run in
//! `InGame`; the menu pause (`Paused`) freezes them entirely. Blocking
//! dialogue does not use a state: it holds the [`GameplayClock`] instead, so
//! the two kinds of pause never interfere.
//!
//! [`GameplayClock`]: super::GameplayClock

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` while data files are read
/// - Move to `InGame` once configuration is in place
/// - `Paused` freezes gameplay but keeps the world visible
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading gameplay and progression data
    #[default]
    Loading,
    /// Active gameplay
    InGame,
    /// Pause menu is open (overlay on gameplay)
    Paused,
}

/// Per-tick ordering of the weapon and combat gates.
///
/// Chained in declaration order. The queued sheath check runs before input is
/// read, so a sheath deferred by an attack starts on the same tick the attack
/// ends.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GateSet {
    /// Compute this tick's gameplay delta and gather raw input
    Clock,
    /// Advance attack phases, then equip transitions
    Timers,
    /// Resolve sheath requests deferred by an attack
    Queued,
    /// Consume edge-triggered gameplay input
    Input,
    /// Forward animator commands and mirror parameters
    Present,
}
