//! Global events used for cross-system communication.
//!
//! The gates never call into progression or presentation directly; they
//! publish these events and whoever cares listens.

use bevy::prelude::*;

/// Which way a weapon transition went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// Sheathed -> Drawing -> Drawn
    Draw,
    /// Drawn -> Sheathing -> Sheathed
    Sheath,
}

/// Sent when a draw or sheath transition finishes.
///
/// Listeners that only care about one direction match on `kind`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponTransitionComplete {
    /// Character whose weapon finished moving
    pub character: Entity,
    pub kind: TransitionKind,
}

/// Sent when an attack starts or chains into the next link.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackTriggered {
    pub character: Entity,
    /// Position in the combo chain (0 = chain opener)
    pub chain_index: usize,
}

/// Sent when an attack link leaves its windup and starts to strike.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackLanded {
    pub character: Entity,
    pub chain_index: usize,
}

/// Sent by trigger volumes that should show a tutorial step.
#[derive(Event, Debug, Clone, Copy)]
pub struct TutorialTriggered {
    pub step: usize,
}

/// Sent when an enemy dies, optionally tied to a tutorial step.
#[derive(Event, Debug, Clone, Copy)]
pub struct EnemyDefeated {
    /// The enemy entity
    pub entity: Entity,
    /// Tutorial step to show for this kill, if any
    pub tutorial_step: Option<usize>,
}

/// Sent when the player reaches an objective marker.
#[derive(Event, Debug, Clone, Copy)]
pub struct MarkerReached {
    /// Marker index within the current objective
    pub marker: usize,
}

/// Sent once after the last objective is finished.
#[derive(Event, Debug, Clone, Copy)]
pub struct ObjectivesComplete;
