//! Combat plugin - attack gating and combo chains.

use bevy::prelude::*;

use super::systems::*;
use crate::core::GateSet;
use crate::equipment::handle_toggle_input;

/// Combat plugin - handles attack clips and attack input.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, advance_attacks.in_set(GateSet::Timers))
            .add_systems(
                Update,
                handle_attack_input
                    .in_set(GateSet::Input)
                    .after(handle_toggle_input),
            );
    }
}
