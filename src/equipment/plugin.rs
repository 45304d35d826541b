//! Equipment plugin - weapon draw/sheath state machine.

use bevy::prelude::*;

use super::rig::*;
use super::systems::*;
use super::systems::advance_transitions;
use crate::combat::advance_attacks;
use crate::core::GateSet;

/// Equipment plugin - handles weapon rigs and draw/sheath transitions.
pub struct EquipmentPlugin;

impl Plugin for EquipmentPlugin {
    fn build(&self, app: &mut App) {
        app
            // Events
            .add_event::<RespawnWeapon>()

            // Rig setup runs in every state so a rig is armed as soon as it exists
            .add_systems(
                Update,
                (arm_new_rigs, respawn_weapons).before(GateSet::Clock),
            )

            // Attack phases settle before transitions advance
            .add_systems(
                Update,
                advance_transitions
                    .in_set(GateSet::Timers)
                    .after(advance_attacks),
            )
            .add_systems(Update, process_queued_sheaths.in_set(GateSet::Queued))
            .add_systems(Update, handle_toggle_input.in_set(GateSet::Input))
            .add_systems(Update, attach_weapons.in_set(GateSet::Present));
    }
}
