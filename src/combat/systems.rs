//! Combat systems - attack clips and attack input.

use bevy::prelude::*;

use super::gate::{AttackContext, ClipMarker, CombatGate};
use crate::abilities::PermissionStore;
use crate::animation::{flush_commands, AnimatorEvent};
use crate::core::{Action, ActionInput, AttackLanded, AttackTriggered, GameplayClock};
use crate::equipment::WeaponEquip;
use crate::player::{MovementState, Player};

/// Advance attack clips, deliver their combo markers and announce strikes.
pub fn advance_attacks(
    clock: Res<GameplayClock>,
    mut query: Query<(Entity, &mut CombatGate)>,
    mut animator: EventWriter<AnimatorEvent>,
    mut landed: EventWriter<AttackLanded>,
) {
    let mut buffer = Vec::new();

    for (character, mut gate) in query.iter_mut() {
        if !gate.is_attacking() {
            continue;
        }

        for marker in gate.tick(clock.delta(), &mut buffer) {
            match marker {
                ClipMarker::HitStart => {
                    landed.send(AttackLanded {
                        character,
                        chain_index: gate.chain_index(),
                    });
                }
                ClipMarker::ComboOpen => gate.enable_combo(),
                ClipMarker::ComboClose => gate.disable_combo(),
            }
        }
        flush_commands(character, &mut buffer, &mut animator);
    }
}

/// Consume the attack press for the player.
pub fn handle_attack_input(
    mut input: ResMut<ActionInput>,
    permissions: Res<PermissionStore>,
    mut query: Query<(Entity, &mut CombatGate, Option<&WeaponEquip>, Option<&MovementState>), With<Player>>,
    mut animator: EventWriter<AnimatorEvent>,
    mut triggered: EventWriter<AttackTriggered>,
) {
    if !input.take(Action::Attack) {
        return;
    }

    let Ok((character, mut gate, equip, movement)) = query.get_single_mut() else {
        return;
    };

    let ctx = AttackContext::new(
        &permissions,
        movement.map_or(true, |m| m.is_grounded),
        equip.is_some_and(|e| e.is_weapon_drawn()),
    );

    let mut buffer = Vec::new();
    if gate.try_attack(ctx, &mut buffer) {
        triggered.send(AttackTriggered {
            character,
            chain_index: gate.chain_index(),
        });
    }
    flush_commands(character, &mut buffer, &mut animator);
}
