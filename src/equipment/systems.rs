//! Equipment systems - transition timers, queued sheaths and toggle input.

use bevy::prelude::*;

use super::state_machine::{EquipContext, WeaponEquip};
use crate::abilities::PermissionStore;
use crate::animation::{flush_commands, AnimatorEvent};
use crate::combat::CombatGate;
use crate::core::{Action, ActionInput, GameplayClock, TransitionKind, WeaponTransitionComplete};
use crate::player::Player;

/// Advance running draw/sheath transitions and announce completions.
pub fn advance_transitions(
    clock: Res<GameplayClock>,
    mut query: Query<(Entity, &mut WeaponEquip)>,
    mut animator: EventWriter<AnimatorEvent>,
    mut completions: EventWriter<WeaponTransitionComplete>,
) {
    let mut buffer = Vec::new();

    for (character, mut equip) in query.iter_mut() {
        if !equip.is_transitioning() {
            continue;
        }

        if let Some(kind) = equip.tick(clock.delta(), &mut buffer) {
            match kind {
                TransitionKind::Draw => debug!("Weapon drawn on {:?}", character),
                TransitionKind::Sheath => debug!("Weapon sheathed on {:?}", character),
            }
            completions.send(WeaponTransitionComplete { character, kind });
        }
        flush_commands(character, &mut buffer, &mut animator);
    }
}

/// Start sheaths that were deferred by an attack which has now ended.
pub fn process_queued_sheaths(
    permissions: Res<PermissionStore>,
    mut query: Query<(Entity, &mut WeaponEquip, Option<&CombatGate>)>,
    mut animator: EventWriter<AnimatorEvent>,
) {
    let mut buffer = Vec::new();

    for (character, mut equip, combat) in query.iter_mut() {
        if !equip.queued_sheath() {
            continue;
        }

        let attacking = combat.is_some_and(|c| c.is_attacking());
        equip.process_queued_sheath(EquipContext::new(&permissions, attacking), &mut buffer);
        flush_commands(character, &mut buffer, &mut animator);
    }
}

/// Consume the weapon toggle press for the player.
pub fn handle_toggle_input(
    mut input: ResMut<ActionInput>,
    permissions: Res<PermissionStore>,
    mut query: Query<(Entity, &mut WeaponEquip, Option<&CombatGate>), With<Player>>,
    mut animator: EventWriter<AnimatorEvent>,
) {
    if !input.take(Action::WeaponToggle) {
        return;
    }

    let Ok((character, mut equip, combat)) = query.get_single_mut() else {
        return;
    };

    let attacking = combat.is_some_and(|c| c.is_attacking());
    let mut buffer = Vec::new();
    if !equip.try_toggle(EquipContext::new(&permissions, attacking), &mut buffer) {
        debug!("Weapon toggle rejected in state {:?}", equip.current_state());
    }
    flush_commands(character, &mut buffer, &mut animator);
}
