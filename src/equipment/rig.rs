//! Weapon rig - the weapon model and the two anchors it moves between.

use bevy::prelude::*;
use thiserror::Error;

use super::state_machine::WeaponEquip;
use crate::animation::{flush_commands, AnimatorCommand, AnimatorEvent, WeaponAnchor};
use crate::combat::CombatGate;

/// Rig setup problems. Any of these leaves the character unarmed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RigError {
    #[error("Weapon model not assigned")]
    MissingModel,

    #[error("Hand anchor not assigned")]
    MissingHandAnchor,

    #[error("Sheath anchor not assigned")]
    MissingSheathAnchor,
}

/// Mesh and material used to build the weapon entity.
#[derive(Debug, Clone)]
pub struct WeaponModel {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

/// Marker for a spawned weapon entity.
#[derive(Component)]
pub struct Weapon {
    /// Character that owns this weapon
    pub owner: Entity,
}

/// Weapon references for one character.
#[derive(Component, Debug, Clone)]
pub struct WeaponRig {
    pub model: Option<WeaponModel>,
    pub hand_anchor: Option<Entity>,
    pub sheath_anchor: Option<Entity>,
    weapon: Option<Entity>,
}

impl WeaponRig {
    pub fn new(model: Option<WeaponModel>, hand_anchor: Option<Entity>, sheath_anchor: Option<Entity>) -> Self {
        Self {
            model,
            hand_anchor,
            sheath_anchor,
            weapon: None,
        }
    }

    /// Check that everything needed to spawn the weapon is assigned.
    pub fn validate(&self) -> Result<(), RigError> {
        if self.model.is_none() {
            return Err(RigError::MissingModel);
        }
        if self.hand_anchor.is_none() {
            return Err(RigError::MissingHandAnchor);
        }
        if self.sheath_anchor.is_none() {
            return Err(RigError::MissingSheathAnchor);
        }
        Ok(())
    }

    pub fn anchor(&self, anchor: WeaponAnchor) -> Option<Entity> {
        match anchor {
            WeaponAnchor::Hand => self.hand_anchor,
            WeaponAnchor::Sheath => self.sheath_anchor,
        }
    }

    /// The spawned weapon entity, if the rig is armed.
    pub fn weapon(&self) -> Option<Entity> {
        self.weapon
    }
}

/// Request to destroy and recreate a character's weapon in its sheath.
#[derive(Event, Debug, Clone, Copy)]
pub struct RespawnWeapon {
    pub character: Entity,
}

/// Spawn the weapon into the sheath anchor of a validated rig.
fn spawn_weapon_in_sheath(commands: &mut Commands, owner: Entity, rig: &mut WeaponRig) -> Result<Entity, RigError> {
    rig.validate()?;
    let (Some(model), Some(sheath)) = (rig.model.as_ref(), rig.sheath_anchor) else {
        return Err(RigError::MissingModel);
    };

    let weapon = commands
        .spawn((
            Weapon { owner },
            Mesh3d(model.mesh.clone()),
            MeshMaterial3d(model.material.clone()),
            Transform::IDENTITY,
        ))
        .set_parent(sheath)
        .id();

    rig.weapon = Some(weapon);
    Ok(weapon)
}

/// Arm newly added rigs. A rig that fails validation is reported once and
/// its equip machine is made inert.
pub fn arm_new_rigs(
    mut commands: Commands,
    mut query: Query<(Entity, &mut WeaponRig, &mut WeaponEquip), Added<WeaponRig>>,
    mut animator: EventWriter<AnimatorEvent>,
) {
    let mut buffer = Vec::new();

    for (entity, mut rig, mut equip) in query.iter_mut() {
        match spawn_weapon_in_sheath(&mut commands, entity, &mut rig) {
            Ok(weapon) => {
                equip.reset(&mut buffer);
                flush_commands(entity, &mut buffer, &mut animator);
                debug!("Spawned weapon {:?} in sheath of {:?}", weapon, entity);
            }
            Err(e) => {
                error!("{} on {:?}; weapon disabled", e, entity);
                equip.make_inert();
            }
        }
    }
}

/// Destroy and recreate weapons on request, back in the sheath.
///
/// Any attack in progress is dropped along with the old weapon.
pub fn respawn_weapons(
    mut commands: Commands,
    mut requests: EventReader<RespawnWeapon>,
    mut query: Query<(&mut WeaponRig, &mut WeaponEquip, Option<&mut CombatGate>)>,
    mut animator: EventWriter<AnimatorEvent>,
) {
    let mut buffer = Vec::new();

    for request in requests.read() {
        let Ok((mut rig, mut equip, combat)) = query.get_mut(request.character) else {
            warn!("Respawn requested for {:?}, which has no weapon rig", request.character);
            continue;
        };
        if equip.is_inert() {
            continue;
        }

        if let Some(old) = rig.weapon.take() {
            commands.entity(old).despawn_recursive();
        }
        if let Some(mut combat) = combat {
            combat.interrupt(&mut buffer);
        }
        match spawn_weapon_in_sheath(&mut commands, request.character, &mut rig) {
            Ok(_) => equip.reset(&mut buffer),
            Err(e) => {
                error!("{} on {:?}; weapon disabled", e, request.character);
                equip.make_inert();
            }
        }
        flush_commands(request.character, &mut buffer, &mut animator);
    }
}

/// Move weapon models to the anchor named by `AttachWeapon` commands.
///
/// The weapon takes the anchor's space with an identity local transform.
pub fn attach_weapons(
    mut commands: Commands,
    mut events: EventReader<AnimatorEvent>,
    rigs: Query<&WeaponRig>,
) {
    for event in events.read() {
        let AnimatorCommand::AttachWeapon(anchor) = event.command else {
            continue;
        };
        let Ok(rig) = rigs.get(event.character) else {
            continue;
        };
        let (Some(weapon), Some(parent)) = (rig.weapon(), rig.anchor(anchor)) else {
            continue;
        };

        commands
            .entity(weapon)
            .set_parent(parent)
            .insert(Transform::IDENTITY);
    }
}
