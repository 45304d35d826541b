//! Ability permission flags shared by every gate.

use bevy::prelude::*;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A player capability that progression can lock or unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Ability {
    Run,
    Jump,
    EquipWeapon,
    UnequipWeapon,
    Attack,
}

impl Ability {
    pub const ALL: [Ability; 5] = [
        Ability::Run,
        Ability::Jump,
        Ability::EquipWeapon,
        Ability::UnequipWeapon,
        Ability::Attack,
    ];

    /// Flag name as used by external writers (`can_run`, `can_attack`, ...).
    pub fn flag_name(self) -> &'static str {
        match self {
            Ability::Run => "can_run",
            Ability::Jump => "can_jump",
            Ability::EquipWeapon => "can_equip_weapon",
            Ability::UnequipWeapon => "can_unequip_weapon",
            Ability::Attack => "can_attack",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag_name())
    }
}

/// An external writer named a flag that does not exist.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown permission flag '{0}'")]
pub struct AbilityParseError(pub String);

impl FromStr for Ability {
    type Err = AbilityParseError;

    /// Accepts `can_run`, `run`, `CanRun` and friends.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        let normalized = normalized.strip_prefix("can").unwrap_or(&normalized);

        match normalized {
            "run" => Ok(Ability::Run),
            "jump" => Ok(Ability::Jump),
            "equipweapon" => Ok(Ability::EquipWeapon),
            "unequipweapon" => Ok(Ability::UnequipWeapon),
            "attack" => Ok(Ability::Attack),
            _ => Err(AbilityParseError(s.to_string())),
        }
    }
}

/// Session-wide ability flags, all locked by default.
///
/// One writer is expected (progression), readers are the equip and combat
/// gates and locomotion. Flags can be locked again after being unlocked.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PermissionStore {
    pub can_run: bool,
    pub can_jump: bool,
    pub can_equip_weapon: bool,
    pub can_unequip_weapon: bool,
    pub can_attack: bool,
}

impl PermissionStore {
    pub fn get(&self, ability: Ability) -> bool {
        match ability {
            Ability::Run => self.can_run,
            Ability::Jump => self.can_jump,
            Ability::EquipWeapon => self.can_equip_weapon,
            Ability::UnequipWeapon => self.can_unequip_weapon,
            Ability::Attack => self.can_attack,
        }
    }

    /// Set a flag, returning its previous value.
    pub fn set(&mut self, ability: Ability, allowed: bool) -> bool {
        let flag = match ability {
            Ability::Run => &mut self.can_run,
            Ability::Jump => &mut self.can_jump,
            Ability::EquipWeapon => &mut self.can_equip_weapon,
            Ability::UnequipWeapon => &mut self.can_unequip_weapon,
            Ability::Attack => &mut self.can_attack,
        };
        std::mem::replace(flag, allowed)
    }

    /// Set a flag by its external name.
    pub fn set_by_name(&mut self, name: &str, allowed: bool) -> Result<bool, AbilityParseError> {
        let ability = name.parse::<Ability>()?;
        Ok(self.set(ability, allowed))
    }

    /// Unlock exactly `abilities`; everything else is locked.
    pub fn allow_only(&mut self, abilities: &[Ability]) {
        for ability in Ability::ALL {
            self.set(ability, abilities.contains(&ability));
        }
    }

    pub fn grant_all(&mut self) {
        self.allow_only(&Ability::ALL);
    }

    pub fn revoke_all(&mut self) {
        *self = Self::default();
    }

    /// Abilities currently unlocked.
    pub fn allowed(&self) -> impl Iterator<Item = Ability> + '_ {
        Ability::ALL.into_iter().filter(|a| self.get(*a))
    }
}

/// Request from an external writer to change a flag by name.
#[derive(Event, Debug, Clone)]
pub struct SetPermission {
    pub flag: String,
    pub allowed: bool,
}

/// Apply queued [`SetPermission`] requests.
///
/// Unknown flag names are logged and ignored.
pub fn apply_permission_requests(
    mut requests: EventReader<SetPermission>,
    mut store: ResMut<PermissionStore>,
) {
    for request in requests.read() {
        match store.set_by_name(&request.flag, request.allowed) {
            Ok(previous) if previous != request.allowed => {
                debug!("Permission {} -> {}", request.flag, request.allowed);
            }
            Ok(_) => {}
            Err(e) => warn!("{}; request ignored", e),
        }
    }
}
