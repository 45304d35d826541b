//! Equipment module - weapon rig and the draw/sheath state machine.

mod plugin;
mod rig;
mod state_machine;
mod systems;

pub use plugin::EquipmentPlugin;
pub use rig::{RespawnWeapon, RigError, Weapon, WeaponModel, WeaponRig};
pub use state_machine::*;
pub use systems::handle_toggle_input;
