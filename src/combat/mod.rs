//! Combat module - attack phases, combo windows and attack gating.

mod gate;
mod plugin;
mod systems;

pub use gate::*;
pub use plugin::CombatPlugin;
pub use systems::advance_attacks;
