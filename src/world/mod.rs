//! World module - the training arena, its trigger volumes and dummies.

mod arena;
mod plugin;
mod triggers;

pub use arena::{ArenaGeometry, ArenaLayout};
pub use plugin::WorldPlugin;
pub use triggers::{hit_training_dummies, ObjectiveMarker, TrainingDummy, TutorialZone};
