//! Progression module - tutorial steps and objectives that drive the
//! permission store.

mod data;
mod objectives;
mod plugin;
mod systems;
mod tutorial;

pub use data::*;
pub use objectives::{ObjectiveSequencer, SequencerPhase};
pub use plugin::ProgressionPlugin;
pub use tutorial::TutorialController;
