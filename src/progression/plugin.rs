//! Progression plugin - tutorial and objective sequencing.

use bevy::prelude::*;

use super::data::*;
use super::objectives::ObjectiveSequencer;
use super::systems::*;
use super::tutorial::TutorialController;
use crate::core::{GameState, GateSet};

/// Progression plugin - unlocks abilities as the story advances.
pub struct ProgressionPlugin;

impl Plugin for ProgressionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TutorialScript>()
            .init_resource::<ObjectiveScript>()
            .init_resource::<TutorialController>()
            .init_resource::<ObjectiveSequencer>()
            .add_systems(Startup, load_progression_scripts)
            .add_systems(OnExit(GameState::Loading), start_progression)
            .add_systems(
                Update,
                (
                    handle_dialogue_advance,
                    handle_tutorial_triggers,
                    handle_enemy_defeats,
                    handle_markers,
                    announce_completion,
                )
                    .chain()
                    .in_set(GateSet::Input),
            );
    }
}
