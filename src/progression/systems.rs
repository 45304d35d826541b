//! Progression systems - react to triggers, kills, markers and dialogue input.

use bevy::prelude::*;

use super::data::{ObjectiveScript, TutorialScript};
use super::objectives::ObjectiveSequencer;
use super::tutorial::TutorialController;
use crate::abilities::PermissionStore;
use crate::core::{
    Action, ActionInput, EnemyDefeated, GameplayClock, MarkerReached, ObjectivesComplete,
    TutorialTriggered,
};

/// Build the sequencers from the loaded scripts and show the opening step.
pub fn start_progression(
    mut commands: Commands,
    tutorial_script: Res<TutorialScript>,
    objective_script: Res<ObjectiveScript>,
    mut store: ResMut<PermissionStore>,
    mut clock: ResMut<GameplayClock>,
) {
    let mut tutorial = TutorialController::new(&tutorial_script);
    if tutorial.step_count() > 0 {
        tutorial.show_step(0, &mut store, &mut clock);
    }

    let mut sequencer = ObjectiveSequencer::new(&objective_script);
    sequencer.start(&mut store, &mut clock);

    commands.insert_resource(tutorial);
    commands.insert_resource(sequencer);
}

/// Advance dialogue first; with no line open, close the tutorial panel.
pub fn handle_dialogue_advance(
    mut input: ResMut<ActionInput>,
    mut sequencer: ResMut<ObjectiveSequencer>,
    mut tutorial: ResMut<TutorialController>,
    mut store: ResMut<PermissionStore>,
    mut clock: ResMut<GameplayClock>,
) {
    if !input.take(Action::AdvanceDialogue) {
        return;
    }

    // Open dialogue takes the key before the tutorial panel
    if sequencer.is_dialogue_open() {
        sequencer.advance_dialogue(&mut store, &mut clock);
    } else {
        tutorial.dismiss(&mut clock);
    }
}

pub fn handle_tutorial_triggers(
    mut triggers: EventReader<TutorialTriggered>,
    mut tutorial: ResMut<TutorialController>,
    mut store: ResMut<PermissionStore>,
    mut clock: ResMut<GameplayClock>,
) {
    for trigger in triggers.read() {
        tutorial.trigger_step(trigger.step, &mut store, &mut clock);
    }
}

pub fn handle_enemy_defeats(
    mut defeats: EventReader<EnemyDefeated>,
    mut tutorial: ResMut<TutorialController>,
    mut store: ResMut<PermissionStore>,
    mut clock: ResMut<GameplayClock>,
) {
    for defeat in defeats.read() {
        if let Some(step) = defeat.tutorial_step {
            tutorial.step_on_enemy_defeated(step, &mut store, &mut clock);
        }
    }
}

pub fn handle_markers(
    mut reached: EventReader<MarkerReached>,
    mut sequencer: ResMut<ObjectiveSequencer>,
    mut store: ResMut<PermissionStore>,
    mut clock: ResMut<GameplayClock>,
) {
    for event in reached.read() {
        sequencer.clear_marker(event.marker, &mut store, &mut clock);
    }
}

pub fn announce_completion(
    mut sequencer: ResMut<ObjectiveSequencer>,
    mut complete: EventWriter<ObjectivesComplete>,
) {
    if sequencer.take_just_completed() {
        complete.send(ObjectivesComplete);
    }
}
