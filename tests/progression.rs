//! Tutorial and objective flow against the shipped scripts.

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use bladebound::abilities::{AbilitiesPlugin, Ability, PermissionStore};
use bladebound::core::{
    CorePlugin, EnemyDefeated, GameplayClock, MarkerReached, ObjectivesComplete, PauseReason,
    TutorialTriggered,
};
use bladebound::progression::{ObjectiveSequencer, ProgressionPlugin, SequencerPhase, TutorialController};

fn setup() -> App {
    let mut app = App::new();
    app.add_plugins(StatesPlugin)
        .init_resource::<Time>()
        .init_resource::<ButtonInput<KeyCode>>()
        .init_resource::<ButtonInput<MouseButton>>()
        .add_plugins((CorePlugin, AbilitiesPlugin, ProgressionPlugin));

    for _ in 0..3 {
        step(&mut app);
    }
    app
}

fn step(app: &mut App) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_millis(100));
    app.update();
}

fn press_enter(app: &mut App) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::Enter);
    step(app);
    let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    keyboard.release(KeyCode::Enter);
    keyboard.clear();
}

fn store(app: &App) -> PermissionStore {
    *app.world().resource::<PermissionStore>()
}

fn clock_running(app: &App) -> bool {
    app.world().resource::<GameplayClock>().is_running()
}

fn phase(app: &App) -> SequencerPhase {
    app.world().resource::<ObjectiveSequencer>().phase()
}

#[test]
fn opening_holds_clock_until_dialogue_and_panel_are_closed() {
    let mut app = setup();

    let tutorial = app.world().resource::<TutorialController>();
    assert_eq!(tutorial.current_step(), Some(0));
    assert!(tutorial.is_panel_open());
    assert_eq!(store(&app).allowed().count(), 0);
    assert_eq!(phase(&app), SequencerPhase::Intro { line: 0 });

    let clock = app.world().resource::<GameplayClock>();
    assert!(clock.is_held_by(PauseReason::Tutorial));
    assert!(clock.is_held_by(PauseReason::Dialogue));

    // Intro lines first, then the panel
    press_enter(&mut app);
    press_enter(&mut app);
    assert_eq!(phase(&app), SequencerPhase::Active);
    assert!(!clock_running(&app));

    press_enter(&mut app);
    assert!(!app.world().resource::<TutorialController>().is_panel_open());
    assert!(clock_running(&app));
}

#[test]
fn trigger_zone_and_final_kill_unlock_abilities() {
    let mut app = setup();
    for _ in 0..3 {
        press_enter(&mut app);
    }

    app.world_mut().send_event(TutorialTriggered { step: 2 });
    step(&mut app);
    assert!(store(&app).can_run);
    assert!(!store(&app).can_attack);
    assert!(!clock_running(&app));
    press_enter(&mut app);
    assert!(clock_running(&app));

    // A second trip through the same zone does nothing
    app.world_mut().send_event(TutorialTriggered { step: 2 });
    step(&mut app);
    assert!(clock_running(&app));

    app.world_mut().send_event(EnemyDefeated {
        entity: Entity::PLACEHOLDER,
        tutorial_step: Some(6),
    });
    step(&mut app);
    assert_eq!(store(&app).allowed().count(), Ability::ALL.len());
}

#[test]
fn markers_walk_through_every_objective() {
    let mut app = setup();
    for _ in 0..3 {
        press_enter(&mut app);
    }

    app.world_mut().send_event(MarkerReached { marker: 0 });
    step(&mut app);
    assert_eq!(phase(&app), SequencerPhase::MarkerDialogue { marker: 0, line: 0 });
    assert!(!clock_running(&app));

    press_enter(&mut app);
    assert_eq!(app.world().resource::<ObjectiveSequencer>().objective_index(), 1);
    assert_eq!(phase(&app), SequencerPhase::Intro { line: 0 });

    press_enter(&mut app);
    assert_eq!(phase(&app), SequencerPhase::Active);

    // Unknown markers are ignored
    app.world_mut().send_event(MarkerReached { marker: 4 });
    step(&mut app);
    assert_eq!(phase(&app), SequencerPhase::Active);

    app.world_mut().send_event(MarkerReached { marker: 0 });
    step(&mut app);
    assert!(app.world().resource::<ObjectiveSequencer>().is_complete());
    assert_eq!(
        app.world()
            .resource::<Events<ObjectivesComplete>>()
            .iter_current_update_events()
            .count(),
        1
    );
    assert!(clock_running(&app));
}
