//! Core plugin that sets up game states, the gate tick, and global events.

use bevy::prelude::*;

use super::clock::*;
use super::config::*;
use super::events::*;
use super::input::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame, Paused)
/// - The chained [`GateSet`] tick, gated on `InGame`
/// - The gameplay clock and action input resources
/// - Global events (WeaponTransitionComplete, AttackTriggered, etc.)
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()

            // Resources
            .init_resource::<GameplayClock>()
            .init_resource::<ActionInput>()
            .insert_resource(GateConfig::default())

            // Register global events
            .add_event::<WeaponTransitionComplete>()
            .add_event::<AttackTriggered>()
            .add_event::<AttackLanded>()
            .add_event::<TutorialTriggered>()
            .add_event::<EnemyDefeated>()
            .add_event::<MarkerReached>()
            .add_event::<ObjectivesComplete>()

            // Gate tick ordering
            .configure_sets(
                Update,
                (
                    GateSet::Clock,
                    GateSet::Timers,
                    GateSet::Queued,
                    GateSet::Input,
                    GateSet::Present,
                )
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )

            // Config is read once, then gameplay starts
            .add_systems(Startup, load_gate_config)
            .add_systems(OnEnter(GameState::Loading), transition_to_game)
            .add_systems(
                Update,
                (advance_gameplay_clock, read_action_input)
                    .chain()
                    .in_set(GateSet::Clock),
            )
            .add_systems(Last, clear_action_input)

            // Pause/unpause with Escape key
            .add_systems(
                Update,
                handle_pause_input.run_if(in_state(GameState::InGame).or(in_state(GameState::Paused))),
            );
    }
}

/// Leave Loading once startup data is in place.
fn transition_to_game(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InGame);
}

/// Handle Escape key to pause/unpause the game.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            GameState::InGame => next_state.set(GameState::Paused),
            GameState::Paused => next_state.set(GameState::InGame),
            _ => {}
        }
    }
}
