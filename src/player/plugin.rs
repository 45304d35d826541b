//! Player plugin - movement, camera, and cursor handling.

use bevy::prelude::*;

use super::components::*;
use super::movement::*;
use crate::core::{clock_running, GameState, GateSet};

/// Player plugin - handles player movement and camera.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerConfig>()
            .add_systems(OnEnter(GameState::InGame), grab_cursor)
            .add_systems(OnExit(GameState::InGame), release_cursor)
            // Movement writes `is_grounded` before attack input reads it
            .add_systems(
                Update,
                (mouse_look, player_movement)
                    .in_set(GateSet::Timers)
                    .run_if(clock_running),
            );
    }
}
