//! World plugin - arena setup, triggers, and cleanup.

use bevy::prelude::*;

use super::arena::*;
use super::triggers::*;
use crate::core::{GameState, GateSet};
use crate::player::Player;

/// World plugin - handles the arena and its trigger volumes.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ArenaLayout>()
            // Spawned once when loading ends; pausing does not rebuild it
            .add_systems(OnExit(GameState::Loading), setup_arena)
            .add_systems(
                Update,
                (detect_tutorial_zones, detect_objective_markers, hit_training_dummies)
                    .in_set(GateSet::Queued),
            )
            .add_systems(OnEnter(GameState::Loading), cleanup_arena);
    }
}

/// Remove arena and player entities when going back to loading.
fn cleanup_arena(
    mut commands: Commands,
    arena_query: Query<Entity, With<ArenaGeometry>>,
    player_query: Query<Entity, With<Player>>,
) {
    for entity in arena_query.iter().chain(player_query.iter()) {
        commands.entity(entity).despawn_recursive();
    }
}
