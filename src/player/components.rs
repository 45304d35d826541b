//! Player-related components.

use bevy::prelude::*;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Tracks player movement state for physics.
///
/// `is_grounded` is also what the combat gate reads before allowing an attack.
#[derive(Component, Debug)]
pub struct MovementState {
    pub is_grounded: bool,
    pub vertical_velocity: f32,
}

impl Default for MovementState {
    fn default() -> Self {
        Self {
            is_grounded: true,
            vertical_velocity: 0.0,
        }
    }
}

/// Marker for the hand and sheath anchor children of a character.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorSlot {
    Hand,
    Sheath,
}

/// Tuning for the player controller.
#[derive(Resource)]
pub struct PlayerConfig {
    /// Mouse sensitivity multiplier
    pub mouse_sensitivity: f32,
    /// Base movement speed in units per second
    pub move_speed: f32,
    /// Sprint speed multiplier, applied only while running is unlocked
    pub sprint_multiplier: f32,
    /// Jump velocity
    pub jump_force: f32,
    /// Gravity acceleration
    pub gravity: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 1.5,
            move_speed: 4.0,
            sprint_multiplier: 1.6,
            jump_force: 6.0,
            gravity: 15.0,
        }
    }
}
