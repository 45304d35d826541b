//! Bladebound - weapon draw/sheath and combat gating for a third-person
//! action game in Bevy.
//!
//! The player starts unarmed in a training yard. Tutorial panels and
//! objectives unlock running, jumping, the weapon and attacking one at a
//! time, and the weapon gates decide when a draw, sheath or swing may start.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, gameplay clock, action input, gate config, events
//! - **Abilities**: The permission store read by every gate
//! - **Animation**: Presentation commands and the animator parameter mirror
//! - **Equipment**: Weapon draw/sheath state machine and weapon rig
//! - **Combat**: Attack phases and combo windows
//! - **Progression**: Tutorial steps and objectives
//! - **Player**: Third-person movement and camera
//! - **World**: Training arena, trigger volumes, dummies

pub mod abilities;
pub mod animation;
pub mod combat;
pub mod core;
pub mod equipment;
pub mod player;
pub mod progression;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct BladeboundPlugin;

impl Plugin for BladeboundPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)
            .add_plugins(abilities::AbilitiesPlugin)
            .add_plugins(animation::AnimationPlugin)

            // Gates
            .add_plugins(equipment::EquipmentPlugin)
            .add_plugins(combat::CombatPlugin)
            .add_plugins(progression::ProgressionPlugin)

            // Player and world
            .add_plugins(player::PlayerPlugin)
            .add_plugins(world::WorldPlugin);
    }
}
