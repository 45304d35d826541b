//! Arena layout and spawning.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::triggers::{ObjectiveMarker, TrainingDummy, TutorialZone};
use crate::core::GateConfig;
use crate::player::spawn_player;

/// Marker for everything the arena spawned, for cleanup.
#[derive(Component)]
pub struct ArenaGeometry;

/// Where things go in the training arena.
///
/// The path runs from the gate at the origin towards negative Z, with a
/// tutorial zone every few metres and the dummy at the far end.
#[derive(Resource, Debug, Clone)]
pub struct ArenaLayout {
    pub player_start: Vec3,
    /// (tutorial step, position)
    pub tutorial_zones: Vec<(usize, Vec3)>,
    /// (objective, marker index, position)
    pub markers: Vec<(usize, usize, Vec3)>,
    /// (tutorial step shown on defeat, position)
    pub dummies: Vec<(Option<usize>, Vec3)>,
    pub trigger_radius: f32,
}

impl Default for ArenaLayout {
    fn default() -> Self {
        Self {
            player_start: Vec3::new(0.0, 1.0, 0.0),
            tutorial_zones: (1..=5).map(|step| (step, Vec3::new(0.0, 0.0, -4.0 * step as f32))).collect(),
            markers: vec![(0, 0, Vec3::new(0.0, 0.0, -18.0)), (1, 0, Vec3::new(0.0, 0.0, 2.0))],
            dummies: vec![(Some(6), Vec3::new(0.0, 1.0, -24.0))],
            trigger_radius: 1.5,
        }
    }
}

/// Build the arena and spawn the player at its start.
pub fn setup_arena(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    layout: Res<ArenaLayout>,
    gate_config: Res<GateConfig>,
) {
    info!("Building training arena");

    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.8, 0.8, 0.9),
        brightness: 300.0,
    });
    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -std::f32::consts::FRAC_PI_3,
            std::f32::consts::FRAC_PI_6,
            0.0,
        )),
        ArenaGeometry,
    ));

    // Floor: 0.2 thick with its top at y = 0
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(16.0, 0.2, 40.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.35, 0.4, 0.3),
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::from_xyz(0.0, -0.1, -12.0),
        RigidBody::Fixed,
        Collider::cuboid(8.0, 0.1, 20.0),
        ArenaGeometry,
    ));

    let zone_material = materials.add(StandardMaterial {
        base_color: Color::srgba(0.3, 0.5, 0.9, 0.35),
        alpha_mode: AlphaMode::Blend,
        ..default()
    });
    let disc = meshes.add(Cylinder::new(layout.trigger_radius, 0.02));
    for &(step, position) in &layout.tutorial_zones {
        commands.spawn((
            TutorialZone::new(step),
            Mesh3d(disc.clone()),
            MeshMaterial3d(zone_material.clone()),
            Transform::from_translation(position + Vec3::Y * 0.01),
            ArenaGeometry,
        ));
    }

    let marker_material = materials.add(Color::srgb(0.9, 0.75, 0.2));
    let post = meshes.add(Cylinder::new(0.1, 2.0));
    for &(objective, marker, position) in &layout.markers {
        commands.spawn((
            ObjectiveMarker::new(objective, marker),
            Mesh3d(post.clone()),
            MeshMaterial3d(marker_material.clone()),
            Transform::from_translation(position + Vec3::Y),
            ArenaGeometry,
        ));
    }

    let dummy_material = materials.add(Color::srgb(0.55, 0.4, 0.25));
    for &(tutorial_step, position) in &layout.dummies {
        commands.spawn((
            TrainingDummy::new(3, tutorial_step),
            Mesh3d(meshes.add(Capsule3d::new(0.35, 1.2))),
            MeshMaterial3d(dummy_material.clone()),
            Transform::from_translation(position),
            RigidBody::Fixed,
            Collider::capsule_y(0.6, 0.35),
            ArenaGeometry,
        ));
    }

    spawn_player(
        &mut commands,
        &mut meshes,
        &mut materials,
        layout.player_start,
        &gate_config,
    );
}
