//! Third-person player movement, gated by the permission store.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::abilities::PermissionStore;
use crate::animation::AnimatorParams;
use crate::combat::CombatGate;
use crate::core::{GameplayClock, GateConfig};
use crate::equipment::{WeaponEquip, WeaponModel, WeaponRig};

/// Orbit camera that follows the player.
#[derive(Component, Default)]
pub struct PlayerCamera {
    /// Current pitch angle in radians
    pub pitch: f32,
}

/// Grab and hide cursor when entering gameplay.
pub fn grab_cursor(mut window_query: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
    }
}

/// Release cursor when leaving gameplay.
pub fn release_cursor(mut window_query: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
    }
}

/// Yaw the player and pitch the orbit camera from mouse motion.
pub fn mouse_look(
    mut mouse_motion: EventReader<MouseMotion>,
    config: Res<PlayerConfig>,
    mut player_query: Query<&mut Transform, With<Player>>,
    mut camera_query: Query<(&mut Transform, &mut PlayerCamera), Without<Player>>,
) {
    let delta: Vec2 = mouse_motion.read().map(|event| event.delta).sum();
    if delta == Vec2::ZERO {
        return;
    }

    let Ok(mut player_transform) = player_query.get_single_mut() else {
        return;
    };
    let Ok((mut camera_transform, mut camera)) = camera_query.get_single_mut() else {
        return;
    };

    let sensitivity = config.mouse_sensitivity * 0.001;
    player_transform.rotate_y(-delta.x * sensitivity);

    camera.pitch = (camera.pitch - delta.y * sensitivity).clamp(-1.0, 0.6);
    let offset = Quat::from_rotation_x(camera.pitch) * Vec3::new(0.0, 0.0, 4.0);
    *camera_transform = Transform::from_translation(offset + Vec3::Y * 1.2).looking_at(Vec3::Y * 0.6, Vec3::Y);
}

/// WASD movement with sprint and jump unlocked through the permission store.
///
/// Runs on the gameplay clock, so the player stands still while a dialogue
/// or tutorial panel holds it.
pub fn player_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    clock: Res<GameplayClock>,
    config: Res<PlayerConfig>,
    permissions: Res<PermissionStore>,
    rapier_context: Query<&RapierContext>,
    mut player_query: Query<
        (Entity, &Transform, &mut MovementState, &mut KinematicCharacterController),
        With<Player>,
    >,
) {
    let Ok((player_entity, transform, mut movement_state, mut controller)) = player_query.get_single_mut() else {
        return;
    };
    let dt = clock.delta_secs();

    // Capsule bottom sits 0.8 below the centre
    let is_grounded = rapier_context.get_single().map_or(true, |context| {
        context
            .cast_ray(
                transform.translation - Vec3::Y * 0.75,
                Vec3::NEG_Y,
                0.15,
                true,
                QueryFilter::default().exclude_collider(player_entity),
            )
            .is_some()
    });
    movement_state.is_grounded = is_grounded;

    if is_grounded {
        if movement_state.vertical_velocity < 0.0 {
            movement_state.vertical_velocity = 0.0;
        }
        if permissions.can_jump && keyboard.just_pressed(KeyCode::Space) {
            movement_state.vertical_velocity = config.jump_force;
        }
    } else {
        movement_state.vertical_velocity -= config.gravity * dt;
    }

    let mut direction = Vec3::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        direction.z -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        direction.z += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        direction.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        direction.x += 1.0;
    }
    let direction = direction.normalize_or_zero();

    let yaw = transform.rotation.to_euler(EulerRot::YXZ).0;
    let movement = Quat::from_rotation_y(yaw) * direction;

    let speed = if permissions.can_run && keyboard.pressed(KeyCode::ShiftLeft) {
        config.move_speed * config.sprint_multiplier
    } else {
        config.move_speed
    };

    let horizontal = movement * speed * dt;
    let vertical = Vec3::Y * movement_state.vertical_velocity * dt;
    controller.translation = Some(horizontal + vertical);
}

/// Spawn the player with its weapon gates, anchors and camera.
pub fn spawn_player(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    position: Vec3,
    config: &GateConfig,
) -> Entity {
    let player = commands
        .spawn((
            Player,
            Name::new("Player"),
            MovementState::default(),
            WeaponEquip::new(config.equip),
            CombatGate::new(config.attack_chain.clone()),
            AnimatorParams::default(),
            Mesh3d(meshes.add(Capsule3d::new(0.3, 1.0))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(0.55, 0.5, 0.45),
                perceptual_roughness: 0.9,
                ..default()
            })),
            Transform::from_translation(position),
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(0.5, 0.3),
            KinematicCharacterController {
                offset: CharacterLength::Absolute(0.01),
                max_slope_climb_angle: 45_f32.to_radians(),
                min_slope_slide_angle: 30_f32.to_radians(),
                snap_to_ground: Some(CharacterLength::Absolute(0.5)),
                ..default()
            },
        ))
        .id();

    let mut hand = None;
    let mut sheath = None;
    commands.entity(player).with_children(|parent| {
        hand = Some(
            parent
                .spawn((
                    AnchorSlot::Hand,
                    Name::new("Hand anchor"),
                    Transform::from_xyz(0.4, 0.1, -0.3),
                    Visibility::default(),
                ))
                .id(),
        );
        sheath = Some(
            parent
                .spawn((
                    AnchorSlot::Sheath,
                    Name::new("Sheath anchor"),
                    Transform::from_xyz(-0.3, -0.1, 0.2).with_rotation(Quat::from_rotation_x(2.6)),
                    Visibility::default(),
                ))
                .id(),
        );
        parent.spawn((
            Camera3d::default(),
            PlayerCamera::default(),
            Transform::from_xyz(0.0, 1.2, 4.0).looking_at(Vec3::Y * 0.6, Vec3::Y),
        ));
    });

    // Blade points along -Z from the anchor
    let model = WeaponModel {
        mesh: meshes.add(Cuboid::new(0.06, 0.06, 0.9)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.75, 0.75, 0.8),
            metallic: 0.8,
            perceptual_roughness: 0.3,
            ..default()
        }),
    };
    commands
        .entity(player)
        .insert(WeaponRig::new(Some(model), hand, sheath));

    player
}
