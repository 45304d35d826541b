//! Headless runs of the gate tick: input, timers, queued sheaths and the
//! weapon moving between anchors.

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use bladebound::abilities::{AbilitiesPlugin, PermissionStore, SetPermission};
use bladebound::animation::{AnimationPlugin, AnimatorParams};
use bladebound::combat::{AttackPhase, CombatGate, CombatPlugin};
use bladebound::core::{
    AttackTriggered, CorePlugin, GameState, GameplayClock, GateConfig, GateSet, PauseReason,
    TransitionKind, WeaponTransitionComplete,
};
use bladebound::equipment::{
    EquipmentPlugin, RespawnWeapon, WeaponEquip, WeaponModel, WeaponRig, WeaponState,
};
use bladebound::player::{MovementState, Player};
use bladebound::world::{hit_training_dummies, TrainingDummy};

const TICK: Duration = Duration::from_millis(100);

struct Rig {
    player: Entity,
    hand: Entity,
    sheath: Entity,
}

fn app() -> App {
    let mut app = App::new();
    app.add_plugins(StatesPlugin)
        .init_resource::<Time>()
        .init_resource::<ButtonInput<KeyCode>>()
        .init_resource::<ButtonInput<MouseButton>>()
        .add_plugins((
            CorePlugin,
            AbilitiesPlugin,
            AnimationPlugin,
            EquipmentPlugin,
            CombatPlugin,
        ));
    app
}

fn step(app: &mut App) {
    app.world_mut().resource_mut::<Time>().advance_by(TICK);
    app.update();
}

/// Build the app, spawn an armed player and run until gameplay starts.
fn setup() -> (App, Rig) {
    let mut app = app();
    let config = GateConfig::default();

    let world = app.world_mut();
    let hand = world.spawn(Transform::default()).id();
    let sheath = world.spawn(Transform::default()).id();
    let model = WeaponModel {
        mesh: Handle::default(),
        material: Handle::default(),
    };
    let player = world
        .spawn((
            Player,
            MovementState::default(),
            WeaponEquip::new(config.equip),
            CombatGate::new(config.attack_chain),
            AnimatorParams::default(),
            WeaponRig::new(Some(model), Some(hand), Some(sheath)),
            Transform::default(),
        ))
        .id();
    world.resource_mut::<PermissionStore>().grant_all();

    for _ in 0..3 {
        step(&mut app);
    }
    assert_eq!(
        *app.world().resource::<State<GameState>>().get(),
        GameState::InGame
    );

    (app, Rig { player, hand, sheath })
}

fn press_key(app: &mut App, key: KeyCode) {
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(key);
    step(app);
    let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    keyboard.release(key);
    keyboard.clear();
}

fn click(app: &mut App) {
    app.world_mut()
        .resource_mut::<ButtonInput<MouseButton>>()
        .press(MouseButton::Left);
    step(app);
    let mut mouse = app.world_mut().resource_mut::<ButtonInput<MouseButton>>();
    mouse.release(MouseButton::Left);
    mouse.clear();
}

fn weapon_state(app: &App, rig: &Rig) -> WeaponState {
    app.world()
        .get::<WeaponEquip>(rig.player)
        .unwrap()
        .current_state()
}

fn weapon_parent(app: &App, rig: &Rig) -> Entity {
    let weapon = app.world().get::<WeaponRig>(rig.player).unwrap().weapon().unwrap();
    app.world().get::<Parent>(weapon).unwrap().get()
}

/// Step until `done` holds, returning the number of steps taken.
fn run_until(app: &mut App, limit: usize, done: impl Fn(&App) -> bool) -> usize {
    for n in 1..=limit {
        step(app);
        if done(app) {
            return n;
        }
    }
    panic!("condition not reached within {limit} steps");
}

fn draw(app: &mut App, rig: &Rig) {
    press_key(app, KeyCode::KeyR);
    assert_eq!(weapon_state(app, rig), WeaponState::Drawing);
    run_until(app, 10, |app| weapon_state(app, rig) == WeaponState::Drawn);
}

#[test]
fn weapon_spawns_in_sheath() {
    let (app, rig) = setup();
    assert_eq!(weapon_state(&app, &rig), WeaponState::Sheathed);
    assert_eq!(weapon_parent(&app, &rig), rig.sheath);
}

#[test]
fn draw_moves_weapon_to_hand() {
    let (mut app, rig) = setup();

    press_key(&mut app, KeyCode::KeyR);
    assert_eq!(weapon_state(&app, &rig), WeaponState::Drawing);

    let steps = run_until(&mut app, 10, |app| weapon_state(app, &rig) == WeaponState::Drawn);
    assert!((7..=8).contains(&steps), "draw took {steps} steps");

    assert_eq!(weapon_parent(&app, &rig), rig.hand);
    assert!(app.world().get::<AnimatorParams>(rig.player).unwrap().is_weapon_drawn);

    let completions: Vec<_> = app
        .world()
        .resource::<Events<WeaponTransitionComplete>>()
        .iter_current_update_events()
        .map(|event| event.kind)
        .collect();
    assert_eq!(completions, vec![TransitionKind::Draw]);
}

#[test]
fn toggle_is_ignored_mid_draw() {
    let (mut app, rig) = setup();

    press_key(&mut app, KeyCode::KeyR);
    press_key(&mut app, KeyCode::KeyR);
    assert_eq!(weapon_state(&app, &rig), WeaponState::Drawing);

    run_until(&mut app, 10, |app| weapon_state(app, &rig) == WeaponState::Drawn);
    for _ in 0..5 {
        step(&mut app);
    }
    assert_eq!(weapon_state(&app, &rig), WeaponState::Drawn);
}

#[test]
fn sheath_waits_for_attack_to_finish() {
    let (mut app, rig) = setup();
    draw(&mut app, &rig);

    click(&mut app);
    assert!(app.world().get::<CombatGate>(rig.player).unwrap().is_attacking());

    press_key(&mut app, KeyCode::KeyR);
    let equip = app.world().get::<WeaponEquip>(rig.player).unwrap();
    assert_eq!(equip.current_state(), WeaponState::Drawn);
    assert!(equip.queued_sheath());

    run_until(&mut app, 10, |app| {
        !app.world().get::<CombatGate>(rig.player).unwrap().is_attacking()
    });
    // The queued sheath starts on the tick the attack ends
    assert_eq!(weapon_state(&app, &rig), WeaponState::Sheathing);

    let steps = run_until(&mut app, 15, |app| weapon_state(app, &rig) == WeaponState::Sheathed);
    assert!((10..=11).contains(&steps), "sheath took {steps} steps");
    assert_eq!(weapon_parent(&app, &rig), rig.sheath);
}

#[test]
fn attack_locked_without_permission() {
    let (mut app, rig) = setup();
    draw(&mut app, &rig);
    app.world_mut().resource_mut::<PermissionStore>().can_attack = false;

    click(&mut app);

    assert!(!app.world().get::<CombatGate>(rig.player).unwrap().is_attacking());
    assert_eq!(
        app.world()
            .resource::<Events<AttackTriggered>>()
            .iter_current_update_events()
            .count(),
        0
    );
}

#[test]
fn held_clock_freezes_transitions_and_input() {
    let (mut app, rig) = setup();

    press_key(&mut app, KeyCode::KeyR);
    app.world_mut()
        .resource_mut::<GameplayClock>()
        .hold(PauseReason::Dialogue);

    for _ in 0..20 {
        step(&mut app);
    }
    assert_eq!(weapon_state(&app, &rig), WeaponState::Drawing);

    app.world_mut()
        .resource_mut::<GameplayClock>()
        .release(PauseReason::Dialogue);
    run_until(&mut app, 10, |app| weapon_state(app, &rig) == WeaponState::Drawn);

    app.world_mut()
        .resource_mut::<GameplayClock>()
        .hold(PauseReason::Tutorial);
    press_key(&mut app, KeyCode::KeyR);
    assert_eq!(weapon_state(&app, &rig), WeaponState::Drawn);
}

#[test]
fn respawn_puts_a_fresh_weapon_in_the_sheath() {
    let (mut app, rig) = setup();
    draw(&mut app, &rig);
    let old = app.world().get::<WeaponRig>(rig.player).unwrap().weapon().unwrap();

    app.world_mut().send_event(RespawnWeapon { character: rig.player });
    step(&mut app);

    let new = app.world().get::<WeaponRig>(rig.player).unwrap().weapon().unwrap();
    assert_ne!(old, new);
    assert!(app.world().get::<Parent>(old).is_none());
    assert_eq!(weapon_state(&app, &rig), WeaponState::Sheathed);
    assert_eq!(weapon_parent(&app, &rig), rig.sheath);
}

fn mirror(app: &App, rig: &Rig) -> AnimatorParams {
    app.world().get::<AnimatorParams>(rig.player).unwrap().clone()
}

fn attack_phase(app: &App, rig: &Rig) -> AttackPhase {
    app.world().get::<CombatGate>(rig.player).unwrap().phase()
}

#[test]
fn respawn_mid_attack_resets_mirror_and_attack() {
    let (mut app, rig) = setup();
    draw(&mut app, &rig);
    click(&mut app);
    step(&mut app);
    assert!(mirror(&app, &rig).is_weapon_drawn);
    assert!(mirror(&app, &rig).is_attacking);

    app.world_mut().send_event(RespawnWeapon { character: rig.player });
    for _ in 0..3 {
        step(&mut app);
        let params = mirror(&app, &rig);
        assert_eq!(weapon_state(&app, &rig), WeaponState::Sheathed);
        assert!(!params.is_weapon_drawn);
        assert_eq!(attack_phase(&app, &rig), AttackPhase::Idle);
        assert!(!params.is_attacking);
    }
}

#[test]
fn dummy_is_hit_when_active_frames_begin() {
    let (mut app, rig) = setup();
    app.add_systems(Update, hit_training_dummies.in_set(GateSet::Queued));
    let dummy = app
        .world_mut()
        .spawn((
            TrainingDummy::new(3, None),
            Transform::from_xyz(0.0, 0.0, -1.0),
            GlobalTransform::from_xyz(0.0, 0.0, -1.0),
        ))
        .id();
    let hits_left = |app: &App| app.world().get::<TrainingDummy>(dummy).unwrap().hits_left;

    draw(&mut app, &rig);
    click(&mut app);
    assert_eq!(attack_phase(&app, &rig), AttackPhase::Windup);
    assert_eq!(hits_left(&app), 3);

    for _ in 0..5 {
        step(&mut app);
        match attack_phase(&app, &rig) {
            AttackPhase::Windup => assert_eq!(hits_left(&app), 3),
            _ => break,
        }
    }
    assert_eq!(attack_phase(&app, &rig), AttackPhase::Active);
    assert_eq!(hits_left(&app), 2);
}

#[test]
fn permission_requests_apply_by_name() {
    let (mut app, rig) = setup();
    app.world_mut().resource_mut::<PermissionStore>().revoke_all();

    app.world_mut().send_event(SetPermission {
        flag: "can_fly".to_string(),
        allowed: true,
    });
    step(&mut app);
    press_key(&mut app, KeyCode::KeyR);
    assert_eq!(weapon_state(&app, &rig), WeaponState::Sheathed);

    app.world_mut().send_event(SetPermission {
        flag: "can_equip_weapon".to_string(),
        allowed: true,
    });
    press_key(&mut app, KeyCode::KeyR);
    assert_eq!(weapon_state(&app, &rig), WeaponState::Drawing);
}
