//! Trigger volumes and training dummies that feed the progression events.

use bevy::prelude::*;

use super::arena::ArenaLayout;
use crate::core::{AttackLanded, EnemyDefeated, MarkerReached, TutorialTriggered};
use crate::player::Player;
use crate::progression::ObjectiveSequencer;

/// Reach of a sword swing, measured from the player's centre
const ATTACK_REACH: f32 = 2.0;

/// Shows a tutorial step when the player steps inside.
#[derive(Component, Debug)]
pub struct TutorialZone {
    pub step: usize,
    occupied: bool,
}

impl TutorialZone {
    pub fn new(step: usize) -> Self {
        Self { step, occupied: false }
    }
}

/// Location the player must reach for an objective.
#[derive(Component, Debug)]
pub struct ObjectiveMarker {
    pub objective: usize,
    pub marker: usize,
    occupied: bool,
}

impl ObjectiveMarker {
    pub fn new(objective: usize, marker: usize) -> Self {
        Self {
            objective,
            marker,
            occupied: false,
        }
    }
}

/// Target that falls after a number of hits.
#[derive(Component, Debug)]
pub struct TrainingDummy {
    pub hits_left: u32,
    /// Tutorial step shown when it falls
    pub tutorial_step: Option<usize>,
}

impl TrainingDummy {
    pub fn new(hits: u32, tutorial_step: Option<usize>) -> Self {
        Self {
            hits_left: hits,
            tutorial_step,
        }
    }

    /// Register a hit. Returns true on the hit that defeats it.
    pub fn hit(&mut self) -> bool {
        if self.hits_left == 0 {
            return false;
        }
        self.hits_left -= 1;
        self.hits_left == 0
    }
}

/// True on the frame `inside` flips from false to true.
fn entered(occupied: &mut bool, inside: bool) -> bool {
    let just_entered = inside && !*occupied;
    *occupied = inside;
    just_entered
}

fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    Vec2::new(a.x - b.x, a.z - b.z).length()
}

pub fn detect_tutorial_zones(
    layout: Res<ArenaLayout>,
    player: Query<&GlobalTransform, With<Player>>,
    mut zones: Query<(&GlobalTransform, &mut TutorialZone)>,
    mut triggered: EventWriter<TutorialTriggered>,
) {
    let Ok(player) = player.get_single() else {
        return;
    };

    for (transform, mut zone) in zones.iter_mut() {
        let inside = horizontal_distance(player.translation(), transform.translation()) <= layout.trigger_radius;
        if entered(&mut zone.occupied, inside) {
            triggered.send(TutorialTriggered { step: zone.step });
        }
    }
}

/// Report markers of the current objective as the player reaches them.
pub fn detect_objective_markers(
    layout: Res<ArenaLayout>,
    sequencer: Res<ObjectiveSequencer>,
    player: Query<&GlobalTransform, With<Player>>,
    mut markers: Query<(&GlobalTransform, &mut ObjectiveMarker)>,
    mut reached: EventWriter<MarkerReached>,
) {
    let Ok(player) = player.get_single() else {
        return;
    };

    for (transform, mut marker) in markers.iter_mut() {
        let inside = horizontal_distance(player.translation(), transform.translation()) <= layout.trigger_radius;
        if entered(&mut marker.occupied, inside) && marker.objective == sequencer.objective_index() {
            reached.send(MarkerReached { marker: marker.marker });
        }
    }
}

/// Land strikes on dummies in front of the attacker.
///
/// Hits register when a link's active frames begin, not on the button press.
pub fn hit_training_dummies(
    mut commands: Commands,
    mut attacks: EventReader<AttackLanded>,
    attackers: Query<&GlobalTransform>,
    mut dummies: Query<(Entity, &GlobalTransform, &mut TrainingDummy)>,
    mut defeated: EventWriter<EnemyDefeated>,
) {
    for attack in attacks.read() {
        let Ok(attacker) = attackers.get(attack.character) else {
            continue;
        };
        let forward = attacker.forward().as_vec3();

        for (entity, transform, mut dummy) in dummies.iter_mut() {
            let offset = transform.translation() - attacker.translation();
            if offset.length() > ATTACK_REACH || offset.dot(forward) <= 0.0 {
                continue;
            }

            debug!("Dummy {:?} hit by combo link {}", entity, attack.chain_index);
            if dummy.hit() {
                info!("Training dummy defeated");
                defeated.send(EnemyDefeated {
                    entity,
                    tutorial_step: dummy.tutorial_step,
                });
                commands.entity(entity).despawn_recursive();
            }
        }
    }
}
