//! Animation plugin - forwards gate commands to the animator mirror.

use bevy::prelude::*;

use super::params::apply_animator_events;
use super::sink::AnimatorEvent;
use crate::core::GateSet;

/// Animation plugin - owns the animator event channel.
pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AnimatorEvent>()
            .add_systems(Update, apply_animator_events.in_set(GateSet::Present));
    }
}
