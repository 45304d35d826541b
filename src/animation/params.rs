//! Animator parameter mirror.

use bevy::prelude::*;

use super::sink::{AnimatorCommand, AnimatorEvent};

/// Latest animator state for a character, as a renderer would see it.
#[derive(Component, Debug, Default, Clone, PartialEq, Eq)]
pub struct AnimatorParams {
    pub is_weapon_drawn: bool,
    pub is_attacking: bool,
    /// Most recent one-shot trigger
    pub last_trigger: Option<AnimatorCommand>,
    /// Number of triggers received so far
    pub trigger_count: u32,
}

impl AnimatorParams {
    pub fn apply(&mut self, command: AnimatorCommand) {
        if command.is_trigger() {
            self.last_trigger = Some(command);
            self.trigger_count += 1;
            return;
        }

        match command {
            AnimatorCommand::SetWeaponDrawn(drawn) => self.is_weapon_drawn = drawn,
            AnimatorCommand::SetAttacking(attacking) => self.is_attacking = attacking,
            _ => {}
        }
    }
}

/// Apply animator events to each character's parameter mirror.
pub fn apply_animator_events(
    mut events: EventReader<AnimatorEvent>,
    mut params: Query<&mut AnimatorParams>,
) {
    for event in events.read() {
        if let Ok(mut p) = params.get_mut(event.character) {
            p.apply(event.command);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::WeaponAnchor;

    #[test]
    fn triggers_and_parameters_are_tracked_separately() {
        let mut params = AnimatorParams::default();
        params.apply(AnimatorCommand::PlayAttack { chain_index: 1 });
        params.apply(AnimatorCommand::SetAttacking(true));
        params.apply(AnimatorCommand::AttachWeapon(WeaponAnchor::Hand));

        assert!(params.is_attacking);
        assert!(!params.is_weapon_drawn);
        assert_eq!(params.last_trigger, Some(AnimatorCommand::PlayAttack { chain_index: 1 }));
        assert_eq!(params.trigger_count, 1);
    }

    #[test]
    fn every_trigger_kind_is_counted() {
        let mut params = AnimatorParams::default();
        for command in [
            AnimatorCommand::PlayDraw,
            AnimatorCommand::SetWeaponDrawn(true),
            AnimatorCommand::PlaySheath,
            AnimatorCommand::SetWeaponDrawn(false),
        ] {
            params.apply(command);
        }

        assert!(!params.is_weapon_drawn);
        assert_eq!(params.last_trigger, Some(AnimatorCommand::PlaySheath));
        assert_eq!(params.trigger_count, 2);
    }
}
