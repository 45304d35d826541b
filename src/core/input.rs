//! Edge-triggered action input.
//!
//! Raw keyboard and mouse state is folded into [`ActionInput`] at the start of
//! the gate tick. Consumers `take` an action, which clears it; whatever is
//! left unconsumed is dropped at the end of the frame so a press is never
//! processed twice.

use bevy::prelude::*;

use super::clock::GameplayClock;

/// Discrete actions the gates react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Draw or sheath the weapon
    WeaponToggle,
    /// Start or chain an attack
    Attack,
    /// Continue past the current dialogue line or tutorial panel
    AdvanceDialogue,
}

/// Actions pressed this tick.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct ActionInput {
    weapon_toggle: bool,
    attack: bool,
    advance_dialogue: bool,
}

impl ActionInput {
    pub fn press(&mut self, action: Action) {
        *self.slot(action) = true;
    }

    pub fn is_pressed(&self, action: Action) -> bool {
        match action {
            Action::WeaponToggle => self.weapon_toggle,
            Action::Attack => self.attack,
            Action::AdvanceDialogue => self.advance_dialogue,
        }
    }

    /// Consume a press. Returns whether it was pending.
    pub fn take(&mut self, action: Action) -> bool {
        std::mem::take(self.slot(action))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn slot(&mut self, action: Action) -> &mut bool {
        match action {
            Action::WeaponToggle => &mut self.weapon_toggle,
            Action::Attack => &mut self.attack,
            Action::AdvanceDialogue => &mut self.advance_dialogue,
        }
    }
}

/// Map keyboard/mouse presses to actions.
///
/// Gameplay actions are ignored while the gameplay clock is held, which is
/// how player control is disabled during dialogue.
pub fn read_action_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    clock: Res<GameplayClock>,
    mut input: ResMut<ActionInput>,
) {
    if keyboard.just_pressed(KeyCode::Enter) {
        input.press(Action::AdvanceDialogue);
    }

    if !clock.is_running() {
        return;
    }

    if keyboard.just_pressed(KeyCode::KeyR) {
        input.press(Action::WeaponToggle);
    }
    if mouse.just_pressed(MouseButton::Left) {
        input.press(Action::Attack);
    }
}

/// Drop any press nobody consumed this frame.
pub fn clear_action_input(mut input: ResMut<ActionInput>) {
    input.clear();
}
