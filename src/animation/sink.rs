//! Presentation sink - the only way the gates talk to animation.
//!
//! The state machines push [`AnimatorCommand`]s into a [`PresentationSink`].
//! In the running game the sink is a plain `Vec` that a system then forwards
//! as [`AnimatorEvent`]s; tests inspect the same `Vec` directly.

use bevy::prelude::*;

/// Where the weapon model can be attached on a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeaponAnchor {
    Hand,
    Sheath,
}

/// A single instruction for the animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorCommand {
    /// Trigger the draw clip
    PlayDraw,
    /// Trigger the sheath clip
    PlaySheath,
    /// Trigger an attack clip
    PlayAttack { chain_index: usize },
    SetWeaponDrawn(bool),
    SetAttacking(bool),
    /// Reparent the weapon model to an anchor and reset its local transform
    AttachWeapon(WeaponAnchor),
}

impl AnimatorCommand {
    /// Whether this is a one-shot trigger rather than a parameter update.
    pub fn is_trigger(&self) -> bool {
        matches!(
            self,
            AnimatorCommand::PlayDraw | AnimatorCommand::PlaySheath | AnimatorCommand::PlayAttack { .. }
        )
    }
}

/// Receiver for animator instructions.
pub trait PresentationSink {
    fn play_draw(&mut self);
    fn play_sheath(&mut self);
    fn play_attack(&mut self, chain_index: usize);
    fn set_weapon_drawn(&mut self, drawn: bool);
    fn set_attacking(&mut self, attacking: bool);
    fn attach_weapon(&mut self, anchor: WeaponAnchor);
}

impl PresentationSink for Vec<AnimatorCommand> {
    fn play_draw(&mut self) {
        self.push(AnimatorCommand::PlayDraw);
    }

    fn play_sheath(&mut self) {
        self.push(AnimatorCommand::PlaySheath);
    }

    fn play_attack(&mut self, chain_index: usize) {
        self.push(AnimatorCommand::PlayAttack { chain_index });
    }

    fn set_weapon_drawn(&mut self, drawn: bool) {
        self.push(AnimatorCommand::SetWeaponDrawn(drawn));
    }

    fn set_attacking(&mut self, attacking: bool) {
        self.push(AnimatorCommand::SetAttacking(attacking));
    }

    fn attach_weapon(&mut self, anchor: WeaponAnchor) {
        self.push(AnimatorCommand::AttachWeapon(anchor));
    }
}

/// An animator command addressed to a character.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimatorEvent {
    pub character: Entity,
    pub command: AnimatorCommand,
}

/// Forward buffered commands for `character` as events, leaving the buffer empty.
pub fn flush_commands(
    character: Entity,
    buffer: &mut Vec<AnimatorCommand>,
    events: &mut EventWriter<AnimatorEvent>,
) {
    if buffer.is_empty() {
        return;
    }
    events.send_batch(
        buffer
            .drain(..)
            .map(|command| AnimatorEvent { character, command }),
    );
}
