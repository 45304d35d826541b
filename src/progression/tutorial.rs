//! Tutorial sequencer - unlocks abilities panel by panel.
//!
//! Showing a step overwrites the permission store with that step's ability
//! set and holds the gameplay clock until the panel is dismissed.

use bevy::prelude::*;

use super::data::{TutorialScript, TutorialStep};
use crate::abilities::PermissionStore;
use crate::core::{GameplayClock, PauseReason};

/// Tutorial progress for the session.
#[derive(Resource, Debug, Default)]
pub struct TutorialController {
    steps: Vec<TutorialStep>,
    shown: Vec<bool>,
    current: Option<usize>,
    panel_open: bool,
}

impl TutorialController {
    pub fn new(script: &TutorialScript) -> Self {
        Self {
            steps: script.steps.clone(),
            shown: vec![false; script.steps.len()],
            current: None,
            panel_open: false,
        }
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn current_step(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Option<&TutorialStep> {
        self.current.and_then(|i| self.steps.get(i))
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn was_shown(&self, index: usize) -> bool {
        self.shown.get(index).copied().unwrap_or(false)
    }

    /// Show a step, apply its abilities and hold the clock.
    ///
    /// Out-of-range indices are logged and ignored.
    pub fn show_step(&mut self, index: usize, store: &mut PermissionStore, clock: &mut GameplayClock) -> bool {
        let Some(step) = self.steps.get(index) else {
            warn!("Tutorial step {} out of range ({} steps)", index, self.steps.len());
            return false;
        };

        store.allow_only(&step.abilities);
        info!("Tutorial step {}: {}", index, step.title);

        self.shown[index] = true;
        self.current = Some(index);
        self.panel_open = true;
        clock.hold(PauseReason::Tutorial);
        true
    }

    /// Close the open panel and let the clock run again.
    pub fn dismiss(&mut self, clock: &mut GameplayClock) -> bool {
        if !self.panel_open {
            return false;
        }
        self.panel_open = false;
        clock.release(PauseReason::Tutorial);
        true
    }

    /// Show a step from a trigger volume, at most once.
    pub fn trigger_step(&mut self, index: usize, store: &mut PermissionStore, clock: &mut GameplayClock) -> bool {
        if self.was_shown(index) {
            return false;
        }
        self.show_step(index, store, clock)
    }

    /// Show a step for an enemy kill, at most once. Reaching the final step
    /// unlocks every ability.
    pub fn step_on_enemy_defeated(
        &mut self,
        index: usize,
        store: &mut PermissionStore,
        clock: &mut GameplayClock,
    ) -> bool {
        if index >= self.steps.len() || self.was_shown(index) {
            return false;
        }

        self.show_step(index, store, clock);
        if index + 1 == self.steps.len() {
            store.grant_all();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abilities::Ability;

    fn script() -> TutorialScript {
        let step = |title: &str, abilities: &[Ability]| TutorialStep {
            title: title.to_string(),
            abilities: abilities.to_vec(),
        };
        TutorialScript {
            steps: vec![
                step("Welcome", &[]),
                step("Sprint", &[Ability::Run]),
                step("Weapons", &[Ability::Run, Ability::EquipWeapon, Ability::UnequipWeapon]),
                step("Fight", &[Ability::Run]),
            ],
        }
    }

    #[test]
    fn showing_a_step_applies_its_abilities_and_holds_clock() {
        let mut tutorial = TutorialController::new(&script());
        let mut store = PermissionStore::default();
        let mut clock = GameplayClock::default();

        assert!(tutorial.show_step(2, &mut store, &mut clock));
        assert!(store.can_equip_weapon && store.can_unequip_weapon && store.can_run);
        assert!(!store.can_attack);
        assert!(clock.is_held_by(PauseReason::Tutorial));

        assert!(tutorial.dismiss(&mut clock));
        assert!(clock.is_running());
        assert!(!tutorial.dismiss(&mut clock));
    }

    #[test]
    fn earlier_step_relocks_abilities() {
        let mut tutorial = TutorialController::new(&script());
        let mut store = PermissionStore::default();
        let mut clock = GameplayClock::default();

        tutorial.show_step(2, &mut store, &mut clock);
        tutorial.show_step(1, &mut store, &mut clock);
        assert!(!store.can_equip_weapon);
        assert_eq!(tutorial.current_step(), Some(1));
    }

    #[test]
    fn out_of_range_step_is_ignored() {
        let mut tutorial = TutorialController::new(&script());
        let mut store = PermissionStore::default();
        let mut clock = GameplayClock::default();

        assert!(!tutorial.show_step(9, &mut store, &mut clock));
        assert!(clock.is_running());
        assert_eq!(tutorial.current_step(), None);
    }

    #[test]
    fn triggers_fire_once() {
        let mut tutorial = TutorialController::new(&script());
        let mut store = PermissionStore::default();
        let mut clock = GameplayClock::default();

        assert!(tutorial.trigger_step(1, &mut store, &mut clock));
        tutorial.dismiss(&mut clock);
        assert!(!tutorial.trigger_step(1, &mut store, &mut clock));
        assert!(clock.is_running());
    }

    #[test]
    fn final_enemy_step_unlocks_everything() {
        let mut tutorial = TutorialController::new(&script());
        let mut store = PermissionStore::default();
        let mut clock = GameplayClock::default();

        assert!(tutorial.step_on_enemy_defeated(3, &mut store, &mut clock));
        assert_eq!(store.allowed().count(), Ability::ALL.len());
        assert!(!tutorial.step_on_enemy_defeated(3, &mut store, &mut clock));
    }
}
