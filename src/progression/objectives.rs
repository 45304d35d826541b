//! Objective sequencer - intro lines, markers and marker dialogue.
//!
//! Each dialogue line holds the gameplay clock until it is advanced. An
//! objective is finished once every marker has been reached and any
//! dialogue those markers carry has been played.

use bevy::prelude::*;

use super::data::{Objective, ObjectiveScript};
use crate::abilities::PermissionStore;
use crate::core::{GameplayClock, PauseReason};

/// Where the sequencer is within the current objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequencerPhase {
    #[default]
    NotStarted,
    /// Playing intro line `line`
    Intro { line: usize },
    /// Waiting for markers
    Active,
    /// Playing line `line` of `marker`'s dialogue
    MarkerDialogue { marker: usize, line: usize },
    /// Every objective done
    Complete,
}

/// Objective progress for the session.
#[derive(Resource, Debug, Default)]
pub struct ObjectiveSequencer {
    objectives: Vec<Objective>,
    index: usize,
    phase: SequencerPhase,
    markers_cleared: Vec<bool>,
    marker_dialogue_played: Vec<bool>,
    just_completed: bool,
}

impl ObjectiveSequencer {
    pub fn new(script: &ObjectiveScript) -> Self {
        Self {
            objectives: script.objectives.clone(),
            ..default()
        }
    }

    pub fn phase(&self) -> SequencerPhase {
        self.phase
    }

    pub fn objective_index(&self) -> usize {
        self.index
    }

    pub fn current_objective(&self) -> Option<&Objective> {
        match self.phase {
            SequencerPhase::NotStarted | SequencerPhase::Complete => None,
            _ => self.objectives.get(self.index),
        }
    }

    pub fn is_dialogue_open(&self) -> bool {
        matches!(
            self.phase,
            SequencerPhase::Intro { .. } | SequencerPhase::MarkerDialogue { .. }
        )
    }

    /// Text of the dialogue line waiting to be advanced.
    pub fn current_line(&self) -> Option<&str> {
        let objective = self.objectives.get(self.index)?;
        let line = match self.phase {
            SequencerPhase::Intro { line } => objective.intro.get(line),
            SequencerPhase::MarkerDialogue { marker, line } => objective.markers.get(marker)?.dialogue.get(line),
            _ => None,
        };
        line.map(String::as_str)
    }

    pub fn is_complete(&self) -> bool {
        self.phase == SequencerPhase::Complete
    }

    /// Whether the sequence finished since the last call.
    pub fn take_just_completed(&mut self) -> bool {
        std::mem::take(&mut self.just_completed)
    }

    /// Begin the first objective.
    pub fn start(&mut self, store: &mut PermissionStore, clock: &mut GameplayClock) {
        if self.phase != SequencerPhase::NotStarted {
            return;
        }
        self.enter_objective(0, store, clock);
    }

    /// Move past the current dialogue line. Returns false when no line is open.
    pub fn advance_dialogue(&mut self, store: &mut PermissionStore, clock: &mut GameplayClock) -> bool {
        let Some(objective) = self.objectives.get(self.index) else {
            return false;
        };

        match self.phase {
            SequencerPhase::Intro { line } => {
                if line + 1 < objective.intro.len() {
                    self.phase = SequencerPhase::Intro { line: line + 1 };
                    self.log_line();
                } else {
                    clock.release(PauseReason::Dialogue);
                    self.show_objective();
                }
                true
            }
            SequencerPhase::MarkerDialogue { marker, line } => {
                if line + 1 < objective.markers[marker].dialogue.len() {
                    self.phase = SequencerPhase::MarkerDialogue { marker, line: line + 1 };
                    self.log_line();
                } else {
                    clock.release(PauseReason::Dialogue);
                    self.after_marker(store, clock);
                }
                true
            }
            _ => false,
        }
    }

    /// Record that the player reached `marker` in the current objective.
    ///
    /// Ignored while dialogue is playing, for markers already cleared, and
    /// (with a warning) for indices the objective does not have.
    pub fn clear_marker(&mut self, marker: usize, store: &mut PermissionStore, clock: &mut GameplayClock) -> bool {
        if self.phase != SequencerPhase::Active {
            return false;
        }
        if marker >= self.markers_cleared.len() {
            warn!(
                "Marker {} does not exist in objective {} ({} markers)",
                marker,
                self.index,
                self.markers_cleared.len()
            );
            return false;
        }
        if self.markers_cleared[marker] {
            return false;
        }

        self.markers_cleared[marker] = true;

        let has_dialogue = !self.objectives[self.index].markers[marker].dialogue.is_empty();
        if has_dialogue && !self.marker_dialogue_played[marker] {
            self.marker_dialogue_played[marker] = true;
            self.phase = SequencerPhase::MarkerDialogue { marker, line: 0 };
            clock.hold(PauseReason::Dialogue);
            self.log_line();
        } else {
            self.after_marker(store, clock);
        }
        true
    }

    fn enter_objective(&mut self, index: usize, store: &mut PermissionStore, clock: &mut GameplayClock) {
        self.index = index;

        let Some(objective) = self.objectives.get(index) else {
            self.phase = SequencerPhase::Complete;
            self.just_completed = true;
            clock.release(PauseReason::Dialogue);
            info!("All objectives complete");
            return;
        };

        let markers = objective.markers.len();
        self.markers_cleared = vec![false; markers];
        self.marker_dialogue_played = vec![false; markers];

        for ability in &objective.unlock {
            store.set(*ability, true);
        }
        for ability in &objective.lock {
            store.set(*ability, false);
        }

        if objective.intro.is_empty() {
            self.show_objective();
        } else {
            self.phase = SequencerPhase::Intro { line: 0 };
            clock.hold(PauseReason::Dialogue);
            self.log_line();
        }
    }

    fn show_objective(&mut self) {
        self.phase = SequencerPhase::Active;
        if let Some(objective) = self.objectives.get(self.index) {
            info!("Objective {}: {}", self.index, objective.text);
        }
    }

    fn after_marker(&mut self, store: &mut PermissionStore, clock: &mut GameplayClock) {
        if self.markers_cleared.iter().all(|cleared| *cleared) {
            self.enter_objective(self.index + 1, store, clock);
        } else {
            self.show_objective();
        }
    }

    fn log_line(&self) {
        if let Some(line) = self.current_line() {
            info!("Dialogue: {}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abilities::Ability;
    use crate::progression::data::MarkerSpec;

    fn script() -> ObjectiveScript {
        ObjectiveScript {
            objectives: vec![
                Objective {
                    text: "Find the training yard".to_string(),
                    intro: vec!["Wake up.".to_string(), "Follow the path.".to_string()],
                    markers: vec![
                        MarkerSpec {
                            dialogue: vec!["The yard is ahead.".to_string()],
                        },
                        MarkerSpec::default(),
                    ],
                    unlock: vec![Ability::Run],
                    lock: vec![],
                },
                Objective {
                    text: "Draw your blade".to_string(),
                    intro: vec![],
                    markers: vec![MarkerSpec::default()],
                    unlock: vec![Ability::EquipWeapon, Ability::UnequipWeapon],
                    lock: vec![Ability::Run],
                },
            ],
        }
    }

    fn started() -> (ObjectiveSequencer, PermissionStore, GameplayClock) {
        let mut sequencer = ObjectiveSequencer::new(&script());
        let mut store = PermissionStore::default();
        let mut clock = GameplayClock::default();
        sequencer.start(&mut store, &mut clock);
        (sequencer, store, clock)
    }

    #[test]
    fn intro_lines_hold_the_clock_until_advanced() {
        let (mut sequencer, mut store, mut clock) = started();

        assert_eq!(sequencer.phase(), SequencerPhase::Intro { line: 0 });
        assert!(store.can_run);
        assert!(clock.is_held_by(PauseReason::Dialogue));
        assert_eq!(sequencer.current_line(), Some("Wake up."));
        assert!(sequencer.is_dialogue_open());

        assert!(sequencer.advance_dialogue(&mut store, &mut clock));
        assert_eq!(sequencer.current_line(), Some("Follow the path."));
        assert!(sequencer.advance_dialogue(&mut store, &mut clock));

        assert_eq!(sequencer.phase(), SequencerPhase::Active);
        assert!(!sequencer.is_dialogue_open());
        assert!(clock.is_running());
        assert!(!sequencer.advance_dialogue(&mut store, &mut clock));
    }

    #[test]
    fn markers_ignored_during_dialogue() {
        let (mut sequencer, mut store, mut clock) = started();
        assert!(!sequencer.clear_marker(1, &mut store, &mut clock));
    }

    #[test]
    fn unknown_marker_is_ignored() {
        let (mut sequencer, mut store, mut clock) = started();
        sequencer.advance_dialogue(&mut store, &mut clock);
        sequencer.advance_dialogue(&mut store, &mut clock);

        assert!(!sequencer.clear_marker(5, &mut store, &mut clock));
        assert_eq!(sequencer.phase(), SequencerPhase::Active);
    }

    #[test]
    fn marker_dialogue_plays_then_objective_advances() {
        let (mut sequencer, mut store, mut clock) = started();
        sequencer.advance_dialogue(&mut store, &mut clock);
        sequencer.advance_dialogue(&mut store, &mut clock);

        assert!(sequencer.clear_marker(0, &mut store, &mut clock));
        assert_eq!(sequencer.phase(), SequencerPhase::MarkerDialogue { marker: 0, line: 0 });
        assert!(!clock.is_running());
        assert!(!sequencer.clear_marker(0, &mut store, &mut clock));

        sequencer.advance_dialogue(&mut store, &mut clock);
        assert_eq!(sequencer.phase(), SequencerPhase::Active);
        assert!(!sequencer.clear_marker(0, &mut store, &mut clock));

        assert!(sequencer.clear_marker(1, &mut store, &mut clock));
        assert_eq!(sequencer.objective_index(), 1);
        assert_eq!(sequencer.phase(), SequencerPhase::Active);
        assert!(store.can_equip_weapon);
        assert!(!store.can_run);
    }

    #[test]
    fn finishing_last_objective_completes_once() {
        let (mut sequencer, mut store, mut clock) = started();
        sequencer.advance_dialogue(&mut store, &mut clock);
        sequencer.advance_dialogue(&mut store, &mut clock);
        sequencer.clear_marker(1, &mut store, &mut clock);
        sequencer.clear_marker(0, &mut store, &mut clock);
        sequencer.advance_dialogue(&mut store, &mut clock);
        sequencer.clear_marker(0, &mut store, &mut clock);

        assert!(sequencer.is_complete());
        assert!(sequencer.current_objective().is_none());
        assert!(sequencer.take_just_completed());
        assert!(!sequencer.take_just_completed());
        assert!(clock.is_running());
    }

    #[test]
    fn empty_script_completes_immediately() {
        let mut sequencer = ObjectiveSequencer::new(&ObjectiveScript::default());
        let mut store = PermissionStore::default();
        let mut clock = GameplayClock::default();
        sequencer.start(&mut store, &mut clock);

        assert!(sequencer.is_complete());
        assert!(clock.is_running());
    }
}
