//! Progression scripts loaded from RON files.

use bevy::prelude::*;
use serde::Deserialize;

use crate::abilities::Ability;
use crate::core::{load_ron, ConfigError};

pub const TUTORIAL_PATH: &str = "assets/data/progression/tutorial.ron";
pub const OBJECTIVES_PATH: &str = "assets/data/progression/objectives.ron";

/// One tutorial panel and the exact ability set it leaves unlocked.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct TutorialStep {
    pub title: String,
    #[serde(default)]
    pub abilities: Vec<Ability>,
}

/// Ordered tutorial panels.
#[derive(Resource, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct TutorialScript {
    pub steps: Vec<TutorialStep>,
}

/// A marker the player has to reach, with the lines played on arrival.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct MarkerSpec {
    #[serde(default)]
    pub dialogue: Vec<String>,
}

/// One objective in the story sequence.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Objective {
    pub text: String,
    #[serde(default)]
    pub intro: Vec<String>,
    #[serde(default)]
    pub markers: Vec<MarkerSpec>,
    /// Abilities unlocked when the objective begins
    #[serde(default)]
    pub unlock: Vec<Ability>,
    /// Abilities locked when the objective begins
    #[serde(default)]
    pub lock: Vec<Ability>,
}

/// Ordered objectives.
#[derive(Resource, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ObjectiveScript {
    pub objectives: Vec<Objective>,
}

impl TutorialScript {
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let script: Self = load_ron(path)?;
        if script.steps.is_empty() {
            return Err(ConfigError::Invalid {
                field: "steps".to_string(),
                reason: "tutorial has no steps".to_string(),
            });
        }
        Ok(script)
    }
}

impl ObjectiveScript {
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        load_ron(path)
    }
}

/// Load both progression scripts, falling back to empty scripts.
pub fn load_progression_scripts(mut commands: Commands) {
    let tutorial = match TutorialScript::load_from(TUTORIAL_PATH) {
        Ok(script) => {
            info!("Loaded {} tutorial step(s)", script.steps.len());
            script
        }
        Err(e) => {
            warn!("{}. Tutorial disabled.", e);
            TutorialScript::default()
        }
    };

    let objectives = match ObjectiveScript::load_from(OBJECTIVES_PATH) {
        Ok(script) => {
            info!("Loaded {} objective(s)", script.objectives.len());
            script
        }
        Err(e) => {
            warn!("{}. No objectives.", e);
            ObjectiveScript::default()
        }
    };

    commands.insert_resource(tutorial);
    commands.insert_resource(objectives);
}
