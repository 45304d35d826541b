//! Weapon and combat timing loaded from an external RON file.
//!
//! Defaults match the shipped `assets/data/gameplay/weapon_gate.ron`, so a
//! missing file still yields a playable setup.

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use super::error::ConfigError;

/// Path of the weapon gate configuration, relative to the working directory.
pub const GATE_CONFIG_PATH: &str = "assets/data/gameplay/weapon_gate.ron";

/// Timings for the weapon and combat gates.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
pub struct GateConfig {
    pub equip: EquipTiming,
    pub attack_chain: Vec<AttackLink>,
}

/// Draw and sheath transition lengths, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct EquipTiming {
    pub draw_duration: f32,
    pub sheath_duration: f32,
}

/// One attack in a combo chain.
///
/// Phases run back to back: windup, active, recovery. The optional combo
/// window is given as normalized clip progress `(open, close)`; those points
/// stand in for the animation events that open and close the window.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AttackLink {
    pub windup: f32,
    pub active: f32,
    pub recovery: f32,
    #[serde(default)]
    pub combo_window: Option<(f32, f32)>,
}

impl Default for EquipTiming {
    fn default() -> Self {
        Self {
            draw_duration: 0.7,
            sheath_duration: 1.0,
        }
    }
}

impl EquipTiming {
    pub fn draw(&self) -> Duration {
        Duration::from_secs_f32(self.draw_duration)
    }

    pub fn sheath(&self) -> Duration {
        Duration::from_secs_f32(self.sheath_duration)
    }
}

impl AttackLink {
    pub fn total(&self) -> Duration {
        Duration::from_secs_f32(self.windup + self.active + self.recovery)
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            equip: EquipTiming::default(),
            attack_chain: vec![
                AttackLink {
                    windup: 0.15,
                    active: 0.2,
                    recovery: 0.35,
                    combo_window: Some((0.45, 0.9)),
                },
                AttackLink {
                    windup: 0.2,
                    active: 0.25,
                    recovery: 0.45,
                    combo_window: None,
                },
            ],
        }
    }
}

impl GateConfig {
    /// Parse and validate a config from RON text.
    pub fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(contents).map_err(|e| ConfigError::ParseError {
            path: "<inline>".to_string(),
            details: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: Self = load_ron(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from [`GATE_CONFIG_PATH`], falling back to defaults.
    pub fn load() -> Self {
        match Self::load_from(GATE_CONFIG_PATH) {
            Ok(config) => {
                info!("Loaded weapon gate config from {}", GATE_CONFIG_PATH);
                config
            }
            Err(ConfigError::FileNotFound(path)) => {
                warn!("Could not find {}. Using defaults.", path);
                Self::default()
            }
            Err(e) => {
                error!("{}. Using defaults.", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("equip.draw_duration", self.equip.draw_duration)?;
        positive("equip.sheath_duration", self.equip.sheath_duration)?;

        if self.attack_chain.is_empty() {
            return Err(ConfigError::invalid("attack_chain", "needs at least one attack"));
        }

        for (i, link) in self.attack_chain.iter().enumerate() {
            non_negative(&format!("attack_chain[{i}].windup"), link.windup)?;
            non_negative(&format!("attack_chain[{i}].active"), link.active)?;
            non_negative(&format!("attack_chain[{i}].recovery"), link.recovery)?;
            positive(
                &format!("attack_chain[{i}]"),
                link.windup + link.active + link.recovery,
            )?;

            if let Some((open, close)) = link.combo_window {
                if !(0.0..=1.0).contains(&open) || !(0.0..=1.0).contains(&close) || open > close
                {
                    return Err(ConfigError::invalid(
                        format!("attack_chain[{i}].combo_window"),
                        format!("expected 0 <= open <= close <= 1, got ({open}, {close})"),
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Read and deserialize any RON data file.
pub fn load_ron<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    if !path.exists() {
        return Err(ConfigError::FileNotFound(display));
    }

    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;

    ron::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: display,
        details: e.to_string(),
    })
}

fn positive(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be positive, got {value}")))
    }
}

fn non_negative(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must not be negative, got {value}")))
    }
}

/// System to load the gate config at startup.
pub fn load_gate_config(mut commands: Commands) {
    commands.insert_resource(GateConfig::load());
}
