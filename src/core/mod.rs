//! Core game module - states, clock, input, configuration and events.
//!
//! This module provides the foundation that all other game systems build upon.

mod clock;
mod config;
mod error;
mod events;
mod input;
mod plugin;
mod states;

pub use clock::*;
pub use config::*;
pub use error::ConfigError;
pub use events::*;
pub use input::*;
pub use plugin::CorePlugin;
pub use states::*;
