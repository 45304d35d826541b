//! Abilities module - permission flags that gate player capabilities.

mod plugin;
mod store;

pub use plugin::AbilitiesPlugin;
pub use store::*;
