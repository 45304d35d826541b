//! Animation module - the presentation boundary of the gates.

mod params;
mod plugin;
mod sink;

pub use params::AnimatorParams;
pub use plugin::AnimationPlugin;
pub use sink::*;
