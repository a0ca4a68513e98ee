//! Screen fade - a one-second opacity ramp that masks level swaps.

mod controller;
mod plugin;

pub use controller::{FadeController, FadeError, FadePhase, FADE_RATE};
pub use plugin::FadePlugin;
