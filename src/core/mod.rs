//! Core game module - states, events, pause flag, and tick ordering.
//!
//! This module provides the foundation that all other game systems build upon.

mod events;
mod pause;
mod plugin;
mod states;

pub use events::*;
pub use pause::PauseFlag;
pub use plugin::CorePlugin;
pub use states::*;
