//! Input module - action snapshot and controller classification.

mod actions;
mod controller;
mod plugin;

pub use actions::ActionState;
pub use controller::{ControllerKind, PromptAction};
pub use plugin::InputPlugin;
