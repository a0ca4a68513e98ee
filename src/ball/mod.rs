//! Ball module - the player-steered balls and their state machine.

mod components;
mod error;
mod lifecycle;
mod movement;
mod plugin;
mod tuning;

pub use components::*;
pub use error::ConfigError;
pub use lifecycle::{spawn_ball, EXIT_SOUND};
pub use movement::JUMP_SOUND;
pub use plugin::BallPlugin;
pub use tuning::BallTuning;
