//! Level module - level data, the completion counter and level progression.

mod data;
mod error;
mod plugin;
mod progress;
mod spawning;

pub use data::{BallDef, ExitDef, LevelDefinition, LevelSequence, PlatformDef, LEVELS_PATH};
pub use error::LevelError;
pub use plugin::{start_level, LevelPlugin};
pub use progress::{Advance, ClearOutcome, LevelProgress};
pub use spawning::{spawn_level, Dormant, ExitZone, LevelRoot, Platform};
