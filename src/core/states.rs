//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. Ball control and
//! level progression only run in `InGame`, menu systems only in `MainMenu`.
//! Pausing is not a state: it is the [`PauseFlag`](super::PauseFlag)
//! resource, so paused balls keep their entities and snapshots.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` while data files are read
/// - Move to `MainMenu` when loading completes
/// - Enter `InGame` when the player starts or continues
/// - Return to `MainMenu` after the last level or from the pause overlay
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files and the save record
    #[default]
    Loading,
    /// Main menu / title screen
    MainMenu,
    /// Active gameplay
    InGame,
}

/// Per-tick ordering of gameplay work.
///
/// Ball entities always update before the level layer reads the aggregate
/// ball count within the same tick.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSet {
    /// Sample devices into the action snapshot
    Input,
    /// Per-ball state machines
    Balls,
    /// Screen fade animation and completion cues
    Fade,
    /// Level progression, pause requests, content swaps
    Level,
    /// HUD and overlays
    Presentation,
}
