//! Global events used for cross-system communication.
//!
//! Balls report exits, the level layer reacts to cleared levels, and the
//! fade layer hands back the cue it was given once the screen is covered.

use bevy::prelude::*;

/// What to do once a fade-out has fully covered the screen.
///
/// Passed into the fade request and handed back exactly once through
/// [`Faded`], so no listener has to subscribe or unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionCue {
    /// Despawn every other level's content and reveal this level.
    SwapLevel { level: usize },
    /// Leave gameplay for the main menu.
    ReturnToMenu,
}

/// Sent when a ball's collider starts touching an exit sensor.
///
/// Raw contact; the ball state machine decides whether it counts.
#[derive(Event, Debug, Clone, Copy)]
pub struct ExitReached {
    pub ball: Entity,
}

/// Sent once per level when the last ball has cleared.
#[derive(Event, Debug, Clone, Copy)]
pub struct LevelCleared {
    /// Index of the level that was completed
    pub level: usize,
}

/// Sent when a fade-out completes, after opacity has clamped to 1.
#[derive(Event, Debug, Clone, Copy)]
pub struct Faded {
    pub cue: TransitionCue,
}
