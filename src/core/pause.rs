//! Shared pause flag.

use bevy::prelude::*;

/// Process-wide pause flag read by every ball and the level layer each tick.
///
/// Only [`PauseFlag::set`] mutates it.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PauseFlag {
    paused: bool,
}

impl PauseFlag {
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set(&mut self, paused: bool) {
        if self.paused != paused {
            debug!("Pause flag -> {}", paused);
        }
        self.paused = paused;
    }
}
