//! Level progression and ball completion counting.
//!
//! [`LevelProgress`] is the single owner of the current level id and the
//! number of balls still in play. Balls register on spawn and clear on exit;
//! the first clear that takes the count to zero reports
//! [`ClearOutcome::LevelComplete`], and no later clear in the same level does.

use bevy::prelude::*;

use super::error::LevelError;
use crate::save::SaveData;

/// Result of clearing one ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// Balls are still in play.
    Remaining(u32),
    /// This clear emptied the level. Reported once per level.
    LevelComplete,
    /// The level was already complete; nothing happens.
    Ignored,
}

/// What [`LevelProgress::load_next`] decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Move on to this level.
    Next(usize),
    /// The last level was cleared; go back to the menu.
    Finished,
}

/// Current level, remaining balls and transition bookkeeping.
#[derive(Resource, Debug, Default)]
pub struct LevelProgress {
    current: Option<usize>,
    remaining: u32,
    completed: bool,
    in_transition: bool,
}

impl LevelProgress {
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Balls still in play in the current level.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn in_transition(&self) -> bool {
        self.in_transition
    }

    /// Make `id` the current level (`None` for no level) and reset the
    /// ball count.
    pub fn set_level_id(&mut self, id: Option<usize>, sequence_len: usize) -> Result<(), LevelError> {
        if let Some(id) = id {
            if id >= sequence_len {
                return Err(LevelError::InvalidLevel {
                    id,
                    len: sequence_len,
                });
            }
        }
        self.current = id;
        self.remaining = 0;
        self.completed = false;
        Ok(())
    }

    /// A ball entered play.
    pub fn register_ball(&mut self) {
        self.remaining += 1;
    }

    /// A ball reached its exit.
    pub fn clear_ball(&mut self) -> ClearOutcome {
        if self.completed {
            return ClearOutcome::Ignored;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.completed = true;
            ClearOutcome::LevelComplete
        } else {
            ClearOutcome::Remaining(self.remaining)
        }
    }

    /// Decide where to go after the current level and record it in `save`.
    ///
    /// Marks a transition as running until [`finish_transition`]
    /// (Self::finish_transition) is called at the swap point; a second call
    /// before then is rejected and changes nothing.
    pub fn load_next(&mut self, sequence_len: usize, save: &mut SaveData) -> Result<Advance, LevelError> {
        if self.in_transition {
            return Err(LevelError::TransitionInProgress);
        }
        let current = self.current.ok_or(LevelError::NoActiveLevel)?;

        let advance = if current + 1 >= sequence_len {
            save.clear_latest_level();
            Advance::Finished
        } else {
            let next = current + 1;
            self.set_level_id(Some(next), sequence_len)?;
            save.record_level_entered(next);
            Advance::Next(next)
        };

        self.in_transition = true;
        Ok(advance)
    }

    /// The swap point of the running transition was reached.
    pub fn finish_transition(&mut self) {
        self.in_transition = false;
    }

    /// Forget the current level entirely (leaving gameplay).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
