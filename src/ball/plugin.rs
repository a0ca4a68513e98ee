//! Ball plugin - per-ball state machines, run before the level layer.

use bevy::prelude::*;

use super::lifecycle::*;
use super::movement::*;
use super::tuning::load_ball_tuning;
use crate::core::{GameState, TickSet};

/// Ball plugin - handles ball control, pausing, exits and fade-out.
pub struct BallPlugin;

impl Plugin for BallPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_ball_tuning)
            .add_systems(
                Update,
                (
                    validate_new_balls,
                    sync_ball_pause,
                    tick_jump_cooldowns,
                    drive_balls,
                    detect_exit_contacts,
                    reach_exits,
                    fade_out_balls,
                )
                    .chain()
                    .in_set(TickSet::Balls)
                    .run_if(in_state(GameState::InGame)),
            );
    }
}
