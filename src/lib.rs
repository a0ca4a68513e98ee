//! Flipside - a 2D puzzle-platformer about steering every ball at once.
//!
//! Each level holds one or more balls. Some have mirrored horizontal
//! controls, some fall upwards. The player pushes all of them with the same
//! input until every ball has reached an exit; the screen then fades out,
//! the next level is swapped in behind the blackout and fades back in.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, the pause flag, global events, tick ordering
//! - **Save**: The persisted progress and settings record
//! - **Input**: Per-tick action snapshot and controller detection
//! - **Audio**: Named sounds and music on kira channels
//! - **Localization**: String tables per language
//! - **Fade**: The screen fade that masks level swaps
//! - **Ball**: Per-ball control, pause and exit state machine
//! - **Level**: Level data, completion counting and progression
//! - **UI**: Main menu, pause overlay, HUD
//!
//! Within a frame the sets run Input, Balls, Fade, Level, Presentation, so
//! the level layer always sees every ball's update from the same tick.

pub mod audio;
pub mod ball;
pub mod core;
pub mod fade;
pub mod input;
pub mod level;
pub mod localization;
pub mod save;
pub mod ui;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
///
/// Expects `DefaultPlugins` and the rapier physics plugin to be added by
/// the host app.
pub struct FlipsidePlugin;

impl Plugin for FlipsidePlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Outside collaborators
            .add_plugins((
                save::SavePlugin,
                input::InputPlugin,
                audio::SoundPlugin,
                localization::LocalizationPlugin,
            ))

            // Gameplay
            .add_plugins((fade::FadePlugin, ball::BallPlugin, level::LevelPlugin))

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
