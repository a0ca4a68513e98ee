//! Flipside - Entry Point
//!
//! Controls:
//! - A/D or arrows: Push every ball (mirrored balls go the other way)
//! - Space / W / Up: Jump
//! - Escape: Pause
//!
//! Gamepads: left stick or d-pad to push, South to jump, Start to pause.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Flipside".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(100.0))

        // Our game plugin
        .add_plugins(flipside::FlipsidePlugin)

        .run();
}
