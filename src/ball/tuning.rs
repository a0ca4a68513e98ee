//! Ball tuning loaded from an external RON file.
//!
//! Allows tweaking movement feel without recompilation.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;

/// Ball tuning loaded from assets/data/tuning/ball.ron.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BallTuning {
    /// Collider radius in pixels
    pub radius: f32,
    /// Horizontal impulse per second of held input
    pub move_force: f32,
    /// Impulse applied on jump
    pub jump_impulse: f32,
    /// Seconds after a jump before the ground check may re-arm it
    pub jump_cooldown: f32,
    /// How far past the collider the ground probe reaches
    pub ground_probe: f32,
    /// Opacity lost per second once a ball reached its exit
    pub fade_rate: f32,
    /// Gravity scale magnitude; the sign comes from the ball's inversion
    pub gravity_scale: f32,
}

impl Default for BallTuning {
    fn default() -> Self {
        Self {
            radius: 16.0,
            move_force: 900.0,
            jump_impulse: 260.0,
            jump_cooldown: 0.2,
            ground_probe: 4.0,
            fade_rate: 1.0,
            gravity_scale: 1.0,
        }
    }
}

impl BallTuning {
    /// Load tuning from RON file.
    pub fn load() -> Self {
        let path = "assets/data/tuning/ball.ron";
        match fs::read_to_string(path) {
            Ok(contents) => match ron::from_str(&contents) {
                Ok(tuning) => {
                    info!("Loaded ball tuning from {}", path);
                    tuning
                }
                Err(e) => {
                    error!("Failed to parse {}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Could not read {}: {}. Using defaults.", path, e);
                Self::default()
            }
        }
    }
}

/// System to load ball tuning at startup.
///
/// Tuning inserted by the host app before startup is kept.
pub fn load_ball_tuning(mut commands: Commands, existing: Option<Res<BallTuning>>) {
    if existing.is_none() {
        commands.insert_resource(BallTuning::load());
    }
}
