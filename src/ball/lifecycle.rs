//! Ball creation, exits and fade-out.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::*;
use super::error::ConfigError;
use super::tuning::BallTuning;
use crate::audio::PlaySound;
use crate::core::{ExitReached, LevelCleared};
use crate::level::{BallDef, ClearOutcome, ExitZone, LevelProgress};

/// Sound played when a ball reaches its exit.
pub const EXIT_SOUND: &str = "ball_exit";

/// Spawn a ball and register it with the level's completion counter.
pub fn spawn_ball(
    commands: &mut Commands,
    def: &BallDef,
    tuning: &BallTuning,
    progress: &mut LevelProgress,
) -> Entity {
    let inversion = BallInversion {
        invert_x: def.invert_x,
        invert_y: def.invert_y,
    };
    let color = match (def.invert_x, def.invert_y) {
        (false, false) => Color::srgb(0.9, 0.9, 0.85),
        (true, false) => Color::srgb(0.95, 0.55, 0.2),
        (false, true) => Color::srgb(0.3, 0.6, 0.95),
        (true, true) => Color::srgb(0.75, 0.4, 0.9),
    };

    let entity = commands
        .spawn((
            Ball,
            BallState::Controllable,
            inversion,
            JumpControl::default(),
            Sprite {
                color,
                custom_size: Some(Vec2::splat(tuning.radius * 2.0)),
                ..default()
            },
            Transform::from_xyz(def.position.0, def.position.1, 1.0),
            // Rapier physics components
            RigidBody::Dynamic,
            Collider::ball(tuning.radius),
            Velocity::zero(),
            // Upside-down balls fall up
            GravityScale(tuning.gravity_scale * inversion.vertical_sign()),
            ExternalImpulse::default(),
            ActiveEvents::COLLISION_EVENTS,
            CollisionGroups::new(BALL_GROUP, TERRAIN_GROUP | BALL_GROUP | EXIT_GROUP),
        ))
        .id();

    progress.register_ball();
    entity
}

fn require(entity: Entity, present: bool, component: &'static str) -> Result<(), ConfigError> {
    if present {
        Ok(())
    } else {
        Err(ConfigError::MissingComponent { entity, component })
    }
}

/// Refuse to run with a half-built ball.
///
/// # Panics
/// If a new [`Ball`] lacks any component the state machine depends on.
#[allow(clippy::type_complexity)]
pub fn validate_new_balls(
    new_balls: Query<
        (
            Entity,
            Has<BallState>,
            Has<BallInversion>,
            Has<JumpControl>,
            Has<Velocity>,
            Has<GravityScale>,
            Has<ExternalImpulse>,
            Has<Sprite>,
        ),
        Added<Ball>,
    >,
) {
    for (entity, state, inversion, jump, velocity, gravity, impulse, sprite) in new_balls.iter() {
        let checked = require(entity, state, "BallState")
            .and(require(entity, inversion, "BallInversion"))
            .and(require(entity, jump, "JumpControl"))
            .and(require(entity, velocity, "Velocity"))
            .and(require(entity, gravity, "GravityScale"))
            .and(require(entity, impulse, "ExternalImpulse"))
            .and(require(entity, sprite, "Sprite"));

        if let Err(e) = checked {
            error!("{}", e);
            panic!("{}", e);
        }
    }
}

/// Turn physics contacts between balls and exit sensors into [`ExitReached`].
pub fn detect_exit_contacts(
    mut collisions: EventReader<CollisionEvent>,
    balls: Query<(), With<Ball>>,
    exits: Query<(), With<ExitZone>>,
    mut reached: EventWriter<ExitReached>,
) {
    for event in collisions.read() {
        let CollisionEvent::Started(a, b, _) = event else {
            continue;
        };
        let ball = if balls.contains(*a) && exits.contains(*b) {
            *a
        } else if balls.contains(*b) && exits.contains(*a) {
            *b
        } else {
            continue;
        };
        reached.send(ExitReached { ball });
    }
}

/// Handle balls touching their exit.
///
/// A controllable ball plays the exit sound, flips its gravity back if it
/// was upside down, clears itself from the level count and starts fading.
/// Contacts for paused or fading balls are dropped.
pub fn reach_exits(
    mut exits: EventReader<ExitReached>,
    mut progress: ResMut<LevelProgress>,
    mut balls: Query<(&mut BallState, &BallInversion, &mut GravityScale), With<Ball>>,
    mut sounds: EventWriter<PlaySound>,
    mut cleared: EventWriter<LevelCleared>,
) {
    for event in exits.read() {
        let Ok((mut state, inversion, mut gravity)) = balls.get_mut(event.ball) else {
            continue;
        };
        if !state.reach_exit() {
            debug!("Dropping exit contact for {:?} in {:?}", event.ball, *state);
            continue;
        }

        if inversion.invert_y {
            gravity.0 = -gravity.0;
        }
        sounds.send(PlaySound::new(EXIT_SOUND));

        match progress.clear_ball() {
            ClearOutcome::LevelComplete => {
                if let Some(level) = progress.current() {
                    info!("Level {} cleared", level);
                    cleared.send(LevelCleared { level });
                }
            }
            ClearOutcome::Remaining(remaining) => {
                debug!("Ball {:?} out, {} remaining", event.ball, remaining);
            }
            ClearOutcome::Ignored => {}
        }
    }
}

/// Fade balls that reached their exit and despawn them once invisible.
pub fn fade_out_balls(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<BallTuning>,
    mut balls: Query<(Entity, &mut BallState, &mut Sprite), With<Ball>>,
) {
    let dt = time.delta_secs();
    for (entity, mut state, mut sprite) in balls.iter_mut() {
        if !matches!(*state, BallState::Fading { .. }) {
            continue;
        }
        match state.fade(dt, tuning.fade_rate) {
            FadeStep::Visible(opacity) => sprite.color.set_alpha(opacity),
            FadeStep::Gone => commands.entity(entity).despawn_recursive(),
            FadeStep::NotFading => {}
        }
    }
}
