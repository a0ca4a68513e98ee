//! Ball movement: pause freezing, horizontal push, jumping and ground checks.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::*;
use super::tuning::BallTuning;
use crate::audio::PlaySound;
use crate::core::PauseFlag;
use crate::input::ActionState;
use crate::level::Dormant;

/// Sound played when a ball jumps.
pub const JUMP_SOUND: &str = "jump";

/// Move every ball between `Controllable` and `Paused` to match the flag.
pub fn sync_ball_pause(
    pause: Res<PauseFlag>,
    mut balls: Query<(&mut BallState, &mut Velocity, &mut GravityScale), With<Ball>>,
) {
    let paused = pause.is_paused();
    for (mut state, mut velocity, mut gravity) in balls.iter_mut() {
        if matches!(*state, BallState::Fading { .. }) {
            continue;
        }
        state.sync_pause(paused, &mut velocity, &mut gravity);
    }
}

/// Jump cooldowns run down every tick whatever the ball is doing.
pub fn tick_jump_cooldowns(time: Res<Time>, mut jumps: Query<&mut JumpControl, With<Ball>>) {
    let dt = time.delta_secs();
    for mut jump in jumps.iter_mut() {
        if jump.cooldown() > 0.0 {
            jump.tick(dt);
        }
    }
}

/// Apply input to every controllable ball, then refresh jump eligibility.
///
/// Order per ball: horizontal impulse, jump (if already eligible), ground
/// probe. The probe points along gravity, so it faces up for `invert_y`.
pub fn drive_balls(
    time: Res<Time>,
    actions: Res<ActionState>,
    tuning: Res<BallTuning>,
    rapier_context: Query<&RapierContext>,
    mut balls: Query<
        (
            Entity,
            &Transform,
            &BallState,
            &BallInversion,
            &mut JumpControl,
            &mut ExternalImpulse,
        ),
        (With<Ball>, Without<Dormant>),
    >,
    mut sounds: EventWriter<PlaySound>,
) {
    let dt = time.delta_secs();
    let context = rapier_context.get_single().ok();
    let mut jumped = false;

    for (entity, transform, state, inversion, mut jump, mut impulse) in balls.iter_mut() {
        if !state.is_controllable() {
            continue;
        }

        let push = actions.horizontal() * inversion.horizontal_sign();
        if push != 0.0 {
            impulse.impulse.x += push * tuning.move_force * dt;
        }

        if actions.jump_pressed && jump.consume(tuning.jump_cooldown) {
            impulse.impulse.y += tuning.jump_impulse * inversion.vertical_sign();
            jumped = true;
        }

        let grounded = context.is_some_and(|context| {
            let ray_origin = transform.translation.truncate();
            let ray_dir = Vec2::NEG_Y * inversion.vertical_sign();
            let max_dist = tuning.radius + tuning.ground_probe;

            context
                .cast_ray(
                    ray_origin,
                    ray_dir,
                    max_dist,
                    true,
                    QueryFilter::new()
                        .exclude_sensors()
                        .exclude_collider(entity)
                        .groups(CollisionGroups::new(Group::ALL, TERRAIN_GROUP)),
                )
                .is_some()
        });
        jump.refresh(grounded);
    }

    // One sound however many balls jumped together
    if jumped {
        sounds.send(PlaySound::new(JUMP_SOUND));
    }
}
