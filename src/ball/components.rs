//! Ball components and the per-ball state machine.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Collision group of static level geometry. Ground checks only see this.
pub const TERRAIN_GROUP: Group = Group::GROUP_1;
/// Collision group of balls.
pub const BALL_GROUP: Group = Group::GROUP_2;
/// Collision group of exit sensors.
pub const EXIT_GROUP: Group = Group::GROUP_3;

/// Marker component for ball entities.
#[derive(Component)]
pub struct Ball;

/// Per-ball control inversions.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BallInversion {
    /// Horizontal input pushes the other way
    pub invert_x: bool,
    /// Gravity, jumps and the ground probe point up
    pub invert_y: bool,
}

impl BallInversion {
    pub fn horizontal_sign(&self) -> f32 {
        if self.invert_x { -1.0 } else { 1.0 }
    }

    pub fn vertical_sign(&self) -> f32 {
        if self.invert_y { -1.0 } else { 1.0 }
    }
}

/// Body values frozen while a ball is paused.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySnapshot {
    pub linvel: Vec2,
    pub angvel: f32,
    pub gravity_scale: f32,
}

/// Progress of a fading ball.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FadeStep {
    /// Still visible at this opacity
    Visible(f32),
    /// Opacity reached zero; despawn
    Gone,
    /// The ball is not fading
    NotFading,
}

/// Ball control state.
///
/// Balls start `Controllable`. The shared pause flag moves them between
/// `Controllable` and `Paused`; reaching an exit while `Controllable` moves
/// them to `Fading`, which only ends with the entity being despawned.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub enum BallState {
    #[default]
    Controllable,
    Paused(BodySnapshot),
    Fading { opacity: f32 },
}

impl BallState {
    pub fn is_controllable(&self) -> bool {
        matches!(self, BallState::Controllable)
    }

    /// Follow the pause flag. Freezes the body on pause and restores exactly
    /// what was frozen on resume. Returns true if the state changed.
    pub fn sync_pause(
        &mut self,
        paused: bool,
        velocity: &mut Velocity,
        gravity: &mut GravityScale,
    ) -> bool {
        match *self {
            BallState::Controllable if paused => {
                *self = BallState::Paused(BodySnapshot {
                    linvel: velocity.linvel,
                    angvel: velocity.angvel,
                    gravity_scale: gravity.0,
                });
                *velocity = Velocity::zero();
                gravity.0 = 0.0;
                true
            }
            BallState::Paused(snapshot) if !paused => {
                velocity.linvel = snapshot.linvel;
                velocity.angvel = snapshot.angvel;
                gravity.0 = snapshot.gravity_scale;
                *self = BallState::Controllable;
                true
            }
            _ => false,
        }
    }

    /// An exit was touched. Only a controllable ball accepts it; contacts
    /// while paused or already fading are dropped.
    pub fn reach_exit(&mut self) -> bool {
        if self.is_controllable() {
            *self = BallState::Fading { opacity: 1.0 };
            true
        } else {
            false
        }
    }

    /// Lower the opacity of a fading ball by `rate * dt`.
    pub fn fade(&mut self, dt: f32, rate: f32) -> FadeStep {
        let BallState::Fading { opacity } = self else {
            return FadeStep::NotFading;
        };
        *opacity -= rate * dt;
        if *opacity <= 0.0 {
            *opacity = 0.0;
            FadeStep::Gone
        } else {
            FadeStep::Visible(*opacity)
        }
    }
}

/// Jump eligibility, kept apart from [`BallState`].
#[derive(Component, Debug, Clone, Default)]
pub struct JumpControl {
    can_jump: bool,
    cooldown: f32,
}

impl JumpControl {
    pub fn can_jump(&self) -> bool {
        self.can_jump
    }

    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    /// Count the post-jump cooldown down.
    pub fn tick(&mut self, dt: f32) {
        if self.cooldown > 0.0 {
            self.cooldown = (self.cooldown - dt).max(0.0);
        }
    }

    /// Apply the latest ground probe result.
    pub fn refresh(&mut self, grounded: bool) {
        self.can_jump = grounded && self.cooldown <= 0.0;
    }

    /// Use up the jump if one is available and start the cooldown.
    pub fn consume(&mut self, cooldown: f32) -> bool {
        if !self.can_jump {
            return false;
        }
        self.can_jump = false;
        self.cooldown = cooldown;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_round_trip_restores_body_exactly() {
        let mut state = BallState::Controllable;
        let mut velocity = Velocity {
            linvel: Vec2::new(123.5, -42.25),
            angvel: 3.5,
        };
        let mut gravity = GravityScale(-1.75);

        assert!(state.sync_pause(true, &mut velocity, &mut gravity));
        assert!(matches!(state, BallState::Paused(_)));
        assert_eq!(velocity.linvel, Vec2::ZERO);
        assert_eq!(velocity.angvel, 0.0);
        assert_eq!(gravity.0, 0.0);

        // Still paused: nothing changes
        assert!(!state.sync_pause(true, &mut velocity, &mut gravity));

        assert!(state.sync_pause(false, &mut velocity, &mut gravity));
        assert_eq!(state, BallState::Controllable);
        assert_eq!(velocity.linvel, Vec2::new(123.5, -42.25));
        assert_eq!(velocity.angvel, 3.5);
        assert_eq!(gravity.0, -1.75);
    }

    #[test]
    fn exit_only_accepted_when_controllable() {
        let mut paused = BallState::Paused(BodySnapshot {
            linvel: Vec2::ZERO,
            angvel: 0.0,
            gravity_scale: 1.0,
        });
        assert!(!paused.reach_exit());
        assert!(matches!(paused, BallState::Paused(_)));

        let mut state = BallState::Controllable;
        assert!(state.reach_exit());
        assert_eq!(state, BallState::Fading { opacity: 1.0 });
        assert!(!state.reach_exit());
    }

    #[test]
    fn fading_ignores_pause() {
        let mut state = BallState::Fading { opacity: 0.5 };
        let mut velocity = Velocity::linear(Vec2::X);
        let mut gravity = GravityScale(1.0);

        assert!(!state.sync_pause(true, &mut velocity, &mut gravity));
        assert_eq!(velocity.linvel, Vec2::X);
    }

    #[test]
    fn fade_reaches_zero_within_a_second() {
        let mut state = BallState::Controllable;
        assert_eq!(state.fade(0.1, 1.0), FadeStep::NotFading);

        state.reach_exit();
        let dt = 1.0 / 60.0;
        let mut ticks = 0;
        loop {
            ticks += 1;
            match state.fade(dt, 1.0) {
                FadeStep::Visible(opacity) => assert!(opacity > 0.0 && opacity < 1.0),
                FadeStep::Gone => break,
                FadeStep::NotFading => unreachable!(),
            }
            assert!(ticks <= 61, "ball should be gone after one second");
        }
        assert!(ticks >= 59);
    }

    #[test]
    fn jump_needs_ground_and_elapsed_cooldown() {
        let mut jump = JumpControl::default();
        assert!(!jump.consume(0.25));

        jump.refresh(true);
        assert!(jump.can_jump());
        assert!(jump.consume(0.25));
        assert!(!jump.can_jump());

        // Grounded again, but still cooling down
        jump.refresh(true);
        assert!(!jump.can_jump());

        jump.tick(0.1);
        jump.refresh(true);
        assert!(!jump.can_jump());

        jump.tick(0.2);
        assert_eq!(jump.cooldown(), 0.0);
        jump.refresh(false);
        assert!(!jump.can_jump());
        jump.refresh(true);
        assert!(jump.can_jump());
    }

    #[test]
    fn inversion_signs() {
        let normal = BallInversion::default();
        let flipped = BallInversion {
            invert_x: true,
            invert_y: true,
        };
        assert_eq!(normal.horizontal_sign(), 1.0);
        assert_eq!(normal.vertical_sign(), 1.0);
        assert_eq!(flipped.horizontal_sign(), -1.0);
        assert_eq!(flipped.vertical_sign(), -1.0);
    }
}
