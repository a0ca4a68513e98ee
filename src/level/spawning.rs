//! Entity spawning for level content.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::data::LevelDefinition;
use super::progress::LevelProgress;
use crate::ball::{spawn_ball, BallTuning, BALL_GROUP, EXIT_GROUP, TERRAIN_GROUP};

/// Root of one level's content. Despawning it removes the whole level.
#[derive(Component, Debug)]
pub struct LevelRoot {
    pub level: usize,
}

/// Static level geometry.
#[derive(Component)]
pub struct Platform;

/// Exit trigger volume.
#[derive(Component)]
pub struct ExitZone;

/// Content that was spawned ahead of its swap and is not simulated yet.
#[derive(Component)]
pub struct Dormant;

/// Spawn all content of `def` under a new [`LevelRoot`].
///
/// Balls register with `progress` as they are created. With `dormant` the
/// level is hidden and its physics disabled until [`activate_dormant`]
/// wakes it.
pub fn spawn_level(
    commands: &mut Commands,
    level: usize,
    def: &LevelDefinition,
    tuning: &BallTuning,
    progress: &mut LevelProgress,
    dormant: bool,
) -> Entity {
    let visibility = if dormant {
        Visibility::Hidden
    } else {
        Visibility::Inherited
    };
    let root = commands
        .spawn((LevelRoot { level }, Transform::default(), visibility))
        .id();

    let mut children = Vec::new();

    for platform in &def.platforms {
        let (w, h) = platform.size;
        children.push(
            commands
                .spawn((
                    Platform,
                    Sprite {
                        color: Color::srgb(0.25, 0.27, 0.32),
                        custom_size: Some(Vec2::new(w, h)),
                        ..default()
                    },
                    Transform::from_xyz(platform.center.0, platform.center.1, 0.0),
                    Collider::cuboid(w / 2.0, h / 2.0),
                    CollisionGroups::new(TERRAIN_GROUP, Group::ALL),
                ))
                .id(),
        );
    }

    for exit in &def.exits {
        let (w, h) = exit.size;
        children.push(
            commands
                .spawn((
                    ExitZone,
                    Sprite {
                        color: Color::srgba(0.3, 0.9, 0.5, 0.6),
                        custom_size: Some(Vec2::new(w, h)),
                        ..default()
                    },
                    Transform::from_xyz(exit.center.0, exit.center.1, 0.5),
                    Collider::cuboid(w / 2.0, h / 2.0),
                    Sensor,
                    CollisionGroups::new(EXIT_GROUP, BALL_GROUP),
                ))
                .id(),
        );
    }

    let first_ball = children.len();
    for ball in &def.balls {
        children.push(spawn_ball(commands, ball, tuning, progress));
    }

    if dormant {
        for (i, &child) in children.iter().enumerate() {
            let mut entity = commands.entity(child);
            entity.insert((Dormant, ColliderDisabled));
            if i >= first_ball {
                entity.insert(RigidBodyDisabled);
            }
        }
    }

    commands.entity(root).add_children(&children);

    info!(
        "Spawned level {} '{}' ({} balls{})",
        level,
        def.name,
        def.balls.len(),
        if dormant { ", dormant" } else { "" }
    );
    root
}

/// Enable physics on every dormant entity.
pub fn activate_dormant(commands: &mut Commands, dormant: &Query<Entity, With<Dormant>>) {
    for entity in dormant.iter() {
        commands
            .entity(entity)
            .remove::<(Dormant, ColliderDisabled, RigidBodyDisabled)>();
    }
}
