//! In-game HUD - level name, balls remaining and button prompts.

use bevy::prelude::*;

use crate::core::{GameState, TickSet};
use crate::input::{ActionState, PromptAction};
use crate::level::{LevelProgress, LevelSequence};
use crate::localization::Translations;

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Text showing the current level's name.
#[derive(Component)]
pub struct LevelNameText;

/// Text showing how many balls are still in play.
#[derive(Component)]
pub struct BallCountText;

/// Button prompt line, follows the active controller.
#[derive(Component)]
pub struct PromptText;

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnExit(GameState::InGame), cleanup_hud)
        .add_systems(
            Update,
            (update_level_text, update_prompt_text)
                .in_set(TickSet::Presentation)
                .run_if(in_state(GameState::InGame)),
        );
}

fn hud_text(text: &str, size: f32) -> (Text, TextFont, TextColor) {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(Color::srgb(0.85, 0.85, 0.9)),
    )
}

/// Spawn the HUD UI.
fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::SpaceBetween,
                padding: UiRect::all(Val::Px(20.0)),
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            // Top-left: level name and count
            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Column,
                    ..default()
                })
                .with_children(|top| {
                    top.spawn((hud_text("", 28.0), LevelNameText));
                    top.spawn((hud_text("", 18.0), BallCountText));
                });

            // Bottom: prompts
            parent.spawn((hud_text("", 16.0), PromptText));
        });
}

/// Keep the level name and ball count current.
fn update_level_text(
    progress: Res<LevelProgress>,
    sequence: Res<LevelSequence>,
    translations: Res<Translations>,
    mut names: Query<&mut Text, (With<LevelNameText>, Without<BallCountText>)>,
    mut counts: Query<&mut Text, (With<BallCountText>, Without<LevelNameText>)>,
    fresh: Query<(), Added<HudRoot>>,
) {
    if !progress.is_changed() && !translations.is_changed() && fresh.is_empty() {
        return;
    }

    let name = progress
        .current()
        .and_then(|level| sequence.get(level))
        .map(|def| translations.text(&def.name))
        .unwrap_or_default();
    for mut text in names.iter_mut() {
        text.0.clone_from(&name);
    }

    let count = format!(
        "{}: {}",
        translations.text("hud.balls_remaining"),
        progress.remaining()
    );
    for mut text in counts.iter_mut() {
        text.0.clone_from(&count);
    }
}

/// Show the prompts for whichever device was used last.
fn update_prompt_text(
    actions: Res<ActionState>,
    translations: Res<Translations>,
    mut prompts: Query<&mut Text, With<PromptText>>,
) {
    let line = format!(
        "{}    {}",
        translations.text(&actions.controller.prompt_key(PromptAction::Jump)),
        translations.text(&actions.controller.prompt_key(PromptAction::Pause)),
    );
    for mut text in prompts.iter_mut() {
        if text.0 != line {
            text.0 = line.clone();
        }
    }
}

/// Clean up HUD when leaving game.
fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
