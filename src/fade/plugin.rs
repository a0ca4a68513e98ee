//! Fade plugin - drives the screen fade and mirrors it onto a UI overlay.

use bevy::prelude::*;

use super::controller::FadeController;
use crate::core::{Faded, TickSet};

/// Fade plugin - owns the single screen fade used to mask content swaps.
pub struct FadePlugin;

impl Plugin for FadePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FadeController>()
            .add_systems(Startup, spawn_fade_overlay)
            .add_systems(Update, advance_fade.in_set(TickSet::Fade))
            .add_systems(Update, sync_fade_overlay.in_set(TickSet::Presentation));
    }
}

/// Marker for the full-screen fade overlay node.
#[derive(Component)]
struct FadeOverlay;

fn spawn_fade_overlay(mut commands: Commands) {
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(Color::BLACK.with_alpha(0.0)),
        // Above menus and the pause overlay
        GlobalZIndex(i32::MAX),
        FadeOverlay,
    ));
}

/// Tick the fade and forward a completed fade-out's cue as a [`Faded`] event.
fn advance_fade(time: Res<Time>, mut fade: ResMut<FadeController>, mut faded: EventWriter<Faded>) {
    if let Some(cue) = fade.tick(time.delta_secs()) {
        debug!("Fade-out complete, cue {:?}", cue);
        faded.send(Faded { cue });
    }
}

fn sync_fade_overlay(
    fade: Res<FadeController>,
    mut overlay: Query<&mut BackgroundColor, With<FadeOverlay>>,
) {
    if !fade.is_changed() {
        return;
    }
    for mut color in overlay.iter_mut() {
        color.0 = Color::BLACK.with_alpha(fade.alpha());
    }
}
