//! Core plugin that sets up game states, events, tick ordering and the camera.

use bevy::prelude::*;

use super::events::*;
use super::pause::PauseFlag;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, MainMenu, InGame)
/// - Global events (ExitReached, LevelCleared, Faded)
/// - The shared pause flag
/// - The chained per-tick system sets
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()

            // Shared context
            .init_resource::<PauseFlag>()

            // Register global events
            .add_event::<ExitReached>()
            .add_event::<LevelCleared>()
            .add_event::<Faded>()

            // Balls first, then fade, then the level layer
            .configure_sets(
                Update,
                (
                    TickSet::Input,
                    TickSet::Balls,
                    TickSet::Fade,
                    TickSet::Level,
                    TickSet::Presentation,
                )
                    .chain(),
            )

            .add_systems(Startup, spawn_camera)

            // Data files are read in Startup, so the menu can come up at once
            .add_systems(OnEnter(GameState::Loading), transition_to_main_menu);
    }
}

/// Marker for the single 2D camera used by gameplay and menus.
#[derive(Component)]
struct MainCamera;

fn spawn_camera(mut commands: Commands) {
    commands.spawn((Camera2d, MainCamera));
}

/// Immediately transition from Loading to MainMenu.
fn transition_to_main_menu(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::MainMenu);
}
