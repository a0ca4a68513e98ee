//! UI plugin - menus, pause overlay and HUD.

use bevy::prelude::*;

use super::hud;
use super::menu::*;
use super::options::handle_setting_commands;
use crate::audio::PlayMusic;
use crate::core::{GameState, PauseFlag, TickSet, TransitionCue};
use crate::fade::FadeController;
use crate::level::{start_level, LevelProgress, LevelSequence};

/// Track played behind the main menu.
const MENU_MUSIC: &str = "menu";

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // Setup HUD systems
        hud::setup_hud_systems(app);

        app.init_resource::<MenuStack>()
            .init_resource::<MenuCursor>()
            .add_event::<MenuCommand>()

            // Main menu
            .add_systems(OnEnter(GameState::MainMenu), open_main_menu)
            .add_systems(OnExit(GameState::MainMenu), close_menus)
            .add_systems(OnExit(GameState::InGame), close_menus)

            // Input first, then handlers, then the page on screen
            .add_systems(
                Update,
                (
                    read_menu_actions,
                    read_menu_pointer,
                    handle_navigation,
                    handle_game_commands,
                    handle_setting_commands,
                    sync_pause_menu.run_if(in_state(GameState::InGame)),
                    rebuild_menu,
                    highlight_menu,
                )
                    .chain()
                    .in_set(TickSet::Presentation),
            );
    }
}

fn open_main_menu(mut stack: ResMut<MenuStack>, mut music: EventWriter<PlayMusic>) {
    stack.reset(MenuPage::Main);
    music.send(PlayMusic::new(MENU_MUSIC));
}

fn close_menus(mut stack: ResMut<MenuStack>) {
    stack.clear();
}

/// Open the pause page when the flag goes up and close everything when it
/// comes down.
fn sync_pause_menu(pause: Res<PauseFlag>, mut stack: ResMut<MenuStack>) {
    if !pause.is_changed() {
        return;
    }
    if pause.is_paused() {
        if stack.top().is_none() {
            stack.reset(MenuPage::Pause);
        }
    } else if stack.top().is_some() {
        stack.clear();
    }
}

/// Clear the pause flag. The pause page is the only caller.
fn resume(pause: &mut PauseFlag, fade: &FadeController) {
    if fade.is_busy() {
        return;
    }
    info!("Game resumed");
    pause.set(false);
}

/// Page changes and resuming.
fn handle_navigation(
    mut reader: EventReader<MenuCommand>,
    mut stack: ResMut<MenuStack>,
    mut pause: ResMut<PauseFlag>,
    fade: Res<FadeController>,
) {
    for command in reader.read() {
        match command {
            MenuCommand::Activate(MenuAction::LevelSelect) => stack.push(MenuPage::LevelSelect),
            MenuCommand::Activate(MenuAction::Options) => stack.push(MenuPage::Options),
            MenuCommand::Activate(MenuAction::Resume) => resume(&mut pause, &fade),
            MenuCommand::Activate(MenuAction::Back) | MenuCommand::Back => {
                if stack.top() == Some(MenuPage::Pause) {
                    resume(&mut pause, &fade);
                } else {
                    stack.pop();
                }
            }
            _ => {}
        }
    }
}

/// Starting levels, quitting and leaving gameplay.
fn handle_game_commands(
    mut reader: EventReader<MenuCommand>,
    sequence: Res<LevelSequence>,
    mut progress: ResMut<LevelProgress>,
    mut next_state: ResMut<NextState<GameState>>,
    mut fade: ResMut<FadeController>,
    mut exit: EventWriter<AppExit>,
) {
    for command in reader.read() {
        let MenuCommand::Activate(action) = command else {
            continue;
        };
        let level = match *action {
            MenuAction::Continue(level) | MenuAction::StartLevel(level) => level,
            MenuAction::NewGame => 0,
            MenuAction::Quit => {
                exit.send(AppExit::Success);
                continue;
            }
            MenuAction::MainMenu => {
                // The level layer switches state once the screen is black
                if let Err(e) = fade.fade_out(true, TransitionCue::ReturnToMenu) {
                    warn!("{}", e);
                }
                continue;
            }
            _ => continue,
        };
        match start_level(level, &sequence, &mut progress, &mut next_state) {
            Ok(()) => info!("Starting at level {}", level),
            Err(e) => error!("{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::state::app::StatesPlugin;

    use super::*;
    use crate::core::CorePlugin;
    use crate::fade::FadePlugin;
    use crate::input::ActionState;
    use crate::localization::Translations;
    use crate::save::{MemoryStore, SaveGame};
    use crate::ui::options::SettingKind;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .add_event::<PlayMusic>()
            .init_resource::<ActionState>()
            .init_resource::<LevelProgress>()
            .insert_resource(SaveGame::load(MemoryStore::default()))
            .insert_resource(LevelSequence::builtin())
            .insert_resource(Translations::builtin_english())
            .add_plugins((CorePlugin, FadePlugin, UiPlugin));
        for _ in 0..3 {
            app.update();
        }
        app
    }

    fn state(app: &App) -> GameState {
        *app.world().resource::<State<GameState>>().get()
    }

    fn top(app: &App) -> Option<MenuPage> {
        app.world().resource::<MenuStack>().top()
    }

    /// Set some actions for one tick.
    fn press(app: &mut App, set: impl Fn(&mut ActionState)) {
        set(&mut app.world_mut().resource_mut::<ActionState>());
        app.update();
        *app.world_mut().resource_mut::<ActionState>() = ActionState::default();
        app.update();
    }

    fn selected_action(app: &mut App) -> Option<MenuAction> {
        let index = app.world().resource::<MenuCursor>().index();
        let mut items = app.world_mut().query::<&MenuItem>();
        items
            .iter(app.world())
            .find(|item| item.index == index)
            .map(|item| item.action)
    }

    #[test]
    fn main_menu_is_driven_without_a_mouse() {
        let mut app = test_app();
        assert_eq!(state(&app), GameState::MainMenu);
        assert_eq!(top(&app), Some(MenuPage::Main));
        assert_eq!(selected_action(&mut app), Some(MenuAction::NewGame));

        press(&mut app, |a| a.menu_down = true);
        assert_eq!(selected_action(&mut app), Some(MenuAction::LevelSelect));

        press(&mut app, |a| a.accept = true);
        assert_eq!(top(&app), Some(MenuPage::LevelSelect));
        assert_eq!(selected_action(&mut app), Some(MenuAction::StartLevel(0)));

        press(&mut app, |a| a.back = true);
        assert_eq!(top(&app), Some(MenuPage::Main));

        press(&mut app, |a| a.accept = true);
        assert_eq!(state(&app), GameState::InGame);
        assert_eq!(app.world().resource::<LevelProgress>().current(), Some(0));
        assert_eq!(top(&app), None);
    }

    #[test]
    fn options_change_and_persist_settings() {
        let mut app = test_app();
        app.world_mut()
            .resource_mut::<MenuStack>()
            .push(MenuPage::Options);
        app.update();
        assert_eq!(
            selected_action(&mut app),
            Some(MenuAction::Setting(SettingKind::SoundVolume))
        );

        press(&mut app, |a| a.menu_left = true);
        press(&mut app, |a| a.menu_down = true);
        press(&mut app, |a| a.menu_right = true);

        let save = app.world().resource::<SaveGame>();
        assert_eq!(save.data.sound_volume, 6);
        assert_eq!(save.data.music_volume, 8);

        // The labels follow the record
        let mut texts = app.world_mut().query::<&Text>();
        let labels: Vec<String> = texts.iter(app.world()).map(|t| t.0.clone()).collect();
        assert!(labels.iter().any(|l| l == "Sound volume: 6"));
    }

    #[test]
    fn pause_page_follows_flag_and_pause_resumes() {
        let mut app = test_app();
        app.world_mut()
            .resource_mut::<NextState<GameState>>()
            .set(GameState::InGame);
        app.update();
        assert_eq!(top(&app), None);

        app.world_mut().resource_mut::<PauseFlag>().set(true);
        app.update();
        assert_eq!(top(&app), Some(MenuPage::Pause));
        assert_eq!(selected_action(&mut app), Some(MenuAction::Resume));

        // Options over the pause page, back returns to it
        press(&mut app, |a| a.menu_down = true);
        press(&mut app, |a| a.accept = true);
        assert_eq!(top(&app), Some(MenuPage::Options));
        press(&mut app, |a| a.back = true);
        assert_eq!(top(&app), Some(MenuPage::Pause));
        assert!(app.world().resource::<PauseFlag>().is_paused());

        // Gamepad Start again resumes
        press(&mut app, |a| a.pause_pressed = true);
        assert!(!app.world().resource::<PauseFlag>().is_paused());
        assert_eq!(top(&app), None);
    }
}
