//! Localization - string tables keyed by language code.
//!
//! Tables live in `assets/data/lang/<code>.ron` as a flat map of key to
//! text. A missing key is reported by [`Translations::translate`];
//! [`Translations::text`] shows the key itself instead so nothing crashes.

use bevy::prelude::*;
use std::collections::HashMap;
use std::fs;
use thiserror::Error;

use crate::save::SaveGame;

/// Directory holding one RON table per language.
pub const LANG_DIR: &str = "assets/data/lang";

/// Language codes the options screen cycles through.
pub const LANGUAGES: &[&str] = &["en", "de"];

/// Lookup failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocalizationError {
    #[error("No string '{key}' for language '{language}'")]
    MissingKey { key: String, language: String },
}

/// The active language's string table.
#[derive(Resource, Debug, Clone)]
pub struct Translations {
    language: String,
    strings: HashMap<String, String>,
}

impl Translations {
    pub fn new(language: impl Into<String>, strings: HashMap<String, String>) -> Self {
        Self {
            language: language.into(),
            strings,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn translate(&self, key: &str) -> Result<&str, LocalizationError> {
        self.strings
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| LocalizationError::MissingKey {
                key: key.to_string(),
                language: self.language.clone(),
            })
    }

    /// Translated text, or the key itself when it is missing.
    pub fn text(&self, key: &str) -> String {
        match self.translate(key) {
            Ok(text) => text.to_string(),
            Err(e) => {
                debug!("{}", e);
                key.to_string()
            }
        }
    }

    /// Built-in English strings, used when no table file can be read.
    pub fn builtin_english() -> Self {
        let strings = [
            ("menu.title", "FLIPSIDE"),
            ("menu.continue", "Continue"),
            ("menu.new_game", "New Game"),
            ("menu.levels", "Levels"),
            ("menu.options", "Options"),
            ("menu.quit", "Quit"),
            ("menu.back", "Back"),
            ("levels.title", "LEVELS"),
            ("options.title", "OPTIONS"),
            ("options.sound_volume", "Sound volume"),
            ("options.music_volume", "Music volume"),
            ("options.fullscreen", "Fullscreen"),
            ("options.resolution", "Resolution"),
            ("options.language", "Language"),
            ("options.on", "On"),
            ("options.off", "Off"),
            ("language.en", "English"),
            ("language.de", "Deutsch"),
            ("pause.title", "PAUSED"),
            ("pause.resume", "Resume"),
            ("pause.main_menu", "Main Menu"),
            ("hud.balls_remaining", "Balls left"),
            ("level.first_steps", "First Steps"),
            ("level.mirror", "Mirror"),
            ("level.upside_down", "Upside Down"),
            ("prompt.jump.keyboard", "Space to jump"),
            ("prompt.jump.xbox", "A to jump"),
            ("prompt.jump.playstation", "Cross to jump"),
            ("prompt.jump.switch", "B to jump"),
            ("prompt.jump.generic", "South button to jump"),
            ("prompt.pause.keyboard", "Esc to pause"),
            ("prompt.pause.xbox", "Menu to pause"),
            ("prompt.pause.playstation", "Options to pause"),
            ("prompt.pause.switch", "+ to pause"),
            ("prompt.pause.generic", "Start to pause"),
        ];
        Self::new(
            "en",
            strings
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    /// Load the table for `language`, falling back to built-in English.
    pub fn load(language: &str) -> Self {
        let path = format!("{}/{}.ron", LANG_DIR, language);
        match fs::read_to_string(&path) {
            Ok(contents) => match ron::from_str::<HashMap<String, String>>(&contents) {
                Ok(strings) => {
                    info!("Loaded {} strings from {}", strings.len(), path);
                    Self::new(language, strings)
                }
                Err(e) => {
                    error!("Failed to parse {}: {}. Using built-in English.", path, e);
                    Self::builtin_english()
                }
            },
            Err(e) => {
                warn!("Could not read {}: {}. Using built-in English.", path, e);
                Self::builtin_english()
            }
        }
    }
}

/// Localization plugin - loads the saved language's table at startup.
pub struct LocalizationPlugin;

impl Plugin for LocalizationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_translations).add_systems(
            Update,
            reload_translations.run_if(resource_changed::<SaveGame>),
        );
    }
}

fn load_translations(mut commands: Commands, save: Res<SaveGame>) {
    commands.insert_resource(Translations::load(&save.data.language_code));
}

/// Swap the table when the saved language changes.
fn reload_translations(save: Res<SaveGame>, mut translations: ResMut<Translations>) {
    if translations.language() != save.data.language_code {
        *translations = Translations::load(&save.data.language_code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_hit_and_miss() {
        let translations = Translations::builtin_english();
        assert_eq!(translations.translate("menu.quit"), Ok("Quit"));
        assert_eq!(
            translations.translate("menu.credits"),
            Err(LocalizationError::MissingKey {
                key: "menu.credits".to_string(),
                language: "en".to_string(),
            })
        );
    }

    #[test]
    fn text_falls_back_to_key() {
        let translations = Translations::new("de", HashMap::new());
        assert_eq!(translations.text("menu.quit"), "menu.quit");
    }

    #[test]
    fn every_prompt_key_has_english_text() {
        use crate::input::{ControllerKind, PromptAction};

        let translations = Translations::builtin_english();
        let kinds = [
            ControllerKind::Keyboard,
            ControllerKind::Xbox,
            ControllerKind::PlayStation,
            ControllerKind::Switch,
            ControllerKind::Generic,
        ];
        for kind in kinds {
            for action in [PromptAction::Jump, PromptAction::Pause] {
                assert!(translations.translate(&kind.prompt_key(action)).is_ok());
            }
        }
    }

    #[test]
    fn changing_saved_language_reloads_table() {
        use crate::save::{MemoryStore, SaveGame};

        let mut app = App::new();
        app.insert_resource(SaveGame::load(MemoryStore::default()))
            .insert_resource(Translations::builtin_english())
            .add_systems(
                Update,
                reload_translations.run_if(resource_changed::<SaveGame>),
            );
        app.update();
        assert_eq!(app.world().resource::<Translations>().language(), "en");

        app.world_mut()
            .resource_mut::<SaveGame>()
            .data
            .cycle_language(LANGUAGES, 1);
        app.update();

        let translations = app.world().resource::<Translations>();
        assert_eq!(translations.language(), "de");
        assert_eq!(translations.translate("menu.quit"), Ok("Beenden"));
    }

    #[test]
    fn shipped_tables_share_english_keys() {
        let english = Translations::builtin_english();
        for language in LANGUAGES {
            let table = Translations::load(language);
            assert_eq!(table.language(), *language);
            for key in english.strings.keys() {
                assert!(table.translate(key).is_ok(), "{} lacks {}", language, key);
            }
        }
    }

    #[test]
    fn shipped_english_table_names_every_level() {
        let translations = Translations::load("en");
        let sequence = crate::level::LevelSequence::load();
        for index in 0..sequence.len() {
            let name = &sequence.get(index).unwrap().name;
            assert!(translations.translate(name).is_ok(), "missing {}", name);
        }
    }
}
