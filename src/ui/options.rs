//! Options screen settings: labels and the changes they make to the save record.

use bevy::prelude::*;

use super::menu::{MenuAction, MenuCommand};
use crate::localization::{Translations, LANGUAGES};
use crate::save::{SaveData, SaveGame};

/// A setting on the options screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    SoundVolume,
    MusicVolume,
    Fullscreen,
    Resolution,
    Language,
}

impl SettingKind {
    /// Display order.
    pub const ALL: [SettingKind; 5] = [
        SettingKind::SoundVolume,
        SettingKind::MusicVolume,
        SettingKind::Fullscreen,
        SettingKind::Resolution,
        SettingKind::Language,
    ];

    fn label_key(&self) -> &'static str {
        match self {
            SettingKind::SoundVolume => "options.sound_volume",
            SettingKind::MusicVolume => "options.music_volume",
            SettingKind::Fullscreen => "options.fullscreen",
            SettingKind::Resolution => "options.resolution",
            SettingKind::Language => "options.language",
        }
    }
}

/// `"<name>: <value>"` for the options screen.
pub fn setting_label(kind: SettingKind, save: &SaveData, translations: &Translations) -> String {
    let value = match kind {
        SettingKind::SoundVolume => save.sound_volume.to_string(),
        SettingKind::MusicVolume => save.music_volume.to_string(),
        SettingKind::Fullscreen => {
            translations.text(if save.fullscreen { "options.on" } else { "options.off" })
        }
        SettingKind::Resolution => save.resolution.clone(),
        SettingKind::Language => translations.text(&format!("language.{}", save.language_code)),
    };
    format!("{}: {}", translations.text(kind.label_key()), value)
}

/// Change `kind` by `step` (volumes move by levels, lists cycle).
pub fn apply_setting(kind: SettingKind, step: i32, save: &mut SaveData) {
    match kind {
        SettingKind::SoundVolume => save.adjust_sound_volume(step),
        SettingKind::MusicVolume => save.adjust_music_volume(step),
        SettingKind::Fullscreen => save.toggle_fullscreen(),
        SettingKind::Resolution => save.cycle_resolution(step),
        SettingKind::Language => save.cycle_language(LANGUAGES, step),
    }
}

/// Apply setting changes from the menus and persist them.
///
/// Choosing a setting steps it forward; left and right step either way.
/// Volumes, window and language follow through their own change systems.
pub fn handle_setting_commands(mut reader: EventReader<MenuCommand>, mut save: ResMut<SaveGame>) {
    for command in reader.read() {
        let (kind, step) = match *command {
            MenuCommand::Activate(MenuAction::Setting(kind)) => (kind, 1),
            MenuCommand::Adjust(MenuAction::Setting(kind), step) => (kind, step),
            _ => continue,
        };
        apply_setting(kind, step, &mut save.data);
        info!("Setting {:?} changed", kind);
        save.persist_or_warn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fullscreen_toggles_either_way() {
        let mut save = SaveData::default();
        apply_setting(SettingKind::Fullscreen, -1, &mut save);
        assert!(save.fullscreen);
        apply_setting(SettingKind::Fullscreen, 1, &mut save);
        assert!(!save.fullscreen);
    }

    #[test]
    fn language_label_uses_language_name() {
        let translations = Translations::builtin_english();
        let mut save = SaveData::default();
        apply_setting(SettingKind::Language, 1, &mut save);
        assert_eq!(
            setting_label(SettingKind::Language, &save, &translations),
            "Language: Deutsch"
        );
    }
}
