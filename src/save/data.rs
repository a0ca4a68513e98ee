//! The persisted save record.
//!
//! Stored as a small JSON object so it can be inspected and edited by hand:
//!
//! ```json
//! {"latestLevel":-1,"furthestLevel":0,"soundVolume":7,"musicVolume":7,
//!  "resolution":"1280x720","fullscreen":false,"languageCode":"en"}
//! ```

use serde::{Deserialize, Serialize};

use super::error::SaveError;

/// Highest volume level accepted by the settings.
pub const MAX_VOLUME: u8 = 10;

/// Sentinel for "no level" in `latest_level`.
pub const NO_LEVEL: i32 = -1;

/// Window sizes offered by the options screen.
pub const RESOLUTIONS: &[&str] = &["1280x720", "1600x900", "1920x1080", "2560x1440"];

/// Progress and settings kept between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveData {
    /// Last level entered, `-1` when there is nothing to continue
    pub latest_level: i32,
    /// Highest level ever entered, never decreases
    pub furthest_level: i32,
    /// Sound effect volume, 0-10
    pub sound_volume: u8,
    /// Music volume, 0-10
    pub music_volume: u8,
    /// Window size as `WIDTHxHEIGHT`
    pub resolution: String,
    pub fullscreen: bool,
    pub language_code: String,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            latest_level: NO_LEVEL,
            furthest_level: 0,
            sound_volume: 7,
            music_volume: 7,
            resolution: "1280x720".to_string(),
            fullscreen: false,
            language_code: "en".to_string(),
        }
    }
}

impl SaveData {
    /// Record that `level` was entered: it becomes the latest level and
    /// raises the furthest level if it is beyond it.
    pub fn record_level_entered(&mut self, level: usize) {
        let level = level as i32;
        self.latest_level = level;
        self.furthest_level = self.furthest_level.max(level);
    }

    /// Forget the latest level so the menu stops offering Continue.
    pub fn clear_latest_level(&mut self) {
        self.latest_level = NO_LEVEL;
    }

    /// The level Continue should resume, if any.
    pub fn continue_level(&self) -> Option<usize> {
        usize::try_from(self.latest_level).ok()
    }

    pub fn set_sound_volume(&mut self, level: u8) {
        self.sound_volume = level.min(MAX_VOLUME);
    }

    pub fn set_music_volume(&mut self, level: u8) {
        self.music_volume = level.min(MAX_VOLUME);
    }

    /// Raise or lower the sound volume by `step` levels.
    pub fn adjust_sound_volume(&mut self, step: i32) {
        self.set_sound_volume(step_volume(self.sound_volume, step));
    }

    /// Raise or lower the music volume by `step` levels.
    pub fn adjust_music_volume(&mut self, step: i32) {
        self.set_music_volume(step_volume(self.music_volume, step));
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    /// Move through [`RESOLUTIONS`], wrapping at either end.
    pub fn cycle_resolution(&mut self, step: i32) {
        self.resolution = cycle(RESOLUTIONS, &self.resolution, step);
    }

    /// Move through `languages`, wrapping at either end.
    pub fn cycle_language(&mut self, languages: &[&str], step: i32) {
        self.language_code = cycle(languages, &self.language_code, step);
    }

    /// Parsed window resolution.
    pub fn resolution(&self) -> Result<Resolution, SaveError> {
        Resolution::parse(&self.resolution)
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        serde_json::to_string(self).map_err(SaveError::Serialize)
    }

    pub fn from_json(key: &str, text: &str) -> Result<Self, SaveError> {
        serde_json::from_str(text).map_err(|source| SaveError::Malformed {
            key: key.to_string(),
            source,
        })
    }
}

fn step_volume(level: u8, step: i32) -> u8 {
    (i32::from(level) + step).clamp(0, i32::from(MAX_VOLUME)) as u8
}

/// The entry `step` places after `current`. An unknown `current` counts as
/// sitting just before the first entry.
fn cycle(options: &[&str], current: &str, step: i32) -> String {
    if options.is_empty() {
        return current.to_string();
    }
    let len = options.len() as i32;
    let next = match options.iter().position(|o| *o == current) {
        Some(index) => (index as i32 + step).rem_euclid(len),
        None => (step - 1).rem_euclid(len),
    };
    options[next as usize].to_string()
}

/// Window size in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// Parse `"1280x720"`. Surrounding whitespace is ignored.
    pub fn parse(text: &str) -> Result<Self, SaveError> {
        let bad = || SaveError::BadResolution(text.to_string());
        let (w, h) = text.trim().split_once(['x', 'X']).ok_or_else(bad)?;
        let width: u32 = w.trim().parse().map_err(|_| bad())?;
        let height: u32 = h.trim().parse().map_err(|_| bad())?;
        if width == 0 || height == 0 {
            return Err(bad());
        }
        Ok(Self { width, height })
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_run_defaults() {
        let data = SaveData::default();
        assert_eq!(data.latest_level, -1);
        assert_eq!(data.furthest_level, 0);
        assert_eq!(data.sound_volume, 7);
        assert_eq!(data.music_volume, 7);
        assert_eq!(data.resolution, "1280x720");
        assert!(!data.fullscreen);
        assert_eq!(data.language_code, "en");
        assert_eq!(data.continue_level(), None);
    }

    #[test]
    fn furthest_level_never_decreases() {
        let mut data = SaveData {
            furthest_level: 2,
            ..Default::default()
        };

        data.record_level_entered(1);
        assert_eq!(data.latest_level, 1);
        assert_eq!(data.furthest_level, 2);

        data.record_level_entered(3);
        assert_eq!(data.latest_level, 3);
        assert_eq!(data.furthest_level, 3);
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let json = SaveData::default().to_json().unwrap();
        assert!(json.contains("\"latestLevel\":-1"));
        assert!(json.contains("\"furthestLevel\":0"));
        assert!(json.contains("\"languageCode\":\"en\""));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let data = SaveData::from_json("save", r#"{"latestLevel":4,"fullscreen":true}"#).unwrap();
        assert_eq!(data.latest_level, 4);
        assert!(data.fullscreen);
        assert_eq!(data.music_volume, 7);
        assert_eq!(data.continue_level(), Some(4));
    }

    #[test]
    fn malformed_text_is_an_error() {
        let err = SaveData::from_json("save", "{not json").unwrap_err();
        assert!(matches!(err, SaveError::Malformed { .. }));
    }

    #[test]
    fn volumes_are_clamped() {
        let mut data = SaveData::default();
        data.set_sound_volume(42);
        data.set_music_volume(3);
        assert_eq!(data.sound_volume, MAX_VOLUME);
        assert_eq!(data.music_volume, 3);
    }

    #[test]
    fn volume_steps_stop_at_the_ends() {
        let mut data = SaveData::default();
        data.adjust_sound_volume(-1);
        assert_eq!(data.sound_volume, 6);
        data.adjust_sound_volume(20);
        assert_eq!(data.sound_volume, MAX_VOLUME);
        data.adjust_music_volume(-20);
        assert_eq!(data.music_volume, 0);
    }

    #[test]
    fn resolution_and_language_cycles_wrap() {
        let mut data = SaveData::default();
        data.cycle_resolution(-1);
        assert_eq!(data.resolution, "2560x1440");
        data.cycle_resolution(1);
        assert_eq!(data.resolution, "1280x720");

        data.resolution = "1024x768".to_string();
        data.cycle_resolution(1);
        assert_eq!(data.resolution, "1280x720");

        data.cycle_language(&["en", "de"], 1);
        assert_eq!(data.language_code, "de");
        data.cycle_language(&["en", "de"], 1);
        assert_eq!(data.language_code, "en");
    }

    #[test]
    fn resolution_parsing() {
        assert_eq!(
            Resolution::parse("1920x1080").unwrap(),
            Resolution { width: 1920, height: 1080 }
        );
        assert_eq!(Resolution::parse(" 800 X 600 ").unwrap().to_string(), "800x600");
        assert!(Resolution::parse("1920").is_err());
        assert!(Resolution::parse("axb").is_err());
        assert!(Resolution::parse("0x720").is_err());
    }
}
