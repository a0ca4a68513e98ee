//! Named sound and music lookup.

use bevy::prelude::*;
use bevy_kira_audio::AudioSource as KiraSource;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use thiserror::Error;

use crate::save::MAX_VOLUME;

/// Where the name → file table is read from.
pub const AUDIO_CATALOG_PATH: &str = "assets/data/audio.ron";

/// Lookup misses. Callers log these and carry on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AudioError {
    #[error("Unknown sound '{0}'")]
    UnknownSound(String),
    #[error("Unknown music track '{0}'")]
    UnknownTrack(String),
}

/// Name → asset path tables as stored on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct AudioCatalog {
    #[serde(default)]
    pub sounds: HashMap<String, String>,
    #[serde(default)]
    pub music: HashMap<String, String>,
}

impl Default for AudioCatalog {
    fn default() -> Self {
        let sounds = [("ball_exit", "audio/ball_exit.ogg"), ("jump", "audio/jump.ogg")];
        let music = [("menu", "audio/menu.ogg"), ("theme", "audio/theme.ogg")];
        Self {
            sounds: sounds
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            music: music
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl AudioCatalog {
    /// Load the catalog from RON file.
    pub fn load() -> Self {
        match fs::read_to_string(AUDIO_CATALOG_PATH) {
            Ok(contents) => match ron::from_str(&contents) {
                Ok(catalog) => {
                    info!("Loaded audio catalog from {}", AUDIO_CATALOG_PATH);
                    catalog
                }
                Err(e) => {
                    error!("Failed to parse {}: {}. Using defaults.", AUDIO_CATALOG_PATH, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Could not read {}: {}. Using defaults.", AUDIO_CATALOG_PATH, e);
                Self::default()
            }
        }
    }
}

/// Loaded sound and music handles, plus the track currently playing.
#[derive(Resource, Default)]
pub struct SoundLibrary {
    sounds: HashMap<String, Handle<KiraSource>>,
    music: HashMap<String, Handle<KiraSource>>,
    current_music: Option<String>,
}

impl SoundLibrary {
    pub fn insert_sound(&mut self, name: impl Into<String>, handle: Handle<KiraSource>) {
        self.sounds.insert(name.into(), handle);
    }

    pub fn insert_track(&mut self, name: impl Into<String>, handle: Handle<KiraSource>) {
        self.music.insert(name.into(), handle);
    }

    pub fn sound(&self, name: &str) -> Result<Handle<KiraSource>, AudioError> {
        self.sounds
            .get(name)
            .cloned()
            .ok_or_else(|| AudioError::UnknownSound(name.to_string()))
    }

    pub fn current_music(&self) -> Option<&str> {
        self.current_music.as_deref()
    }

    /// Switch to `name`. `Ok(None)` means that track is already playing.
    pub fn begin_music(&mut self, name: &str) -> Result<Option<Handle<KiraSource>>, AudioError> {
        if self.current_music.as_deref() == Some(name) {
            return Ok(None);
        }
        let handle = self
            .music
            .get(name)
            .cloned()
            .ok_or_else(|| AudioError::UnknownTrack(name.to_string()))?;
        self.current_music = Some(name.to_string());
        Ok(Some(handle))
    }
}

/// Channel amplitude for a 0-10 volume level.
pub fn volume_amplitude(level: u8) -> f64 {
    f64::from(level.min(MAX_VOLUME)) / f64::from(MAX_VOLUME)
}

/// System to load every catalogued sound at startup.
pub fn load_sound_library(mut commands: Commands, asset_server: Res<AssetServer>) {
    let catalog = AudioCatalog::load();
    let mut library = SoundLibrary::default();
    for (name, path) in catalog.sounds {
        library.insert_sound(name, asset_server.load(path));
    }
    for (name, path) in catalog.music {
        library.insert_track(name, asset_server.load(path));
    }
    info!(
        "Audio library: {} sounds, {} tracks",
        library.sounds.len(),
        library.music.len()
    );
    commands.insert_resource(library);
}
