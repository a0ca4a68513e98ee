//! Sound plugin - plays named sounds and music through kira channels.

use bevy::prelude::*;
use bevy_kira_audio::{AudioApp, AudioChannel, AudioControl};

use super::library::{load_sound_library, volume_amplitude, SoundLibrary};
use crate::core::TickSet;
use crate::save::SaveGame;

/// Request to play a one-shot sound by name.
#[derive(Event, Debug, Clone)]
pub struct PlaySound {
    pub name: String,
}

impl PlaySound {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Request to switch the music track. Ignored if it is already playing.
#[derive(Event, Debug, Clone)]
pub struct PlayMusic {
    pub name: String,
}

impl PlayMusic {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Kira channel for background music.
#[derive(Resource)]
pub struct MusicChannel;

/// Kira channel for sound effects.
#[derive(Resource)]
pub struct SfxChannel;

/// Sound plugin - audio playback as a thin wrapper over kira.
pub struct SoundPlugin;

impl Plugin for SoundPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(bevy_kira_audio::AudioPlugin)
            .add_audio_channel::<MusicChannel>()
            .add_audio_channel::<SfxChannel>()
            .add_event::<PlaySound>()
            .add_event::<PlayMusic>()
            .add_systems(Startup, load_sound_library)
            .add_systems(
                Update,
                (
                    apply_volumes.run_if(resource_changed::<SaveGame>),
                    play_sounds,
                    play_music,
                )
                    .in_set(TickSet::Presentation),
            );
    }
}

fn play_sounds(
    mut requests: EventReader<PlaySound>,
    library: Res<SoundLibrary>,
    sfx: Res<AudioChannel<SfxChannel>>,
) {
    for request in requests.read() {
        match library.sound(&request.name) {
            Ok(handle) => {
                sfx.play(handle);
            }
            Err(e) => warn!("{}", e),
        }
    }
}

fn play_music(
    mut requests: EventReader<PlayMusic>,
    mut library: ResMut<SoundLibrary>,
    music: Res<AudioChannel<MusicChannel>>,
) {
    for request in requests.read() {
        let previous = library.current_music().map(str::to_string);
        match library.begin_music(&request.name) {
            Ok(Some(handle)) => {
                music.stop();
                music.play(handle).looped();
                debug!("Music {:?} -> '{}'", previous, request.name);
            }
            Ok(None) => {}
            Err(e) => warn!("{}", e),
        }
    }
}

/// Push the saved volume levels to the channels.
fn apply_volumes(
    save: Res<SaveGame>,
    music: Res<AudioChannel<MusicChannel>>,
    sfx: Res<AudioChannel<SfxChannel>>,
) {
    music.set_volume(volume_amplitude(save.data.music_volume));
    sfx.set_volume(volume_amplitude(save.data.sound_volume));
}
