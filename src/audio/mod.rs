//! Audio module - named sounds and music, volume from the save record.

mod library;
mod plugin;

pub use library::{volume_amplitude, AudioCatalog, AudioError, SoundLibrary};
pub use plugin::{MusicChannel, PlayMusic, PlaySound, SfxChannel, SoundPlugin};
