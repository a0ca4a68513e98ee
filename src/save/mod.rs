//! Save module - the persisted progress/settings record and its store.

mod data;
mod error;
mod plugin;
mod store;

pub use data::{Resolution, SaveData, MAX_VOLUME, NO_LEVEL, RESOLUTIONS};
pub use error::SaveError;
pub use plugin::{SaveGame, SavePlugin, SAVE_DIR, SAVE_KEY};
pub use store::{FileStore, MemoryStore, SaveStore};
