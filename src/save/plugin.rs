//! Save plugin - loads the save record at startup and keeps the window in
//! line with its display settings.

use bevy::prelude::*;
use bevy::window::{MonitorSelection, PrimaryWindow, WindowMode};

use super::data::SaveData;
use super::error::SaveError;
use super::store::{FileStore, SaveStore};

/// Directory the desktop build keeps its save file in.
pub const SAVE_DIR: &str = "saves";

/// Key of the single save record.
pub const SAVE_KEY: &str = "save_data";

/// The loaded save record together with the store it persists to.
#[derive(Resource)]
pub struct SaveGame {
    pub data: SaveData,
    store: Box<dyn SaveStore>,
}

impl SaveGame {
    /// Load the record from `store`, falling back to defaults when it is
    /// missing or unreadable.
    pub fn load(store: impl SaveStore + 'static) -> Self {
        let data = match store.read(SAVE_KEY) {
            Ok(Some(text)) => match SaveData::from_json(SAVE_KEY, &text) {
                Ok(data) => {
                    info!("Loaded save record (latest level {})", data.latest_level);
                    data
                }
                Err(e) => {
                    warn!("{}. Using defaults.", e);
                    SaveData::default()
                }
            },
            Ok(None) => {
                info!("No save record found, starting fresh");
                SaveData::default()
            }
            Err(e) => {
                warn!("{}. Using defaults.", e);
                SaveData::default()
            }
        };

        Self {
            data,
            store: Box::new(store),
        }
    }

    /// Write the current record to the store.
    pub fn persist(&mut self) -> Result<(), SaveError> {
        let text = self.data.to_json()?;
        self.store.write(SAVE_KEY, &text)?;
        debug!("Save record written");
        Ok(())
    }

    /// Persist, logging instead of failing. Gameplay never stops on a save error.
    pub fn persist_or_warn(&mut self) {
        if let Err(e) = self.persist() {
            error!("{}", e);
        }
    }
}

/// Save plugin - owns the persisted progress and settings record.
pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SaveGame::load(FileStore::new(SAVE_DIR)))
            .add_systems(
                Update,
                apply_display_settings.run_if(resource_changed::<SaveGame>),
            );
    }
}

/// Apply the saved resolution and fullscreen flag to the primary window.
///
/// Runs whenever the record changes; the window is only touched when the
/// display settings themselves differ from what was last applied.
pub fn apply_display_settings(
    save: Res<SaveGame>,
    mut applied: Local<Option<(String, bool)>>,
    mut window_query: Query<&mut Window, With<PrimaryWindow>>,
) {
    let wanted = (save.data.resolution.clone(), save.data.fullscreen);
    if applied.as_ref() == Some(&wanted) {
        return;
    }
    let Ok(mut window) = window_query.get_single_mut() else {
        return;
    };

    match save.data.resolution() {
        Ok(resolution) => {
            window
                .resolution
                .set(resolution.width as f32, resolution.height as f32);
            info!("Window resolution {}", resolution);
        }
        Err(e) => warn!("{}. Keeping window size.", e),
    }

    window.mode = if save.data.fullscreen {
        WindowMode::BorderlessFullscreen(MonitorSelection::Current)
    } else {
        WindowMode::Windowed
    };
    *applied = Some(wanted);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::save::MemoryStore;

    #[test]
    fn load_falls_back_to_defaults_on_garbage() {
        let mut store = MemoryStore::default();
        store.write(SAVE_KEY, "garbage").unwrap();

        let save = SaveGame::load(store);
        assert_eq!(save.data, SaveData::default());
    }

    #[test]
    fn window_follows_changed_settings() {
        let mut app = App::new();
        app.insert_resource(SaveGame::load(MemoryStore::default()))
            .add_systems(
                Update,
                apply_display_settings.run_if(resource_changed::<SaveGame>),
            );
        let window = app.world_mut().spawn((Window::default(), PrimaryWindow)).id();
        app.update();

        let current = app.world().get::<Window>(window).unwrap();
        assert_eq!(current.resolution.width(), 1280.0);
        assert_eq!(current.mode, WindowMode::Windowed);

        {
            let mut save = app.world_mut().resource_mut::<SaveGame>();
            save.data.cycle_resolution(2);
            save.data.toggle_fullscreen();
        }
        app.update();

        let current = app.world().get::<Window>(window).unwrap();
        assert_eq!(current.resolution.width(), 1920.0);
        assert_eq!(current.resolution.height(), 1080.0);
        assert_eq!(
            current.mode,
            WindowMode::BorderlessFullscreen(MonitorSelection::Current)
        );
    }

    #[test]
    fn persist_then_reload() {
        let mut save = SaveGame::load(MemoryStore::default());
        save.data.record_level_entered(3);
        save.persist().unwrap();

        let text = save.store.read(SAVE_KEY).unwrap().unwrap();
        let reloaded = SaveData::from_json(SAVE_KEY, &text).unwrap();
        assert_eq!(reloaded.latest_level, 3);
        assert_eq!(reloaded.furthest_level, 3);
    }
}
