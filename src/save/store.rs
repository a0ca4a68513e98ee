//! Key-value text stores backing the save record.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::error::SaveError;

/// A store of named text blobs.
pub trait SaveStore: Send + Sync {
    /// Read the text under `key`, `None` if nothing was ever written.
    fn read(&self, key: &str) -> Result<Option<String>, SaveError>;

    /// Replace the text under `key`.
    fn write(&mut self, key: &str, text: &str) -> Result<(), SaveError>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SaveStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, SaveError> {
        match fs::read_to_string(self.path(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SaveError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn write(&mut self, key: &str, text: &str) -> Result<(), SaveError> {
        let io = |source| SaveError::Io {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io)?;
        // Write beside the target first so a crash never leaves half a record
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, text).map_err(io)?;
        fs::rename(&tmp, self.path(key)).map_err(io)
    }
}

/// In-memory store, used by tests and when no save directory is wanted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl SaveStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, SaveError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, text: &str) -> Result<(), SaveError> {
        self.entries.insert(key.to_string(), text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("flipside-store-{}", std::process::id()));
        let mut store = FileStore::new(&dir);

        assert_eq!(store.read("progress").unwrap(), None);
        store.write("progress", "{\"latestLevel\":2}").unwrap();
        assert_eq!(
            store.read("progress").unwrap().as_deref(),
            Some("{\"latestLevel\":2}")
        );

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn memory_store_overwrites() {
        let mut store = MemoryStore::default();
        store.write("k", "a").unwrap();
        store.write("k", "b").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("b"));
    }
}
