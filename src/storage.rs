//! Small persistent key-value store.
//!
//! Values are JSON strings keyed by name, kept together in one JSON object on
//! disk. Every write rewrites the whole file.

use crate::error::{SyncError, SyncResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub trait KeyValueStore {
    fn get(&self, key: &str) -> SyncResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> SyncResult<()>;
    fn remove(&mut self, key: &str) -> SyncResult<()>;
}

/// JSON-object file under the cache directory.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open `path`. A missing file is an empty store; a corrupt one is
    /// reported and replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(path = %path.display(), "Ignoring unreadable store file: {err}");
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        debug!(path = %path.display(), keys = entries.len(), "Opened key-value store");
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> SyncResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| SyncError::Storage(format!("{}: {err}", parent.display())))?;
        }
        let contents = serde_json::to_string_pretty(&self.entries)
            .map_err(|err| SyncError::Storage(err.to_string()))?;
        fs::write(&self.path, contents)
            .map_err(|err| SyncError::Storage(format!("{}: {err}", self.path.display())))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> SyncResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> SyncResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> SyncResult<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// In-process store, used when no file store is wanted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> SyncResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> SyncResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> SyncResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "cinelingua-storage-{}-{name}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir.join("store.json")
    }

    #[test]
    fn file_store_survives_reopen() {
        let path = temp_path("reopen");
        let mut store = FileStore::open(&path);
        store.set("wordbook", "[]").expect("write");
        store.set("other", "1").expect("write");
        store.remove("other").expect("remove");

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("wordbook").expect("read"), Some("[]".into()));
        assert_eq!(reopened.get("other").expect("read"), None);
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let path = temp_path("corrupt");
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(&path, "not json").expect("seed");
        let store = FileStore::open(&path);
        assert_eq!(store.get("wordbook").expect("read"), None);
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::default();
        store.set("k", "v").expect("set");
        assert_eq!(store.get("k").expect("get"), Some("v".into()));
        store.remove("k").expect("remove");
        assert_eq!(store.get("k").expect("get"), None);
    }
}
