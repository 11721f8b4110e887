//! File-backed key-value store
//!
//! One file per key inside a directory. Writes land in a temporary file in the
//! same directory and are renamed over the target, so a crash never leaves a
//! half-written snapshot behind.

use crate::error::{StoreError, StoreResult};
use crate::kv::KeyValueStore;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Directory of one-file-per-key slots
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) the directory at `root`
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| StoreError::io(root.display().to_string(), e))?;
        Ok(Self { root })
    }

    /// Directory holding the slots
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `key`; characters outside `[A-Za-z0-9._-]` become `_`
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(name)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut tmp = tempfile::NamedTempFile::new_in(&self.root).map_err(|e| StoreError::io(key, e))?;
        tmp.write_all(value.as_bytes())
            .and_then(|()| tmp.flush())
            .map_err(|e| StoreError::io(key, e))?;
        tmp.persist(self.path_for(key))
            .map_err(|e| StoreError::io(key, e.error))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(key, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        assert_eq!(store.get("draft_submission").unwrap(), None);
        store.set("draft_submission", "{}").unwrap();
        assert_eq!(store.get("draft_submission").unwrap().as_deref(), Some("{}"));
        assert!(dir.path().join("draft_submission").exists());

        store.remove("draft_submission").unwrap();
        assert_eq!(store.get("draft_submission").unwrap(), None);
        store.remove("draft_submission").unwrap();
    }

    #[test]
    fn namespaced_keys_are_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(
            store.path_for("dev-1:draft_submission"),
            dir.path().join("dev-1_draft_submission")
        );
    }

    #[test]
    fn open_creates_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileStore::open(&nested).unwrap();
        store.set("k", "v").unwrap();
        assert_eq!(store.root(), nested.as_path());
    }
}
