//! # Usage Storage
//!
//! Key/value persistence behind the [`UsageTracker`](super::UsageTracker).
//!
//! ## Storage Location
//!
//! ```text
//! ~/.local/share/toolbox/usage/
//! ├── favorites.json
//! └── recentTools.json
//! ```
//!
//! Each key is its own file holding a JSON array of tool ids.

use anyhow::{bail, Context, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Storage key for the favorites list
pub const FAVORITES_KEY: &str = "favorites";

/// Storage key for the recently used list
pub const RECENT_KEY: &str = "recentTools";

/// A durable string store keyed by name
pub trait KeyValueStore {
    /// Read a value; `Ok(None)` if the key was never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// One file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at the platform data directory
    pub fn new() -> Result<Self> {
        Self::with_dir(get_storage_dir()?)
    }

    /// Store rooted at a custom directory (created if missing)
    pub fn with_dir(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir).with_context(|| {
            format!("Failed to create usage storage directory: {}", dir.display())
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read usage file: {}", path.display()))?;
        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, value)
            .with_context(|| format!("Failed to write usage file: {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to replace usage file: {}", path.display()))?;
        Ok(())
    }
}

/// In-process store, used by tests and for throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every write fails, for exercising error paths
    pub fn failing() -> Self {
        Self {
            values: RefCell::default(),
            fail_writes: true,
        }
    }

    /// Seed a raw value, bypassing any failure mode
    pub fn insert(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            bail!("Storage quota exceeded while writing '{}'", key);
        }
        self.insert(key, value);
        Ok(())
    }
}

/// Get the XDG-compliant storage directory for usage data
fn get_storage_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("", "", "toolbox")
        .context("Failed to determine application data directory")?;

    Ok(proj_dirs.data_dir().join("usage"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::with_dir(temp_dir.path().join("usage")).unwrap();

        assert_eq!(store.get(FAVORITES_KEY).unwrap(), None);

        store.set(FAVORITES_KEY, r#"["calculator"]"#).unwrap();
        assert_eq!(
            store.get(FAVORITES_KEY).unwrap().as_deref(),
            Some(r#"["calculator"]"#)
        );
        assert!(store.dir().join("favorites.json").exists());
        assert!(!store.dir().join("favorites.json.tmp").exists());
    }

    #[test]
    fn test_file_store_keys_are_independent() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::with_dir(temp_dir.path().to_path_buf()).unwrap();

        store.set(FAVORITES_KEY, "[]").unwrap();
        store.set(RECENT_KEY, r#"["a"]"#).unwrap();

        assert_eq!(store.get(FAVORITES_KEY).unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get(RECENT_KEY).unwrap().as_deref(), Some(r#"["a"]"#));
    }

    #[test]
    fn test_memory_store_failing() {
        let store = MemoryStore::failing();
        assert!(store.set(RECENT_KEY, "[]").is_err());
        store.insert(RECENT_KEY, "[]");
        assert_eq!(store.get(RECENT_KEY).unwrap().as_deref(), Some("[]"));
    }
}
