//! Key/value persistence for the config and theme.
//!
//! Backends are fallible; [`Persistence`] sits on top and never lets an
//! error escape: reads fall back to the caller's default and failed writes
//! are logged and dropped.

use anyhow::{Context, Result};
use log::{debug, error, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Storage key of the document config.
pub const CONFIG_KEY: &str = "readme-config";
/// Storage key of the selected theme.
pub const THEME_KEY: &str = "theme";

/// A string-to-string store that survives restarts.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `$READMEGEN_HOME`, else `$HOME/.config/readmegen`, else `./.readmegen`.
    pub fn default_dir() -> PathBuf {
        if let Ok(dir) = std::env::var("READMEGEN_HOME") {
            return PathBuf::from(dir);
        }
        match std::env::var("HOME") {
            Ok(home) => PathBuf::from(home).join(".config").join("readmegen"),
            Err(_) => PathBuf::from(".readmegen"),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Some(value))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create store dir: {}", self.dir.display()))?;
        let path = self.path_for(key);
        fs::write(&path, value).with_context(|| format!("Failed to write {}", path.display()))?;
        debug!("Stored {key} at {}", path.display());
        Ok(())
    }
}

/// In-process store; nothing outlives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self
            .items
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON values on top of a [`KeyValueStore`].
#[derive(Debug)]
pub struct Persistence<S> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the stored value, or `default` when the key is absent or the
    /// stored value can't be read.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.try_load(key) {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!("No stored value for {key}, using default");
                default
            }
            Err(err) => {
                warn!("Error reading {key} from store: {err:#}");
                default
            }
        }
    }

    /// Stores `value`. Failures are logged, never returned.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(err) = self.try_save(key, value) {
            error!("Error writing {key} to store: {err:#}");
        }
    }

    fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.store.get_item(key)? else {
            return Ok(None);
        };
        let value = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse stored value for {key}"))?;
        Ok(Some(value))
    }

    fn try_save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)
            .with_context(|| format!("Failed to serialize value for {key}"))?;
        self.store.set_item(key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProjectConfig, Theme};
    use tempfile::tempdir;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get_item(&self, _key: &str) -> Result<Option<String>> {
            anyhow::bail!("storage unavailable")
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<()> {
            anyhow::bail!("quota exceeded")
        }
    }

    #[test]
    fn test_missing_key_returns_default() {
        let persistence = Persistence::new(MemoryStore::new());
        assert_eq!(persistence.load(THEME_KEY, Theme::default()), Theme::default());
    }

    #[test]
    fn test_save_then_load() {
        let persistence = Persistence::new(MemoryStore::new());
        let config = ProjectConfig {
            name: "Foo".to_string(),
            ..ProjectConfig::default()
        };
        persistence.save(CONFIG_KEY, &config);
        assert_eq!(persistence.load(CONFIG_KEY, ProjectConfig::default()), config);
    }

    #[test]
    fn test_corrupt_value_returns_default() {
        let store = MemoryStore::new();
        store.set_item(CONFIG_KEY, "{not json").unwrap();
        let persistence = Persistence::new(store);
        assert_eq!(
            persistence.load(CONFIG_KEY, ProjectConfig::default()),
            ProjectConfig::default()
        );
    }

    #[test]
    fn test_broken_backend_never_propagates() {
        let persistence = Persistence::new(BrokenStore);
        persistence.save(THEME_KEY, &Theme::default());
        assert_eq!(persistence.load(THEME_KEY, Theme::default()), Theme::default());
    }

    #[test]
    fn test_file_store_writes_one_file_per_key() {
        let temp_dir = tempdir().unwrap();
        let store = FileStore::new(temp_dir.path().join("nested"));
        assert_eq!(store.get_item(THEME_KEY).unwrap(), None);

        store.set_item(THEME_KEY, "\"x\"").unwrap();
        assert!(temp_dir.path().join("nested/theme.json").exists());
        assert_eq!(store.get_item(THEME_KEY).unwrap(), Some("\"x\"".to_string()));
    }

    #[test]
    fn test_file_store_accepts_browser_payload() {
        let temp_dir = tempdir().unwrap();
        let store = FileStore::new(temp_dir.path());
        store
            .set_item(
                CONFIG_KEY,
                r#"{"name":"Foo","description":"","repoUrl":"","author":"","license":"GPL-3.0","demoImage":"","badges":[],"sections":[{"id":"s1","title":"Usage","content":"Run it","isOptional":false}]}"#,
            )
            .unwrap();
        let config = Persistence::new(store).load(CONFIG_KEY, ProjectConfig::default());
        assert_eq!(config.license, "GPL-3.0");
        assert_eq!(config.sections.len(), 1);
        assert!(config.badges.is_empty());
    }
}
