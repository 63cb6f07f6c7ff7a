//! Settings management
//!
//! A small JSON blob stored under a fixed key. Reading never fails: missing
//! or malformed data falls back to defaults. Writing reports typed errors.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Storage key for the settings blob.
pub const SETTINGS_KEY: &str = "grand-theft-scooter.settings";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings storage at '{path}' failed: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode settings: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlScheme {
    Wasd,
    Arrows,
    #[default]
    Hybrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Player preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub control_scheme: ControlScheme,
    pub theme: Theme,
}

/// Key/value persistence backend.
pub trait SettingsStore {
    fn read(&self, key: &str) -> Result<Option<String>, SettingsError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), SettingsError>;
}

impl Settings {
    /// Load from `store`, falling back to defaults on any problem.
    pub fn load(store: &dyn SettingsStore) -> Self {
        let raw = match store.read(SETTINGS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(err) => {
                tracing::warn!("Could not read settings: {}", err);
                return Self::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!("Ignoring malformed settings: {}", err);
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn SettingsStore) -> Result<(), SettingsError> {
        let raw = serde_json::to_string(self)?;
        store.write(SETTINGS_KEY, &raw)
    }
}

/// In-memory store, for tests and headless runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
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

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SettingsStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, SettingsError> {
        let path = self.path(key);
        match std::fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SettingsError::Io { path, source }),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| SettingsError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path(key);
        std::fs::write(&path, value).map_err(|source| SettingsError::Io { path, source })
    }
}
