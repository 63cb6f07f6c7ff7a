//! Startup configuration
//!
//! Read from the JSON file named by `SCOOTER_CONFIG` (default
//! `scooter.json`). A missing file means defaults; a malformed one is
//! logged and also means defaults.

use scooter_core::time::TICK_SECONDS;
use scooter_world::{ArenaConfig, PopulationMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "SCOOTER_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "scooter.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub seed: u64,
    /// Frames the headless loop runs for.
    pub frames: u32,
    /// Simulated wall-clock delta per frame, in seconds.
    pub frame_delta: f32,
    pub settings_dir: PathBuf,
    pub asset_manifest: Option<PathBuf>,
    /// `None` picks curated when the mall model loads, randomized otherwise.
    pub population: Option<PopulationMode>,
    /// Optional `[x, z]` start point chosen through the spawn picker.
    pub spawn_point: Option<[f32; 2]>,
    pub arena: ArenaConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            seed: 0x5c00_7e12,
            frames: 1800,
            frame_delta: TICK_SECONDS,
            settings_dir: PathBuf::from("."),
            asset_manifest: Some(PathBuf::from("assets/manifest.json")),
            population: None,
            spawn_point: None,
            arena: ArenaConfig::default(),
        }
    }
}

pub fn config_path() -> PathBuf {
    std::env::var(CONFIG_ENV)
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

pub fn load_runtime_config() -> RuntimeConfig {
    load_from(&config_path())
}

pub fn load_from(path: &Path) -> RuntimeConfig {
    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str::<RuntimeConfig>(&contents) {
            Ok(config) => {
                tracing::info!("Loaded runtime config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}", path.display(), e);
                RuntimeConfig::default()
            }
        },
        Err(_) => RuntimeConfig::default(),
    }
}
