//! Asset manifest
//!
//! JSON description of every file the game tries to load. Bounds and clip
//! metadata live here so the simulation never has to parse model files.

use crate::AssetError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Well-known model keys.
pub mod keys {
    pub const MALL_SCENE: &str = "mall";
    pub const KIOSK: &str = "kiosk";
    pub const FLOOR_TILE: &str = "floor_tile";
    pub const COLUMN: &str = "column";
    pub const BANNER: &str = "banner";
    pub const SCOOTER: &str = "scooter";
    pub const RIDER: &str = "rider";
    pub const CHARACTER_BASE: &str = "character_base";
    pub const FLOOR_TEXTURE: &str = "floor_texture";
    pub const BANNER_TEXTURE: &str = "banner_texture";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipEntry {
    pub name: String,
    #[serde(default)]
    pub duration: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    /// Lookup key; NPC variants may leave it empty.
    #[serde(default)]
    pub key: String,
    pub path: PathBuf,
    /// Bounding box size in model units.
    #[serde(default = "unit_size")]
    pub size: [f32; 3],
    #[serde(default)]
    pub animations: Vec<ClipEntry>,
}

fn unit_size() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl ModelEntry {
    pub fn new(key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
            size: unit_size(),
            animations: Vec::new(),
        }
    }

    /// File name of the entry, used for friendly labels.
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }
}

/// A directory of interchangeable character models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcPack {
    pub name: String,
    #[serde(default)]
    pub base: PathBuf,
    #[serde(default)]
    pub variants: Vec<ModelEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Directory every relative path is resolved against.
    #[serde(default)]
    pub root: PathBuf,
    #[serde(default)]
    pub models: Vec<ModelEntry>,
    #[serde(default)]
    pub npc_packs: Vec<NpcPack>,
}

impl AssetManifest {
    pub fn from_json(text: &str) -> Result<Self, AssetError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a manifest file; relative roots resolve against its directory.
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let text = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut manifest = Self::from_json(&text)?;
        if manifest.root.is_relative() {
            if let Some(parent) = path.parent() {
                manifest.root = parent.join(&manifest.root);
            }
        }
        Ok(manifest)
    }

    pub fn model(&self, key: &str) -> Option<&ModelEntry> {
        self.models.iter().find(|entry| entry.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_manifest_with_defaults() {
        let manifest = AssetManifest::from_json(
            r#"{
                "root": "assets",
                "models": [
                    { "key": "kiosk", "path": "mall_kiosk.gltf", "size": [2.0, 2.4, 1.4] },
                    { "key": "column", "path": "mall_column.gltf" }
                ],
                "npc_packs": [
                    {
                        "name": "animated men npc",
                        "base": "Animated Men Pack-glb",
                        "variants": [
                            {
                                "path": "Man in Suit.glb",
                                "animations": [{ "name": "Idle", "duration": 2.5 }]
                            }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.model("kiosk").unwrap().size, [2.0, 2.4, 1.4]);
        assert_eq!(manifest.model("column").unwrap().size, [1.0, 1.0, 1.0]);
        assert!(manifest.model("banner").is_none());
        let variant = &manifest.npc_packs[0].variants[0];
        assert_eq!(variant.file_name(), "Man in Suit.glb");
        assert_eq!(variant.animations[0].duration, 2.5);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            AssetManifest::from_json("{ models: "),
            Err(AssetError::Manifest(_))
        ));
    }

    #[test]
    fn missing_manifest_file_is_io_error() {
        let result = AssetManifest::load(Path::new("/definitely/not/here/assets.json"));
        assert!(matches!(result, Err(AssetError::Io { .. })));
    }
}
