//! Fault-tolerant asset loading
//!
//! Each entry is loaded on its own. A failure is logged and the slot stays
//! empty; spawners fall back to procedural stand-ins.

use crate::manifest::{keys, AssetManifest, ModelEntry};
use crate::template::Template;
use crate::AssetError;
use scooter_core::math::{Quat, Vec3};
use scooter_core::scene::{Transform, VisualNode};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Label shared by generic patrons.
pub const DEFAULT_PATRON_LABEL: &str = "Mall Patron";

/// Scale applied to every NPC model (they are authored in centimetres).
pub const NPC_SCALE: f32 = 0.01;

/// Height the rider model is scaled to.
pub const RIDER_HEIGHT: f32 = 1.28;

/// Seat position relative to the scooter's origin.
pub const RIDER_SEAT_OFFSET: Vec3 = Vec3::new(0.0, 0.52, -0.08);

pub struct AssetLibrary {
    root: PathBuf,
}

impl AssetLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, base: &Path, entry: &ModelEntry) -> PathBuf {
        if entry.path.is_absolute() {
            entry.path.clone()
        } else {
            self.root.join(base).join(&entry.path)
        }
    }

    fn load_from(&self, base: &Path, entry: &ModelEntry) -> Result<Arc<Template>, AssetError> {
        let path = self.resolve(base, entry);
        let bytes = std::fs::read(&path).map_err(|source| AssetError::Io {
            path: path.clone(),
            source,
        })?;
        if bytes.is_empty() {
            return Err(AssetError::Empty { path });
        }
        tracing::debug!("Loaded asset '{}' ({} bytes)", path.display(), bytes.len());
        Ok(Arc::new(Template::from_entry(entry, path, bytes.len())))
    }

    /// Load an entry, logging and swallowing any failure.
    pub fn load_optional(&self, label: &str, entry: &ModelEntry) -> Option<Arc<Template>> {
        self.load_optional_from(Path::new(""), label, entry)
    }

    fn load_optional_from(
        &self,
        base: &Path,
        label: &str,
        entry: &ModelEntry,
    ) -> Option<Arc<Template>> {
        match self.load_from(base, entry) {
            Ok(template) => Some(template),
            Err(err) => {
                tracing::warn!("Failed to load {}: {}", label, err);
                None
            }
        }
    }

    fn keyed(&self, manifest: &AssetManifest, key: &str) -> Option<Arc<Template>> {
        let entry = manifest.model(key)?;
        self.load_optional(key, entry)
    }

    /// Load everything the manifest names. Never fails.
    pub fn load_mall_assets(&self, manifest: &AssetManifest) -> MallAssets {
        let mut npc_variants = Vec::new();
        for pack in &manifest.npc_packs {
            for entry in &pack.variants {
                let label = format!("{} {}", pack.name, entry.file_name());
                if let Some(template) = self.load_optional_from(&pack.base, &label, entry) {
                    npc_variants.push(NpcVariant {
                        label: template.label.clone(),
                        template,
                    });
                }
            }
        }

        let floor_texture = match self.keyed(manifest, keys::FLOOR_TEXTURE) {
            Some(texture) => FloorTexture::Loaded(texture),
            None => {
                tracing::info!("Using procedural floor texture as fallback");
                FloorTexture::procedural()
            }
        };

        let assets = MallAssets {
            floor_texture,
            mall_scene: self.keyed(manifest, keys::MALL_SCENE),
            kiosk: self.keyed(manifest, keys::KIOSK),
            floor_tile: self.keyed(manifest, keys::FLOOR_TILE),
            column: self.keyed(manifest, keys::COLUMN),
            banner: self.keyed(manifest, keys::BANNER),
            banner_texture: self.keyed(manifest, keys::BANNER_TEXTURE),
            scooter: self.keyed(manifest, keys::SCOOTER),
            rider: self.keyed(manifest, keys::RIDER),
            character_base: self.keyed(manifest, keys::CHARACTER_BASE),
            npc_variants,
        };
        tracing::info!(
            "Assets ready: mall scene {}, {} NPC variants",
            if assets.mall_scene.is_some() { "loaded" } else { "missing" },
            assets.npc_variants.len()
        );
        assets
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FloorTexture {
    Loaded(Arc<Template>),
    /// 4x4 checker of dark tiles, repeated across the floor.
    Procedural {
        colors: [&'static str; 4],
        repeat: u32,
    },
}

impl FloorTexture {
    pub fn procedural() -> Self {
        Self::Procedural {
            colors: ["#1f2a32", "#202b35", "#25323c", "#1c252c"],
            repeat: 48,
        }
    }

    /// Colour of tile `(x, y)` for the procedural pattern.
    pub fn tile_color(&self, x: usize, y: usize) -> Option<&'static str> {
        match self {
            Self::Procedural { colors, .. } => Some(colors[(x + y) % colors.len()]),
            Self::Loaded(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NpcVariant {
    pub label: String,
    pub template: Arc<Template>,
}

/// Everything the arena may be dressed with. Every field is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct MallAssets {
    pub floor_texture: FloorTexture,
    pub mall_scene: Option<Arc<Template>>,
    pub kiosk: Option<Arc<Template>>,
    pub floor_tile: Option<Arc<Template>>,
    pub column: Option<Arc<Template>>,
    pub banner: Option<Arc<Template>>,
    pub banner_texture: Option<Arc<Template>>,
    pub scooter: Option<Arc<Template>>,
    pub rider: Option<Arc<Template>>,
    pub character_base: Option<Arc<Template>>,
    pub npc_variants: Vec<NpcVariant>,
}

impl MallAssets {
    /// No assets at all; everything renders procedurally.
    pub fn empty() -> Self {
        Self {
            floor_texture: FloorTexture::procedural(),
            mall_scene: None,
            kiosk: None,
            floor_tile: None,
            column: None,
            banner: None,
            banner_texture: None,
            scooter: None,
            rider: None,
            character_base: None,
            npc_variants: Vec::new(),
        }
    }

    pub fn has_mall_scene(&self) -> bool {
        self.mall_scene.is_some()
    }

    /// Characters patrons are drawn from: pack variants, then the base
    /// character under the generic label.
    pub fn npc_pool(&self) -> Vec<NpcVariant> {
        let mut pool = self.npc_variants.clone();
        if let Some(base) = &self.character_base {
            pool.push(NpcVariant {
                label: DEFAULT_PATRON_LABEL.to_string(),
                template: Arc::clone(base),
            });
        }
        pool
    }

    /// Player vehicle visual, procedural when the model is missing.
    ///
    /// The rider only rides the modelled scooter; the procedural stand-in
    /// is built without one.
    pub fn scooter_node(&self) -> VisualNode {
        let Some(template) = &self.scooter else {
            return VisualNode::new("scooter-fallback")
                .with_colors(["#c0392b", "#2c3e50", "#ecf0f1"]);
        };
        let mut node = template.instantiate("mobility-scooter");
        if let Some(rider) = &self.rider {
            node = node.with_child(mount_rider(rider));
        }
        node
    }
}

/// Rider facing forward on the seat, scaled to [`RIDER_HEIGHT`].
fn mount_rider(rider: &Template) -> VisualNode {
    let scale = if rider.size.y > 0.0 {
        RIDER_HEIGHT / rider.size.y
    } else {
        1.0
    };
    rider.instantiate("scooter-rider").at(
        Transform::from_position(RIDER_SEAT_OFFSET)
            .with_rotation(Quat::from_rotation_y(std::f32::consts::PI))
            .with_scale(Vec3::splat(scale)),
    )
}

impl Default for MallAssets {
    fn default() -> Self {
        Self::empty()
    }
}
