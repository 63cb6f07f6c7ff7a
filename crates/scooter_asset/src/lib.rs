//! Scooter Asset Pipeline
//!
//! Manifest parsing, fault-tolerant loading and per-spawn instancing of the
//! models the mall is dressed with. Any asset may be missing; callers always
//! get something they can render.

pub mod error;
pub mod library;
pub mod manifest;
pub mod template;

pub use error::AssetError;
pub use library::{AssetLibrary, FloorTexture, MallAssets, NpcVariant};
pub use manifest::{AssetManifest, ClipEntry, ModelEntry, NpcPack};
pub use template::{friendly_label, AnimationClip, Template};
