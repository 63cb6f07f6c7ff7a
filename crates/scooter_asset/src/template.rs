//! Shared immutable templates and per-spawn instances
//!
//! A template is loaded once and shared for the arena's lifetime. Spawners
//! call [`Template::instantiate`] to get a node whose transform and pose
//! belong to the new record alone.

use crate::manifest::ModelEntry;
use scooter_core::math::Vec3;
use scooter_core::scene::{AnimationPose, VisualNode};
use std::path::PathBuf;

/// Shortest sampling window for idle clips with no usable duration.
pub const MIN_CLIP_WINDOW: f32 = 0.16;

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
}

impl AnimationClip {
    pub fn is_idle(&self) -> bool {
        let name = self.name.to_ascii_lowercase();
        name.contains("idle") || name.contains("stand")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub key: String,
    pub label: String,
    pub path: PathBuf,
    /// Bounding box size in model units.
    pub size: Vec3,
    pub clips: Vec<AnimationClip>,
    pub byte_len: usize,
}

impl Template {
    pub fn from_entry(entry: &ModelEntry, path: PathBuf, byte_len: usize) -> Self {
        let key = if entry.key.is_empty() {
            entry.file_name().to_string()
        } else {
            entry.key.clone()
        };
        Self {
            key,
            label: friendly_label(entry.file_name()),
            path,
            size: Vec3::from_array(entry.size),
            clips: entry
                .animations
                .iter()
                .map(|clip| AnimationClip {
                    name: clip.name.clone(),
                    duration: clip.duration,
                })
                .collect(),
            byte_len,
        }
    }

    /// Independent node referencing this template.
    pub fn instantiate(&self, name: impl Into<String>) -> VisualNode {
        VisualNode::from_template(name, self.key.clone())
    }

    /// First clip that looks like an idle loop, else the first clip.
    pub fn idle_clip(&self) -> Option<&AnimationClip> {
        self.clips
            .iter()
            .find(|clip| clip.is_idle())
            .or_else(|| self.clips.first())
    }

    /// Looping idle pose started at `phase` (a fraction in `[0, 1)`) of
    /// the sampling window, so patrons spawned together stay out of step.
    pub fn idle_pose(&self, phase: f32) -> Option<AnimationPose> {
        let clip = self.idle_clip()?;
        let window = clip.duration.max(MIN_CLIP_WINDOW);
        Some(AnimationPose::new(clip.name.clone(), window).starting_at(phase * window))
    }
}

/// Turn a model file name into a display label.
///
/// `"Man_in-suit.glb"` becomes `"Man In Suit"`.
pub fn friendly_label(file_name: &str) -> String {
    let stem = match file_name.len().checked_sub(4) {
        Some(split)
            if file_name.is_char_boundary(split)
                && file_name[split..].eq_ignore_ascii_case(".glb") =>
        {
            &file_name[..split]
        }
        _ => file_name,
    };

    let mut label = String::with_capacity(stem.len());
    let mut in_separator = false;
    let mut prev_is_word = false;
    for ch in stem.chars() {
        if ch == '-' || ch == '_' {
            if !in_separator {
                label.push(' ');
            }
            in_separator = true;
            prev_is_word = false;
            continue;
        }
        in_separator = false;
        if !prev_is_word && ch.is_ascii_lowercase() {
            label.push(ch.to_ascii_uppercase());
        } else {
            label.push(ch);
        }
        prev_is_word = ch.is_alphanumeric();
    }
    label.trim().to_string()
}
