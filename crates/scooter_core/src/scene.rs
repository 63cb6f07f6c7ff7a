//! Scene graph port
//!
//! The renderer is external. The simulation creates and removes visual
//! nodes, copies body transforms into them and advances their animation
//! pose; nothing else crosses this boundary.

mod headless;

pub use headless::HeadlessScene;

use crate::handle::VisualHandle;
use crate::math::{Quat, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Playback state of a single skeletal clip.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationPose {
    pub clip: String,
    pub time: f32,
    pub duration: f32,
    pub looping: bool,
}

impl AnimationPose {
    pub fn new(clip: impl Into<String>, duration: f32) -> Self {
        Self {
            clip: clip.into(),
            time: 0.0,
            duration: duration.max(0.0),
            looping: true,
        }
    }

    pub fn starting_at(mut self, time: f32) -> Self {
        self.time = time;
        self.wrap();
        self
    }

    pub fn advance(&mut self, delta: f32) {
        self.time += delta;
        self.wrap();
    }

    fn wrap(&mut self) {
        if self.duration <= 0.0 {
            self.time = 0.0;
        } else if self.looping {
            self.time = self.time.rem_euclid(self.duration);
        } else {
            self.time = self.time.clamp(0.0, self.duration);
        }
    }
}

/// A renderable node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VisualNode {
    pub name: String,
    /// Asset template this node was instantiated from, `None` for
    /// procedural stand-ins.
    pub template: Option<String>,
    pub transform: Transform,
    pub pose: Option<AnimationPose>,
    /// Material colours, hex strings.
    pub colors: Vec<String>,
    pub visible: bool,
    /// Nodes carried along with this one; their transforms are local.
    pub children: Vec<VisualNode>,
}

impl VisualNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            ..Default::default()
        }
    }

    pub fn from_template(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            template: Some(template.into()),
            ..Self::new(name)
        }
    }

    pub fn at(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_pose(mut self, pose: AnimationPose) -> Self {
        self.pose = Some(pose);
        self
    }

    pub fn with_child(mut self, child: VisualNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }
}

/// Port to the renderer's scene.
pub trait SceneGraph {
    fn add(&mut self, node: VisualNode) -> VisualHandle;

    fn remove(&mut self, handle: VisualHandle) -> Option<VisualNode>;

    fn node(&self, handle: VisualHandle) -> Option<&VisualNode>;

    fn node_mut(&mut self, handle: VisualHandle) -> Option<&mut VisualNode>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, handle: VisualHandle) -> bool {
        self.node(handle).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looping_pose_wraps() {
        let mut pose = AnimationPose::new("idle", 1.0).starting_at(0.75);
        pose.advance(0.5);
        assert!((pose.time - 0.25).abs() < 1e-5);
    }

    #[test]
    fn one_shot_pose_holds_last_frame() {
        let mut pose = AnimationPose::new("wave", 1.0);
        pose.looping = false;
        pose.advance(3.0);
        assert_eq!(pose.time, 1.0);
    }

    #[test]
    fn zero_length_clip_stays_at_start() {
        let mut pose = AnimationPose::new("pose", 0.0);
        pose.advance(0.3);
        assert_eq!(pose.time, 0.0);
    }
}
