//! Physics engine port
//!
//! The rigid-body solver is an external collaborator. The simulation only
//! needs the narrow surface below: add/remove bodies, read and nudge their
//! state, and advance one fixed sub-step while collecting contacts.

mod headless;

pub use headless::HeadlessPhysics;

use crate::handle::BodyHandle;
use crate::math::{Mat3, Quat, Vec3};

/// Standard gravity used by the arena.
pub const GRAVITY: Vec3 = Vec3::new(0.0, -9.82, 0.0);

/// Collider geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Axis-aligned (in body space) box given by its half-extents.
    Box { half_extents: Vec3 },
    /// Infinite ground plane.
    Plane,
}

/// Contact material tag; the engine pairs these into friction/restitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyMaterial {
    #[default]
    Ground,
    Dynamic,
    Player,
}

/// Everything needed to create a rigid body.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDesc {
    pub shape: Shape,
    /// 0 = static/immovable.
    pub mass: f32,
    pub position: Vec3,
    pub rotation: Quat,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub material: BodyMaterial,
}

impl BodyDesc {
    /// Box body with default damping, material picked from the mass.
    pub fn boxed(half_extents: Vec3, mass: f32, position: Vec3) -> Self {
        Self {
            shape: Shape::Box { half_extents },
            mass,
            position,
            rotation: Quat::IDENTITY,
            linear_damping: 0.01,
            angular_damping: 0.01,
            material: if mass > 0.0 {
                BodyMaterial::Dynamic
            } else {
                BodyMaterial::Ground
            },
        }
    }

    pub fn with_damping(mut self, angular: f32, linear: f32) -> Self {
        self.angular_damping = angular;
        self.linear_damping = linear;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_material(mut self, material: BodyMaterial) -> Self {
        self.material = material;
        self
    }
}

/// Live rigid body state as exposed by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    pub shape: Shape,
    pub mass: f32,
    pub position: Vec3,
    pub rotation: Quat,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub material: BodyMaterial,
    force: Vec3,
}

impl RigidBody {
    pub fn from_desc(desc: BodyDesc) -> Self {
        Self {
            shape: desc.shape,
            mass: desc.mass.max(0.0),
            position: desc.position,
            rotation: desc.rotation,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            linear_damping: desc.linear_damping,
            angular_damping: desc.angular_damping,
            material: desc.material,
            force: Vec3::ZERO,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        self.mass > 0.0
    }

    pub fn inverse_mass(&self) -> f32 {
        if self.is_dynamic() {
            1.0 / self.mass
        } else {
            0.0
        }
    }

    /// Instantaneous change of momentum; static bodies ignore it.
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse * self.inverse_mass();
    }

    /// Force applied over the next sub-step, then cleared.
    pub fn apply_force(&mut self, force: Vec3) {
        if self.is_dynamic() {
            self.force += force;
        }
    }

    pub fn pending_force(&self) -> Vec3 {
        self.force
    }

    pub(crate) fn clear_force(&mut self) {
        self.force = Vec3::ZERO;
    }

    /// Stop all motion (used when the engine teleports or freezes a body).
    pub fn halt(&mut self) {
        self.velocity = Vec3::ZERO;
        self.angular_velocity = Vec3::ZERO;
        self.force = Vec3::ZERO;
    }

    /// World-space half-extents of the rotated box, `None` for planes.
    pub fn world_half_extents(&self) -> Option<Vec3> {
        match self.shape {
            Shape::Box { half_extents } => {
                let m = Mat3::from_quat(self.rotation);
                Some(
                    m.x_axis.abs() * half_extents.x
                        + m.y_axis.abs() * half_extents.y
                        + m.z_axis.abs() * half_extents.z,
                )
            }
            Shape::Plane => None,
        }
    }
}

/// Two bodies touching during a sub-step.
///
/// A single physical contact is usually reported on several consecutive
/// sub-steps; consumers must be idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Contact {
    pub a: BodyHandle,
    pub b: BodyHandle,
}

impl Contact {
    pub fn involves(&self, body: BodyHandle) -> bool {
        self.a == body || self.b == body
    }

    /// The body on the other side of the contact from `body`.
    pub fn other(&self, body: BodyHandle) -> Option<BodyHandle> {
        if self.a == body {
            Some(self.b)
        } else if self.b == body {
            Some(self.a)
        } else {
            None
        }
    }
}

/// Port to the rigid-body engine.
pub trait PhysicsWorld {
    fn add_body(&mut self, desc: BodyDesc) -> BodyHandle;

    /// Remove a body; `None` if it was not present.
    fn remove_body(&mut self, handle: BodyHandle) -> Option<RigidBody>;

    fn body(&self, handle: BodyHandle) -> Option<&RigidBody>;

    fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody>;

    fn body_count(&self) -> usize;

    /// Advance exactly one fixed sub-step and report contacts.
    fn step(&mut self, dt: f32) -> Vec<Contact>;

    fn contains(&self, handle: BodyHandle) -> bool {
        self.body(handle).is_some()
    }

    fn position(&self, handle: BodyHandle) -> Option<Vec3> {
        self.body(handle).map(|body| body.position)
    }

    fn apply_impulse(&mut self, handle: BodyHandle, impulse: Vec3) -> bool {
        match self.body_mut(handle) {
            Some(body) => {
                body.apply_impulse(impulse);
                true
            }
            None => false,
        }
    }
}
