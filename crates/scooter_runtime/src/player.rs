//! The player's mobility scooter

use scooter_core::handle::{BodyHandle, VisualHandle};
use scooter_core::math::{planar_length, Vec3};
use scooter_core::physics::{BodyDesc, BodyMaterial, PhysicsWorld};
use scooter_core::scene::{SceneGraph, VisualNode};
use scooter_services::InputState;

/// Collider half-extents (0.88 x 1.2 x 1.6 box).
pub const HALF_EXTENTS: Vec3 = Vec3::new(0.44, 0.6, 0.8);
pub const MASS: f32 = 25.0;
pub const RIDE_HEIGHT: f32 = 0.8;
pub const START: Vec3 = Vec3::new(0.0, RIDE_HEIGHT, 0.0);
pub const DRIVE_FORCE: f32 = 75.0;
/// Yaw-rate change per second of full steering.
pub const STEER_RATE: f32 = 5.0;

pub struct Player {
    body: BodyHandle,
    visual: VisualHandle,
}

impl Player {
    pub fn spawn<P, S>(physics: &mut P, scene: &mut S, node: VisualNode) -> Self
    where
        P: PhysicsWorld + ?Sized,
        S: SceneGraph + ?Sized,
    {
        let desc = BodyDesc::boxed(HALF_EXTENTS, MASS, START)
            .with_damping(0.5, 0.3)
            .with_material(BodyMaterial::Player);
        Self {
            body: physics.add_body(desc),
            visual: scene.add(node),
        }
    }

    pub fn body(&self) -> BodyHandle {
        self.body
    }

    pub fn visual(&self) -> VisualHandle {
        self.visual
    }

    /// Push along the scooter's facing (-Z in body space) and steer.
    pub fn apply_input<P>(&self, physics: &mut P, input: InputState, delta: f32)
    where
        P: PhysicsWorld + ?Sized,
    {
        let Some(body) = physics.body_mut(self.body) else {
            return;
        };
        let drive = input.drive();
        if drive != 0.0 {
            let forward = body.rotation * Vec3::NEG_Z;
            body.apply_force(forward * DRIVE_FORCE * drive);
        }
        let steer = input.steer();
        if steer != 0.0 {
            body.angular_velocity.y -= steer * delta * STEER_RATE;
        }
    }

    /// Move to `position` at ride height with all motion cleared.
    pub fn teleport<P: PhysicsWorld + ?Sized>(&self, physics: &mut P, position: Vec3) {
        if let Some(body) = physics.body_mut(self.body) {
            body.position = Vec3::new(position.x, RIDE_HEIGHT, position.z);
            body.halt();
        }
    }

    pub fn freeze<P: PhysicsWorld + ?Sized>(&self, physics: &mut P) {
        if let Some(body) = physics.body_mut(self.body) {
            body.halt();
        }
    }

    pub fn sync<P, S>(&self, physics: &P, scene: &mut S)
    where
        P: PhysicsWorld + ?Sized,
        S: SceneGraph + ?Sized,
    {
        if let (Some(body), Some(node)) = (physics.body(self.body), scene.node_mut(self.visual)) {
            node.transform.position = body.position;
            node.transform.rotation = body.rotation;
        }
    }

    pub fn position<P: PhysicsWorld + ?Sized>(&self, physics: &P) -> Vec3 {
        physics.position(self.body).unwrap_or(START)
    }

    pub fn speed<P: PhysicsWorld + ?Sized>(&self, physics: &P) -> f32 {
        physics
            .body(self.body)
            .map(|body| planar_length(body.velocity))
            .unwrap_or(0.0)
    }
}
