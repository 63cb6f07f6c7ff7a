//! In-memory physics backend
//!
//! Integrates gravity, forces and damping, keeps bodies above the ground
//! plane and reports AABB overlaps. It does not resolve penetration; it is
//! meant for headless runs and tests, not as a stand-in for a real solver.

use super::{BodyDesc, Contact, PhysicsWorld, RigidBody, GRAVITY};
use crate::handle::{BodyHandle, Slots};
use crate::math::{Quat, Vec3};

pub struct HeadlessPhysics {
    gravity: Vec3,
    bodies: Slots<BodyHandle, RigidBody>,
}

impl HeadlessPhysics {
    pub fn new() -> Self {
        Self::with_gravity(GRAVITY)
    }

    pub fn with_gravity(gravity: Vec3) -> Self {
        Self {
            gravity,
            bodies: Slots::new(),
        }
    }

    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    fn integrate(&mut self, dt: f32) {
        let gravity = self.gravity;
        for (_, body) in self.bodies.iter_mut() {
            if !body.is_dynamic() {
                body.clear_force();
                continue;
            }

            let acceleration = gravity + body.pending_force() * body.inverse_mass();
            body.velocity += acceleration * dt;
            body.velocity *= (1.0 - body.linear_damping).clamp(0.0, 1.0).powf(dt);
            body.angular_velocity *= (1.0 - body.angular_damping).clamp(0.0, 1.0).powf(dt);

            body.position += body.velocity * dt;
            if body.angular_velocity != Vec3::ZERO {
                let turn = Quat::from_scaled_axis(body.angular_velocity * dt);
                body.rotation = (turn * body.rotation).normalize();
            }

            // Ground plane at y = 0.
            if let Some(extents) = body.world_half_extents() {
                if body.position.y - extents.y < 0.0 {
                    body.position.y = extents.y;
                    body.velocity.y = body.velocity.y.max(0.0);
                }
            }
            body.clear_force();
        }
    }

    fn overlaps(&self) -> Vec<Contact> {
        let boxes: Vec<(BodyHandle, bool, Vec3, Vec3)> = self
            .bodies
            .iter()
            .filter_map(|(handle, body)| {
                body.world_half_extents()
                    .map(|extents| (handle, body.is_dynamic(), body.position, extents))
            })
            .collect();

        let mut contacts = Vec::new();
        for (i, &(a, a_dynamic, a_pos, a_ext)) in boxes.iter().enumerate() {
            for &(b, b_dynamic, b_pos, b_ext) in &boxes[i + 1..] {
                if !a_dynamic && !b_dynamic {
                    continue;
                }
                let gap = (a_pos - b_pos).abs() - (a_ext + b_ext);
                if gap.x < 0.0 && gap.y < 0.0 && gap.z < 0.0 {
                    contacts.push(Contact { a, b });
                }
            }
        }
        contacts
    }
}

impl Default for HeadlessPhysics {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld for HeadlessPhysics {
    fn add_body(&mut self, desc: BodyDesc) -> BodyHandle {
        self.bodies.insert(RigidBody::from_desc(desc))
    }

    fn remove_body(&mut self, handle: BodyHandle) -> Option<RigidBody> {
        self.bodies.remove(handle)
    }

    fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle)
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn step(&mut self, dt: f32) -> Vec<Contact> {
        self.integrate(dt);
        self.overlaps()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::TICK_SECONDS;

    #[test]
    fn dynamic_body_falls_and_rests_on_ground() {
        let mut physics = HeadlessPhysics::new();
        let handle = physics.add_body(BodyDesc::boxed(
            Vec3::splat(0.5),
            1.0,
            Vec3::new(0.0, 3.0, 0.0),
        ));
        for _ in 0..240 {
            physics.step(TICK_SECONDS);
        }
        let body = physics.body(handle).unwrap();
        assert!((body.position.y - 0.5).abs() < 1e-3);
    }

    #[test]
    fn static_bodies_do_not_move_or_touch_each_other() {
        let mut physics = HeadlessPhysics::new();
        let a = physics.add_body(BodyDesc::boxed(Vec3::ONE, 0.0, Vec3::new(0.0, 1.0, 0.0)));
        physics.add_body(BodyDesc::boxed(Vec3::ONE, 0.0, Vec3::new(0.5, 1.0, 0.0)));

        let contacts = physics.step(TICK_SECONDS);
        assert!(contacts.is_empty());
        assert_eq!(physics.position(a), Some(Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn overlapping_dynamic_body_reports_contact() {
        let mut physics = HeadlessPhysics::new();
        let wall = physics.add_body(BodyDesc::boxed(Vec3::ONE, 0.0, Vec3::new(0.0, 1.0, 0.0)));
        let cart = physics.add_body(BodyDesc::boxed(
            Vec3::splat(0.5),
            6.0,
            Vec3::new(1.2, 0.5, 0.0),
        ));

        let contacts = physics.step(TICK_SECONDS);
        assert_eq!(contacts.len(), 1);
        assert!(contacts[0].involves(wall) && contacts[0].involves(cart));
    }

    #[test]
    fn force_is_consumed_by_one_step() {
        let mut physics = HeadlessPhysics::with_gravity(Vec3::ZERO);
        let desc = BodyDesc::boxed(Vec3::splat(0.5), 1.0, Vec3::new(0.0, 0.5, 0.0));
        let handle = physics.add_body(desc);
        physics
            .body_mut(handle)
            .unwrap()
            .apply_force(Vec3::new(60.0, 0.0, 0.0));

        physics.step(TICK_SECONDS);
        let after_first = physics.body(handle).unwrap().velocity.x;
        physics.step(TICK_SECONDS);
        let after_second = physics.body(handle).unwrap().velocity.x;

        assert!(after_first > 0.0);
        assert!(after_second <= after_first);
    }

    #[test]
    fn removed_body_is_gone() {
        let mut physics = HeadlessPhysics::new();
        let handle = physics.add_body(BodyDesc::boxed(Vec3::ONE, 0.0, Vec3::ZERO));
        assert!(physics.remove_body(handle).is_some());
        assert!(!physics.contains(handle));
        assert_eq!(physics.body_count(), 0);
    }
}
