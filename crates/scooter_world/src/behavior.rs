//! Per-tick behaviours of dynamic actors
//!
//! These only run while their record has not been hit. They act on the
//! visual transform after it has been copied from the body, so physics
//! stays authoritative.

use scooter_core::math::{Quat, Vec3};
use scooter_core::scene::Transform;

/// What a behaviour gets to see each tick.
pub struct ActorFrame<'a> {
    pub delta: f32,
    /// Arena time in seconds.
    pub elapsed: f32,
    pub body_position: Vec3,
    pub body_rotation: Quat,
    pub transform: &'a mut Transform,
}

pub trait Behavior {
    fn update(&mut self, frame: ActorFrame<'_>);
}

/// Constant yaw rotation on top of the body's orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct Spin {
    pub rate: f32,
    angle: f32,
}

impl Spin {
    pub fn new(rate: f32) -> Self {
        Self { rate, angle: 0.0 }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }
}

impl Behavior for Spin {
    fn update(&mut self, frame: ActorFrame<'_>) {
        self.angle = (self.angle + frame.delta * self.rate).rem_euclid(std::f32::consts::TAU);
        frame.transform.rotation = frame.body_rotation * Quat::from_rotation_y(self.angle);
    }
}

/// Gentle vertical bob plus a slow spin, for procedural patrons.
#[derive(Debug, Clone, PartialEq)]
pub struct IdleBob {
    pub amplitude: f32,
    /// Seconds per radian of the bob's phase.
    pub period: f32,
    pub phase: f32,
    spin: Spin,
}

impl IdleBob {
    pub fn new(amplitude: f32, period: f32, phase: f32, spin_rate: f32) -> Self {
        Self {
            amplitude,
            period,
            phase,
            spin: Spin::new(spin_rate),
        }
    }

    pub fn offset_at(&self, elapsed: f32) -> f32 {
        if self.period <= 0.0 {
            return 0.0;
        }
        (elapsed / self.period + self.phase).sin() * self.amplitude
    }
}

impl Behavior for IdleBob {
    fn update(&mut self, frame: ActorFrame<'_>) {
        let offset = self.offset_at(frame.elapsed);
        let base = frame.body_position.y;
        let transform = frame.transform;
        self.spin.update(ActorFrame {
            delta: frame.delta,
            elapsed: frame.elapsed,
            body_position: frame.body_position,
            body_rotation: frame.body_rotation,
            transform: &mut *transform,
        });
        transform.position.y = base + offset;
    }
}
