//! Math utilities
//!
//! Re-exports glam with the planar (XZ) helpers and seeded randomness the
//! simulation relies on.

pub use glam::*;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Squared distance between two points projected onto the ground plane.
#[inline]
pub fn planar_distance_sq(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    dx * dx + dz * dz
}

/// Distance of a point from the origin, ignoring height.
#[inline]
pub fn planar_length(v: Vec3) -> f32 {
    v.x.hypot(v.z)
}

/// Seeded random number generator.
///
/// Every random decision in the simulation goes through one of these so a
/// seed reproduces a whole run.
pub struct GameRng {
    inner: SmallRng,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
        }
    }

    /// Uniform float in `[0, 1)`.
    pub fn unit(&mut self) -> f32 {
        self.inner.gen()
    }

    /// Uniform float in `[min, max)`; returns `min` for an empty range.
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.inner.gen_range(min..max)
    }

    /// Uniform integer in `[min, max]`.
    pub fn int_inclusive(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        self.inner.gen_range(min..=max)
    }

    /// Uniform angle in `[0, TAU)`.
    pub fn angle(&mut self) -> f32 {
        self.inner.gen_range(0.0..std::f32::consts::TAU)
    }

    pub fn chance(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability.clamp(0.0, 1.0))
    }

    /// Pick one element uniformly; `None` for an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.inner.gen_range(0..items.len());
        items.get(index)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(0x5c00_7e12)
    }
}
