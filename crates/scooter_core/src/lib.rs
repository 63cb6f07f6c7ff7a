//! Scooter Core
//!
//! Contains the simulation building blocks shared by every other crate:
//! - Generational handles for bodies and visuals
//! - Fixed-step time and a virtual-time task scheduler
//! - Seeded randomness and planar math helpers
//! - Ports to the physics engine and scene graph, with headless backends

pub mod handle;
pub mod math;
pub mod physics;
pub mod scene;
pub mod schedule;
pub mod time;

pub use glam;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
