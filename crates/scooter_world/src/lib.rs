//! Scooter World
//!
//! The simulation core of the mall: where things may be placed, what is
//! alive, what a collision with each thing means and how the arena is
//! filled.
//!
//! - [`placement`]: separation, bounds and plaza clearance checks
//! - [`registry`]: live interactables and their bodies and nodes
//! - [`catalogue`]: per-type construction rules
//! - [`collision`]: fatal/score classification and hit response
//! - [`population`]: curated and randomized layouts
//! - [`arena`]: the facade the game loop talks to

pub mod arena;
pub mod behavior;
pub mod catalogue;
pub mod collision;
pub mod config;
pub mod decor;
pub mod placement;
pub mod population;
pub mod record;
pub mod registry;

pub use arena::{Arena, ArenaTask};
pub use collision::{CollisionOutcome, HitResponse};
pub use config::ArenaConfig;
pub use placement::{NavigableOptions, Occupant, Placement};
pub use population::{PopulationMode, PopulationReport};
pub use record::{Archetype, InteractableId, InteractableKind, InteractableRecord, RespawnBehavior};
pub use registry::Registry;
