//! Population policy
//!
//! How many of each type to spawn and where. Randomized mode scatters
//! counts drawn from fixed ranges; curated mode places a hand-authored
//! layout, used when the detailed mall model is present.

use crate::record::Archetype;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopulationMode {
    Curated,
    Randomized,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnQuota {
    pub archetype: Archetype,
    pub min: u32,
    pub max: u32,
    pub min_distance: f32,
}

pub const RANDOMIZED_QUOTAS: [SpawnQuota; 4] = [
    SpawnQuota { archetype: Archetype::Planter, min: 12, max: 18, min_distance: 4.0 },
    SpawnQuota { archetype: Archetype::Bench, min: 9, max: 14, min_distance: 5.0 },
    SpawnQuota { archetype: Archetype::FoodCart, min: 6, max: 9, min_distance: 6.0 },
    SpawnQuota { archetype: Archetype::Patron, min: 16, max: 22, min_distance: 5.0 },
];

/// Inclusive range of extra hazards per randomized pass.
pub const HAZARD_COUNT: (u32, u32) = (4, 6);

pub const HAZARD_ARCHETYPES: [Archetype; 3] = [
    Archetype::SecurityGate,
    Archetype::CleaningRobot,
    Archetype::MaintenanceBarrier,
];

/// Hand-placed `(archetype, x, z)` entries.
pub const CURATED_LAYOUT: [(Archetype, f32, f32); 24] = [
    (Archetype::Planter, -18.0, -14.0),
    (Archetype::Planter, -18.0, 14.0),
    (Archetype::Planter, 18.0, -14.0),
    (Archetype::Planter, 18.0, 14.0),
    (Archetype::Planter, -6.0, -18.0),
    (Archetype::Planter, 6.0, -18.0),
    (Archetype::Planter, -6.0, 18.0),
    (Archetype::Planter, 6.0, 18.0),
    (Archetype::Bench, -14.0, 0.0),
    (Archetype::Bench, 14.0, 0.0),
    (Archetype::Bench, 0.0, -14.0),
    (Archetype::Bench, 0.0, 14.0),
    (Archetype::FoodCart, -10.0, -6.0),
    (Archetype::FoodCart, 10.0, -6.0),
    (Archetype::FoodCart, -10.0, 6.0),
    (Archetype::FoodCart, 10.0, 6.0),
    (Archetype::Patron, -8.0, -2.0),
    (Archetype::Patron, 8.0, -2.0),
    (Archetype::Patron, -6.0, 8.0),
    (Archetype::Patron, 6.0, 8.0),
    (Archetype::MaintenanceBarrier, 0.0, -24.0),
    (Archetype::MaintenanceBarrier, 0.0, 24.0),
    (Archetype::CleaningRobot, -12.0, 12.0),
    (Archetype::CleaningRobot, 12.0, -12.0),
];

/// One-shot guards for [`crate::arena::Arena::populate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulationState {
    pub decor_built: bool,
    pub boundaries_built: bool,
    pub curated_spawned: bool,
}

/// What a single populate call added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopulationReport {
    pub spawned: BTreeMap<Archetype, usize>,
    pub decor_built: bool,
    pub boundaries_built: bool,
}

impl PopulationReport {
    pub(crate) fn record(&mut self, archetype: Archetype) {
        *self.spawned.entry(archetype).or_default() += 1;
    }

    pub fn count(&self, archetype: Archetype) -> usize {
        self.spawned.get(&archetype).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.spawned.values().sum()
    }
}
