//! Interactable records
//!
//! A record ties one physics body and one visual node to the game metadata
//! that decides what a collision with it means.

use crate::behavior::Behavior;
use scooter_core::define_handle;
use scooter_core::handle::{BodyHandle, VisualHandle};

define_handle!(
    /// Live record in the [`crate::registry::Registry`].
    InteractableId
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractableKind {
    /// Scenery that is knocked aside and cleared at once.
    Prop,
    /// Patrons, launched and cleared after a short tumble.
    Human,
    /// Ends the run on contact.
    Hazard,
}

/// Every constructible interactable type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Archetype {
    Planter,
    Bench,
    FoodCart,
    Patron,
    SecurityGate,
    CleaningRobot,
    MaintenanceBarrier,
    Wall,
    Ceiling,
}

impl Archetype {
    /// Separation used when picking a random spot for this type.
    pub fn min_distance(self) -> f32 {
        match self {
            Archetype::Planter | Archetype::MaintenanceBarrier => 4.0,
            Archetype::Bench | Archetype::Patron | Archetype::CleaningRobot => 5.0,
            Archetype::FoodCart | Archetype::SecurityGate => 6.0,
            Archetype::Wall | Archetype::Ceiling => 0.0,
        }
    }

    /// Separation for the nearest-navigable refinement applied after the
    /// initial pick, for types that need one.
    pub fn navigable_distance(self) -> Option<f32> {
        match self {
            Archetype::Patron => Some(4.5),
            _ => None,
        }
    }

    /// Whether the type can be placed at an arbitrary arena position.
    pub fn is_placeable(self) -> bool {
        !matches!(self, Archetype::Wall | Archetype::Ceiling)
    }
}

/// How to bring back an equivalent record after cleanup.
///
/// The position is chosen when the respawn fires, not when it is queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RespawnBehavior {
    pub archetype: Archetype,
}

pub struct InteractableRecord {
    pub visual: VisualHandle,
    pub body: BodyHandle,
    pub archetype: Archetype,
    pub label: String,
    pub points: u32,
    pub kind: InteractableKind,
    pub fatal: bool,
    pub respawn: Option<RespawnBehavior>,
    pub behavior: Option<Box<dyn Behavior>>,
    hit: bool,
}

impl InteractableRecord {
    pub(crate) fn new(visual: VisualHandle, body: BodyHandle, meta: RecordMeta) -> Self {
        Self {
            visual,
            body,
            archetype: meta.archetype,
            label: meta.label,
            points: meta.points,
            kind: meta.kind,
            fatal: meta.fatal,
            respawn: meta.respawn,
            behavior: meta.behavior,
            hit: false,
        }
    }

    pub fn is_hit(&self) -> bool {
        self.hit
    }

    /// Flip the hit flag. Returns `false` if it was already set.
    pub(crate) fn mark_hit(&mut self) -> bool {
        if self.hit {
            return false;
        }
        self.hit = true;
        true
    }
}

impl std::fmt::Debug for InteractableRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractableRecord")
            .field("visual", &self.visual)
            .field("body", &self.body)
            .field("archetype", &self.archetype)
            .field("label", &self.label)
            .field("points", &self.points)
            .field("kind", &self.kind)
            .field("fatal", &self.fatal)
            .field("respawn", &self.respawn)
            .field("dynamic", &self.behavior.is_some())
            .field("hit", &self.hit)
            .finish()
    }
}

/// Game metadata a spawner attaches to a new record.
pub struct RecordMeta {
    pub archetype: Archetype,
    pub label: String,
    pub points: u32,
    pub kind: InteractableKind,
    pub fatal: bool,
    pub respawn: Option<RespawnBehavior>,
    pub behavior: Option<Box<dyn Behavior>>,
}

impl RecordMeta {
    /// Scoring prop or patron that comes back after cleanup.
    pub fn scoring(
        archetype: Archetype,
        label: impl Into<String>,
        points: u32,
        kind: InteractableKind,
    ) -> Self {
        Self {
            archetype,
            label: label.into(),
            points,
            kind,
            fatal: false,
            respawn: Some(RespawnBehavior { archetype }),
            behavior: None,
        }
    }

    /// Fatal hazard worth no points.
    pub fn hazard(archetype: Archetype, label: impl Into<String>) -> Self {
        Self {
            archetype,
            label: label.into(),
            points: 0,
            kind: InteractableKind::Hazard,
            fatal: true,
            respawn: archetype.is_placeable().then_some(RespawnBehavior { archetype }),
            behavior: None,
        }
    }

    pub fn with_behavior(mut self, behavior: impl Behavior + 'static) -> Self {
        self.behavior = Some(Box::new(behavior));
        self
    }
}
