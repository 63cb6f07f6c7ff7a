//! Interactable registry
//!
//! The single source of truth for what is alive in the arena. Membership
//! here implies the record's body is in the physics world and its node is
//! in the scene; [`Registry::register`] and [`Registry::remove`] keep the
//! three in step.

use crate::behavior::ActorFrame;
use crate::catalogue::Blueprint;
use crate::placement::Occupant;
use crate::record::{Archetype, InteractableId, InteractableRecord};
use scooter_core::handle::{BodyHandle, Slots};
use scooter_core::physics::PhysicsWorld;
use scooter_core::scene::SceneGraph;
use std::collections::HashMap;

#[derive(Default)]
pub struct Registry {
    records: Slots<InteractableId, InteractableRecord>,
    by_body: HashMap<BodyHandle, InteractableId>,
    /// Records with a per-tick behaviour, kept apart so the hot loop only
    /// visits those.
    dynamic: Vec<InteractableId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the body and node into their worlds and track the record.
    pub fn register<P, S>(
        &mut self,
        physics: &mut P,
        scene: &mut S,
        blueprint: Blueprint,
    ) -> InteractableId
    where
        P: PhysicsWorld + ?Sized,
        S: SceneGraph + ?Sized,
    {
        let Blueprint { body, visual, meta } = blueprint;
        let body = physics.add_body(body);
        let visual = scene.add(visual);
        let dynamic = meta.behavior.is_some();

        let id = self.records.insert(InteractableRecord::new(visual, body, meta));
        self.by_body.insert(body, id);
        if dynamic {
            self.dynamic.push(id);
        }
        id
    }

    /// Remove the record together with its body and node.
    pub fn remove<P, S>(
        &mut self,
        id: InteractableId,
        physics: &mut P,
        scene: &mut S,
    ) -> Option<InteractableRecord>
    where
        P: PhysicsWorld + ?Sized,
        S: SceneGraph + ?Sized,
    {
        let record = self.records.remove(id)?;
        physics.remove_body(record.body);
        scene.remove(record.visual);
        self.by_body.remove(&record.body);
        self.dynamic.retain(|&other| other != id);
        Some(record)
    }

    /// Copy body transforms onto nodes, then run dynamic behaviours.
    ///
    /// Physics is authoritative: nothing flows from the scene back into
    /// the bodies.
    pub fn sync<P, S>(&mut self, delta: f32, elapsed: f32, physics: &P, scene: &mut S)
    where
        P: PhysicsWorld + ?Sized,
        S: SceneGraph + ?Sized,
    {
        for (_, record) in self.records.iter_mut() {
            let (Some(body), Some(node)) =
                (physics.body(record.body), scene.node_mut(record.visual))
            else {
                continue;
            };
            node.transform.position = body.position;
            node.transform.rotation = body.rotation;
            if !record.is_hit() {
                if let Some(pose) = node.pose.as_mut() {
                    pose.advance(delta);
                }
            }
        }

        for &id in &self.dynamic {
            let Some(record) = self.records.get_mut(id) else {
                continue;
            };
            if record.is_hit() {
                continue;
            }
            let (Some(behavior), Some(body), Some(node)) = (
                record.behavior.as_mut(),
                physics.body(record.body),
                scene.node_mut(record.visual),
            ) else {
                continue;
            };
            behavior.update(ActorFrame {
                delta,
                elapsed,
                body_position: body.position,
                body_rotation: body.rotation,
                transform: &mut node.transform,
            });
        }
    }

    /// Record attached to a body, if any.
    pub fn lookup(&self, body: BodyHandle) -> Option<InteractableId> {
        self.by_body.get(&body).copied()
    }

    pub fn get(&self, id: InteractableId) -> Option<&InteractableRecord> {
        self.records.get(id)
    }

    pub fn get_mut(&mut self, id: InteractableId) -> Option<&mut InteractableRecord> {
        self.records.get_mut(id)
    }

    pub fn contains(&self, id: InteractableId) -> bool {
        self.records.contains(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn dynamic_len(&self) -> usize {
        self.dynamic.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (InteractableId, &InteractableRecord)> {
        self.records.iter()
    }

    pub fn count(&self, archetype: Archetype) -> usize {
        self.records
            .iter()
            .filter(|(_, record)| record.archetype == archetype)
            .count()
    }

    /// Current body positions of every live record.
    pub fn occupants<P>(&self, physics: &P) -> Vec<Occupant>
    where
        P: PhysicsWorld + ?Sized,
    {
        self.records
            .iter()
            .filter_map(|(_, record)| {
                physics.position(record.body).map(|position| Occupant {
                    body: record.body,
                    position,
                })
            })
            .collect()
    }
}
