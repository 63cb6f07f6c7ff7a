//! The arena
//!
//! Owns the physics world, the scene, the registry and the task scheduler,
//! and exposes the operations the game loop drives: populate, step, route
//! collisions and tick.

use crate::catalogue::Catalogue;
use crate::collision::{resolve_hit, CollisionOutcome};
use crate::config::ArenaConfig;
use crate::decor::{build_decor, Decor};
use crate::placement::{NavigableOptions, Placement};
use crate::population::{
    PopulationMode, PopulationReport, PopulationState, CURATED_LAYOUT, HAZARD_ARCHETYPES,
    HAZARD_COUNT, RANDOMIZED_QUOTAS,
};
use crate::record::{Archetype, InteractableId, RespawnBehavior};
use crate::registry::Registry;
use scooter_asset::MallAssets;
use scooter_core::handle::BodyHandle;
use scooter_core::math::{GameRng, Vec3};
use scooter_core::physics::{Contact, HeadlessPhysics, PhysicsWorld};
use scooter_core::scene::{HeadlessScene, SceneGraph};
use scooter_core::schedule::Scheduler;
use scooter_core::time::seconds;

/// Deferred work queued on the arena's virtual clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaTask {
    Cleanup(InteractableId),
    Respawn(RespawnBehavior),
}

pub struct Arena<P = HeadlessPhysics, S = HeadlessScene> {
    config: ArenaConfig,
    physics: P,
    scene: S,
    registry: Registry,
    catalogue: Catalogue,
    scheduler: Scheduler<ArenaTask>,
    rng: GameRng,
    population: PopulationState,
    decor: Decor,
}

impl Arena<HeadlessPhysics, HeadlessScene> {
    /// Arena backed by the in-memory physics and scene.
    pub fn headless(config: ArenaConfig, assets: MallAssets, seed: u64) -> Self {
        Self::new(config, HeadlessPhysics::new(), HeadlessScene::new(), assets, GameRng::new(seed))
    }
}

impl<P: PhysicsWorld, S: SceneGraph> Arena<P, S> {
    pub fn new(
        config: ArenaConfig,
        physics: P,
        scene: S,
        assets: MallAssets,
        rng: GameRng,
    ) -> Self {
        Self {
            config,
            physics,
            scene,
            registry: Registry::new(),
            catalogue: Catalogue::new(assets),
            scheduler: Scheduler::new(),
            rng,
            population: PopulationState::default(),
            decor: Decor::default(),
        }
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut P {
        &mut self.physics
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    /// Both worlds at once, for callers that move data between them.
    pub fn split_mut(&mut self) -> (&mut P, &mut S) {
        (&mut self.physics, &mut self.scene)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn scheduler(&self) -> &Scheduler<ArenaTask> {
        &self.scheduler
    }

    pub fn decor(&self) -> &Decor {
        &self.decor
    }

    /// Arena clock in seconds.
    pub fn elapsed(&self) -> f32 {
        self.scheduler.now().as_secs_f32()
    }

    /// Placement snapshot of the current occupants.
    pub fn placement(&self) -> Placement<'_> {
        Placement::new(&self.config, self.registry.occupants(&self.physics))
    }

    pub fn is_position_free(
        &self,
        position: Vec3,
        min_distance: f32,
        ignore: &[BodyHandle],
    ) -> bool {
        self.placement().is_position_free(position, min_distance, ignore)
    }

    pub fn find_spawn_position(&mut self, min_distance: f32) -> Vec3 {
        let placement = Placement::new(&self.config, self.registry.occupants(&self.physics));
        placement.find_spawn_position(min_distance, &mut self.rng)
    }

    pub fn find_nearest_navigable_point(
        &mut self,
        target: Vec3,
        min_distance: f32,
        options: &NavigableOptions,
    ) -> Vec3 {
        let placement = Placement::new(&self.config, self.registry.occupants(&self.physics));
        placement.find_nearest_navigable_point(target, min_distance, options, &mut self.rng)
    }

    /// Build and register one interactable.
    ///
    /// Without an explicit position a random free one is chosen now, so a
    /// delayed respawn sees the arena as it is when it fires.
    pub fn spawn(
        &mut self,
        archetype: Archetype,
        position: Option<Vec3>,
    ) -> Option<InteractableId> {
        if !archetype.is_placeable() {
            return None;
        }

        let desired = match position {
            Some(position) => position,
            None => self.find_spawn_position(archetype.min_distance()),
        };
        let at = match archetype.navigable_distance() {
            Some(distance) => {
                let options = NavigableOptions::default();
                self.find_nearest_navigable_point(desired, distance, &options)
            }
            None => desired,
        };

        let blueprint = self.catalogue.blueprint(archetype, at, &mut self.rng)?;
        let id = self.registry.register(&mut self.physics, &mut self.scene, blueprint);
        tracing::debug!("Spawned {:?} {} at ({:.1}, {:.1})", archetype, id, at.x, at.z);
        Some(id)
    }

    /// Fill the arena.
    ///
    /// Decor and boundaries are built on the first call only; the curated
    /// layout is placed once. Randomized passes add a fresh batch each time.
    /// `None` picks curated when the mall model is loaded.
    pub fn populate(&mut self, mode: Option<PopulationMode>) -> PopulationReport {
        let has_mall_scene = self.catalogue.assets().has_mall_scene();
        let mode = mode.unwrap_or(if has_mall_scene {
            PopulationMode::Curated
        } else {
            PopulationMode::Randomized
        });
        let mut report = PopulationReport::default();

        if !self.population.decor_built {
            self.decor = build_decor(
                &self.config,
                self.catalogue.assets(),
                &mut self.physics,
                &mut self.scene,
                &mut self.rng,
            );
            self.population.decor_built = true;
            report.decor_built = true;
        }

        if !self.population.boundaries_built {
            for blueprint in self.catalogue.boundaries(&self.config) {
                self.registry.register(&mut self.physics, &mut self.scene, blueprint);
            }
            self.population.boundaries_built = true;
            report.boundaries_built = true;
        }

        match mode {
            PopulationMode::Curated => {
                if !self.population.curated_spawned {
                    for (archetype, x, z) in CURATED_LAYOUT {
                        if self.spawn(archetype, Some(Vec3::new(x, 0.0, z))).is_some() {
                            report.record(archetype);
                        }
                    }
                    self.population.curated_spawned = true;
                }
            }
            PopulationMode::Randomized => {
                for quota in RANDOMIZED_QUOTAS {
                    let total = self.rng.int_inclusive(quota.min, quota.max);
                    for _ in 0..total {
                        let position = self.find_spawn_position(quota.min_distance);
                        if self.spawn(quota.archetype, Some(position)).is_some() {
                            report.record(quota.archetype);
                        }
                    }
                }

                let hazards = self.rng.int_inclusive(HAZARD_COUNT.0, HAZARD_COUNT.1);
                for _ in 0..hazards {
                    let Some(&archetype) = self.rng.choose(&HAZARD_ARCHETYPES) else {
                        break;
                    };
                    if self.spawn(archetype, None).is_some() {
                        report.record(archetype);
                    }
                }
            }
        }

        tracing::info!(
            "Populated mall ({:?}): {} spawned, {} live interactables",
            mode,
            report.total(),
            self.registry.len()
        );
        report
    }

    /// Advance physics by one fixed sub-step.
    pub fn step(&mut self, dt: f32) -> Vec<Contact> {
        self.physics.step(dt)
    }

    /// React to a contact between two bodies.
    ///
    /// Whichever body carries a record is the one struck; the other is the
    /// striker. When both carry one, `a` is the struck record and `b` the
    /// striker, so callers routing player contacts pass the player as `b`.
    /// Contacts between unregistered bodies, repeats of an already handled
    /// hit, and contacts with removed bodies all yield `None`.
    pub fn handle_collision(&mut self, a: BodyHandle, b: BodyHandle) -> Option<CollisionOutcome> {
        let (id, striker) = match self.registry.lookup(a) {
            Some(id) => (id, b),
            None => (self.registry.lookup(b)?, a),
        };
        let striker = self.physics.position(striker);

        let record = self.registry.get_mut(id)?;
        if record.fatal {
            return Some(CollisionOutcome::Fatal {
                label: record.label.clone(),
            });
        }

        let body = record.body;
        let response = resolve_hit(
            id,
            record,
            self.physics.body_mut(body),
            striker,
            &self.config,
            &mut self.rng,
        )?;
        let outcome = CollisionOutcome::Score {
            label: record.label.clone(),
            points: record.points,
            response,
        };

        if response.cleanup_delay.is_zero() {
            self.cleanup(id);
        } else {
            self.scheduler.schedule(response.cleanup_delay, ArenaTask::Cleanup(id));
        }
        tracing::debug!(
            "Hit {} ({:?}), cleanup in {:?}",
            id,
            response.kind,
            response.cleanup_delay
        );
        Some(outcome)
    }

    /// Remove a record and queue its respawn, if it has one.
    ///
    /// Returns `false` if the record was already gone.
    pub fn cleanup(&mut self, id: InteractableId) -> bool {
        let Some(record) = self.registry.remove(id, &mut self.physics, &mut self.scene) else {
            return false;
        };

        if let Some(respawn) = record.respawn {
            let (min, max) = self.config.respawn_window();
            let delay = seconds(self.rng.range(min.as_secs_f32(), max.as_secs_f32()));
            self.scheduler.schedule(delay, ArenaTask::Respawn(respawn));
            tracing::debug!("Cleaned up {} ({}), respawn in {:?}", id, record.label, delay);
        } else {
            tracing::debug!("Cleaned up {} ({})", id, record.label);
        }
        true
    }

    /// Advance the arena clock: run due tasks, then sync visuals.
    pub fn tick(&mut self, delta: f32) {
        for task in self.scheduler.advance(seconds(delta)) {
            match task {
                ArenaTask::Cleanup(id) => {
                    self.cleanup(id);
                }
                ArenaTask::Respawn(respawn) => {
                    if self.spawn(respawn.archetype, None).is_none() {
                        tracing::warn!("Could not respawn {:?}", respawn.archetype);
                    }
                }
            }
        }

        let elapsed = self.elapsed();
        self.registry.sync(delta, elapsed, &self.physics, &mut self.scene);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::InteractableKind;
    use scooter_asset::manifest::ModelEntry;
    use scooter_asset::Template;
    use scooter_core::physics::BodyDesc;
    use std::sync::Arc;
    use std::time::Duration;

    fn arena() -> Arena {
        Arena::headless(ArenaConfig::default(), MallAssets::empty(), 17)
    }

    fn striker(arena: &mut Arena, x: f32, z: f32) -> BodyHandle {
        arena
            .physics_mut()
            .add_body(BodyDesc::boxed(Vec3::new(0.44, 0.6, 0.8), 25.0, Vec3::new(x, 0.8, z)))
    }

    fn advance(arena: &mut Arena, steps: usize) {
        for _ in 0..steps {
            arena.tick(0.1);
        }
    }

    #[test]
    fn fatal_hit_leaves_hazard_untouched() {
        let mut arena = arena();
        let gate = arena.spawn(Archetype::SecurityGate, Some(Vec3::new(30.0, 0.0, 30.0))).unwrap();
        let gate_body = arena.registry().get(gate).unwrap().body;
        let player = striker(&mut arena, 28.0, 30.0);

        let outcome = arena.handle_collision(gate_body, player).unwrap();
        assert_eq!(outcome, CollisionOutcome::Fatal { label: "Security Gate".to_string() });

        let record = arena.registry().get(gate).unwrap();
        assert!(!record.is_hit());
        assert!(arena.physics().contains(gate_body));
        assert_eq!(arena.scheduler().pending(), 0);
        // Still fatal on the next contact.
        assert!(arena.handle_collision(player, gate_body).unwrap().is_fatal());
    }

    #[test]
    fn prop_hit_is_pushed_cleared_and_respawned_once() {
        let mut arena = arena();
        let cart = arena.spawn(Archetype::FoodCart, Some(Vec3::new(30.0, 0.0, 30.0))).unwrap();
        let cart_body = arena.registry().get(cart).unwrap().body;
        let player = striker(&mut arena, 28.0, 30.0);

        let outcome = arena.handle_collision(player, cart_body).unwrap();
        let CollisionOutcome::Score { label, points, response } = outcome else {
            panic!("expected a score");
        };
        assert_eq!((label.as_str(), points), ("Food Cart", 85));
        assert_eq!(response.kind, InteractableKind::Prop);
        assert!(response.impulse.x > 0.0);
        assert_eq!(response.cleanup_delay, Duration::ZERO);

        // Cleared immediately, respawn queued.
        assert!(!arena.registry().contains(cart));
        assert!(!arena.physics().contains(cart_body));
        assert_eq!(arena.registry().count(Archetype::FoodCart), 0);
        assert_eq!(arena.scheduler().pending(), 1);
        assert!(arena.handle_collision(player, cart_body).is_none());

        // Nothing comes back before the 1.5 s lower bound.
        advance(&mut arena, 14);
        assert_eq!(arena.registry().count(Archetype::FoodCart), 0);
        assert_eq!(arena.scheduler().pending(), 1);

        // By 4.2 s exactly one replacement exists.
        advance(&mut arena, 28);
        assert_eq!(arena.registry().count(Archetype::FoodCart), 1);
        assert_eq!(arena.scheduler().pending(), 0);

        advance(&mut arena, 50);
        assert_eq!(arena.registry().count(Archetype::FoodCart), 1);
    }

    #[test]
    fn human_tumbles_before_cleanup() {
        let mut arena = arena();
        let patron = arena.spawn(Archetype::Patron, Some(Vec3::new(30.0, 0.0, 30.0))).unwrap();
        let patron_body = arena.registry().get(patron).unwrap().body;
        let player = striker(&mut arena, 28.0, 30.0);

        let outcome = arena.handle_collision(patron_body, player).unwrap();
        let CollisionOutcome::Score { points, response, .. } = outcome else {
            panic!("expected a score");
        };
        assert_eq!(points, 150);
        assert!(response.impulse.x > 0.0 && response.impulse.y > 0.0);
        let velocity = arena.physics().body(patron_body).unwrap().velocity;
        assert!(velocity.x > 0.0 && velocity.y > 0.0);

        // Repeated contacts during the tumble are absorbed.
        assert!(arena.handle_collision(patron_body, player).is_none());

        advance(&mut arena, 15);
        assert!(arena.registry().contains(patron));
        assert!(arena.registry().get(patron).unwrap().is_hit());

        advance(&mut arena, 2);
        assert!(!arena.registry().contains(patron));
        assert!(!arena.physics().contains(patron_body));
        assert!(arena.handle_collision(patron_body, player).is_none());
    }

    #[test]
    fn human_cleanup_waits_then_respawns_within_window() {
        let mut arena = arena();
        let patron = arena.spawn(Archetype::Patron, Some(Vec3::new(30.0, 0.0, -30.0))).unwrap();
        let patron_body = arena.registry().get(patron).unwrap().body;
        let player = striker(&mut arena, 28.0, -30.0);
        arena.handle_collision(patron_body, player).unwrap();
        assert_eq!(arena.scheduler().pending(), 1);

        // 1.5 s in: still tumbling, no respawn queued yet.
        advance(&mut arena, 15);
        assert!(arena.registry().contains(patron));
        assert_eq!(arena.scheduler().pending(), 1);

        // Cleanup fires on the first tick past 1.6 s and queues the respawn.
        advance(&mut arena, 2);
        assert!(!arena.registry().contains(patron));
        assert_eq!(arena.registry().count(Archetype::Patron), 0);
        assert_eq!(arena.scheduler().pending(), 1);

        // Respawn lands 1.5 s to 4.2 s after the cleanup at 1.7 s.
        advance(&mut arena, 14);
        assert_eq!(arena.registry().count(Archetype::Patron), 0);
        advance(&mut arena, 28);
        assert_eq!(arena.registry().count(Archetype::Patron), 1);
        assert_eq!(arena.scheduler().pending(), 0);
    }

    #[test]
    fn early_cleanup_makes_scheduled_cleanup_a_no_op() {
        let mut arena = arena();
        let patron = arena.spawn(Archetype::Patron, Some(Vec3::new(-30.0, 0.0, 30.0))).unwrap();
        let patron_body = arena.registry().get(patron).unwrap().body;
        let player = striker(&mut arena, -28.0, 30.0);
        arena.handle_collision(patron_body, player).unwrap();

        assert!(arena.cleanup(patron));
        assert!(!arena.cleanup(patron));
        // Pending: the first cleanup timer and one respawn.
        assert_eq!(arena.scheduler().pending(), 2);

        advance(&mut arena, 50);
        assert_eq!(arena.registry().count(Archetype::Patron), 1);
        assert_eq!(arena.scheduler().pending(), 0);
    }

    #[test]
    fn first_body_is_struck_when_both_are_registered() {
        let mut arena = arena();
        let bench = arena.spawn(Archetype::Bench, Some(Vec3::new(20.0, 0.0, 20.0))).unwrap();
        let planter = arena.spawn(Archetype::Planter, Some(Vec3::new(22.0, 0.0, 20.0))).unwrap();
        let bench_body = arena.registry().get(bench).unwrap().body;
        let planter_body = arena.registry().get(planter).unwrap().body;

        let outcome = arena.handle_collision(planter_body, bench_body).unwrap();
        assert_eq!(outcome.label(), "Planter");
        assert!(!arena.registry().contains(planter));
        assert!(arena.registry().contains(bench));
        assert!(!arena.registry().get(bench).unwrap().is_hit());
    }

    #[test]
    fn unregistered_bodies_are_ignored() {
        let mut arena = arena();
        let a = striker(&mut arena, 0.0, 0.0);
        let b = striker(&mut arena, 1.0, 0.0);
        assert!(arena.handle_collision(a, b).is_none());
    }

    #[test]
    fn randomized_population_counts_and_correspondence() {
        let mut arena = arena();
        let report = arena.populate(Some(PopulationMode::Randomized));

        assert!(report.decor_built && report.boundaries_built);
        assert!((12..=18).contains(&report.count(Archetype::Planter)));
        assert!((9..=14).contains(&report.count(Archetype::Bench)));
        assert!((6..=9).contains(&report.count(Archetype::FoodCart)));
        assert!((16..=22).contains(&report.count(Archetype::Patron)));
        let hazards: usize = HAZARD_ARCHETYPES.iter().map(|&a| report.count(a)).sum();
        assert!((4..=6).contains(&hazards));

        assert_eq!(arena.registry().count(Archetype::Wall), 4);
        assert_eq!(arena.registry().count(Archetype::Ceiling), 1);
        assert_eq!(arena.registry().len(), report.total() + 5);
        assert_eq!(
            arena.physics().body_count(),
            arena.registry().len() + arena.decor().columns.len()
        );
        assert_eq!(arena.scene().len(), arena.registry().len() + arena.decor().visuals.len());
    }

    #[test]
    fn repeated_populate_does_not_duplicate_structure() {
        let mut arena = arena();
        arena.populate(Some(PopulationMode::Randomized));
        let decor_nodes = arena.decor().visuals.len();

        let second = arena.populate(Some(PopulationMode::Randomized));
        assert!(!second.decor_built && !second.boundaries_built);
        assert_eq!(arena.registry().count(Archetype::Wall), 4);
        assert_eq!(arena.decor().visuals.len(), decor_nodes);
    }

    #[test]
    fn curated_layout_spawns_once() {
        let mut assets = MallAssets::empty();
        let entry = ModelEntry::new("mall", "shopping_mall/scene.gltf");
        assets.mall_scene = Some(Arc::new(Template::from_entry(&entry, entry.path.clone(), 1)));
        let mut arena = Arena::headless(ArenaConfig::default(), assets, 3);

        let first = arena.populate(None);
        assert_eq!(first.total(), CURATED_LAYOUT.len());
        assert!(first.decor_built);
        assert!(arena.decor().ground.is_some());
        assert_eq!(arena.decor().visuals.len(), 1);
        let live = arena.registry().len();

        let second = arena.populate(None);
        assert_eq!(second.total(), 0);
        assert_eq!(arena.registry().len(), live);
    }

    #[test]
    fn curated_patrons_are_moved_out_of_the_plaza() {
        let mut arena = arena();
        arena.populate(Some(PopulationMode::Curated));
        let clearance = arena.config().clear_radius + 1.5;
        for (_, record) in arena.registry().iter() {
            if record.archetype == Archetype::Patron {
                let position = arena.physics().position(record.body).unwrap();
                assert!(scooter_core::math::planar_length(position) >= clearance - 1e-3);
            }
        }
    }

    #[test]
    fn spawned_positions_keep_separation_when_space_allows() {
        let mut arena = arena();
        for _ in 0..10 {
            arena.spawn(Archetype::Planter, None).unwrap();
        }
        let occupants = arena.registry().occupants(arena.physics());
        for (i, a) in occupants.iter().enumerate() {
            for b in &occupants[i + 1..] {
                assert!(scooter_core::math::planar_distance_sq(a.position, b.position) >= 16.0);
            }
        }
    }

    #[test]
    fn tick_syncs_visuals_from_bodies() {
        let mut arena = arena();
        let cart = arena.spawn(Archetype::FoodCart, Some(Vec3::new(20.0, 0.0, -20.0))).unwrap();
        let record = arena.registry().get(cart).unwrap();
        let (body, visual) = (record.body, record.visual);

        for _ in 0..30 {
            arena.step(1.0 / 60.0);
        }
        arena.tick(0.5);
        let position = arena.physics().position(body).unwrap();
        assert_eq!(arena.scene().node(visual).unwrap().transform.position, position);
    }
}
