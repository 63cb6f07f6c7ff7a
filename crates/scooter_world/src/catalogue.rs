//! Spawner catalogue
//!
//! Per-type construction rules: collider footprint, mass, damping, points
//! and the visual that goes with them. A [`Blueprint`] is inert until the
//! registry inserts it.

use crate::behavior::{IdleBob, Spin};
use crate::config::ArenaConfig;
use crate::record::{Archetype, InteractableKind, RecordMeta};
use scooter_asset::library::NPC_SCALE;
use scooter_asset::{MallAssets, NpcVariant};
use scooter_core::math::{GameRng, Quat, Vec3};
use scooter_core::physics::BodyDesc;
use scooter_core::scene::{Transform, VisualNode};

const SHIRT_PALETTE: [&str; 4] = ["#4f7cd1", "#d94f70", "#4fbfa8", "#f0821f"];
const PANTS_PALETTE: [&str; 4] = ["#383f4c", "#2f3645", "#48423c", "#2d3a4f"];
const HAIR_PALETTE: [&str; 4] = ["#2b1f1a", "#d8c4a5", "#3b2f26", "#51423b"];
const SKIN: &str = "#f2c7a6";

/// Scale applied to the kiosk model.
pub const KIOSK_SCALE: f32 = 1.8;

/// Body, visual and metadata for one interactable.
pub struct Blueprint {
    pub body: BodyDesc,
    pub visual: VisualNode,
    pub meta: RecordMeta,
}

impl Blueprint {
    fn new(name: &str, body: BodyDesc, meta: RecordMeta) -> Self {
        let transform = Transform::from_position(body.position).with_rotation(body.rotation);
        let visual = VisualNode::new(name).at(transform);
        Self { body, visual, meta }
    }

    fn with_visual(mut self, visual: VisualNode) -> Self {
        let transform = Transform {
            position: self.body.position,
            rotation: self.body.rotation,
            scale: visual.transform.scale,
        };
        self.visual = visual.at(transform);
        self
    }

    fn with_colors(mut self, colors: &[&str]) -> Self {
        self.visual.colors = colors.iter().map(|color| color.to_string()).collect();
        self
    }
}

pub struct Catalogue {
    assets: MallAssets,
    npc_pool: Vec<NpcVariant>,
}

impl Catalogue {
    pub fn new(assets: MallAssets) -> Self {
        let npc_pool = assets.npc_pool();
        Self { assets, npc_pool }
    }

    pub fn assets(&self) -> &MallAssets {
        &self.assets
    }

    /// Build a placeable archetype at ground position `at`.
    ///
    /// Walls and the ceiling are laid out by [`Catalogue::boundaries`] and
    /// return `None` here.
    pub fn blueprint(
        &self,
        archetype: Archetype,
        at: Vec3,
        rng: &mut GameRng,
    ) -> Option<Blueprint> {
        let blueprint = match archetype {
            Archetype::Planter => planter(at, rng),
            Archetype::Bench => bench(at, rng),
            Archetype::FoodCart => self.food_cart(at),
            Archetype::Patron => self.patron(at, rng),
            Archetype::SecurityGate => security_gate(at),
            Archetype::CleaningRobot => cleaning_robot(at),
            Archetype::MaintenanceBarrier => maintenance_barrier(at),
            Archetype::Wall | Archetype::Ceiling => return None,
        };
        Some(blueprint)
    }

    fn food_cart(&self, at: Vec3) -> Blueprint {
        if let Some(kiosk) = &self.assets.kiosk {
            let size = kiosk.size * KIOSK_SCALE;
            let body = BodyDesc::boxed(size / 2.0, 6.0, Vec3::new(at.x, size.y / 2.0, at.z))
                .with_damping(0.9, 0.75);
            let meta =
                RecordMeta::scoring(Archetype::FoodCart, "Mall Kiosk", 120, InteractableKind::Prop);
            let visual = kiosk
                .instantiate("mall-kiosk")
                .at(Transform::IDENTITY.with_scale(Vec3::splat(KIOSK_SCALE)));
            return Blueprint::new("mall-kiosk", body, meta).with_visual(visual);
        }

        let body = BodyDesc::boxed(Vec3::new(0.9, 0.8, 0.55), 6.0, Vec3::new(at.x, 0.8, at.z))
            .with_damping(0.85, 0.65);
        let meta =
            RecordMeta::scoring(Archetype::FoodCart, "Food Cart", 85, InteractableKind::Prop);
        Blueprint::new("food-cart", body, meta).with_colors(&["#d94f70", "#fce36b", "#2c3036"])
    }

    fn patron(&self, at: Vec3, rng: &mut GameRng) -> Blueprint {
        let yaw = rng.range(-std::f32::consts::PI, std::f32::consts::PI);
        let body = BodyDesc::boxed(Vec3::new(0.32, 0.9, 0.28), 3.5, Vec3::new(at.x, 0.9, at.z))
            .with_damping(0.45, 0.4)
            .with_rotation(Quat::from_rotation_y(yaw));

        match rng.choose(&self.npc_pool) {
            Some(variant) => {
                let mut visual = variant
                    .template
                    .instantiate("mall-patron")
                    .at(Transform::IDENTITY.with_scale(Vec3::splat(NPC_SCALE)));
                if let Some(pose) = variant.template.idle_pose(rng.unit()) {
                    visual = visual.with_pose(pose);
                }
                let meta = RecordMeta::scoring(
                    Archetype::Patron,
                    variant.label.clone(),
                    150,
                    InteractableKind::Human,
                );
                Blueprint::new("mall-patron", body, meta).with_visual(visual)
            }
            None => {
                let outfit = [
                    pick(rng, &SHIRT_PALETTE),
                    pick(rng, &PANTS_PALETTE),
                    pick(rng, &HAIR_PALETTE),
                    SKIN,
                ];
                let bob = IdleBob::new(0.02, 0.6, rng.angle(), 0.1);
                let meta = RecordMeta::scoring(
                    Archetype::Patron,
                    "Mall Patron",
                    150,
                    InteractableKind::Human,
                )
                .with_behavior(bob);
                Blueprint::new("mall-patron", body, meta).with_colors(&outfit)
            }
        }
    }

    /// Four walls just outside the floor plus the ceiling slab.
    pub fn boundaries(&self, config: &ArenaConfig) -> Vec<Blueprint> {
        let thickness = config.wall_thickness;
        let height = config.wall_height;
        let offset = config.half_extent + thickness;
        let span = offset * 2.0 + thickness;

        let segments = [
            (Vec3::new(0.0, 0.0, offset), Vec3::new(span, height, thickness)),
            (Vec3::new(0.0, 0.0, -offset), Vec3::new(span, height, thickness)),
            (Vec3::new(offset, 0.0, 0.0), Vec3::new(thickness, height, span)),
            (Vec3::new(-offset, 0.0, 0.0), Vec3::new(thickness, height, span)),
        ];

        let mut blueprints: Vec<Blueprint> = segments
            .into_iter()
            .map(|(at, size)| {
                let body = BodyDesc::boxed(size / 2.0, 0.0, Vec3::new(at.x, height / 2.0, at.z));
                let meta = RecordMeta::hazard(Archetype::Wall, "Mall Wall");
                Blueprint::new("mall-boundary", body, meta).with_colors(&["#8fb6d8"])
            })
            .collect();

        let floor = config.floor_size();
        let ceiling = BodyDesc::boxed(
            Vec3::new(floor / 2.0, 0.5, floor / 2.0),
            0.0,
            Vec3::new(0.0, config.ceiling_height, 0.0),
        );
        let meta = RecordMeta::hazard(Archetype::Ceiling, "Mall Ceiling");
        let mut ceiling = Blueprint::new("mall-ceiling", ceiling, meta);
        ceiling.visual.visible = false;
        blueprints.push(ceiling);
        blueprints
    }
}

fn pick(rng: &mut GameRng, palette: &[&'static str]) -> &'static str {
    rng.choose(palette).copied().unwrap_or(palette[0])
}

fn planter(at: Vec3, rng: &mut GameRng) -> Blueprint {
    let height = rng.range(0.5, 0.9);
    let radius = rng.range(0.6, 1.1);
    let body = BodyDesc::boxed(
        Vec3::new(radius, height / 2.0, radius),
        0.0,
        Vec3::new(at.x, height / 2.0, at.z),
    );
    let meta = RecordMeta::scoring(Archetype::Planter, "Planter", 40, InteractableKind::Prop);
    Blueprint::new("planter", body, meta).with_colors(&["#4c5a52", "#2f8f5e"])
}

fn bench(at: Vec3, rng: &mut GameRng) -> Blueprint {
    let width = rng.range(2.2, 3.0);
    let body = BodyDesc::boxed(
        Vec3::new(width / 2.0, 0.35, 0.325),
        0.0,
        Vec3::new(at.x, 0.35, at.z),
    );
    let meta = RecordMeta::scoring(Archetype::Bench, "Bench", 55, InteractableKind::Prop);
    Blueprint::new("bench", body, meta).with_colors(&["#a97155", "#2c3036"])
}

fn security_gate(at: Vec3) -> Blueprint {
    let body = BodyDesc::boxed(Vec3::new(2.25, 1.7, 0.3), 0.0, Vec3::new(at.x, 1.7, at.z));
    let meta = RecordMeta::hazard(Archetype::SecurityGate, "Security Gate");
    Blueprint::new("security-gate", body, meta).with_colors(&["#4d5964", "#9fb2bf"])
}

fn cleaning_robot(at: Vec3) -> Blueprint {
    let body = BodyDesc::boxed(Vec3::new(0.9, 0.5, 0.9), 0.0, Vec3::new(at.x, 0.5, at.z));
    let meta = RecordMeta::hazard(Archetype::CleaningRobot, "Cleaning Robot")
        .with_behavior(Spin::new(0.5));
    Blueprint::new("cleaning-robot", body, meta).with_colors(&["#4aa3d8", "#1a2730", "#f1c40f"])
}

fn maintenance_barrier(at: Vec3) -> Blueprint {
    let body = BodyDesc::boxed(Vec3::new(1.6, 1.1, 0.2), 0.0, Vec3::new(at.x, 1.1, at.z));
    Blueprint::new(
        "maintenance-barrier",
        body,
        RecordMeta::hazard(Archetype::MaintenanceBarrier, "Maintenance Barrier"),
    )
    .with_colors(&["#f5a623", "#222831"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use scooter_asset::manifest::{ClipEntry, ModelEntry};
    use scooter_asset::Template;
    use scooter_core::physics::{BodyMaterial, Shape};
    use std::sync::Arc;

    fn half_extents(blueprint: &Blueprint) -> Vec3 {
        match blueprint.body.shape {
            Shape::Box { half_extents } => half_extents,
            Shape::Plane => panic!("expected a box"),
        }
    }

    fn template(key: &str, file: &str, size: [f32; 3], clips: &[(&str, f32)]) -> Arc<Template> {
        let mut entry = ModelEntry::new(key, file);
        entry.size = size;
        entry.animations = clips
            .iter()
            .map(|(name, duration)| ClipEntry {
                name: name.to_string(),
                duration: *duration,
            })
            .collect();
        Arc::new(Template::from_entry(&entry, entry.path.clone(), 1))
    }

    #[test]
    fn static_props_sit_on_the_floor() {
        let catalogue = Catalogue::new(MallAssets::empty());
        let mut rng = GameRng::new(4);
        let archetypes = [
            Archetype::Planter,
            Archetype::Bench,
            Archetype::SecurityGate,
            Archetype::MaintenanceBarrier,
        ];
        for archetype in archetypes {
            let blueprint = catalogue
                .blueprint(archetype, Vec3::new(20.0, 0.0, 30.0), &mut rng)
                .unwrap();
            let extents = half_extents(&blueprint);
            assert_eq!(blueprint.body.mass, 0.0);
            assert_eq!(blueprint.body.material, BodyMaterial::Ground);
            assert!((blueprint.body.position.y - extents.y).abs() < 1e-6);
            assert_eq!(blueprint.visual.transform.position, blueprint.body.position);
        }
    }

    #[test]
    fn food_cart_without_kiosk_template() {
        let catalogue = Catalogue::new(MallAssets::empty());
        let blueprint = catalogue
            .blueprint(Archetype::FoodCart, Vec3::ZERO, &mut GameRng::new(1))
            .unwrap();
        assert_eq!(blueprint.meta.label, "Food Cart");
        assert_eq!(blueprint.meta.points, 85);
        assert_eq!(blueprint.body.mass, 6.0);
        assert_eq!(blueprint.body.material, BodyMaterial::Dynamic);
        assert_eq!((blueprint.body.angular_damping, blueprint.body.linear_damping), (0.85, 0.65));
    }

    #[test]
    fn kiosk_template_scales_footprint() {
        let mut assets = MallAssets::empty();
        assets.kiosk = Some(template("kiosk", "mall_kiosk.gltf", [2.0, 2.0, 1.0], &[]));
        let catalogue = Catalogue::new(assets);
        let blueprint = catalogue
            .blueprint(Archetype::FoodCart, Vec3::ZERO, &mut GameRng::new(1))
            .unwrap();

        assert_eq!(blueprint.meta.label, "Mall Kiosk");
        assert_eq!(blueprint.meta.points, 120);
        assert!(half_extents(&blueprint).abs_diff_eq(Vec3::new(1.8, 1.8, 0.9), 1e-5));
        assert_eq!(blueprint.visual.template.as_deref(), Some("kiosk"));
        assert_eq!(blueprint.visual.transform.scale, Vec3::splat(KIOSK_SCALE));
    }

    #[test]
    fn fallback_patron_bobs_and_scores() {
        let catalogue = Catalogue::new(MallAssets::empty());
        let blueprint = catalogue
            .blueprint(Archetype::Patron, Vec3::new(15.0, 0.0, 0.0), &mut GameRng::new(2))
            .unwrap();
        assert_eq!(blueprint.meta.kind, InteractableKind::Human);
        assert_eq!(blueprint.meta.points, 150);
        assert_eq!(blueprint.meta.label, "Mall Patron");
        assert!(blueprint.meta.behavior.is_some());
        assert_eq!(blueprint.visual.colors.len(), 4);
        assert_eq!(blueprint.body.mass, 3.5);
    }

    #[test]
    fn asset_patron_uses_variant_label_and_idle_clip() {
        let mut assets = MallAssets::empty();
        assets.npc_variants.push(NpcVariant {
            label: "Man In Suit".to_string(),
            template: template(
                "",
                "Man in Suit.glb",
                [1.0, 1.8, 0.5],
                &[("Walk", 1.0), ("Idle", 4.0)],
            ),
        });
        let catalogue = Catalogue::new(assets);
        let blueprint = catalogue
            .blueprint(Archetype::Patron, Vec3::new(15.0, 0.0, 0.0), &mut GameRng::new(2))
            .unwrap();

        assert_eq!(blueprint.meta.label, "Man In Suit");
        assert!(blueprint.meta.behavior.is_none());
        let pose = blueprint.visual.pose.as_ref().unwrap();
        assert_eq!(pose.clip, "Idle");
        assert!(pose.time >= 0.0 && pose.time < 4.0);
    }

    #[test]
    fn robot_spins_and_walls_are_permanent() {
        let catalogue = Catalogue::new(MallAssets::empty());
        let robot = catalogue
            .blueprint(Archetype::CleaningRobot, Vec3::ZERO, &mut GameRng::new(1))
            .unwrap();
        assert!(robot.meta.fatal && robot.meta.behavior.is_some());

        let boundaries = catalogue.boundaries(&ArenaConfig::default());
        assert_eq!(boundaries.len(), 5);
        assert!(boundaries.iter().all(|b| b.meta.fatal && b.meta.respawn.is_none()));
        assert_eq!(boundaries[4].meta.label, "Mall Ceiling");
        assert_eq!(boundaries[4].body.position.y, 12.0);
        assert!(catalogue.blueprint(Archetype::Wall, Vec3::ZERO, &mut GameRng::new(1)).is_none());
    }
}
