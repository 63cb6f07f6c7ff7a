//! One-time arena dressing
//!
//! The ground, then (without a mall model) floor strips, the plaza
//! fountain, a ring of columns and hanging banners. Columns get static
//! bodies but no record, so contacts with them are ignored by the
//! collision protocol.

use crate::config::ArenaConfig;
use scooter_asset::{FloorTexture, MallAssets};
use scooter_core::handle::{BodyHandle, VisualHandle};
use scooter_core::math::{GameRng, Quat, Vec3};
use scooter_core::physics::{BodyDesc, PhysicsWorld};
use scooter_core::scene::{SceneGraph, Transform, VisualNode};

/// Height the floor decals float above the ground plane.
const DECAL_HEIGHT: f32 = 0.015;

/// Side of the square ground visual; larger than the walled arena.
pub const GROUND_SIZE: f32 = 160.0;

/// The ground visual sits just below the physics plane.
const GROUND_HEIGHT: f32 = -0.02;

/// Base tint under the floor texture.
const GROUND_TINT: &str = "#d2d6dc";

/// Handles to everything built by [`build_decor`].
#[derive(Debug, Default)]
pub struct Decor {
    pub ground: Option<VisualHandle>,
    pub visuals: Vec<VisualHandle>,
    pub columns: Vec<BodyHandle>,
    pub banners: usize,
}

pub fn build_decor<P, S>(
    config: &ArenaConfig,
    assets: &MallAssets,
    physics: &mut P,
    scene: &mut S,
    rng: &mut GameRng,
) -> Decor
where
    P: PhysicsWorld + ?Sized,
    S: SceneGraph + ?Sized,
{
    let mut decor = Decor::default();
    let ground = scene.add(ground_node(&assets.floor_texture));
    decor.ground = Some(ground);
    decor.visuals.push(ground);
    if assets.has_mall_scene() {
        tracing::info!("Built mall ground under the loaded mall model");
        return decor;
    }

    let floor_length = config.half_extent * 2.0;

    let pieces = [
        ("mall-main-aisle", Vec3::new(18.0, 1.0, floor_length), 0.0, "#27333a"),
        ("mall-cross-aisle", Vec3::new(floor_length, 1.0, 14.0), 0.0, "#27333a"),
        ("mall-plaza", Vec3::new(16.0, 1.0, 16.0), 0.0, "#1c2329"),
        ("mall-fountain-base", Vec3::new(10.8, 0.9, 10.8), 0.45, "#d7dadf"),
        ("mall-fountain-pool", Vec3::new(7.9, 0.22, 7.9), 0.72, "#4aa3d8"),
    ];
    for (name, scale, y, color) in pieces {
        let node = VisualNode::new(name)
            .at(Transform::from_position(Vec3::new(0.0, DECAL_HEIGHT + y, 0.0)).with_scale(scale))
            .with_colors([color]);
        decor.visuals.push(scene.add(node));
    }

    if let Some(column) = &assets.column {
        let count = rng.int_inclusive(10, 14);
        let radius = rng.range(24.0, 30.0);
        for i in 0..count {
            let height = rng.range(4.5, 6.5);
            let girth = rng.range(1.0, 1.6);
            let angle = i as f32 / count as f32 * std::f32::consts::TAU;
            let position = Vec3::new(angle.cos() * radius, height / 2.0, angle.sin() * radius);

            let node = column
                .instantiate("mall-column")
                .at(Transform::from_position(position).with_scale(Vec3::new(girth, height, girth)));
            decor.visuals.push(scene.add(node));
            let half_extents = Vec3::new(girth / 2.0, height / 2.0, girth / 2.0);
            decor
                .columns
                .push(physics.add_body(BodyDesc::boxed(half_extents, 0.0, position)));
        }
    }

    if let Some(banner) = &assets.banner {
        let rows = rng.int_inclusive(2, 3);
        for row in 0..rows {
            let z = (row as f32 - (rows - 1) as f32 / 2.0) * 12.0;
            let count = rng.int_inclusive(4, 6);
            for i in 0..count {
                let width = rng.range(4.0, 7.0);
                let height = rng.range(3.2, 4.4);
                let x = (i as f32 - (count - 1) as f32 / 2.0) * 8.0;

                let mut node = banner.instantiate("mall-banner").at(
                    Transform::from_position(Vec3::new(x, height, z))
                        .with_rotation(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2))
                        .with_scale(Vec3::new(width, 1.0, 1.0)),
                );
                if assets.banner_texture.is_none() {
                    node = node.with_colors(["#f575ab"]);
                }
                decor.visuals.push(scene.add(node));
                decor.banners += 1;
            }
        }
    }

    tracing::info!(
        "Built mall decor: {} columns, {} banners",
        decor.columns.len(),
        decor.banners
    );
    decor
}

/// Ground plane visual textured with the loaded or procedural floor.
pub fn ground_node(texture: &FloorTexture) -> VisualNode {
    let node = match texture {
        FloorTexture::Loaded(template) => {
            template.instantiate("mall-ground").with_colors([GROUND_TINT])
        }
        FloorTexture::Procedural { colors, .. } => VisualNode::new("mall-ground")
            .with_colors(std::iter::once(GROUND_TINT).chain(colors.iter().copied())),
    };
    node.at(
        Transform::from_position(Vec3::new(0.0, GROUND_HEIGHT, 0.0))
            .with_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2))
            .with_scale(Vec3::new(GROUND_SIZE, GROUND_SIZE, 1.0)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use scooter_asset::manifest::ModelEntry;
    use scooter_asset::Template;
    use scooter_core::math::planar_length;
    use scooter_core::physics::HeadlessPhysics;
    use scooter_core::scene::HeadlessScene;
    use std::sync::Arc;

    fn template(key: &str) -> Arc<Template> {
        let entry = ModelEntry::new(key, format!("{key}.gltf"));
        Arc::new(Template::from_entry(&entry, entry.path.clone(), 1))
    }

    #[test]
    fn bare_assets_build_floor_only() {
        let mut physics = HeadlessPhysics::new();
        let mut scene = HeadlessScene::new();
        let decor = build_decor(
            &ArenaConfig::default(),
            &MallAssets::empty(),
            &mut physics,
            &mut scene,
            &mut GameRng::new(1),
        );
        assert_eq!(decor.visuals.len(), 6);
        assert!(decor.columns.is_empty());
        assert_eq!(physics.body_count(), 0);
    }

    #[test]
    fn missing_floor_texture_still_gets_a_ground() {
        let mut physics = HeadlessPhysics::new();
        let mut scene = HeadlessScene::new();
        let decor = build_decor(
            &ArenaConfig::default(),
            &MallAssets::empty(),
            &mut physics,
            &mut scene,
            &mut GameRng::new(2),
        );

        let ground = scene.node(decor.ground.unwrap()).unwrap();
        assert_eq!(ground.name, "mall-ground");
        assert!(ground.template.is_none());
        assert_eq!(ground.colors.len(), 5);
        assert_eq!(ground.colors[1], "#1f2a32");
        assert_eq!(ground.transform.position, Vec3::new(0.0, -0.02, 0.0));
        assert_eq!(ground.transform.scale, Vec3::new(GROUND_SIZE, GROUND_SIZE, 1.0));
    }

    #[test]
    fn mall_model_gets_textured_ground_and_no_dressing() {
        let mut assets = MallAssets::empty();
        assets.mall_scene = Some(template("mall"));
        assets.column = Some(template("column"));
        assets.floor_texture = FloorTexture::Loaded(template("floor-texture"));
        let mut physics = HeadlessPhysics::new();
        let mut scene = HeadlessScene::new();

        let mut rng = GameRng::new(3);
        let config = ArenaConfig::default();
        let decor = build_decor(&config, &assets, &mut physics, &mut scene, &mut rng);

        assert_eq!(decor.visuals.len(), 1);
        assert!(decor.columns.is_empty());
        let ground = scene.node(decor.ground.unwrap()).unwrap();
        assert_eq!(ground.template.as_deref(), Some("floor-texture"));
        assert_eq!(ground.colors, vec![GROUND_TINT.to_string()]);
    }

    #[test]
    fn column_ring_and_banners_from_templates() {
        let mut assets = MallAssets::empty();
        assets.column = Some(template("column"));
        assets.banner = Some(template("banner"));
        let mut physics = HeadlessPhysics::new();
        let mut scene = HeadlessScene::new();

        let mut rng = GameRng::new(6);
        let config = ArenaConfig::default();
        let decor = build_decor(&config, &assets, &mut physics, &mut scene, &mut rng);

        assert!((10..=14).contains(&decor.columns.len()));
        assert!((8..=18).contains(&decor.banners));
        assert_eq!(physics.body_count(), decor.columns.len());
        assert_eq!(scene.len(), 6 + decor.columns.len() + decor.banners);
        for &column in &decor.columns {
            let radius = planar_length(physics.position(column).unwrap());
            assert!((24.0 - 1e-3..=30.0 + 1e-3).contains(&radius));
        }
    }
}
