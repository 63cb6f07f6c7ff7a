//! Placement engine
//!
//! Finds arena positions that keep clear of existing interactables, stay
//! inside the walls and leave the central plaza open. Obstacles are treated
//! as points with a per-type separation, so plain sampling is enough; no
//! navigation mesh is involved.
//!
//! A [`Placement`] is a snapshot of the occupants at the time it is built.
//! Spawns run one after another and take a fresh snapshot each time, so
//! every spawn sees the ones before it.

use crate::config::ArenaConfig;
use scooter_core::handle::BodyHandle;
use scooter_core::math::{planar_distance_sq, planar_length, GameRng, Vec3};

/// A live interactable as seen by the placement checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Occupant {
    pub body: BodyHandle,
    pub position: Vec3,
}

/// Ring multipliers applied to the separation distance.
pub const DEFAULT_RING_SCALES: [f32; 5] = [1.0, 1.5, 2.0, 2.5, 3.0];

/// Minimum samples per ring.
pub const MIN_RING_STEPS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct NavigableOptions {
    /// Bodies left out of the separation check (e.g. the one being moved).
    pub ignore: Vec<BodyHandle>,
    /// Extra clearance added to the plaza radius.
    pub clearance: f32,
    /// Distance kept from the walls; defaults to `max(2.5, 0.6 * min)`.
    pub padding: Option<f32>,
    /// Ring radii; defaults to [`DEFAULT_RING_SCALES`] times the separation.
    pub search_radii: Option<Vec<f32>>,
}

impl Default for NavigableOptions {
    fn default() -> Self {
        Self {
            ignore: Vec::new(),
            clearance: 1.5,
            padding: None,
            search_radii: None,
        }
    }
}

impl NavigableOptions {
    pub fn ignoring(mut self, body: BodyHandle) -> Self {
        self.ignore.push(body);
        self
    }
}

pub struct Placement<'a> {
    config: &'a ArenaConfig,
    occupants: Vec<Occupant>,
}

impl<'a> Placement<'a> {
    pub fn new(config: &'a ArenaConfig, occupants: Vec<Occupant>) -> Self {
        Self { config, occupants }
    }

    pub fn occupants(&self) -> &[Occupant] {
        &self.occupants
    }

    /// True iff no non-ignored occupant lies strictly within `min_distance`
    /// of `position` on the ground plane.
    pub fn is_position_free(
        &self,
        position: Vec3,
        min_distance: f32,
        ignore: &[BodyHandle],
    ) -> bool {
        let min_distance_sq = min_distance * min_distance;
        self.occupants
            .iter()
            .filter(|occupant| !ignore.contains(&occupant.body))
            .all(|occupant| planar_distance_sq(occupant.position, position) >= min_distance_sq)
    }

    fn sample(&self, rng: &mut GameRng) -> Vec3 {
        let extent = self.config.half_extent;
        Vec3::new(rng.range(-extent, extent), 0.0, rng.range(-extent, extent))
    }

    /// Random free position away from the plaza and the corridor keep-out.
    ///
    /// When every attempt fails the last sample is returned as-is, even if
    /// it overlaps something or sits in an excluded zone.
    pub fn find_spawn_position(&self, min_distance: f32, rng: &mut GameRng) -> Vec3 {
        let plaza = self.config.clear_radius + self.config.spawn_clear_margin;
        let mut last = None;

        for _ in 0..self.config.spawn_attempts {
            let candidate = self.sample(rng);
            last = Some(candidate);
            if planar_length(candidate) < plaza {
                continue;
            }
            if self.config.in_keep_out(candidate.x, candidate.z) {
                continue;
            }
            if self.is_position_free(candidate, min_distance, &[]) {
                return candidate;
            }
        }

        let fallback = last.unwrap_or_else(|| self.sample(rng));
        tracing::warn!(
            "Placement search exhausted {} attempts at separation {:.1}; using ({:.1}, {:.1})",
            self.config.spawn_attempts,
            min_distance,
            fallback.x,
            fallback.z
        );
        fallback
    }

    /// Clamp into the padded floor and drop to ground level.
    pub fn clamp_to_playable_area(&self, candidate: Vec3, padding: f32) -> Vec3 {
        let max_extent = (self.config.half_extent - padding).max(2.0);
        Vec3::new(
            candidate.x.clamp(-max_extent, max_extent),
            0.0,
            candidate.z.clamp(-max_extent, max_extent),
        )
    }

    /// Push a point inside the `clearance` disc out to its rim.
    ///
    /// The direction from the origin is kept; a point at the exact centre
    /// gets a random direction.
    pub fn enforce_central_clearance(
        &self,
        candidate: Vec3,
        clearance: f32,
        rng: &mut GameRng,
    ) -> Vec3 {
        let radius = clearance.max(0.0);
        let distance = planar_length(candidate);
        if distance >= radius {
            return candidate;
        }

        let angle = if distance < 1e-4 {
            rng.angle()
        } else {
            candidate.z.atan2(candidate.x)
        };
        Vec3::new(angle.cos() * radius, candidate.y, angle.sin() * radius)
    }

    /// Closest free point to `target`, found by probing evenly spaced points
    /// on rings of growing radius. Falls back to a random spawn position
    /// when every ring is blocked.
    pub fn find_nearest_navigable_point(
        &self,
        target: Vec3,
        min_distance: f32,
        options: &NavigableOptions,
        rng: &mut GameRng,
    ) -> Vec3 {
        let clearance = self.config.clear_radius + options.clearance;
        let padding = options.padding.unwrap_or((min_distance * 0.6).max(2.5));

        let base = self.enforce_central_clearance(
            self.clamp_to_playable_area(target, padding),
            clearance,
            rng,
        );
        if self.is_position_free(base, min_distance, &options.ignore) {
            return base;
        }

        let default_radii;
        let radii: &[f32] = match &options.search_radii {
            Some(radii) => radii,
            None => {
                default_radii = DEFAULT_RING_SCALES.map(|scale| scale * min_distance);
                &default_radii
            }
        };

        for &radius in radii {
            let steps = ((radius * 4.0).round() as usize).max(MIN_RING_STEPS);
            for i in 0..steps {
                let angle = i as f32 / steps as f32 * std::f32::consts::TAU;
                let offset = Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius);
                let candidate = self.enforce_central_clearance(
                    self.clamp_to_playable_area(base + offset, padding),
                    clearance,
                    rng,
                );
                if self.is_position_free(candidate, min_distance, &options.ignore) {
                    return candidate;
                }
            }
        }

        tracing::debug!(
            "No navigable ring point near ({:.1}, {:.1}); sampling randomly",
            target.x,
            target.z
        );
        self.find_spawn_position(min_distance, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupant(bits: u64, x: f32, z: f32) -> Occupant {
        Occupant {
            body: BodyHandle::from_bits(bits),
            position: Vec3::new(x, 0.9, z),
        }
    }

    #[test]
    fn empty_registry_is_always_free() {
        let config = ArenaConfig::default();
        let placement = Placement::new(&config, Vec::new());
        assert!(placement.is_position_free(Vec3::ZERO, 1000.0, &[]));
    }

    #[test]
    fn equidistant_point_between_two_patrons() {
        let config = ArenaConfig::default();
        let placement = Placement::new(
            &config,
            vec![occupant(1, -1.5, 20.0), occupant(2, 1.5, 20.0)],
        );
        // 2.5 from each patron.
        let between = Vec3::new(0.0, 0.0, 22.0);
        assert!(!placement.is_position_free(between, 5.0, &[]));
        assert!(placement.is_position_free(between, 2.0, &[]));
    }

    #[test]
    fn ignored_bodies_do_not_block() {
        let config = ArenaConfig::default();
        let blocker = occupant(7, 20.0, 20.0);
        let placement = Placement::new(&config, vec![blocker]);
        let spot = Vec3::new(21.0, 0.0, 20.0);
        assert!(!placement.is_position_free(spot, 4.0, &[]));
        assert!(placement.is_position_free(spot, 4.0, &[blocker.body]));
    }

    #[test]
    fn spawn_position_respects_bounds_and_exclusions() {
        let config = ArenaConfig::default();
        let placement = Placement::new(&config, Vec::new());
        let mut rng = GameRng::new(11);
        for _ in 0..64 {
            let spot = placement.find_spawn_position(4.0, &mut rng);
            assert!(spot.x.abs() <= config.half_extent && spot.z.abs() <= config.half_extent);
            assert!(planar_length(spot) >= config.clear_radius + 1.5);
            assert!(!config.in_keep_out(spot.x, spot.z));
            assert_eq!(spot.y, 0.0);
        }
    }

    #[test]
    fn exhausted_search_returns_a_point_in_bounds() {
        let config = ArenaConfig {
            spawn_attempts: 3,
            ..ArenaConfig::default()
        };
        // A separation larger than the arena can never be satisfied.
        let placement = Placement::new(&config, vec![occupant(1, 0.0, 0.0)]);
        let mut rng = GameRng::new(5);
        let spot = placement.find_spawn_position(500.0, &mut rng);
        assert!(spot.x.abs() <= config.half_extent && spot.z.abs() <= config.half_extent);
    }

    #[test]
    fn clamp_flattens_and_pads() {
        let config = ArenaConfig::default();
        let placement = Placement::new(&config, Vec::new());
        let clamped = placement.clamp_to_playable_area(Vec3::new(80.0, 3.0, -75.0), 2.5);
        assert_eq!(clamped, Vec3::new(57.5, 0.0, -57.5));
    }

    #[test]
    fn clearance_pushes_radially() {
        let config = ArenaConfig::default();
        let placement = Placement::new(&config, Vec::new());
        let mut rng = GameRng::new(3);

        let pushed = placement.enforce_central_clearance(Vec3::new(3.0, 0.0, 4.0), 10.0, &mut rng);
        assert!((pushed.x - 6.0).abs() < 1e-4 && (pushed.z - 8.0).abs() < 1e-4);

        let centre = placement.enforce_central_clearance(Vec3::ZERO, 10.0, &mut rng);
        assert!((planar_length(centre) - 10.0).abs() < 1e-4);

        let outside = Vec3::new(30.0, 0.0, 0.0);
        assert_eq!(placement.enforce_central_clearance(outside, 10.0, &mut rng), outside);
    }

    #[test]
    fn navigable_point_is_idempotent_on_valid_input() {
        let config = ArenaConfig::default();
        let placement = Placement::new(&config, vec![occupant(1, -30.0, -30.0)]);
        let mut rng = GameRng::new(8);
        let valid = Vec3::new(25.0, 0.0, -18.0);
        let options = NavigableOptions::default();
        let found = placement.find_nearest_navigable_point(valid, 4.5, &options, &mut rng);
        assert_eq!(found, valid);
    }

    #[test]
    fn occupied_target_moves_to_first_ring() {
        let config = ArenaConfig::default();
        let placement = Placement::new(&config, vec![occupant(1, 30.0, 0.0)]);
        let mut rng = GameRng::new(8);
        let found = placement.find_nearest_navigable_point(
            Vec3::new(30.0, 0.0, 0.0),
            4.0,
            &NavigableOptions::default(),
            &mut rng,
        );
        // First sample on the first ring lies along +X.
        assert!((found.x - 34.0).abs() < 1e-4);
        assert!(found.z.abs() < 1e-4);
        assert!(placement.is_position_free(found, 4.0, &[]));
    }

    #[test]
    fn target_in_plaza_is_pushed_out() {
        let config = ArenaConfig::default();
        let placement = Placement::new(&config, Vec::new());
        let mut rng = GameRng::new(2);
        let found = placement.find_nearest_navigable_point(
            Vec3::new(0.0, 0.0, 2.0),
            4.5,
            &NavigableOptions::default(),
            &mut rng,
        );
        assert!((planar_length(found) - 11.5).abs() < 1e-4);
        assert!(found.z > 0.0);
    }
}
