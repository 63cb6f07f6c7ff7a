//! Arena tuning
//!
//! Every field has a default, so a partial JSON object is a valid config.

use scooter_core::time::seconds;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Half the side length of the square floor.
    pub half_extent: f32,
    /// Radius of the central plaza kept free of spawns.
    pub clear_radius: f32,
    /// Extra margin around the plaza for random spawns.
    pub spawn_clear_margin: f32,
    /// Half-size (x, z) of the keep-out rectangle on the approach corridor.
    pub keep_out_half_x: f32,
    pub keep_out_half_z: f32,
    /// Random samples tried before settling for the last one.
    pub spawn_attempts: u32,
    pub respawn_delay_min: f32,
    pub respawn_delay_max: f32,
    pub human_cleanup_delay: f32,
    pub launch_strength: f32,
    pub launch_lift: f32,
    pub push_strength: f32,
    /// Vertical component of the push direction before normalising.
    pub push_lift: f32,
    pub hit_angular_damping: f32,
    pub hit_linear_damping: f32,
    pub wall_thickness: f32,
    pub wall_height: f32,
    pub ceiling_height: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            half_extent: 60.0,
            clear_radius: 10.0,
            spawn_clear_margin: 1.5,
            keep_out_half_x: 5.0,
            keep_out_half_z: 10.0,
            spawn_attempts: 24,
            respawn_delay_min: 1.5,
            respawn_delay_max: 4.2,
            human_cleanup_delay: 1.6,
            launch_strength: 12.0,
            launch_lift: 8.0,
            push_strength: 6.0,
            push_lift: 0.2,
            hit_angular_damping: 0.08,
            hit_linear_damping: 0.05,
            wall_thickness: 2.4,
            wall_height: 6.0,
            ceiling_height: 12.0,
        }
    }
}

impl ArenaConfig {
    pub fn human_cleanup_delay(&self) -> Duration {
        seconds(self.human_cleanup_delay)
    }

    /// Bounds of the respawn delay window.
    pub fn respawn_window(&self) -> (Duration, Duration) {
        (
            seconds(self.respawn_delay_min),
            seconds(self.respawn_delay_max.max(self.respawn_delay_min)),
        )
    }

    /// Edge length of the floor including the walls.
    pub fn floor_size(&self) -> f32 {
        self.half_extent * 2.0 + self.wall_thickness * 2.0
    }

    /// True if `(x, z)` falls inside the corridor keep-out.
    pub fn in_keep_out(&self, x: f32, z: f32) -> bool {
        x.abs() < self.keep_out_half_x && z.abs() < self.keep_out_half_z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: ArenaConfig = serde_json::from_str(r#"{ "half_extent": 40.0 }"#).unwrap();
        assert_eq!(config.half_extent, 40.0);
        assert_eq!(config.spawn_attempts, 24);
        assert_eq!(config.human_cleanup_delay(), Duration::from_secs_f32(1.6));
    }

    #[test]
    fn keep_out_is_exclusive() {
        let config = ArenaConfig::default();
        assert!(config.in_keep_out(4.9, -9.9));
        assert!(!config.in_keep_out(5.0, 0.0));
        assert!(!config.in_keep_out(0.0, 10.0));
    }

    #[test]
    fn floor_includes_walls() {
        assert!((ArenaConfig::default().floor_size() - 124.8).abs() < 1e-4);
    }
}
