//! Collision consequences
//!
//! Classifies a contact as fatal or scoring and applies the physical
//! response. A record goes `active -> hit -> removed` exactly once; repeated
//! contacts for the same event are absorbed by the hit flag.

use crate::config::ArenaConfig;
use crate::record::{InteractableId, InteractableKind, InteractableRecord};
use scooter_core::math::{GameRng, Vec3};
use scooter_core::physics::RigidBody;
use std::time::Duration;

/// Minimum squared length for a direction to count as non-degenerate.
const DEGENERATE_SQ: f32 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub enum CollisionOutcome {
    /// The run is over. The hazard itself is left untouched.
    Fatal { label: String },
    Score {
        label: String,
        points: u32,
        response: HitResponse,
    },
}

impl CollisionOutcome {
    pub fn label(&self) -> &str {
        match self {
            CollisionOutcome::Fatal { label } | CollisionOutcome::Score { label, .. } => label,
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, CollisionOutcome::Fatal { .. })
    }
}

/// What the hit procedure did to the struck record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResponse {
    pub target: InteractableId,
    pub kind: InteractableKind,
    /// Total impulse applied to the struck body.
    pub impulse: Vec3,
    /// Delay before cleanup; zero means immediately.
    pub cleanup_delay: Duration,
}

/// Apply the hit procedure to a non-fatal record.
///
/// Returns `None` if the record was already hit.
pub fn resolve_hit(
    id: InteractableId,
    record: &mut InteractableRecord,
    body: Option<&mut RigidBody>,
    striker: Option<Vec3>,
    config: &ArenaConfig,
    rng: &mut GameRng,
) -> Option<HitResponse> {
    if !record.mark_hit() {
        return None;
    }

    let mut impulse = Vec3::ZERO;
    let mut cleanup_delay = Duration::ZERO;

    match (record.kind, body) {
        (InteractableKind::Human, Some(body)) => {
            let origin = striker.unwrap_or(Vec3::ZERO);
            let mut direction =
                Vec3::new(body.position.x - origin.x, 0.0, body.position.z - origin.z);
            if direction.length_squared() < DEGENERATE_SQ {
                direction = Vec3::new(rng.unit() - 0.5, 0.0, rng.unit() - 0.5);
            }
            let direction = direction.try_normalize().unwrap_or(Vec3::X);

            body.angular_damping = config.hit_angular_damping;
            body.linear_damping = config.hit_linear_damping;
            impulse = direction * config.launch_strength + Vec3::new(0.0, config.launch_lift, 0.0);
            body.apply_impulse(impulse);
            cleanup_delay = config.human_cleanup_delay();
        }
        (InteractableKind::Prop, Some(body)) => {
            if let Some(striker) = striker {
                let push = Vec3::new(
                    body.position.x - striker.x,
                    config.push_lift,
                    body.position.z - striker.z,
                );
                if push.length_squared() > DEGENERATE_SQ {
                    impulse = push.normalize() * config.push_strength;
                    body.apply_impulse(impulse);
                }
            }
        }
        _ => {}
    }

    Some(HitResponse {
        target: id,
        kind: record.kind,
        impulse,
        cleanup_delay,
    })
}
