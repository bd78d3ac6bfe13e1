use crate::core::Vector2;
use crate::domain::constants::OVERLAP_EPSILON;
use crate::systems::body::Body;

use super::types::{CollisionTarget, ContactInfo};

/// Disc-vs-disc test. The normal points from `other` into `body`.
pub fn disc_disc(body: &Body, other: &Body) -> Option<ContactInfo> {
    let difference: Vector2 = body.position() - other.position();
    let overlap = body.radius() + other.radius() - difference.magnitude();

    if overlap < -OVERLAP_EPSILON {
        return None;
    }

    Some(ContactInfo {
        target: CollisionTarget::Body(other.id()),
        overlap,
        normal: difference.unit(),
        radial_curvature: 0.0,
    })
}
