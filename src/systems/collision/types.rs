use crate::core::Vector2;
use crate::systems::body::BodyId;

use super::obstacle::ObstacleId;

/// What a body touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollisionTarget {
    Body(BodyId),
    Obstacle(ObstacleId),
}

/// Result of a single narrow-phase test.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactInfo {
    pub target: CollisionTarget,
    /// Penetration depth along `normal`; positive means overlapping.
    pub overlap: f64,
    /// Unit vector pointing from the target into the body.
    pub normal: Vector2,
    /// Corner radius when the contact is on a rounded corner, else 0.
    pub radial_curvature: f64,
}
