use crate::systems::body::Body;

use super::detect::disc_disc;
use super::obstacle::Obstacle;
use super::types::ContactInfo;

/// Deepest contact of `bodies[index]` against every other body and every
/// obstacle. Linear scan, no broad phase; only one contact is kept.
pub fn deepest_contact(
    index: usize,
    bodies: &[Body],
    obstacles: &[Obstacle],
) -> Option<ContactInfo> {
    let body = &bodies[index];
    let mut deepest: Option<ContactInfo> = None;

    let mut keep = |candidate: Option<ContactInfo>| {
        if let Some(c) = candidate {
            if deepest.map_or(true, |d| c.overlap > d.overlap) {
                deepest = Some(c);
            }
        }
    };

    for (j, other) in bodies.iter().enumerate() {
        if j != index {
            keep(disc_disc(body, other));
        }
    }
    for obstacle in obstacles {
        keep(obstacle.collide_disc(body.position(), body.radius()));
    }

    deepest
}
