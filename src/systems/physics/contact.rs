//! Contact resolution after integration
//!
//! Each body in turn is re-queried; its deepest contact is cached for the
//! next force phase and resolved at once with a positional push-out and a
//! velocity impulse. Collisions are judged against the direction time is
//! running, so a backward sub-step undoes what a forward one did.

use crate::core::math::sign;
use crate::domain::constants::{BOUNCE_SLACK, MIN_INVERTIBLE_ELASTICITY};
use crate::domain::MaterialLibrary;
use crate::systems::body::{Body, ForceType};
use crate::systems::collision::{deepest_contact, CollisionTarget, ContactInfo, Obstacle};

use super::pair_mut;

/// Restitution to use for a step of signed length `dt`.
///
/// Backward steps use the reciprocal, which undoes a forward bounce. A fully
/// inelastic impact has no inverse.
pub fn restitution_for_step(elasticity: f64, dt: f64) -> f64 {
    if dt >= 0.0 {
        elasticity
    } else if elasticity > MIN_INVERTIBLE_ELASTICITY {
        1.0 / elasticity
    } else {
        0.0
    }
}

/// Push the body out of a static obstacle and remove (or reflect) its inward velocity.
pub fn resolve_obstacle_contact(body: &mut Body, contact: &ContactInfo, elasticity: f64, dt: f64) {
    let normal = contact.normal;
    body.displace(normal * contact.overlap.max(0.0));

    let normal_speed = normal.dot(body.velocity());
    if normal_speed * sign(dt) >= 0.0 {
        return;
    }

    // Speeds the body's own acceleration could reach in one step are resting
    // contact, not a bounce.
    let threshold = body.acceleration().dot(normal).abs() * dt.abs() + BOUNCE_SLACK;
    let factor = if normal_speed.abs() > threshold {
        1.0 + restitution_for_step(elasticity, dt)
    } else {
        1.0
    };
    body.change_velocity(normal * (-normal_speed * factor));
}

/// Separate two discs (lighter one moves more) and exchange the normal impulse.
/// `contact.normal` points from `other` into `body`.
pub fn resolve_body_contact(
    body: &mut Body,
    other: &mut Body,
    contact: &ContactInfo,
    elasticity: f64,
    dt: f64,
) {
    let normal = contact.normal;
    let total_mass = body.mass() + other.mass();
    let overlap = contact.overlap.max(0.0);
    body.displace(normal * (overlap * other.mass() / total_mass));
    other.displace(normal * (-overlap * body.mass() / total_mass));

    let relative = (body.velocity() - other.velocity()).dot(normal);
    if relative * sign(dt) >= 0.0 {
        return;
    }

    let factor = 1.0 + restitution_for_step(elasticity, dt);
    let impulse = factor * relative / (1.0 / body.mass() + 1.0 / other.mass());
    body.apply_force(normal * -impulse, true, ForceType::Unspecified);
    other.apply_force(normal * impulse, true, ForceType::Unspecified);
}

/// Query, cache and resolve the deepest contact of every body. Returns the contact count.
pub fn resolve_contacts(
    bodies: &mut [Body],
    obstacles: &[Obstacle],
    materials: &MaterialLibrary,
    dt: f64,
) -> u32 {
    let mut contacts = 0;

    for i in 0..bodies.len() {
        let contact = deepest_contact(i, bodies, obstacles);
        bodies[i].last_collision = contact;
        let Some(contact) = contact else {
            continue;
        };
        contacts += 1;

        match contact.target {
            CollisionTarget::Obstacle(id) => {
                let Some(obstacle) = obstacles.iter().find(|o| o.id() == id) else {
                    continue;
                };
                let elasticity = materials.combine(&bodies[i], obstacle).elasticity;
                resolve_obstacle_contact(&mut bodies[i], &contact, elasticity, dt);
            }
            CollisionTarget::Body(id) => {
                let Some(j) = bodies.iter().position(|b| b.id() == id) else {
                    continue;
                };
                let elasticity = materials.combine(&bodies[i], &bodies[j]).elasticity;
                let (body, other) = pair_mut(bodies, i, j);
                resolve_body_contact(body, other, &contact, elasticity, dt);
            }
        }
    }

    contacts
}
