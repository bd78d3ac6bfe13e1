//! Force accumulation for one sub-step
//!
//! Order per sub-step: clear, drag + fields, pairwise gravity/Coulomb,
//! constraint forces, then the reaction to last sub-step's contact. The
//! reaction must come last because it balances everything applied before it.

use crate::core::math::sign;
use crate::core::Vector2;
use crate::domain::constants::{RESTING_NORMAL_SPEED, STATIC_TANGENT_SPEED};
use crate::domain::{
    Constants, ContactCoefficients, FieldKind, FieldSet, HasMaterial, MaterialLibrary,
};
use crate::systems::body::{Body, ForceType};
use crate::systems::collision::{CollisionTarget, ContactInfo, Obstacle};
use crate::systems::constraints::Constraint;

use super::pair_mut;

/// Surface data the reaction phase needs about whatever the body touched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactSurface {
    pub coefficients: ContactCoefficients,
    /// Touching the inside of an inverse obstacle (concave curvature).
    pub inverse: bool,
    /// Velocity of the touched body. `None` for obstacles, which never move.
    pub other_velocity: Option<Vector2>,
}

pub fn clear_forces(bodies: &mut [Body]) {
    for body in bodies {
        body.clear_forces();
    }
}

/// Quadratic drag opposing the current velocity.
pub fn apply_drag(body: &mut Body, drag: f64, air_density: f64) {
    let speed = body.velocity().magnitude();
    let magnitude = drag * air_density * body.cross_section_area() * speed * speed / 2.0;
    if magnitude > 0.0 {
        let direction = body.velocity().unit();
        body.apply_force(direction * -magnitude, false, ForceType::Drag);
    }
}

pub fn apply_fields(body: &mut Body, fields: &FieldSet) {
    for (_, field) in fields.iter() {
        let force = field.force_on(body.position(), body.mass(), body.charge());
        let kind = match field.kind {
            FieldKind::Gravitational => ForceType::Gravity,
            FieldKind::Electric => ForceType::Electrostatic,
        };
        body.apply_force(force, false, kind);
    }
}

/// Inverse-square gravity and Coulomb forces over every distinct pair,
/// applied equal and opposite.
pub fn apply_pairwise(bodies: &mut [Body], constants: &Constants) {
    let n = bodies.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let (a, b) = pair_mut(bodies, i, j);

            let difference = b.position() - a.position();
            // Clamped so touching or coincident discs stay finite.
            let distance = difference.magnitude().max(a.radius() + b.radius());
            let towards_b = difference.unit();
            let inv_sq = 1.0 / (distance * distance);

            let gravity = constants.gravitational_constant * a.mass() * b.mass() * inv_sq;
            if gravity != 0.0 {
                a.apply_force(towards_b * gravity, false, ForceType::Gravity);
                b.apply_force(towards_b * -gravity, false, ForceType::Gravity);
            }

            // Like charges repel.
            let coulomb = constants.coulomb_constant * a.charge() * b.charge() * inv_sq;
            if coulomb != 0.0 {
                a.apply_force(towards_b * -coulomb, false, ForceType::Electrostatic);
                b.apply_force(towards_b * coulomb, false, ForceType::Electrostatic);
            }
        }
    }
}

pub fn apply_constraint_forces(
    bodies: &mut [Body],
    constraints: &[Constraint],
    materials: &MaterialLibrary,
) {
    for constraint in constraints {
        let Some(material) = materials.get(constraint.material_id()) else {
            continue;
        };
        if let Some(body) = bodies.iter_mut().find(|b| b.id() == constraint.body()) {
            constraint.apply_forces(body, material);
        }
    }
}

/// Combined coefficients and orientation for a cached contact, if its target still exists.
pub fn contact_surface(
    body: &Body,
    contact: &ContactInfo,
    bodies: &[Body],
    obstacles: &[Obstacle],
    materials: &MaterialLibrary,
) -> Option<ContactSurface> {
    match contact.target {
        CollisionTarget::Body(id) => {
            let other = bodies.iter().find(|b| b.id() == id)?;
            Some(ContactSurface {
                coefficients: materials.combine(body, other),
                inverse: false,
                other_velocity: Some(other.velocity()),
            })
        }
        CollisionTarget::Obstacle(id) => {
            let obstacle = obstacles.iter().find(|o| o.id() == id)?;
            Some(ContactSurface {
                coefficients: materials.combine(body, obstacle),
                inverse: obstacle.is_inverse(),
                other_velocity: None,
            })
        }
    }
}

/// Resting-contact response to the contact cached at the end of the previous sub-step.
///
/// Only acts when the normal speed relative to the surface is small (a
/// bounce is left to the impulse resolver). Balances the inward net force
/// with a normal force and adds static or kinetic friction.
///
/// Against an obstacle the normal velocity is also cancelled. Against another
/// body it is kept: only the pair's impulse may change it, or momentum leaks.
pub fn apply_contact_reaction(body: &mut Body, contact: &ContactInfo, surface: &ContactSurface) {
    let normal = contact.normal;
    let relative = body.velocity() - surface.other_velocity.unwrap_or(Vector2::ZERO);
    let normal_speed = normal.dot(relative);
    if normal_speed.abs() >= RESTING_NORMAL_SPEED {
        return;
    }

    if surface.other_velocity.is_none() {
        body.change_velocity(normal * -normal_speed);
    }

    let tangent = normal.orthogonal();
    let tangent_speed = tangent.dot(relative);

    let mut normal_force = -normal.dot(body.net_force());
    if contact.radial_curvature > 0.0 {
        let curvature = contact.radial_curvature;
        normal_force += curvature_force(body, curvature, tangent_speed, surface.inverse);
    }
    if normal_force <= 0.0 {
        return;
    }

    body.apply_force(normal * normal_force, false, ForceType::Normal);

    if tangent_speed.abs() < STATIC_TANGENT_SPEED {
        let tangent_force = tangent.dot(body.net_force());
        let max_friction = normal_force * surface.coefficients.static_friction;
        let friction = -sign(tangent_force) * max_friction.min(tangent_force.abs());

        if max_friction >= tangent_force.abs() {
            body.change_velocity(tangent * -tangent_speed);
        }
        if friction != 0.0 {
            body.apply_force(tangent * friction, false, ForceType::StaticFriction);
        }
    } else {
        let friction =
            -sign(tangent_speed) * normal_force * surface.coefficients.kinetic_friction;
        body.apply_force(tangent * friction, false, ForceType::KineticFriction);
    }
}

/// Change in normal force needed to follow a rounded corner at `tangent_speed`.
///
/// Inside a concave (inverse) corner the surface must supply the centripetal
/// force; over a convex corner part of the inward pull already provides it.
fn curvature_force(body: &Body, corner_radius: f64, tangent_speed: f64, concave: bool) -> f64 {
    let path_radius = if concave {
        corner_radius - body.radius()
    } else {
        corner_radius + body.radius()
    };
    if path_radius <= 0.0 {
        return 0.0;
    }
    let centripetal = body.mass() * tangent_speed * tangent_speed / path_radius;
    if concave { centripetal } else { -centripetal }
}

/// Whole force phase for every body.
pub fn accumulate(
    bodies: &mut [Body],
    obstacles: &[Obstacle],
    constraints: &[Constraint],
    fields: &FieldSet,
    materials: &MaterialLibrary,
    constants: &Constants,
) {
    clear_forces(bodies);

    for body in bodies.iter_mut() {
        let drag = materials
            .get(body.material_id())
            .map_or(0.0, |m| m.drag);
        apply_drag(body, drag, constants.air_density);
        apply_fields(body, fields);
    }

    apply_pairwise(bodies, constants);
    apply_constraint_forces(bodies, constraints, materials);

    for i in 0..bodies.len() {
        let Some(contact) = bodies[i].last_collision else {
            continue;
        };
        let surface = contact_surface(&bodies[i], &contact, bodies, obstacles, materials);
        let Some(surface) = surface else {
            continue;
        };
        apply_contact_reaction(&mut bodies[i], &contact, &surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Field, Material};

    fn body(id: u32, x: f64, y: f64, mass: f64, charge: f64) -> Body {
        let mut b = Body::new(Vector2::new(x, y), Vector2::ZERO, 0.5, mass, charge, 1).unwrap();
        b.id = id;
        b
    }

    fn floor_contact() -> ContactInfo {
        ContactInfo {
            target: CollisionTarget::Obstacle(1),
            overlap: 0.0,
            normal: Vector2::new(0.0, 1.0),
            radial_curvature: 0.0,
        }
    }

    fn surface(static_friction: f64, kinetic_friction: f64) -> ContactSurface {
        ContactSurface {
            coefficients: ContactCoefficients {
                elasticity: 0.5,
                static_friction,
                kinetic_friction,
            },
            inverse: false,
            other_velocity: None,
        }
    }

    #[test]
    fn drag_opposes_velocity() {
        let mut b = body(1, 0.0, 0.0, 1.0, 0.0);
        b.set_velocity(Vector2::new(2.0, 0.0)).unwrap();
        apply_drag(&mut b, 0.5, 1.0);
        let expected = 0.5 * 1.0 * b.cross_section_area() * 4.0 / 2.0;
        assert!((b.net_force().x + expected).abs() < 1e-12);
        assert_eq!(b.forces()[0].kind, ForceType::Drag);
    }

    #[test]
    fn drag_at_rest_adds_nothing() {
        let mut b = body(1, 0.0, 0.0, 1.0, 0.0);
        apply_drag(&mut b, 0.5, 1.0);
        assert!(b.forces().is_empty());
    }

    #[test]
    fn fields_are_tagged_by_kind() {
        let mut fields = FieldSet::new();
        let down = Vector2::new(0.0, -1.0);
        fields.add(Field::uniform("g", FieldKind::Gravitational, down, 10.0)).unwrap();
        fields.add(Field::uniform("e", FieldKind::Electric, Vector2::new(1.0, 0.0), 2.0)).unwrap();
        let mut b = body(1, 0.0, 0.0, 3.0, -1.0);
        apply_fields(&mut b, &fields);
        assert_eq!(b.forces()[0].kind, ForceType::Gravity);
        assert_eq!(b.forces()[1].kind, ForceType::Electrostatic);
        assert!((b.net_force() - Vector2::new(-2.0, -30.0)).magnitude() < 1e-12);
    }

    #[test]
    fn pairwise_forces_are_equal_and_opposite() {
        let constants = Constants {
            gravitational_constant: 1.0,
            coulomb_constant: 2.0,
            air_density: 0.0,
        };
        let mut bodies = vec![body(1, 0.0, 0.0, 2.0, 1.0), body(2, 2.0, 0.0, 3.0, 1.0)];
        apply_pairwise(&mut bodies, &constants);

        // gravity 6/4 attracts, coulomb 2/4 repels
        assert!((bodies[0].net_force().x - 1.0).abs() < 1e-12);
        assert!((bodies[1].net_force().x + 1.0).abs() < 1e-12);
        assert_eq!(bodies[0].forces().len(), 2);
    }

    #[test]
    fn pairwise_distance_is_clamped_for_coincident_bodies() {
        let constants = Constants::default();
        let mut bodies = vec![body(1, 1.0, 1.0, 1e6, 0.0), body(2, 1.0, 1.0, 1e6, 0.0)];
        apply_pairwise(&mut bodies, &constants);
        assert!(bodies[0].net_force().is_finite());
    }

    #[test]
    fn resting_body_gets_a_balancing_normal_force() {
        let mut b = body(1, 0.0, 0.5, 2.0, 0.0);
        b.set_velocity(Vector2::new(0.0, -0.05)).unwrap();
        b.apply_force(Vector2::new(0.0, -19.62), false, ForceType::Gravity);
        apply_contact_reaction(&mut b, &floor_contact(), &surface(0.5, 0.3));

        assert!(b.net_force().magnitude() < 1e-12);
        assert_eq!(b.velocity(), Vector2::ZERO);
        assert!(b.forces().iter().any(|f| f.kind == ForceType::Normal));
    }

    #[test]
    fn static_friction_holds_below_its_limit() {
        let mut b = body(1, 0.0, 0.5, 1.0, 0.0);
        b.apply_force(Vector2::new(3.0, -10.0), false, ForceType::Unspecified);
        apply_contact_reaction(&mut b, &floor_contact(), &surface(0.5, 0.3));
        // Limit is 5 N, push is 3 N.
        assert!(b.net_force().magnitude() < 1e-12);
        let friction = b.forces().iter().find(|f| f.kind == ForceType::StaticFriction).unwrap();
        assert!((friction.vector.x + 3.0).abs() < 1e-12);
    }

    #[test]
    fn static_friction_saturates_above_its_limit() {
        let mut b = body(1, 0.0, 0.5, 1.0, 0.0);
        b.apply_force(Vector2::new(8.0, -10.0), false, ForceType::Unspecified);
        apply_contact_reaction(&mut b, &floor_contact(), &surface(0.5, 0.3));
        assert!((b.net_force().x - 3.0).abs() < 1e-12);
    }

    #[test]
    fn sliding_body_feels_kinetic_friction() {
        let mut b = body(1, 0.0, 0.5, 1.0, 0.0);
        b.set_velocity(Vector2::new(-2.0, 0.0)).unwrap();
        b.apply_force(Vector2::new(0.0, -10.0), false, ForceType::Gravity);
        apply_contact_reaction(&mut b, &floor_contact(), &surface(0.5, 0.3));
        let friction = b.forces().iter().find(|f| f.kind == ForceType::KineticFriction).unwrap();
        assert!((friction.vector.x - 3.0).abs() < 1e-12);
    }

    #[test]
    fn bouncing_body_is_left_alone() {
        let mut b = body(1, 0.0, 0.5, 1.0, 0.0);
        b.set_velocity(Vector2::new(0.0, -3.0)).unwrap();
        b.apply_force(Vector2::new(0.0, -10.0), false, ForceType::Gravity);
        apply_contact_reaction(&mut b, &floor_contact(), &surface(0.5, 0.3));
        assert_eq!(b.forces().len(), 1);
        assert_eq!(b.velocity().y, -3.0);
    }

    #[test]
    fn no_normal_force_when_pulled_away() {
        let mut b = body(1, 0.0, 0.5, 1.0, 0.0);
        b.apply_force(Vector2::new(0.0, 4.0), false, ForceType::Unspecified);
        apply_contact_reaction(&mut b, &floor_contact(), &surface(0.5, 0.3));
        assert!(b.forces().iter().all(|f| f.kind != ForceType::Normal));
    }

    #[test]
    fn convex_corner_reduces_the_normal_force() {
        let mut b = body(1, 0.0, 0.5, 1.0, 0.0);
        b.set_velocity(Vector2::new(1.0, 0.0)).unwrap();
        b.apply_force(Vector2::new(0.0, -10.0), false, ForceType::Gravity);
        let contact = ContactInfo { radial_curvature: 0.5, ..floor_contact() };
        apply_contact_reaction(&mut b, &contact, &surface(0.0, 0.0));
        let normal = b.forces().iter().find(|f| f.kind == ForceType::Normal).unwrap();
        // m v^2 / (corner + r) = 1 / 1
        assert!((normal.vector.y - 9.0).abs() < 1e-12);
    }

    #[test]
    fn accumulate_skips_missing_contact_targets() {
        let mut materials = MaterialLibrary::new();
        materials.add(Material::default()).unwrap();
        let mut bodies = vec![body(1, 0.0, 0.0, 1.0, 0.0)];
        bodies[0].last_collision = Some(floor_contact());
        accumulate(&mut bodies, &[], &[], &FieldSet::new(), &materials, &Constants::default());
        assert!(bodies[0].forces().is_empty());
    }

    #[test]
    fn concave_corner_adds_to_the_normal_force() {
        let mut b = body(1, 0.0, 0.5, 1.0, 0.0);
        b.set_velocity(Vector2::new(1.0, 0.0)).unwrap();
        b.apply_force(Vector2::new(0.0, -10.0), false, ForceType::Gravity);
        let contact = ContactInfo { radial_curvature: 1.0, ..floor_contact() };
        let inside = ContactSurface { inverse: true, ..surface(0.0, 0.0) };
        apply_contact_reaction(&mut b, &contact, &inside);
        let normal = b.forces().iter().find(|f| f.kind == ForceType::Normal).unwrap();
        // m v^2 / (corner - r) = 1 / 0.5
        assert!((normal.vector.y - 12.0).abs() < 1e-12);
    }

    #[test]
    fn body_contact_keeps_a_slow_separating_velocity() {
        let mut b = body(1, 0.0, 2.0, 1.0, 0.0);
        b.set_velocity(Vector2::new(0.0, 0.1)).unwrap();
        let touching = ContactInfo { target: CollisionTarget::Body(2), ..floor_contact() };
        let other = ContactSurface { other_velocity: Some(Vector2::ZERO), ..surface(0.5, 0.3) };
        apply_contact_reaction(&mut b, &touching, &other);
        assert_eq!(b.velocity(), Vector2::new(0.0, 0.1));
        assert!(b.forces().is_empty());
    }

    #[test]
    fn body_contact_is_judged_on_relative_velocity() {
        // Both drift at 3 m/s; relative speed is zero, so this is resting contact.
        let mut b = body(1, 0.0, 2.0, 1.0, 0.0);
        b.set_velocity(Vector2::new(0.0, 3.0)).unwrap();
        b.apply_force(Vector2::new(0.0, -10.0), false, ForceType::Gravity);
        let touching = ContactInfo { target: CollisionTarget::Body(2), ..floor_contact() };
        let other = ContactSurface {
            other_velocity: Some(Vector2::new(0.0, 3.0)),
            ..surface(0.5, 0.3)
        };
        apply_contact_reaction(&mut b, &touching, &other);
        assert_eq!(b.velocity(), Vector2::new(0.0, 3.0));
        assert!(b.net_force().magnitude() < 1e-12);
    }
}
