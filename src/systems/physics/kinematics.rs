use crate::domain::{HasMaterial, MaterialLibrary};
use crate::systems::body::Body;
use crate::systems::constraints::Constraint;

/// Advance every body by `dt` under its accumulated net force.
pub fn integrate(bodies: &mut [Body], dt: f64) {
    for body in bodies {
        body.integrate(dt);
    }
}

/// Positional and velocity corrections of every constraint, in insertion order.
pub fn apply_constraint_kinematics(
    bodies: &mut [Body],
    constraints: &[Constraint],
    materials: &MaterialLibrary,
    dt: f64,
) {
    for constraint in constraints {
        let Some(material) = materials.get(constraint.material_id()) else {
            continue;
        };
        if let Some(body) = bodies.iter_mut().find(|b| b.id() == constraint.body()) {
            constraint.apply_kinematics(body, material, dt);
        }
    }
}
