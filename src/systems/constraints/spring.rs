use crate::core::Vector2;
use crate::domain::Material;
use crate::systems::body::{Body, ForceType};

/// `F = -k (d - L) u - c (v . u) u`, with `u` pointing from the anchor to the body.
pub(super) fn apply_restoring(
    anchor: Vector2,
    rest_length: f64,
    material: &Material,
    body: &mut Body,
) {
    let offset = body.position() - anchor;
    let direction = offset.unit();
    let stretch = offset.magnitude() - rest_length;
    let axial_speed = body.velocity().dot(direction);

    let magnitude = -material.stiffness * stretch - material.damping * axial_speed;
    body.apply_force(direction * magnitude, false, ForceType::Restoring);
}
