use crate::core::math::sign;
use crate::core::Vector2;
use crate::domain::constants::{ROPE_SNAP_SPEED, ROPE_TAUT_TOLERANCE};
use crate::systems::body::{Body, ForceType};
use crate::systems::physics::restitution_for_step;

/// Cancel the outward component of the net force while the rope is taut.
/// Never pushes the body outward.
pub(super) fn apply_tension(anchor: Vector2, length: f64, body: &mut Body) {
    let offset = body.position() - anchor;
    if offset.magnitude() < length - ROPE_TAUT_TOLERANCE {
        return;
    }

    let outward = offset.unit();
    let pull = body.net_force().dot(outward);
    if pull > 0.0 {
        body.apply_force(outward * -pull, false, ForceType::Tension);
    }
}

/// Clamp the body back onto the rope circle and stop (or bounce) outward motion.
pub(super) fn enforce_length(
    anchor: Vector2,
    length: f64,
    elasticity: f64,
    body: &mut Body,
    dt: f64,
) {
    let offset = body.position() - anchor;
    let distance = offset.magnitude();
    if distance < length - ROPE_TAUT_TOLERANCE {
        return;
    }

    let outward = offset.unit();
    if distance > length {
        body.displace(outward * (length - distance));
    }

    // "Outward" depends on the direction time is running.
    let radial = body.velocity().dot(outward);
    if radial * sign(dt) > 0.0 {
        let factor = if radial.abs() > ROPE_SNAP_SPEED {
            1.0 + restitution_for_step(elasticity, dt)
        } else {
            1.0
        };
        body.change_velocity(outward * (-radial * factor));
    }
}
