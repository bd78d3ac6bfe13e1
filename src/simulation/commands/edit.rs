//! In-place edits between frames. Values are validated by the objects themselves.

use crate::core::{PhysicsError, PhysicsResult, Vector2};
use crate::domain::MaterialId;
use crate::systems::body::{Body, BodyId};
use crate::systems::collision::{obstacle_impact_time, ObstacleId, Trajectory};
use crate::systems::constraints::ConstraintId;

use super::WorldCore;

fn body_mut(world: &mut WorldCore, id: BodyId) -> PhysicsResult<&mut Body> {
    world
        .bodies
        .iter_mut()
        .find(|b| b.id() == id)
        .ok_or(PhysicsError::UnknownBody { id })
}

fn known_material(world: &WorldCore, id: MaterialId) -> PhysicsResult<()> {
    world.materials.require(id).map(|_| ())
}

pub(super) fn set_body_radius(world: &mut WorldCore, id: BodyId, radius: f64) -> PhysicsResult<()> {
    body_mut(world, id)?.set_radius(radius)
}

pub(super) fn set_body_mass(world: &mut WorldCore, id: BodyId, mass: f64) -> PhysicsResult<()> {
    body_mut(world, id)?.set_mass(mass)
}

pub(super) fn set_body_charge(world: &mut WorldCore, id: BodyId, charge: f64) -> PhysicsResult<()> {
    body_mut(world, id)?.set_charge(charge)
}

pub(super) fn set_body_material(
    world: &mut WorldCore,
    id: BodyId,
    material: MaterialId,
) -> PhysicsResult<()> {
    known_material(world, material)?;
    body_mut(world, id)?.set_material(material);
    Ok(())
}

pub(super) fn set_body_position(
    world: &mut WorldCore,
    id: BodyId,
    position: Vector2,
) -> PhysicsResult<()> {
    body_mut(world, id)?.set_position(position)
}

pub(super) fn set_body_velocity(
    world: &mut WorldCore,
    id: BodyId,
    velocity: Vector2,
) -> PhysicsResult<()> {
    body_mut(world, id)?.set_velocity(velocity)
}

pub(super) fn set_obstacle_material(
    world: &mut WorldCore,
    id: ObstacleId,
    material: MaterialId,
) -> PhysicsResult<()> {
    known_material(world, material)?;
    world
        .obstacles
        .iter_mut()
        .find(|o| o.id() == id)
        .ok_or(PhysicsError::UnknownObstacle { id })?
        .set_material(material);
    Ok(())
}

pub(super) fn set_constraint_material(
    world: &mut WorldCore,
    id: ConstraintId,
    material: MaterialId,
) -> PhysicsResult<()> {
    known_material(world, material)?;
    world
        .constraints
        .iter_mut()
        .find(|c| c.id() == id)
        .ok_or(PhysicsError::UnknownConstraint { id })?
        .set_material(material);
    Ok(())
}

pub(super) fn swept_impact_time(
    world: &WorldCore,
    body: BodyId,
    obstacle: ObstacleId,
    window: f64,
) -> PhysicsResult<Option<f64>> {
    if !window.is_finite() || window < 0.0 {
        return Err(PhysicsError::InvalidConfiguration {
            reason: "impact window must be finite and non-negative",
        });
    }
    let body = world.body(body).ok_or(PhysicsError::UnknownBody { id: body })?;
    let obstacle = world
        .obstacle(obstacle)
        .ok_or(PhysicsError::UnknownObstacle { id: obstacle })?;

    let path = Trajectory {
        position: body.position(),
        velocity: body.velocity(),
        acceleration: body.acceleration(),
    };
    Ok(obstacle_impact_time(obstacle, &path, body.radius(), window))
}
