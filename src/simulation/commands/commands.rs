use crate::core::{PhysicsError, PhysicsResult, Vector2};
use crate::domain::{Field, FieldId, HasMaterial, Material, MaterialId};
use crate::systems::body::{Body, BodyId};
use crate::systems::collision::{CollisionTarget, Obstacle, ObstacleId};
use crate::systems::constraints::{Constraint, ConstraintId, ConstraintKind};

use super::WorldCore;

fn rejected<T>(what: &str, result: PhysicsResult<T>) -> PhysicsResult<T> {
    if let Err(e) = &result {
        console_warn!("{} rejected: {}", what, e);
    }
    result
}

fn require_material(world: &WorldCore, id: MaterialId) -> PhysicsResult<()> {
    if world.materials.contains(id) {
        Ok(())
    } else {
        Err(PhysicsError::UnknownMaterial { id })
    }
}

pub(super) fn clear(world: &mut WorldCore) {
    world.bodies.clear();
    world.obstacles.clear();
    world.constraints.clear();
    world.fields.clear();
    world.clock.reset();
    world.perf_stats.reset();
    console_log!("world cleared");
}

// === MATERIALS ===

pub(super) fn add_material(world: &mut WorldCore, material: Material) -> PhysicsResult<MaterialId> {
    rejected("material", world.materials.add(material))
}

pub(super) fn update_material(
    world: &mut WorldCore,
    id: MaterialId,
    material: Material,
) -> PhysicsResult<()> {
    rejected("material update", world.materials.update(id, material))
}

pub(super) fn remove_material(world: &mut WorldCore, id: MaterialId) -> PhysicsResult<Material> {
    let in_use = world.bodies.iter().any(|b| b.material_id() == id)
        || world.obstacles.iter().any(|o| o.material_id() == id)
        || world.constraints.iter().any(|c| c.material_id() == id);
    if in_use {
        return rejected("material removal", Err(PhysicsError::MaterialInUse { id }));
    }
    world.materials.remove(id)
}

// === FIELDS ===

pub(super) fn add_field(world: &mut WorldCore, field: Field) -> PhysicsResult<FieldId> {
    rejected("field", world.fields.add(field))
}

pub(super) fn update_field(world: &mut WorldCore, id: FieldId, field: Field) -> PhysicsResult<()> {
    rejected("field update", world.fields.update(id, field))
}

pub(super) fn remove_field(world: &mut WorldCore, id: FieldId) -> PhysicsResult<Field> {
    world.fields.remove(id)
}

// === BODIES ===

/// Store a validated body under a fresh id.
pub(super) fn insert_body(world: &mut WorldCore, mut body: Body) -> BodyId {
    let id = world.next_body_id;
    world.next_body_id = world.next_body_id.saturating_add(1);
    body.id = id;
    world.bodies.push(body);
    id
}

pub(super) fn spawn_body(
    world: &mut WorldCore,
    position: Vector2,
    velocity: Vector2,
    radius: f64,
    mass: f64,
    charge: f64,
    material: MaterialId,
) -> PhysicsResult<BodyId> {
    let body = rejected(
        "body",
        require_material(world, material)
            .and_then(|_| Body::new(position, velocity, radius, mass, charge, material)),
    )?;
    let id = insert_body(world, body);
    console_log!("body {} spawned at ({}, {}) r={} m={}", id, position.x, position.y, radius, mass);
    Ok(id)
}

pub(super) fn remove_body(world: &mut WorldCore, id: BodyId) -> PhysicsResult<()> {
    let idx = world
        .bodies
        .iter()
        .position(|b| b.id() == id)
        .ok_or(PhysicsError::UnknownBody { id })?;
    world.bodies.remove(idx);

    let before = world.constraints.len();
    world.constraints.retain(|c| c.body() != id);
    let dropped = before - world.constraints.len();

    forget_contacts_with(world, CollisionTarget::Body(id));
    console_log!("body {} removed ({} constraints dropped)", id, dropped);
    Ok(())
}

fn forget_contacts_with(world: &mut WorldCore, target: CollisionTarget) {
    for body in world.bodies.iter_mut() {
        if body.last_collision.map_or(false, |c| c.target == target) {
            body.last_collision = None;
        }
    }
}

// === OBSTACLES ===

pub(super) fn insert_obstacle(world: &mut WorldCore, mut obstacle: Obstacle) -> ObstacleId {
    let id = world.next_obstacle_id;
    world.next_obstacle_id = world.next_obstacle_id.saturating_add(1);
    obstacle.id = id;
    world.obstacles.push(obstacle);
    id
}

pub(super) fn add_obstacle(
    world: &mut WorldCore,
    vertices: Vec<Vector2>,
    corner_radius: f64,
    inverse: bool,
    material: MaterialId,
) -> PhysicsResult<ObstacleId> {
    let obstacle = rejected(
        "obstacle",
        require_material(world, material)
            .and_then(|_| Obstacle::new(vertices, corner_radius, inverse, material)),
    )?;
    let vertex_count = obstacle.vertices().len();
    let id = insert_obstacle(world, obstacle);
    console_log!(
        "obstacle {} added ({} vertices{})",
        id,
        vertex_count,
        if inverse { ", inverse" } else { "" }
    );
    Ok(id)
}

pub(super) fn remove_obstacle(world: &mut WorldCore, id: ObstacleId) -> PhysicsResult<()> {
    let idx = world
        .obstacles
        .iter()
        .position(|o| o.id() == id)
        .ok_or(PhysicsError::UnknownObstacle { id })?;
    world.obstacles.remove(idx);
    forget_contacts_with(world, CollisionTarget::Obstacle(id));
    console_log!("obstacle {} removed", id);
    Ok(())
}

// === CONSTRAINTS ===

pub(super) fn insert_constraint(world: &mut WorldCore, mut constraint: Constraint) -> ConstraintId {
    let id = world.next_constraint_id;
    world.next_constraint_id = world.next_constraint_id.saturating_add(1);
    constraint.id = id;
    world.constraints.push(constraint);
    id
}

fn add_constraint(
    world: &mut WorldCore,
    kind: ConstraintKind,
    anchor: Vector2,
    body: BodyId,
    length: f64,
    material: MaterialId,
) -> PhysicsResult<ConstraintId> {
    let known_body = if world.bodies.iter().any(|b| b.id() == body) {
        Ok(())
    } else {
        Err(PhysicsError::UnknownBody { id: body })
    };
    let constraint = rejected(
        "constraint",
        known_body
            .and_then(|_| require_material(world, material))
            .and_then(|_| Constraint::new(kind, anchor, body, length, material)),
    )?;
    let id = insert_constraint(world, constraint);
    console_log!("{:?} {} attached to body {} (length {})", kind, id, body, length);
    Ok(id)
}

pub(super) fn add_rope(
    world: &mut WorldCore,
    anchor: Vector2,
    body: BodyId,
    length: f64,
    material: MaterialId,
) -> PhysicsResult<ConstraintId> {
    add_constraint(world, ConstraintKind::Rope, anchor, body, length, material)
}

pub(super) fn add_spring(
    world: &mut WorldCore,
    anchor: Vector2,
    body: BodyId,
    rest_length: f64,
    material: MaterialId,
) -> PhysicsResult<ConstraintId> {
    add_constraint(world, ConstraintKind::Spring, anchor, body, rest_length, material)
}

pub(super) fn remove_constraint(world: &mut WorldCore, id: ConstraintId) -> PhysicsResult<()> {
    let idx = world
        .constraints
        .iter()
        .position(|c| c.id() == id)
        .ok_or(PhysicsError::UnknownConstraint { id })?;
    world.constraints.remove(idx);
    console_log!("constraint {} removed", id);
    Ok(())
}
