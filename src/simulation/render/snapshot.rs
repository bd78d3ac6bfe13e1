//! Read-only views of the world for renderers and graphs.

use serde::Serialize;

use crate::core::{PhysicsResult, Vector2};
use crate::domain::{HasMaterial, MaterialId};
use crate::systems::body::{AppliedForce, Body, BodyId};

use super::WorldCore;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodySnapshot {
    pub id: BodyId,
    pub position: Vector2,
    pub velocity: Vector2,
    pub acceleration: Vector2,
    pub net_force: Vector2,
    pub radius: f64,
    pub mass: f64,
    pub charge: f64,
    pub material: MaterialId,
    pub in_contact: bool,
    pub forces: Vec<AppliedForce>,
}

impl From<&Body> for BodySnapshot {
    fn from(body: &Body) -> Self {
        Self {
            id: body.id(),
            position: body.position(),
            velocity: body.velocity(),
            acceleration: body.acceleration(),
            net_force: body.net_force(),
            radius: body.radius(),
            mass: body.mass(),
            charge: body.charge(),
            material: body.material_id(),
            in_contact: body.last_collision().is_some(),
            forces: body.forces().to_vec(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldSnapshot {
    pub elapsed_time: f64,
    pub running: bool,
    pub time_reverse: bool,
    pub bodies: Vec<BodySnapshot>,
}

pub(super) fn snapshot(world: &WorldCore) -> WorldSnapshot {
    WorldSnapshot {
        elapsed_time: world.clock.elapsed(),
        running: world.clock.running(),
        time_reverse: world.clock.time_reverse(),
        bodies: world.bodies.iter().map(BodySnapshot::from).collect(),
    }
}

pub(super) fn snapshot_json(world: &WorldCore) -> PhysicsResult<String> {
    Ok(serde_json::to_string(&snapshot(world))?)
}
