//! Scene bundle: the JSON description of a whole world.
//!
//! Materials are referenced by name; constraints reference bodies by their
//! index in `bodies`. Resolution of names and indices happens when the bundle
//! is loaded into a world, so a bundle on its own is only checked for shape.

use serde::{Deserialize, Serialize};

use crate::core::{PhysicsResult, Vector2};

use super::constants::{Constants, MIN_TIMESTEP};
use super::field::Field;
use super::material::Material;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneBundle {
    #[serde(default)]
    pub settings: SceneSettings,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub obstacles: Vec<ObstacleDef>,
    #[serde(default)]
    pub bodies: Vec<BodyDef>,
    #[serde(default)]
    pub constraints: Vec<ConstraintDef>,
}

impl SceneBundle {
    pub fn from_json(json: &str) -> PhysicsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> PhysicsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneSettings {
    pub min_timestep: f64,
    pub time_scale: f64,
    pub time_reverse: bool,
    pub running: bool,
    pub constants: Constants,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            min_timestep: MIN_TIMESTEP,
            time_scale: 1.0,
            time_reverse: false,
            running: true,
            constants: Constants::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObstacleDef {
    pub vertices: Vec<Vector2>,
    #[serde(default)]
    pub corner_radius: f64,
    #[serde(default)]
    pub inverse: bool,
    pub material: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyDef {
    pub position: Vector2,
    #[serde(default)]
    pub velocity: Vector2,
    pub radius: f64,
    pub mass: f64,
    #[serde(default)]
    pub charge: f64,
    pub material: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConstraintKindDef {
    Rope,
    Spring,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintDef {
    pub kind: ConstraintKindDef,
    pub anchor: Vector2,
    /// Index into `SceneBundle::bodies`.
    pub body: usize,
    /// Rope length or spring rest length.
    pub length: f64,
    pub material: String,
}
