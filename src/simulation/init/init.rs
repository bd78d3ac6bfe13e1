use crate::core::{PhysicsError, PhysicsResult};
use crate::domain::scene::{
    BodyDef, ConstraintDef, ConstraintKindDef, ObstacleDef, SceneBundle, SceneSettings,
};
use crate::domain::{Constants, FieldSet, HasMaterial, MaterialId, MaterialLibrary};
use crate::systems::body::Body;
use crate::systems::collision::Obstacle;
use crate::systems::constraints::{Constraint, ConstraintKind};

use super::commands;
use super::perf_stats::PerfStats;
use super::{Clock, WorldCore};

/// Scene shipped with the crate: earth gravity, a ground slab and a boundary.
pub(super) const DEFAULT_SCENE_JSON: &str = include_str!("../../../scenes/default.json");

pub(super) fn create_world_core() -> WorldCore {
    WorldCore {
        materials: MaterialLibrary::new(),
        fields: FieldSet::new(),
        constants: Constants::default(),
        bodies: Vec::new(),
        obstacles: Vec::new(),
        constraints: Vec::new(),
        next_body_id: 1,
        next_obstacle_id: 1,
        next_constraint_id: 1,
        clock: Clock::new(),
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    }
}

pub(super) fn create_default_world_core() -> PhysicsResult<WorldCore> {
    let mut world = create_world_core();
    load_scene_json(&mut world, DEFAULT_SCENE_JSON)?;
    Ok(world)
}

pub(super) fn load_scene_json(world: &mut WorldCore, json: &str) -> PhysicsResult<()> {
    let bundle = match SceneBundle::from_json(json) {
        Ok(bundle) => bundle,
        Err(e) => {
            console_warn!("scene rejected: {}", e);
            return Err(e);
        }
    };

    // Built aside and swapped in, so a bad bundle leaves the world untouched.
    let mut fresh = create_world_core();
    fresh.perf_enabled = world.perf_enabled;
    if let Err(e) = populate(&mut fresh, bundle) {
        console_warn!("scene rejected: {}", e);
        return Err(e);
    }

    console_log!(
        "scene loaded: {} materials, {} fields, {} obstacles, {} bodies, {} constraints",
        fresh.materials.len(),
        fresh.fields.len(),
        fresh.obstacles.len(),
        fresh.bodies.len(),
        fresh.constraints.len()
    );
    *world = fresh;
    Ok(())
}

fn populate(world: &mut WorldCore, bundle: SceneBundle) -> PhysicsResult<()> {
    apply_settings(world, &bundle.settings)?;

    for material in bundle.materials {
        world.materials.add(material)?;
    }
    for field in bundle.fields {
        world.fields.add(field)?;
    }

    for def in bundle.obstacles {
        let material = material_by_name(world, &def.material)?;
        let obstacle = Obstacle::new(def.vertices, def.corner_radius, def.inverse, material)?;
        commands::insert_obstacle(world, obstacle);
    }

    let mut body_ids = Vec::with_capacity(bundle.bodies.len());
    for def in bundle.bodies {
        let material = material_by_name(world, &def.material)?;
        let body =
            Body::new(def.position, def.velocity, def.radius, def.mass, def.charge, material)?;
        body_ids.push(commands::insert_body(world, body));
    }

    for (index, def) in bundle.constraints.into_iter().enumerate() {
        let material = material_by_name(world, &def.material)?;
        let body = *body_ids.get(def.body).ok_or_else(|| PhysicsError::SceneParse {
            message: format!(
                "constraint {} references body {} but the scene has {} bodies",
                index,
                def.body,
                body_ids.len()
            ),
        })?;
        let kind = match def.kind {
            ConstraintKindDef::Rope => ConstraintKind::Rope,
            ConstraintKindDef::Spring => ConstraintKind::Spring,
        };
        let constraint = Constraint::new(kind, def.anchor, body, def.length, material)?;
        commands::insert_constraint(world, constraint);
    }

    Ok(())
}

fn apply_settings(world: &mut WorldCore, settings: &SceneSettings) -> PhysicsResult<()> {
    world.clock.set_min_timestep(settings.min_timestep)?;
    world.clock.set_time_scale(settings.time_scale)?;
    world.clock.set_time_reverse(settings.time_reverse);
    if settings.running {
        world.clock.resume();
    } else {
        world.clock.pause();
    }
    settings.constants.validate()?;
    world.constants = settings.constants;
    Ok(())
}

fn material_by_name(world: &WorldCore, name: &str) -> PhysicsResult<MaterialId> {
    world.materials.find_by_name(name).ok_or_else(|| PhysicsError::SceneParse {
        message: format!("unknown material {:?}", name),
    })
}

fn material_name(world: &WorldCore, holder: &impl HasMaterial) -> String {
    world
        .materials
        .get(holder.material_id())
        .map(|m| m.name.clone())
        .unwrap_or_default()
}

pub(super) fn export_scene_json(world: &WorldCore) -> PhysicsResult<String> {
    let settings = SceneSettings {
        min_timestep: world.clock.min_timestep(),
        time_scale: world.clock.time_scale(),
        time_reverse: world.clock.time_reverse(),
        running: world.clock.running(),
        constants: world.constants,
    };

    let obstacles = world
        .obstacles
        .iter()
        .map(|o| ObstacleDef {
            vertices: o.vertices().to_vec(),
            corner_radius: o.corner_radius(),
            inverse: o.is_inverse(),
            material: material_name(world, o),
        })
        .collect();

    let bodies = world
        .bodies
        .iter()
        .map(|b| BodyDef {
            position: b.position(),
            velocity: b.velocity(),
            radius: b.radius(),
            mass: b.mass(),
            charge: b.charge(),
            material: material_name(world, b),
        })
        .collect();

    let constraints = world
        .constraints
        .iter()
        .filter_map(|c| {
            let body = world.bodies.iter().position(|b| b.id() == c.body())?;
            Some(ConstraintDef {
                kind: match c.kind() {
                    ConstraintKind::Rope => ConstraintKindDef::Rope,
                    ConstraintKind::Spring => ConstraintKindDef::Spring,
                },
                anchor: c.anchor(),
                body,
                length: c.length(),
                material: material_name(world, c),
            })
        })
        .collect();

    let bundle = SceneBundle {
        settings,
        materials: world.materials.iter().map(|(_, m)| m.clone()).collect(),
        fields: world.fields.iter().map(|(_, f)| f.clone()).collect(),
        obstacles,
        bodies,
        constraints,
    };
    bundle.to_json()
}
