#![allow(dead_code)]

use kinema_engine::{Field, FieldKind, Material, Vector2, WorldCore};

pub const G: f64 = 9.81;

/// Empty world without drag or pairwise forces, plus one material.
pub fn quiet_world(elasticity: f64) -> (WorldCore, u32) {
    let mut world = WorldCore::new();
    world.set_air_density(0.0).unwrap();
    world.set_gravitational_constant(0.0).unwrap();
    let m = world
        .add_material(Material::new("test", elasticity, 0.4, 0.3, 0.0))
        .unwrap();
    (world, m)
}

pub fn add_gravity(world: &mut WorldCore) {
    world
        .add_field(Field::uniform("gravity", FieldKind::Gravitational, Vector2::new(0.0, -1.0), G))
        .unwrap();
}

/// Box with its top edge on y = 0.
pub fn add_floor(world: &mut WorldCore, material: u32) -> u32 {
    world
        .add_obstacle(
            vec![
                Vector2::new(-50.0, -10.0),
                Vector2::new(50.0, -10.0),
                Vector2::new(50.0, 0.0),
                Vector2::new(-50.0, 0.0),
            ],
            0.0,
            false,
            material,
        )
        .unwrap()
}

/// Run `seconds` one minimum sub-step at a time, checking `each` after every call.
pub fn run_checked(world: &mut WorldCore, seconds: f64, mut each: impl FnMut(&WorldCore)) {
    let dt = world.min_timestep() * seconds.signum();
    let steps = (seconds.abs() / world.min_timestep()).round() as usize;
    for _ in 0..steps {
        world.advance(dt);
        each(world);
    }
}
