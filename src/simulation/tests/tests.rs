use super::*;
use crate::core::PhysicsError;
use crate::domain::{FieldKind, HasMaterial};
use crate::domain::constants::MIN_TIMESTEP;
use crate::systems::collision::{CollisionTarget, ContactInfo};

fn world_with_material() -> (WorldCore, MaterialId) {
    let mut world = WorldCore::new();
    let m = world.add_material(Material::new("rubber", 0.8, 0.6, 0.4, 0.0)).unwrap();
    (world, m)
}

fn downward_gravity(strength: f64) -> Field {
    Field::uniform("g", FieldKind::Gravitational, Vector2::new(0.0, -1.0), strength)
}

fn spawn_at(world: &mut WorldCore, m: MaterialId, x: f64, y: f64) -> BodyId {
    world
        .spawn_body(Vector2::new(x, y), Vector2::ZERO, 1.0, 1.0, 0.0, m)
        .unwrap()
}

#[test]
fn ids_start_at_one_and_are_never_reused() {
    let (mut world, m) = world_with_material();
    let a = spawn_at(&mut world, m, 0.0, 0.0);
    let b = spawn_at(&mut world, m, 5.0, 0.0);
    assert_eq!((a, b), (1, 2));

    world.remove_body(a).unwrap();
    let c = spawn_at(&mut world, m, 10.0, 0.0);
    assert_eq!(c, 3);
    assert!(world.body(a).is_none());
}

#[test]
fn rejected_spawn_adds_nothing() {
    let (mut world, m) = world_with_material();
    let err = world
        .spawn_body(Vector2::ZERO, Vector2::ZERO, 1.0, 1.0, 0.0, m + 99)
        .unwrap_err();
    assert_eq!(err, PhysicsError::UnknownMaterial { id: m + 99 });

    let err = world
        .spawn_body(Vector2::ZERO, Vector2::ZERO, 1.0, 0.0, 0.0, m)
        .unwrap_err();
    assert!(matches!(err, PhysicsError::InvalidBody { .. }));

    assert!(world.bodies().is_empty());
    assert_eq!(spawn_at(&mut world, m, 0.0, 0.0), 1);
}

#[test]
fn removing_a_body_cascades_to_constraints_and_cached_contacts() {
    let (mut world, m) = world_with_material();
    let a = spawn_at(&mut world, m, 0.0, 0.0);
    let b = spawn_at(&mut world, m, 1.5, 0.0);
    world.add_rope(Vector2::new(0.0, 5.0), a, 5.0, m).unwrap();
    let spring = world.add_spring(Vector2::new(1.5, 5.0), b, 5.0, m).unwrap();

    world.bodies[1].last_collision = Some(ContactInfo {
        target: CollisionTarget::Body(a),
        overlap: 0.5,
        normal: Vector2::new(1.0, 0.0),
        radial_curvature: 0.0,
    });

    world.remove_body(a).unwrap();
    assert_eq!(world.constraints().len(), 1);
    assert_eq!(world.constraints()[0].id(), spring);
    assert!(world.body(b).unwrap().last_collision().is_none());

    assert_eq!(world.remove_body(a), Err(PhysicsError::UnknownBody { id: a }));
}

#[test]
fn removing_an_obstacle_clears_contacts_against_it() {
    let (mut world, m) = world_with_material();
    let floor = world
        .add_obstacle(
            vec![
                Vector2::new(-5.0, -1.0),
                Vector2::new(5.0, -1.0),
                Vector2::new(5.0, 0.0),
                Vector2::new(-5.0, 0.0),
            ],
            0.0,
            false,
            m,
        )
        .unwrap();
    let body = spawn_at(&mut world, m, 0.0, 0.9);

    world.substep(0.001);
    assert_eq!(
        world.body(body).unwrap().last_collision().map(|c| c.target),
        Some(CollisionTarget::Obstacle(floor))
    );

    world.remove_obstacle(floor).unwrap();
    assert!(world.body(body).unwrap().last_collision().is_none());
}

#[test]
fn materials_in_use_cannot_be_removed() {
    let (mut world, m) = world_with_material();
    let body = spawn_at(&mut world, m, 0.0, 0.0);

    assert_eq!(world.remove_material(m), Err(PhysicsError::MaterialInUse { id: m }));

    world.remove_body(body).unwrap();
    let removed = world.remove_material(m).unwrap();
    assert_eq!(removed.name, "rubber");
    assert!(world.material(m).is_none());
}

#[test]
fn duplicate_material_names_are_rejected() {
    let (mut world, _) = world_with_material();
    let err = world.add_material(Material::new("rubber", 0.1, 0.1, 0.1, 0.0)).unwrap_err();
    assert_eq!(err, PhysicsError::DuplicateMaterial { name: "rubber".to_string() });
}

#[test]
fn material_edits_reach_referencing_bodies() {
    let (mut world, m) = world_with_material();
    let ice = world.add_material(Material::new("ice", 0.1, 0.05, 0.02, 0.0)).unwrap();
    let body = spawn_at(&mut world, m, 0.0, 0.0);

    world.set_body_material(body, ice).unwrap();
    assert_eq!(world.body(body).unwrap().material_id(), ice);
    assert_eq!(
        world.set_body_material(body, 999),
        Err(PhysicsError::UnknownMaterial { id: 999 })
    );

    let mut stiffer = world.material(ice).unwrap().clone();
    stiffer.elasticity = 0.3;
    world.update_material(ice, stiffer).unwrap();
    assert_eq!(world.material(ice).unwrap().elasticity, 0.3);
}

#[test]
fn body_edits_are_validated() {
    let (mut world, m) = world_with_material();
    let body = spawn_at(&mut world, m, 0.0, 0.0);

    assert!(matches!(world.set_body_radius(body, 0.0), Err(PhysicsError::InvalidBody { .. })));
    assert!(matches!(world.set_body_mass(body, -1.0), Err(PhysicsError::InvalidBody { .. })));
    assert_eq!(world.set_body_radius(42, 1.0), Err(PhysicsError::UnknownBody { id: 42 }));

    world.set_body_radius(body, 2.5).unwrap();
    world.set_body_charge(body, -3.0).unwrap();
    world.set_body_velocity(body, Vector2::new(1.0, 2.0)).unwrap();
    world.set_body_position(body, Vector2::new(4.0, 4.0)).unwrap();

    let b = world.body(body).unwrap();
    assert_eq!(b.radius(), 2.5);
    assert_eq!(b.charge(), -3.0);
    assert_eq!(b.velocity(), Vector2::new(1.0, 2.0));
    assert_eq!(b.position(), Vector2::new(4.0, 4.0));
}

#[test]
fn constraints_need_a_known_body_and_material() {
    let (mut world, m) = world_with_material();
    let body = spawn_at(&mut world, m, 0.0, 0.0);

    assert_eq!(
        world.add_rope(Vector2::ZERO, body + 1, 1.0, m),
        Err(PhysicsError::UnknownBody { id: body + 1 })
    );
    assert_eq!(
        world.add_spring(Vector2::ZERO, body, 1.0, m + 1),
        Err(PhysicsError::UnknownMaterial { id: m + 1 })
    );
    assert!(matches!(
        world.add_rope(Vector2::ZERO, body, -1.0, m),
        Err(PhysicsError::InvalidConstraint { .. })
    ));
    assert!(world.constraints().is_empty());
}

#[test]
fn frame_does_nothing_while_paused_but_advance_still_runs() {
    let (mut world, m) = world_with_material();
    world.add_field(downward_gravity(10.0)).unwrap();
    let body = spawn_at(&mut world, m, 0.0, 10.0);

    world.pause();
    world.frame(0.1);
    assert_eq!(world.elapsed_time(), 0.0);
    assert_eq!(world.body(body).unwrap().position().y, 10.0);

    world.advance(0.1);
    assert!((world.elapsed_time() - 0.1).abs() < 1e-12);
    assert!(world.body(body).unwrap().position().y < 10.0);
}

#[test]
fn uniform_field_matches_free_fall() {
    let (mut world, m) = world_with_material();
    world.set_air_density(0.0).unwrap();
    world.add_field(downward_gravity(10.0)).unwrap();
    let body = spawn_at(&mut world, m, 0.0, 100.0);

    world.advance(1.0);
    let b = world.body(body).unwrap();
    // Constant acceleration is integrated exactly.
    assert!((b.position().y - 95.0).abs() < 1e-9);
    assert!((b.velocity().y + 10.0).abs() < 1e-9);
    assert_eq!(b.forces().len(), 1);
    assert_eq!(b.forces()[0].kind, crate::systems::body::ForceType::Gravity);
}

#[test]
fn perf_stats_count_substeps_and_reset_when_disabled() {
    let (mut world, m) = world_with_material();
    spawn_at(&mut world, m, 0.0, 0.0);
    world.set_min_timestep(0.125).unwrap();

    world.enable_perf_metrics(true);
    world.advance(0.5);
    let stats = world.get_perf_stats();
    assert_eq!(stats.substeps(), 4);
    assert_eq!(stats.body_count(), 1);
    assert!(stats.step_ms() >= 0.0);

    world.enable_perf_metrics(false);
    let stats = world.get_perf_stats();
    assert_eq!(stats.substeps(), 0);
    assert_eq!(stats.step_ms(), 0.0);
}

#[test]
fn settings_reject_bad_values_and_keep_the_old_ones() {
    let mut world = WorldCore::new();
    assert!(world.set_air_density(-1.0).is_err());
    assert_eq!(world.constants().air_density, Constants::default().air_density);
    assert!(world.set_gravitational_constant(f64::NAN).is_err());
    assert!(world.set_time_scale(-2.0).is_err());
    assert_eq!(world.time_scale(), 1.0);
    assert!(world.set_min_timestep(0.0).is_err());
    assert!(world.set_min_timestep(1e-300).is_err());
    assert_eq!(world.min_timestep(), MIN_TIMESTEP);

    assert!(world.toggle_time_reverse());
    assert!(world.time_reverse());
    assert!(!world.toggle_time_reverse());
}

#[test]
fn clear_keeps_materials_and_settings() {
    let (mut world, m) = world_with_material();
    world.set_time_scale(2.0).unwrap();
    spawn_at(&mut world, m, 0.0, 0.0);
    world.add_field(downward_gravity(9.81)).unwrap();
    world.advance(0.01);

    world.clear();
    assert!(world.bodies().is_empty());
    assert!(world.fields().is_empty());
    assert!(world.material(m).is_some());
    assert_eq!(world.time_scale(), 2.0);
    assert_eq!(world.elapsed_time(), 0.0);
}

#[test]
fn swept_impact_time_uses_the_current_trajectory() {
    let (mut world, m) = world_with_material();
    let floor = world
        .add_obstacle(
            vec![
                Vector2::new(-5.0, -1.0),
                Vector2::new(5.0, -1.0),
                Vector2::new(5.0, 0.0),
                Vector2::new(-5.0, 0.0),
            ],
            0.0,
            false,
            m,
        )
        .unwrap();
    let body = world
        .spawn_body(Vector2::new(0.0, 0.9), Vector2::new(0.0, -1.0), 1.0, 1.0, 0.0, m)
        .unwrap();

    let t = world.swept_impact_time(body, floor, 0.5).unwrap().unwrap();
    assert!((t + 0.1).abs() < 1e-9);

    assert!(world.swept_impact_time(body, floor, -1.0).is_err());
    assert_eq!(
        world.swept_impact_time(body, floor + 1, 0.5),
        Err(PhysicsError::UnknownObstacle { id: floor + 1 })
    );
}

#[test]
fn failed_scene_load_leaves_the_world_untouched() {
    let (mut world, m) = world_with_material();
    spawn_at(&mut world, m, 0.0, 0.0);

    let unknown_material = r#"{
        "materials": [
            { "name": "a", "elasticity": 0.5, "staticFriction": 0.1, "kineticFriction": 0.1 }
        ],
        "bodies": [{ "position": { "x": 0, "y": 0 }, "radius": 1, "mass": 1, "material": "b" }]
    }"#;
    let result = world.load_scene_json(unknown_material);
    assert!(matches!(result, Err(PhysicsError::SceneParse { .. })));

    let bad_index = r#"{
        "materials": [
            { "name": "a", "elasticity": 0.5, "staticFriction": 0.1, "kineticFriction": 0.1 }
        ],
        "bodies": [{ "position": { "x": 0, "y": 0 }, "radius": 1, "mass": 1, "material": "a" }],
        "constraints": [
            { "kind": "rope", "anchor": { "x": 0, "y": 3 }, "body": 1, "length": 3,
              "material": "a" }
        ]
    }"#;
    assert!(matches!(world.load_scene_json(bad_index), Err(PhysicsError::SceneParse { .. })));

    let duplicate = r#"{
        "materials": [
            { "name": "a", "elasticity": 0.5, "staticFriction": 0.1, "kineticFriction": 0.1 },
            { "name": "a", "elasticity": 0.2, "staticFriction": 0.1, "kineticFriction": 0.1 }
        ]
    }"#;
    let result = world.load_scene_json(duplicate);
    assert!(matches!(result, Err(PhysicsError::DuplicateMaterial { .. })));

    assert_eq!(world.bodies().len(), 1);
    assert!(world.material(m).is_some());
}

#[test]
fn exported_scene_loads_back_into_an_equal_world() {
    let (mut world, m) = world_with_material();
    world.set_time_scale(0.5).unwrap();
    let well = Field::point("well", FieldKind::Gravitational, Vector2::new(3.0, 3.0), 2.0);
    world.add_field(well).unwrap();
    let wedge = vec![Vector2::new(0.0, -2.0), Vector2::new(4.0, -2.0), Vector2::new(2.0, -1.0)];
    world.add_obstacle(wedge, 0.25, false, m).unwrap();
    spawn_at(&mut world, m, 0.0, 0.0);
    let second = spawn_at(&mut world, m, 4.0, 0.0);
    world.add_rope(Vector2::new(4.0, 3.0), second, 3.0, m).unwrap();

    let json = world.export_scene_json().unwrap();
    let mut copy = WorldCore::new();
    copy.load_scene_json(&json).unwrap();

    assert_eq!(copy.time_scale(), 0.5);
    assert_eq!(copy.fields().len(), 1);
    assert_eq!(copy.obstacles()[0].corner_radius(), 0.25);
    assert_eq!(copy.bodies().len(), 2);
    assert_eq!(copy.bodies()[1].position(), Vector2::new(4.0, 0.0));
    assert_eq!(copy.constraints().len(), 1);
    assert_eq!(copy.constraints()[0].body(), copy.bodies()[1].id());
    let rubber = copy.materials().find_by_name("rubber");
    assert_eq!(rubber.map(|id| copy.material(id).unwrap().elasticity), Some(0.8));
}

#[test]
fn default_scene_loads_and_settles_on_the_ground() {
    let mut world = WorldCore::with_default_scene().unwrap();
    assert_eq!(world.bodies().len(), 1);
    assert_eq!(world.obstacles().len(), 2);
    assert!(world.obstacles()[1].is_inverse());

    world.advance(4.0);
    let ball = &world.bodies()[0];
    assert!(ball.position().y > ball.radius() - 1e-6);
    assert!(ball.position().y < 1.0);
}

#[test]
fn snapshot_reports_every_body() {
    let (mut world, m) = world_with_material();
    spawn_at(&mut world, m, 1.0, 2.0);
    let snap = world.snapshot();
    assert_eq!(snap.bodies.len(), 1);
    assert_eq!(snap.bodies[0].position, Vector2::new(1.0, 2.0));
    assert!(snap.running);

    let json = world.snapshot_json().unwrap();
    assert!(json.contains("\"elapsedTime\""));
    assert!(json.contains("\"netForce\""));
}
