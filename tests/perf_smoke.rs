use kinema_engine::World;

#[test]
fn perf_smoke_advance() {
    let mut world = World::new();
    world.enable_perf_metrics(true);
    let material = world
        .add_material("smoke", "#ff0000", 0.5, 0.4, 0.3, 0.1, 0.0, 0.0)
        .unwrap();
    world.add_field("gravity", false, 0.0, -1.0, false, 9.81).unwrap();
    world
        .add_obstacle(&[-50.0, -5.0, 50.0, -5.0, 50.0, 0.0, -50.0, 0.0], 0.0, false, material)
        .unwrap();
    for i in 0..64 {
        let x = (i % 16) as f64 * 2.5 - 20.0;
        let y = (i / 16) as f64 * 2.5 + 1.0;
        world.spawn_body(x, y, 0.0, 0.0, 1.0, 1.0, 0.0, material).unwrap();
    }

    world.advance(0.1);
    let stats = world.get_perf_stats();
    assert!(stats.step_ms() >= 0.0);
    assert_eq!(stats.body_count(), 64);
    assert!(stats.substeps() >= 50);

    let state = world.body_state();
    assert_eq!(state.len(), 64 * kinema_engine::simulation::BODY_STATE_STRIDE);
    assert!(state.iter().all(|v| v.is_finite()));
}
