use crate::systems::physics;

use super::{timed, PerfTimer, SubSteps, WorldCore};

/// Run every sub-step the clock handed out for one `frame`/`advance` call.
pub(super) fn run(world: &mut WorldCore, steps: SubSteps) {
    let perf_on = world.perf_enabled;
    if perf_on {
        world.perf_stats.reset();
        world.perf_stats.body_count = world.bodies.len() as u32;
    }
    let step_start = if perf_on { Some(PerfTimer::start()) } else { None };

    for dt in steps {
        substep(world, dt);
    }

    if let Some(t0) = step_start {
        world.perf_stats.step_ms = t0.elapsed_ms();
    }
}

/// One sub-step of signed length `dt`.
///
/// Order matters: forces use the contacts cached by the previous sub-step,
/// then every body integrates, then contacts are re-queried and resolved
/// body by body, and constraints correct whatever is left.
pub(super) fn substep(world: &mut WorldCore, dt: f64) {
    if dt == 0.0 || !dt.is_finite() {
        return;
    }
    let perf_on = world.perf_enabled;

    // === FORCES ===
    timed(perf_on, &mut world.perf_stats.forces_ms, || {
        physics::accumulate(
            &mut world.bodies,
            &world.obstacles,
            &world.constraints,
            &world.fields,
            &world.materials,
            &world.constants,
        )
    });

    // === INTEGRATION ===
    timed(perf_on, &mut world.perf_stats.kinematics_ms, || {
        physics::integrate(&mut world.bodies, dt)
    });

    // === CONTACTS ===
    let contacts = timed(perf_on, &mut world.perf_stats.contacts_ms, || {
        physics::resolve_contacts(&mut world.bodies, &world.obstacles, &world.materials, dt)
    });

    // === CONSTRAINTS ===
    timed(perf_on, &mut world.perf_stats.constraints_ms, || {
        let (constraints, materials) = (&world.constraints, &world.materials);
        physics::apply_constraint_kinematics(&mut world.bodies, constraints, materials, dt)
    });

    if perf_on {
        world.perf_stats.substeps = world.perf_stats.substeps.saturating_add(1);
        world.perf_stats.contacts = world.perf_stats.contacts.saturating_add(contacts);
    }
}
