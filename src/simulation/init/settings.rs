use crate::core::PhysicsResult;
use crate::domain::Constants;

use super::perf_stats::PerfStats;
use super::WorldCore;

pub(super) fn pause(world: &mut WorldCore) {
    if world.clock.running() {
        world.clock.pause();
        console_log!("paused at t={:.3}", world.clock.elapsed());
    }
}

pub(super) fn resume(world: &mut WorldCore) {
    if !world.clock.running() {
        world.clock.resume();
        console_log!("resumed at t={:.3}", world.clock.elapsed());
    }
}

pub(super) fn set_time_scale(world: &mut WorldCore, scale: f64) -> PhysicsResult<()> {
    world.clock.set_time_scale(scale)
}

pub(super) fn set_time_reverse(world: &mut WorldCore, reverse: bool) {
    if world.clock.time_reverse() != reverse {
        console_log!("time {}", if reverse { "reversed" } else { "forward" });
    }
    world.clock.set_time_reverse(reverse);
}

pub(super) fn toggle_time_reverse(world: &mut WorldCore) -> bool {
    let reverse = !world.clock.time_reverse();
    set_time_reverse(world, reverse);
    reverse
}

pub(super) fn set_min_timestep(world: &mut WorldCore, step: f64) -> PhysicsResult<()> {
    world.clock.set_min_timestep(step)
}

/// Apply `edit` to a copy and keep it only if it validates.
fn edit_constants(world: &mut WorldCore, edit: impl FnOnce(&mut Constants)) -> PhysicsResult<()> {
    let mut constants = world.constants;
    edit(&mut constants);
    constants.validate()?;
    world.constants = constants;
    Ok(())
}

pub(super) fn set_gravitational_constant(world: &mut WorldCore, value: f64) -> PhysicsResult<()> {
    edit_constants(world, |c| c.gravitational_constant = value)
}

pub(super) fn set_coulomb_constant(world: &mut WorldCore, value: f64) -> PhysicsResult<()> {
    edit_constants(world, |c| c.coulomb_constant = value)
}

pub(super) fn set_air_density(world: &mut WorldCore, value: f64) -> PhysicsResult<()> {
    edit_constants(world, |c| c.air_density = value)
}

pub(super) fn enable_perf_metrics(world: &mut WorldCore, enabled: bool) {
    world.perf_enabled = enabled;
    if !enabled {
        world.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(world: &WorldCore) -> PerfStats {
    world.perf_stats.clone()
}
