//! World - the explicit simulation struct
//!
//! `WorldCore` owns every collection (materials, fields, bodies, obstacles,
//! constraints), the global constants and the clock. It only orchestrates;
//! physics lives in `systems/`. The submodules below each handle one concern
//! and are mounted by path so the directory layout groups them by role.

use crate::core::{PhysicsResult, Vector2};
use crate::domain::{Constants, Field, FieldId, FieldSet, Material, MaterialId, MaterialLibrary};
use crate::systems::body::{Body, BodyId};
use crate::systems::collision::{Obstacle, ObstacleId};
use crate::systems::constraints::{Constraint, ConstraintId};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "clock/clock.rs"]
mod clock;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "commands/edit.rs"]
mod edit;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "render/snapshot.rs"]
mod snapshot;
mod facade;

pub use clock::{Clock, SubSteps};
pub use facade::{World, BODY_STATE_STRIDE, FORCE_STRIDE};
pub use perf_stats::PerfStats;
pub use snapshot::{BodySnapshot, WorldSnapshot};

use perf_timer::{timed, PerfTimer};

/// The simulation world
pub struct WorldCore {
    materials: MaterialLibrary,
    fields: FieldSet,
    constants: Constants,

    bodies: Vec<Body>,
    obstacles: Vec<Obstacle>,
    constraints: Vec<Constraint>,
    next_body_id: BodyId,
    next_obstacle_id: ObstacleId,
    next_constraint_id: ConstraintId,

    clock: Clock,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl WorldCore {
    /// Empty world with default settings and constants.
    pub fn new() -> Self {
        init::create_world_core()
    }

    /// World populated from the bundled default scene.
    pub fn with_default_scene() -> PhysicsResult<Self> {
        init::create_default_world_core()
    }

    /// Replace the whole world with a scene bundle. On error nothing changes.
    pub fn load_scene_json(&mut self, json: &str) -> PhysicsResult<()> {
        init::load_scene_json(self, json)
    }

    /// Scene bundle describing the current contents (settings, materials, fields, objects).
    pub fn export_scene_json(&self) -> PhysicsResult<String> {
        init::export_scene_json(self)
    }

    /// Observable state for renderers and graphs.
    pub fn snapshot(&self) -> WorldSnapshot {
        snapshot::snapshot(self)
    }

    pub fn snapshot_json(&self) -> PhysicsResult<String> {
        snapshot::snapshot_json(self)
    }

    /// Remove every body, obstacle, constraint and field; keep materials and settings.
    pub fn clear(&mut self) {
        commands::clear(self)
    }

    // === LOOP ===

    /// Feed one rendering frame's wall-clock delta. No-op while paused.
    pub fn frame(&mut self, wall_delta: f64) {
        let steps = self.clock.frame(wall_delta);
        step::run(self, steps);
    }

    /// Skip forwards or rewind by `amount` seconds of simulation time. Works while paused.
    pub fn advance(&mut self, amount: f64) {
        let steps = self.clock.advance(amount);
        step::run(self, steps);
    }

    /// One sub-step of exactly `dt` (no accumulation, elapsed time unchanged).
    pub fn substep(&mut self, dt: f64) {
        step::substep(self, dt);
    }

    pub fn pause(&mut self) {
        settings::pause(self);
    }

    pub fn resume(&mut self) {
        settings::resume(self);
    }

    pub fn running(&self) -> bool { self.clock.running() }

    pub fn elapsed_time(&self) -> f64 { self.clock.elapsed() }

    pub fn time_scale(&self) -> f64 { self.clock.time_scale() }

    pub fn set_time_scale(&mut self, scale: f64) -> PhysicsResult<()> {
        settings::set_time_scale(self, scale)
    }

    pub fn time_reverse(&self) -> bool { self.clock.time_reverse() }

    pub fn set_time_reverse(&mut self, reverse: bool) {
        settings::set_time_reverse(self, reverse);
    }

    pub fn toggle_time_reverse(&mut self) -> bool {
        settings::toggle_time_reverse(self)
    }

    pub fn min_timestep(&self) -> f64 { self.clock.min_timestep() }

    pub fn set_min_timestep(&mut self, step: f64) -> PhysicsResult<()> {
        settings::set_min_timestep(self, step)
    }

    // === CONSTANTS ===

    pub fn constants(&self) -> &Constants { &self.constants }

    pub fn set_gravitational_constant(&mut self, value: f64) -> PhysicsResult<()> {
        settings::set_gravitational_constant(self, value)
    }

    pub fn set_coulomb_constant(&mut self, value: f64) -> PhysicsResult<()> {
        settings::set_coulomb_constant(self, value)
    }

    pub fn set_air_density(&mut self, value: f64) -> PhysicsResult<()> {
        settings::set_air_density(self, value)
    }

    // === PERF ===

    /// Enable or disable per-advance perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last advance perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    // === MATERIALS ===

    pub fn materials(&self) -> &MaterialLibrary { &self.materials }

    pub fn material(&self, id: MaterialId) -> Option<&Material> { self.materials.get(id) }

    pub fn add_material(&mut self, material: Material) -> PhysicsResult<MaterialId> {
        commands::add_material(self, material)
    }

    /// Edit coefficients in place; every referencing object sees them next sub-step.
    pub fn update_material(&mut self, id: MaterialId, material: Material) -> PhysicsResult<()> {
        commands::update_material(self, id, material)
    }

    /// Fails with `MaterialInUse` while any object still references it.
    pub fn remove_material(&mut self, id: MaterialId) -> PhysicsResult<Material> {
        commands::remove_material(self, id)
    }

    // === FIELDS ===

    pub fn fields(&self) -> &FieldSet { &self.fields }

    pub fn add_field(&mut self, field: Field) -> PhysicsResult<FieldId> {
        commands::add_field(self, field)
    }

    pub fn update_field(&mut self, id: FieldId, field: Field) -> PhysicsResult<()> {
        commands::update_field(self, id, field)
    }

    pub fn remove_field(&mut self, id: FieldId) -> PhysicsResult<Field> {
        commands::remove_field(self, id)
    }

    // === BODIES ===

    pub fn bodies(&self) -> &[Body] { &self.bodies }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id() == id)
    }

    pub fn spawn_body(
        &mut self,
        position: Vector2,
        velocity: Vector2,
        radius: f64,
        mass: f64,
        charge: f64,
        material: MaterialId,
    ) -> PhysicsResult<BodyId> {
        commands::spawn_body(self, position, velocity, radius, mass, charge, material)
    }

    /// Also removes the body's constraints and any contact cached against it.
    pub fn remove_body(&mut self, id: BodyId) -> PhysicsResult<()> {
        commands::remove_body(self, id)
    }

    pub fn set_body_radius(&mut self, id: BodyId, radius: f64) -> PhysicsResult<()> {
        edit::set_body_radius(self, id, radius)
    }

    pub fn set_body_mass(&mut self, id: BodyId, mass: f64) -> PhysicsResult<()> {
        edit::set_body_mass(self, id, mass)
    }

    pub fn set_body_charge(&mut self, id: BodyId, charge: f64) -> PhysicsResult<()> {
        edit::set_body_charge(self, id, charge)
    }

    pub fn set_body_material(&mut self, id: BodyId, material: MaterialId) -> PhysicsResult<()> {
        edit::set_body_material(self, id, material)
    }

    pub fn set_body_position(&mut self, id: BodyId, position: Vector2) -> PhysicsResult<()> {
        edit::set_body_position(self, id, position)
    }

    pub fn set_body_velocity(&mut self, id: BodyId, velocity: Vector2) -> PhysicsResult<()> {
        edit::set_body_velocity(self, id, velocity)
    }

    // === OBSTACLES ===

    pub fn obstacles(&self) -> &[Obstacle] { &self.obstacles }

    pub fn obstacle(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.id() == id)
    }

    pub fn add_obstacle(
        &mut self,
        vertices: Vec<Vector2>,
        corner_radius: f64,
        inverse: bool,
        material: MaterialId,
    ) -> PhysicsResult<ObstacleId> {
        commands::add_obstacle(self, vertices, corner_radius, inverse, material)
    }

    pub fn remove_obstacle(&mut self, id: ObstacleId) -> PhysicsResult<()> {
        commands::remove_obstacle(self, id)
    }

    pub fn set_obstacle_material(
        &mut self,
        id: ObstacleId,
        material: MaterialId,
    ) -> PhysicsResult<()> {
        edit::set_obstacle_material(self, id, material)
    }

    /// Most recent contact time in `[-window, 0]` between the obstacle and
    /// the body's current constant-acceleration path.
    pub fn swept_impact_time(
        &self,
        body: BodyId,
        obstacle: ObstacleId,
        window: f64,
    ) -> PhysicsResult<Option<f64>> {
        edit::swept_impact_time(self, body, obstacle, window)
    }

    // === CONSTRAINTS ===

    pub fn constraints(&self) -> &[Constraint] { &self.constraints }

    pub fn constraint(&self, id: ConstraintId) -> Option<&Constraint> {
        self.constraints.iter().find(|c| c.id() == id)
    }

    pub fn add_rope(
        &mut self,
        anchor: Vector2,
        body: BodyId,
        length: f64,
        material: MaterialId,
    ) -> PhysicsResult<ConstraintId> {
        commands::add_rope(self, anchor, body, length, material)
    }

    pub fn add_spring(
        &mut self,
        anchor: Vector2,
        body: BodyId,
        rest_length: f64,
        material: MaterialId,
    ) -> PhysicsResult<ConstraintId> {
        commands::add_spring(self, anchor, body, rest_length, material)
    }

    pub fn remove_constraint(&mut self, id: ConstraintId) -> PhysicsResult<()> {
        commands::remove_constraint(self, id)
    }

    pub fn set_constraint_material(
        &mut self,
        id: ConstraintId,
        material: MaterialId,
    ) -> PhysicsResult<()> {
        edit::set_constraint_material(self, id, material)
    }
}

impl Default for WorldCore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
