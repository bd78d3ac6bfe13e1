use wasm_bindgen::prelude::*;

use crate::core::{PhysicsError, Vector2};
use crate::domain::{Field, FieldKind, Material};

use super::perf_stats::PerfStats;
use super::WorldCore;

/// Floats per body in [`World::body_state`]: id, x, y, vx, vy, ax, ay, radius.
pub const BODY_STATE_STRIDE: usize = 8;

/// Floats per entry in [`World::body_forces`]: x, y, tag.
pub const FORCE_STRIDE: usize = 3;

fn to_js(e: PhysicsError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct World {
    core: WorldCore,
}

#[wasm_bindgen]
impl World {
    /// Create an empty world with default settings
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { core: WorldCore::new() }
    }

    /// World populated from the bundled default scene
    #[wasm_bindgen(js_name = withDefaultScene)]
    pub fn with_default_scene() -> Result<World, JsValue> {
        let core = WorldCore::with_default_scene().map_err(to_js)?;
        Ok(Self { core })
    }

    // === LOOP ===

    /// Feed one animation frame's wall-clock delta (seconds)
    pub fn frame(&mut self, wall_delta: f64) {
        self.core.frame(wall_delta);
    }

    /// Skip forwards (or back, when negative) by `amount` seconds
    pub fn advance(&mut self, amount: f64) {
        self.core.advance(amount);
    }

    pub fn pause(&mut self) {
        self.core.pause();
    }

    pub fn resume(&mut self) {
        self.core.resume();
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool { self.core.running() }

    #[wasm_bindgen(getter)]
    pub fn elapsed_time(&self) -> f64 { self.core.elapsed_time() }

    #[wasm_bindgen(getter)]
    pub fn time_scale(&self) -> f64 { self.core.time_scale() }

    pub fn set_time_scale(&mut self, scale: f64) -> Result<(), JsValue> {
        self.core.set_time_scale(scale).map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn time_reverse(&self) -> bool { self.core.time_reverse() }

    pub fn set_time_reverse(&mut self, reverse: bool) {
        self.core.set_time_reverse(reverse);
    }

    pub fn toggle_time_reverse(&mut self) -> bool {
        self.core.toggle_time_reverse()
    }

    #[wasm_bindgen(getter)]
    pub fn min_timestep(&self) -> f64 { self.core.min_timestep() }

    pub fn set_min_timestep(&mut self, step: f64) -> Result<(), JsValue> {
        self.core.set_min_timestep(step).map_err(to_js)
    }

    pub fn clear(&mut self) {
        self.core.clear();
    }

    // === CONSTANTS ===

    #[wasm_bindgen(getter)]
    pub fn gravitational_constant(&self) -> f64 { self.core.constants().gravitational_constant }

    pub fn set_gravitational_constant(&mut self, value: f64) -> Result<(), JsValue> {
        self.core.set_gravitational_constant(value).map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn coulomb_constant(&self) -> f64 { self.core.constants().coulomb_constant }

    pub fn set_coulomb_constant(&mut self, value: f64) -> Result<(), JsValue> {
        self.core.set_coulomb_constant(value).map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn air_density(&self) -> f64 { self.core.constants().air_density }

    pub fn set_air_density(&mut self, value: f64) -> Result<(), JsValue> {
        self.core.set_air_density(value).map_err(to_js)
    }

    // === MATERIALS ===

    #[allow(clippy::too_many_arguments)]
    pub fn add_material(
        &mut self,
        name: &str,
        color: &str,
        elasticity: f64,
        static_friction: f64,
        kinetic_friction: f64,
        drag: f64,
        stiffness: f64,
        damping: f64,
    ) -> Result<u32, JsValue> {
        let material = Material::new(name, elasticity, static_friction, kinetic_friction, drag)
            .with_color(color)
            .with_spring(stiffness, damping);
        self.core.add_material(material).map_err(to_js)
    }

    /// Replace a material from its JSON form (same keys as in a scene bundle)
    pub fn update_material_json(&mut self, id: u32, json: &str) -> Result<(), JsValue> {
        let material: Material = serde_json::from_str(json)
            .map_err(PhysicsError::from)
            .map_err(to_js)?;
        self.core.update_material(id, material).map_err(to_js)
    }

    pub fn remove_material(&mut self, id: u32) -> Result<(), JsValue> {
        self.core.remove_material(id).map(|_| ()).map_err(to_js)
    }

    /// `[[id, material], ...]` for the material editor
    pub fn materials_json(&self) -> Result<String, JsValue> {
        let list: Vec<(u32, &Material)> = self.core.materials().iter().collect();
        serde_json::to_string(&list).map_err(|e| to_js(e.into()))
    }

    // === FIELDS ===

    pub fn add_field(
        &mut self,
        name: &str,
        electric: bool,
        x: f64,
        y: f64,
        position_based: bool,
        strength: f64,
    ) -> Result<u32, JsValue> {
        self.core
            .add_field(make_field(name, electric, x, y, position_based, strength))
            .map_err(to_js)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn update_field(
        &mut self,
        id: u32,
        name: &str,
        electric: bool,
        x: f64,
        y: f64,
        position_based: bool,
        strength: f64,
    ) -> Result<(), JsValue> {
        self.core
            .update_field(id, make_field(name, electric, x, y, position_based, strength))
            .map_err(to_js)
    }

    pub fn remove_field(&mut self, id: u32) -> Result<(), JsValue> {
        self.core.remove_field(id).map(|_| ()).map_err(to_js)
    }

    // === BODIES ===

    #[allow(clippy::too_many_arguments)]
    pub fn spawn_body(
        &mut self,
        x: f64,
        y: f64,
        vx: f64,
        vy: f64,
        radius: f64,
        mass: f64,
        charge: f64,
        material: u32,
    ) -> Result<u32, JsValue> {
        self.core
            .spawn_body(Vector2::new(x, y), Vector2::new(vx, vy), radius, mass, charge, material)
            .map_err(to_js)
    }

    pub fn remove_body(&mut self, id: u32) -> Result<(), JsValue> {
        self.core.remove_body(id).map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> usize { self.core.bodies().len() }

    pub fn body_ids(&self) -> Vec<u32> {
        self.core.bodies().iter().map(|b| b.id()).collect()
    }

    /// Flat `[id, x, y, vx, vy, ax, ay, radius, ...]`, `BODY_STATE_STRIDE` floats per body
    pub fn body_state(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.core.bodies().len() * BODY_STATE_STRIDE);
        for b in self.core.bodies() {
            let (p, v, a) = (b.position(), b.velocity(), b.acceleration());
            out.extend_from_slice(&[b.id() as f64, p.x, p.y, v.x, v.y, a.x, a.y, b.radius()]);
        }
        out
    }

    /// Flat `[x, y, tag, ...]` of the body's forces in the last sub-step
    pub fn body_forces(&self, id: u32) -> Result<Vec<f64>, JsValue> {
        let body = self
            .core
            .body(id)
            .ok_or_else(|| to_js(PhysicsError::UnknownBody { id }))?;
        let mut out = Vec::with_capacity(body.forces().len() * FORCE_STRIDE);
        for f in body.forces() {
            out.extend_from_slice(&[f.vector.x, f.vector.y, f64::from(f.kind.tag())]);
        }
        Ok(out)
    }

    pub fn set_body_radius(&mut self, id: u32, radius: f64) -> Result<(), JsValue> {
        self.core.set_body_radius(id, radius).map_err(to_js)
    }

    pub fn set_body_mass(&mut self, id: u32, mass: f64) -> Result<(), JsValue> {
        self.core.set_body_mass(id, mass).map_err(to_js)
    }

    pub fn set_body_charge(&mut self, id: u32, charge: f64) -> Result<(), JsValue> {
        self.core.set_body_charge(id, charge).map_err(to_js)
    }

    pub fn set_body_material(&mut self, id: u32, material: u32) -> Result<(), JsValue> {
        self.core.set_body_material(id, material).map_err(to_js)
    }

    pub fn set_body_position(&mut self, id: u32, x: f64, y: f64) -> Result<(), JsValue> {
        self.core.set_body_position(id, Vector2::new(x, y)).map_err(to_js)
    }

    pub fn set_body_velocity(&mut self, id: u32, vx: f64, vy: f64) -> Result<(), JsValue> {
        self.core.set_body_velocity(id, Vector2::new(vx, vy)).map_err(to_js)
    }

    // === OBSTACLES ===

    /// `vertices` is flat `[x0, y0, x1, y1, ...]`
    pub fn add_obstacle(
        &mut self,
        vertices: &[f64],
        corner_radius: f64,
        inverse: bool,
        material: u32,
    ) -> Result<u32, JsValue> {
        if vertices.len() % 2 != 0 {
            return Err(to_js(PhysicsError::InvalidObstacle {
                reason: "vertex array must hold x, y pairs",
            }));
        }
        let vertices = vertices
            .chunks_exact(2)
            .map(|xy| Vector2::new(xy[0], xy[1]))
            .collect();
        self.core
            .add_obstacle(vertices, corner_radius, inverse, material)
            .map_err(to_js)
    }

    pub fn remove_obstacle(&mut self, id: u32) -> Result<(), JsValue> {
        self.core.remove_obstacle(id).map_err(to_js)
    }

    pub fn set_obstacle_material(&mut self, id: u32, material: u32) -> Result<(), JsValue> {
        self.core.set_obstacle_material(id, material).map_err(to_js)
    }

    /// Latest time in `[-window, 0]` the body touched the obstacle, or `undefined`
    pub fn swept_impact_time(
        &self,
        body: u32,
        obstacle: u32,
        window: f64,
    ) -> Result<Option<f64>, JsValue> {
        self.core.swept_impact_time(body, obstacle, window).map_err(to_js)
    }

    // === CONSTRAINTS ===

    pub fn add_rope(
        &mut self,
        anchor_x: f64,
        anchor_y: f64,
        body: u32,
        length: f64,
        material: u32,
    ) -> Result<u32, JsValue> {
        self.core
            .add_rope(Vector2::new(anchor_x, anchor_y), body, length, material)
            .map_err(to_js)
    }

    pub fn add_spring(
        &mut self,
        anchor_x: f64,
        anchor_y: f64,
        body: u32,
        rest_length: f64,
        material: u32,
    ) -> Result<u32, JsValue> {
        self.core
            .add_spring(Vector2::new(anchor_x, anchor_y), body, rest_length, material)
            .map_err(to_js)
    }

    pub fn remove_constraint(&mut self, id: u32) -> Result<(), JsValue> {
        self.core.remove_constraint(id).map_err(to_js)
    }

    pub fn set_constraint_material(&mut self, id: u32, material: u32) -> Result<(), JsValue> {
        self.core.set_constraint_material(id, material).map_err(to_js)
    }

    // === SCENES ===

    pub fn load_scene(&mut self, json: &str) -> Result<(), JsValue> {
        self.core.load_scene_json(json).map_err(to_js)
    }

    pub fn export_scene(&self) -> Result<String, JsValue> {
        self.core.export_scene_json().map_err(to_js)
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        self.core.snapshot_json().map_err(to_js)
    }

    // === PERF ===

    /// Enable or disable per-advance perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Last advance perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

fn make_field(
    name: &str,
    electric: bool,
    x: f64,
    y: f64,
    position_based: bool,
    strength: f64,
) -> Field {
    let kind = if electric { FieldKind::Electric } else { FieldKind::Gravitational };
    let vector = Vector2::new(x, y);
    if position_based {
        Field::point(name, kind, vector, strength)
    } else {
        Field::uniform(name, kind, vector, strength)
    }
}
