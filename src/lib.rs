//! Kinema Engine - rigid-disc physics for the Kinema sandbox in WASM
//!
//! Discs ("bodies") move under fields, drag, pairwise gravity and Coulomb
//! forces, ropes and springs, and collide with each other and with rounded
//! polygon obstacles. Time runs in small fixed sub-steps and can run backwards.
//!
//! Architecture:
//! - core/          - Math, errors, logging macros
//! - domain/        - Materials, fields, constants, scene bundles
//! - systems/       - Bodies, collision, constraints, per-sub-step physics
//! - simulation/    - WorldCore, the clock, commands and the wasm facade

// Logging macros must be first so every later module sees them.
#[macro_use]
pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    console_log!("Kinema engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::{PhysicsError, PhysicsResult, Vector2};
pub use domain::{Constants, Field, FieldKind, Material, MaterialLibrary, SceneBundle};
pub use simulation::{Clock, PerfStats, World, WorldCore, WorldSnapshot};
pub use systems::body::{Body, ForceType};
pub use systems::collision::{ContactInfo, Obstacle};
pub use systems::constraints::{Constraint, ConstraintKind};

/// Numeric tag of each `ForceType`, for decoding `World::body_forces`
#[wasm_bindgen]
pub fn force_type_names() -> Vec<String> {
    (0u8..)
        .map_while(ForceType::from_tag)
        .map(|kind| format!("{:?}", kind))
        .collect()
}
