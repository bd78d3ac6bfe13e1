//! World-wide physical constants and the engine's fixed thresholds.

use serde::{Deserialize, Serialize};

use crate::core::{PhysicsError, PhysicsResult};

pub const GRAVITATIONAL_CONSTANT: f64 = 6.674e-11; // N·m²/kg²
pub const COULOMB_CONSTANT: f64 = 8.99e9; // N·m²/C²
pub const AIR_DENSITY: f64 = 1.225; // kg/m³

/// Default fixed sub-step (seconds).
pub const MIN_TIMESTEP: f64 = 1.0 / 500.0;

/// Smallest accepted sub-step; anything finer would stall a frame.
pub const SMALLEST_TIMESTEP: f64 = 1e-6;

// === Contact thresholds ===
/// Overlaps above `-OVERLAP_EPSILON` count as touching.
pub const OVERLAP_EPSILON: f64 = 1e-8;
/// Normal speed below which a cached contact is treated as resting.
pub const RESTING_NORMAL_SPEED: f64 = 0.2;
/// Tangential speed below which friction is static.
pub const STATIC_TANGENT_SPEED: f64 = 0.05;
/// Slack added to the `|a·n|·|dt|` bounce discriminator.
pub const BOUNCE_SLACK: f64 = 1e-6;
/// Edge normals with a dot product above this share one SAT axis.
pub const AXIS_MERGE_DOT: f64 = 0.999;
/// Combined elasticity below this cannot be inverted on a backward step.
pub const MIN_INVERTIBLE_ELASTICITY: f64 = 1e-6;

// === Rope ===
pub const ROPE_TAUT_TOLERANCE: f64 = 1e-6;
/// Outward speed above which a rope snaps back elastically.
pub const ROPE_SNAP_SPEED: f64 = 0.1;

/// Mutable global scalars.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Constants {
    pub gravitational_constant: f64,
    pub coulomb_constant: f64,
    pub air_density: f64,
}

impl Constants {
    pub fn validate(&self) -> PhysicsResult<()> {
        if !self.gravitational_constant.is_finite() || !self.coulomb_constant.is_finite() {
            return Err(PhysicsError::InvalidConfiguration {
                reason: "force constants must be finite",
            });
        }
        if !self.air_density.is_finite() || self.air_density < 0.0 {
            return Err(PhysicsError::InvalidConfiguration {
                reason: "air density must be finite and non-negative",
            });
        }
        Ok(())
    }
}

impl Default for Constants {
    fn default() -> Self {
        Self {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            coulomb_constant: COULOMB_CONSTANT,
            air_density: AIR_DENSITY,
        }
    }
}
