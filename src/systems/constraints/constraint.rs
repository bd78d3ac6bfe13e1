use crate::core::{PhysicsError, PhysicsResult, Vector2};
use crate::domain::{HasMaterial, Material, MaterialId};
use crate::systems::body::{Body, BodyId};

use super::{rope, spring};

pub type ConstraintId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstraintKind {
    /// Inextensible; snaps back with the material's elasticity.
    Rope,
    /// Hookean; uses the material's stiffness and damping.
    Spring,
}

/// A fixed anchor tied to one body. Holds parameters only; all dynamics
/// are derived from the attached body each sub-step.
#[derive(Clone, Debug)]
pub struct Constraint {
    pub(crate) id: ConstraintId,
    kind: ConstraintKind,
    anchor: Vector2,
    body: BodyId,
    /// Rope length or spring rest length.
    length: f64,
    material: MaterialId,
}

impl Constraint {
    pub fn new(
        kind: ConstraintKind,
        anchor: Vector2,
        body: BodyId,
        length: f64,
        material: MaterialId,
    ) -> PhysicsResult<Self> {
        if !anchor.is_finite() {
            return Err(PhysicsError::InvalidConstraint { reason: "anchor must be finite" });
        }
        if !length.is_finite() || length < 0.0 {
            return Err(PhysicsError::InvalidConstraint {
                reason: "length must be finite and non-negative",
            });
        }
        Ok(Self {
            id: 0,
            kind,
            anchor,
            body,
            length,
            material,
        })
    }

    pub fn id(&self) -> ConstraintId { self.id }

    pub fn kind(&self) -> ConstraintKind { self.kind }

    pub fn anchor(&self) -> Vector2 { self.anchor }

    pub fn body(&self) -> BodyId { self.body }

    pub fn length(&self) -> f64 { self.length }

    pub(crate) fn set_material(&mut self, material: MaterialId) {
        self.material = material;
    }

    /// Force phase: runs after every other continuous force of the sub-step.
    pub fn apply_forces(&self, body: &mut Body, material: &Material) {
        match self.kind {
            ConstraintKind::Rope => rope::apply_tension(self.anchor, self.length, body),
            ConstraintKind::Spring => {
                spring::apply_restoring(self.anchor, self.length, material, body)
            }
        }
    }

    /// Kinematics phase: positional and velocity corrections after integration.
    pub fn apply_kinematics(&self, body: &mut Body, material: &Material, dt: f64) {
        if self.kind == ConstraintKind::Rope {
            rope::enforce_length(self.anchor, self.length, material.elasticity, body, dt);
        }
    }
}

impl HasMaterial for Constraint {
    fn material_id(&self) -> MaterialId {
        self.material
    }
}
