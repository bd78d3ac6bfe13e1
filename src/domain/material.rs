//! Materials - named coefficient sets shared by bodies, obstacles and constraints
//!
//! Objects hold a `MaterialId`, never the material itself, so editing a
//! material in the library affects every referencing object on the next sub-step.

use serde::{Deserialize, Serialize};

use crate::core::{PhysicsError, PhysicsResult};

pub type MaterialId = u32;

/// Surface and spring coefficients.
///
/// `static_friction >= kinetic_friction` is expected but not enforced here;
/// the owning controller keeps the two in order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub name: String,
    /// Opaque CSS color for the renderer.
    #[serde(default = "default_color")]
    pub color: String,
    /// Restitution, `[0, inf)`.
    pub elasticity: f64,
    pub static_friction: f64,
    pub kinetic_friction: f64,
    /// Drag coefficient.
    #[serde(default)]
    pub drag: f64,
    /// Spring constant (springs only).
    #[serde(default)]
    pub stiffness: f64,
    /// Spring damping (springs only).
    #[serde(default)]
    pub damping: f64,
}

fn default_color() -> String {
    "#808080".to_string()
}

impl Material {
    pub fn new(
        name: &str,
        elasticity: f64,
        static_friction: f64,
        kinetic_friction: f64,
        drag: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            color: default_color(),
            elasticity,
            static_friction,
            kinetic_friction,
            drag,
            stiffness: 0.0,
            damping: 0.0,
        }
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = color.to_string();
        self
    }

    pub fn with_spring(mut self, stiffness: f64, damping: f64) -> Self {
        self.stiffness = stiffness;
        self.damping = damping;
        self
    }

    /// Every coefficient must be finite and non-negative.
    pub fn validate(&self) -> PhysicsResult<()> {
        let checks = [
            ("elasticity must be finite and non-negative", self.elasticity),
            ("static friction must be finite and non-negative", self.static_friction),
            ("kinetic friction must be finite and non-negative", self.kinetic_friction),
            ("drag must be finite and non-negative", self.drag),
            ("stiffness must be finite and non-negative", self.stiffness),
            ("damping must be finite and non-negative", self.damping),
        ];
        for (reason, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(PhysicsError::InvalidMaterial { reason, value });
            }
        }
        Ok(())
    }

    #[inline]
    pub fn combine_elasticity(&self, other: &Material) -> f64 {
        self.elasticity * other.elasticity
    }

    #[inline]
    pub fn combine_static_friction(&self, other: &Material) -> f64 {
        self.static_friction * other.static_friction
    }

    #[inline]
    pub fn combine_kinetic_friction(&self, other: &Material) -> f64 {
        self.kinetic_friction * other.kinetic_friction
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::new("default", 0.5, 0.4, 0.3, 0.2)
    }
}

/// Anything that refers to a material: bodies, obstacles, constraints.
pub trait HasMaterial {
    fn material_id(&self) -> MaterialId;
}

/// Combined coefficients at a contact between two material holders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactCoefficients {
    pub elasticity: f64,
    pub static_friction: f64,
    pub kinetic_friction: f64,
}

/// Owns every material; ids are stable and never reused.
#[derive(Clone, Debug)]
pub struct MaterialLibrary {
    materials: Vec<(MaterialId, Material)>,
    next_id: MaterialId,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self {
            materials: Vec::new(),
            next_id: 1,
        }
    }

    /// Validate and store a material. Names must be unique.
    pub fn add(&mut self, material: Material) -> PhysicsResult<MaterialId> {
        material.validate()?;
        if self.find_by_name(&material.name).is_some() {
            return Err(PhysicsError::DuplicateMaterial {
                name: material.name,
            });
        }
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        self.materials.push((id, material));
        Ok(id)
    }

    /// Replace a material's coefficients in place, keeping its id.
    pub fn update(&mut self, id: MaterialId, material: Material) -> PhysicsResult<()> {
        material.validate()?;
        if self
            .materials
            .iter()
            .any(|(other, m)| *other != id && m.name == material.name)
        {
            return Err(PhysicsError::DuplicateMaterial {
                name: material.name,
            });
        }
        let slot = self
            .materials
            .iter_mut()
            .find(|(other, _)| *other == id)
            .ok_or(PhysicsError::UnknownMaterial { id })?;
        slot.1 = material;
        Ok(())
    }

    /// Remove without checking references; the world checks usage first.
    pub(crate) fn remove(&mut self, id: MaterialId) -> PhysicsResult<Material> {
        let idx = self
            .materials
            .iter()
            .position(|(other, _)| *other == id)
            .ok_or(PhysicsError::UnknownMaterial { id })?;
        Ok(self.materials.remove(idx).1)
    }

    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials
            .iter()
            .find(|(other, _)| *other == id)
            .map(|(_, m)| m)
    }

    pub fn require(&self, id: MaterialId) -> PhysicsResult<&Material> {
        self.get(id).ok_or(PhysicsError::UnknownMaterial { id })
    }

    pub fn contains(&self, id: MaterialId) -> bool {
        self.get(id).is_some()
    }

    pub fn find_by_name(&self, name: &str) -> Option<MaterialId> {
        self.materials
            .iter()
            .find(|(_, m)| m.name == name)
            .map(|(id, _)| *id)
    }

    /// Product rule for two material holders. Unknown ids combine as zero.
    pub fn combine<A: HasMaterial + ?Sized, B: HasMaterial + ?Sized>(
        &self,
        a: &A,
        b: &B,
    ) -> ContactCoefficients {
        match (self.get(a.material_id()), self.get(b.material_id())) {
            (Some(ma), Some(mb)) => ContactCoefficients {
                elasticity: ma.combine_elasticity(mb),
                static_friction: ma.combine_static_friction(mb),
                kinetic_friction: ma.combine_kinetic_friction(mb),
            },
            _ => ContactCoefficients {
                elasticity: 0.0,
                static_friction: 0.0,
                kinetic_friction: 0.0,
            },
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (MaterialId, &Material)> {
        self.materials.iter().map(|(id, m)| (*id, m))
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn clear(&mut self) {
        self.materials.clear();
    }
}

impl Default for MaterialLibrary {
    fn default() -> Self {
        Self::new()
    }
}
