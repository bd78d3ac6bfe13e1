use std::f64::consts::PI;

use crate::core::{PhysicsError, PhysicsResult, Vector2};
use crate::domain::{HasMaterial, MaterialId};
use crate::systems::collision::ContactInfo;

use super::forces::{AppliedForce, ForceType};

pub type BodyId = u32;

/// A rigid disc ("projectile").
#[derive(Clone, Debug)]
pub struct Body {
    /// Unique ID, assigned by the world on insertion
    pub(crate) id: BodyId,

    // === Spawn parameters (editable, validated) ===
    radius: f64,
    mass: f64,
    charge: f64,
    material: MaterialId,

    // === Physics State ===
    position: Vector2,
    velocity: Vector2,
    /// Derived from net force at the last integration
    acceleration: Vector2,

    // === Per-sub-step accumulators ===
    net_force: Vector2,
    forces: Vec<AppliedForce>,

    /// Deepest contact found at the end of the previous sub-step.
    pub(crate) last_collision: Option<ContactInfo>,
}

impl Body {
    pub fn new(
        position: Vector2,
        velocity: Vector2,
        radius: f64,
        mass: f64,
        charge: f64,
        material: MaterialId,
    ) -> PhysicsResult<Self> {
        validate_radius(radius)?;
        validate_mass(mass)?;
        validate_charge(charge)?;
        validate_vector(position, "position must be finite")?;
        validate_vector(velocity, "velocity must be finite")?;

        Ok(Self {
            id: 0,
            radius,
            mass,
            charge,
            material,
            position,
            velocity,
            acceleration: Vector2::ZERO,
            net_force: Vector2::ZERO,
            forces: Vec::new(),
            last_collision: None,
        })
    }

    pub fn id(&self) -> BodyId { self.id }

    pub fn radius(&self) -> f64 { self.radius }

    pub fn mass(&self) -> f64 { self.mass }

    pub fn charge(&self) -> f64 { self.charge }

    pub fn position(&self) -> Vector2 { self.position }

    pub fn velocity(&self) -> Vector2 { self.velocity }

    pub fn acceleration(&self) -> Vector2 { self.acceleration }

    pub fn net_force(&self) -> Vector2 { self.net_force }

    /// Forces applied during the current sub-step, in application order.
    pub fn forces(&self) -> &[AppliedForce] { &self.forces }

    pub fn last_collision(&self) -> Option<&ContactInfo> { self.last_collision.as_ref() }

    /// Drag cross-section (disc area).
    pub fn cross_section_area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    pub fn set_radius(&mut self, radius: f64) -> PhysicsResult<()> {
        validate_radius(radius)?;
        self.radius = radius;
        Ok(())
    }

    pub fn set_mass(&mut self, mass: f64) -> PhysicsResult<()> {
        validate_mass(mass)?;
        self.mass = mass;
        Ok(())
    }

    pub fn set_charge(&mut self, charge: f64) -> PhysicsResult<()> {
        validate_charge(charge)?;
        self.charge = charge;
        Ok(())
    }

    /// The world checks that `material` exists before calling this.
    pub(crate) fn set_material(&mut self, material: MaterialId) {
        self.material = material;
    }

    pub fn set_position(&mut self, position: Vector2) -> PhysicsResult<()> {
        validate_vector(position, "position must be finite")?;
        self.position = position;
        self.last_collision = None;
        Ok(())
    }

    pub fn set_velocity(&mut self, velocity: Vector2) -> PhysicsResult<()> {
        validate_vector(velocity, "velocity must be finite")?;
        self.velocity = velocity;
        Ok(())
    }

    /// Must run before any `apply_force` of a sub-step.
    pub fn clear_forces(&mut self) {
        self.forces.clear();
        self.net_force = Vector2::ZERO;
    }

    /// Continuous forces are recorded and summed; impulses change velocity at once.
    pub fn apply_force(&mut self, vector: Vector2, impulse: bool, kind: ForceType) {
        if impulse {
            self.velocity += vector / self.mass;
        } else {
            self.forces.push(AppliedForce { vector, kind });
            self.net_force += vector;
        }
    }

    /// Instant velocity change of `delta` (mass independent).
    #[inline]
    pub(crate) fn change_velocity(&mut self, delta: Vector2) {
        self.apply_force(delta * self.mass, true, ForceType::Unspecified);
    }

    /// Positional correction.
    #[inline]
    pub(crate) fn displace(&mut self, offset: Vector2) {
        self.position += offset;
    }

    /// Constant-acceleration update over `dt` (negative `dt` runs backwards).
    pub fn integrate(&mut self, dt: f64) {
        self.acceleration = self.net_force / self.mass;
        self.position += self.velocity * dt + self.acceleration * (dt * dt / 2.0);
        self.velocity += self.acceleration * dt;
    }
}

impl HasMaterial for Body {
    fn material_id(&self) -> MaterialId {
        self.material
    }
}

fn validate_radius(radius: f64) -> PhysicsResult<()> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(PhysicsError::InvalidBody {
            reason: "radius must be positive and finite",
            value: radius,
        });
    }
    Ok(())
}

fn validate_mass(mass: f64) -> PhysicsResult<()> {
    if !mass.is_finite() || mass <= 0.0 {
        return Err(PhysicsError::InvalidBody {
            reason: "mass must be positive and finite",
            value: mass,
        });
    }
    Ok(())
}

fn validate_charge(charge: f64) -> PhysicsResult<()> {
    if !charge.is_finite() {
        return Err(PhysicsError::InvalidBody { reason: "charge must be finite", value: charge });
    }
    Ok(())
}

fn validate_vector(v: Vector2, reason: &'static str) -> PhysicsResult<()> {
    if !v.is_finite() {
        let value = if v.x.is_finite() { v.y } else { v.x };
        return Err(PhysicsError::InvalidBody { reason, value });
    }
    Ok(())
}
