//! Force fields applied to every body every sub-step.

use serde::{Deserialize, Serialize};

use crate::core::{PhysicsError, PhysicsResult, Vector2};

pub type FieldId = u32;

/// What a field couples to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    /// Scaled by body mass.
    Gravitational,
    /// Scaled by body charge.
    Electric,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    #[serde(default)]
    pub name: String,
    /// Direction for uniform fields, source point for position-based ones.
    pub vector: Vector2,
    #[serde(default)]
    pub position_based: bool,
    pub kind: FieldKind,
    pub strength: f64,
}

impl Field {
    /// Uniform field along `direction`.
    pub fn uniform(name: &str, kind: FieldKind, direction: Vector2, strength: f64) -> Self {
        Self {
            name: name.to_string(),
            vector: direction,
            position_based: false,
            kind,
            strength,
        }
    }

    /// Field pointing from the body towards `source`.
    pub fn point(name: &str, kind: FieldKind, source: Vector2, strength: f64) -> Self {
        Self {
            name: name.to_string(),
            vector: source,
            position_based: true,
            kind,
            strength,
        }
    }

    pub fn validate(&self) -> PhysicsResult<()> {
        if !self.vector.is_finite() || !self.strength.is_finite() {
            return Err(PhysicsError::InvalidConfiguration {
                reason: "field vector and strength must be finite",
            });
        }
        Ok(())
    }

    /// Field intensity at `position` (per unit mass or per unit charge).
    pub fn intensity_at(&self, position: Vector2) -> Vector2 {
        let direction = if self.position_based {
            (self.vector - position).unit()
        } else {
            self.vector.unit()
        };
        direction * self.strength
    }

    /// Force on a body with the given mass and charge at `position`.
    pub fn force_on(&self, position: Vector2, mass: f64, charge: f64) -> Vector2 {
        let coupling = match self.kind {
            FieldKind::Gravitational => mass,
            FieldKind::Electric => charge,
        };
        self.intensity_at(position) * coupling
    }
}

/// Every active field, keyed by stable id.
#[derive(Clone, Debug)]
pub struct FieldSet {
    fields: Vec<(FieldId, Field)>,
    next_id: FieldId,
}

impl FieldSet {
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            next_id: 1,
        }
    }

    pub fn add(&mut self, field: Field) -> PhysicsResult<FieldId> {
        field.validate()?;
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        self.fields.push((id, field));
        Ok(id)
    }

    pub fn update(&mut self, id: FieldId, field: Field) -> PhysicsResult<()> {
        field.validate()?;
        let slot = self
            .fields
            .iter_mut()
            .find(|(other, _)| *other == id)
            .ok_or(PhysicsError::UnknownField { id })?;
        slot.1 = field;
        Ok(())
    }

    pub fn remove(&mut self, id: FieldId) -> PhysicsResult<Field> {
        let idx = self
            .fields
            .iter()
            .position(|(other, _)| *other == id)
            .ok_or(PhysicsError::UnknownField { id })?;
        Ok(self.fields.remove(idx).1)
    }

    pub fn get(&self, id: FieldId) -> Option<&Field> {
        self.fields.iter().find(|(other, _)| *other == id).map(|(_, f)| f)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &Field)> {
        self.fields.iter().map(|(id, f)| (*id, f))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }
}

impl Default for FieldSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_gravity_scales_by_mass() {
        let g = Field::uniform("earth", FieldKind::Gravitational, Vector2::new(0.0, -2.0), 9.81);
        let f = g.force_on(Vector2::new(100.0, 3.0), 2.0, 5.0);
        assert!(f.x.abs() < 1e-12);
        assert!((f.y + 19.62).abs() < 1e-12);
    }

    #[test]
    fn point_field_pulls_towards_source_and_scales_by_charge() {
        let e = Field::point("plate", FieldKind::Electric, Vector2::new(10.0, 0.0), 3.0);
        let f = e.force_on(Vector2::ZERO, 100.0, -2.0);
        // Negative charge is pushed away from the source.
        assert!((f.x + 6.0).abs() < 1e-12);
        assert!(f.y.abs() < 1e-12);
    }

    #[test]
    fn field_set_edits_by_id() {
        let mut set = FieldSet::new();
        let down = Vector2::new(0.0, -1.0);
        let id = set.add(Field::uniform("g", FieldKind::Gravitational, down, 9.81)).unwrap();
        set.update(id, Field::uniform("g", FieldKind::Gravitational, down, 1.62)).unwrap();
        assert_eq!(set.get(id).map(|f| f.strength), Some(1.62));
        let bad = Field::uniform("bad", FieldKind::Electric, Vector2::ZERO, f64::NAN);
        assert!(set.add(bad).is_err());
        set.remove(id).unwrap();
        assert!(matches!(set.remove(id), Err(PhysicsError::UnknownField { .. })));
        assert!(set.is_empty());
    }

    #[test]
    fn body_on_point_source_gets_a_finite_force() {
        let e = Field::point("p", FieldKind::Gravitational, Vector2::new(1.0, 1.0), 1.0);
        assert!(e.force_on(Vector2::new(1.0, 1.0), 1.0, 0.0).is_finite());
    }
}
