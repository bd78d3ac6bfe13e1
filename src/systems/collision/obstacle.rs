//! Static obstacles: rounded convex polygons, capsules and circles
//!
//! An obstacle is a vertex list expanded by `corner_radius`:
//! - 1 vertex: a circle of radius `corner_radius`
//! - 2 vertices: a segment (a capsule when rounded)
//! - 3+ vertices: a closed convex polygon
//!
//! With `inverse` set the solid region is everything outside the polygon,
//! which is how world boundaries are built.

use crate::core::{PhysicsError, PhysicsResult, Vector2};
use crate::domain::constants::{AXIS_MERGE_DOT, OVERLAP_EPSILON};
use crate::domain::{HasMaterial, MaterialId};

use super::types::{CollisionTarget, ContactInfo};

pub type ObstacleId = u32;

/// One cached SAT axis with the polygon's projected range on it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SatAxis {
    pub normal: Vector2,
    pub min: f64,
    pub max: f64,
}

#[derive(Clone, Debug)]
pub struct Obstacle {
    pub(crate) id: ObstacleId,
    vertices: Vec<Vector2>,
    corner_radius: f64,
    inverse: bool,
    material: MaterialId,
    /// Deduplicated edge normals; rebuilt only when geometry changes.
    axes: Vec<SatAxis>,
}

impl Obstacle {
    pub fn new(
        vertices: Vec<Vector2>,
        corner_radius: f64,
        inverse: bool,
        material: MaterialId,
    ) -> PhysicsResult<Self> {
        if vertices.is_empty() {
            return Err(PhysicsError::InvalidObstacle { reason: "at least one vertex is required" });
        }
        if vertices.iter().any(|v| !v.is_finite()) {
            return Err(PhysicsError::InvalidObstacle { reason: "vertices must be finite" });
        }
        if !corner_radius.is_finite() || corner_radius < 0.0 {
            return Err(PhysicsError::InvalidObstacle {
                reason: "corner radius must be finite and non-negative",
            });
        }
        if inverse && vertices.len() < 3 {
            return Err(PhysicsError::InvalidObstacle {
                reason: "an inverse obstacle needs a closed polygon",
            });
        }

        let axes = build_axes(&vertices);
        Ok(Self {
            id: 0,
            vertices,
            corner_radius,
            inverse,
            material,
            axes,
        })
    }

    /// Axis-aligned box from two opposite corners.
    pub fn rectangle(
        min: Vector2,
        max: Vector2,
        inverse: bool,
        material: MaterialId,
    ) -> PhysicsResult<Self> {
        let vertices = vec![
            Vector2::new(min.x, min.y),
            Vector2::new(max.x, min.y),
            Vector2::new(max.x, max.y),
            Vector2::new(min.x, max.y),
        ];
        Self::new(vertices, 0.0, inverse, material)
    }

    pub fn id(&self) -> ObstacleId { self.id }

    pub fn vertices(&self) -> &[Vector2] { &self.vertices }

    pub fn corner_radius(&self) -> f64 { self.corner_radius }

    pub fn is_inverse(&self) -> bool { self.inverse }

    pub fn axes(&self) -> &[SatAxis] { &self.axes }

    pub(crate) fn set_material(&mut self, material: MaterialId) {
        self.material = material;
    }

    /// Vertex nearest to `point`.
    pub fn closest_vertex(&self, point: Vector2) -> Vector2 {
        let mut best = self.vertices[0];
        let mut best_d2 = (best - point).magnitude_squared();
        for &v in &self.vertices[1..] {
            let d2 = (v - point).magnitude_squared();
            if d2 < best_d2 {
                best = v;
                best_d2 = d2;
            }
        }
        best
    }

    /// Separating-axis test against a disc.
    ///
    /// Returns `None` when the disc is clear of the solid region. The returned
    /// normal points from the obstacle into the disc.
    pub fn collide_disc(&self, center: Vector2, radius: f64) -> Option<ContactInfo> {
        let closest = self.closest_vertex(center);
        let offset = center - closest;
        let vertex_axis = offset.unit();
        let (vmin, vmax) = project(&self.vertices, vertex_axis);

        let candidates = self
            .axes
            .iter()
            .map(|a| (*a, false))
            .chain(std::iter::once((
                SatAxis { normal: vertex_axis, min: vmin, max: vmax },
                true,
            )));

        // (overlap, axis, from_vertex)
        let mut best: Option<(f64, SatAxis, bool)> = None;

        for (axis, from_vertex) in candidates {
            let c = center.dot(axis.normal);
            let proj_min = c - radius;
            let proj_max = c + radius;
            let obs_min = axis.min - self.corner_radius;
            let obs_max = axis.max + self.corner_radius;

            if self.inverse {
                let overlap = (obs_min - proj_min).max(proj_max - obs_max);
                if overlap < -OVERLAP_EPSILON {
                    continue;
                }
                if best.map_or(true, |(o, _, _)| overlap > o) {
                    best = Some((overlap, axis, from_vertex));
                }
            } else {
                let overlap = (proj_max - obs_min).min(obs_max - proj_min);
                if overlap < -OVERLAP_EPSILON {
                    return None;
                }
                if best.map_or(true, |(o, _, _)| overlap < o) {
                    best = Some((overlap, axis, from_vertex));
                }
            }
        }

        let (overlap, axis, from_vertex) = best?;

        let c = center.dot(axis.normal);
        let obs_center = 0.5 * (axis.min + axis.max);
        let mut normal = axis.normal;
        if c < obs_center {
            normal = -normal;
        }
        if self.inverse {
            normal = -normal;
        }

        let curved = from_vertex && self.corner_radius > 0.0 && offset.magnitude() > 0.0;

        Some(ContactInfo {
            target: CollisionTarget::Obstacle(self.id),
            overlap,
            normal,
            radial_curvature: if curved { self.corner_radius } else { 0.0 },
        })
    }
}

impl HasMaterial for Obstacle {
    fn material_id(&self) -> MaterialId {
        self.material
    }
}

fn project(vertices: &[Vector2], axis: Vector2) -> (f64, f64) {
    vertices.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        let p = v.dot(axis);
        (lo.min(p), hi.max(p))
    })
}

/// Edge normals with near-parallel duplicates merged, plus projected ranges.
fn build_axes(vertices: &[Vector2]) -> Vec<SatAxis> {
    let edge_count = match vertices.len() {
        0 | 1 => 0,
        2 => 1,
        n => n,
    };

    let mut axes: Vec<SatAxis> = Vec::with_capacity(edge_count);
    for i in 0..edge_count {
        let a = vertices[i];
        let b = vertices[(i + 1) % vertices.len()];
        let edge = b - a;
        if edge.magnitude() <= crate::core::math::DIRECTION_EPSILON {
            continue;
        }
        let normal = edge.orthogonal().unit();
        if axes.iter().any(|axis| axis.normal.dot(normal).abs() > AXIS_MERGE_DOT) {
            continue;
        }
        let (min, max) = project(vertices, normal);
        axes.push(SatAxis { normal, min, max });
    }
    axes
}
