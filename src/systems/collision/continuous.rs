//! Swept (time-of-impact) tests for a disc under constant acceleration.
//!
//! Not used by the stepper, which relies on small sub-steps instead. These
//! answer "what is the most recent time, within the last `window` seconds,
//! at which this disc was touching that shape". When the disc passed through
//! a thin shape inside the window, that is the exit time, not the entry.
//!
//! Trajectory: `p(t) = p + v*t + a*t^2/2` for `t` in `[-window, 0]`.

use crate::core::math::{solve_quadratic, solve_quartic};
use crate::core::Vector2;

use super::obstacle::Obstacle;

/// Slack when deciding whether a root lies inside the window.
const TIME_EPSILON: f64 = 1e-9;

/// Constant-acceleration path of a disc centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trajectory {
    pub position: Vector2,
    pub velocity: Vector2,
    pub acceleration: Vector2,
}

impl Trajectory {
    pub fn at(&self, t: f64) -> Vector2 {
        self.position + self.velocity * t + self.acceleration * (t * t / 2.0)
    }
}

/// Most recent root in `[-window, 0]`.
pub fn latest_contact_time(roots: &[f64], window: f64) -> Option<f64> {
    roots
        .iter()
        .copied()
        .filter(|t| *t >= -window - TIME_EPSILON && *t <= TIME_EPSILON)
        .map(|t| t.min(0.0).max(-window))
        .fold(None, |best: Option<f64>, t| Some(best.map_or(t, |b| b.max(t))))
}

/// Time at which the disc's edge (distance `reach` from the centre) touched `vertex`.
pub fn vertex_impact_time(
    path: &Trajectory,
    reach: f64,
    vertex: Vector2,
    window: f64,
) -> Option<f64> {
    // |D + v t + A t^2|^2 = reach^2 with A = a/2
    let d = path.position - vertex;
    let v = path.velocity;
    let a = path.acceleration * 0.5;

    let roots = solve_quartic(
        a.dot(a),
        2.0 * a.dot(v),
        v.dot(v) + 2.0 * a.dot(d),
        2.0 * v.dot(d),
        d.dot(d) - reach * reach,
    );
    latest_contact_time(&roots, window)
}

/// Time at which the disc touched the segment `start..end` away from its endpoints.
///
/// Both sides of the segment are tried; hits outside the segment's extent fall
/// back to the endpoint (vertex) tests.
pub fn edge_impact_time(
    path: &Trajectory,
    reach: f64,
    start: Vector2,
    end: Vector2,
    window: f64,
) -> Option<f64> {
    let edge = end - start;
    let length_sq = edge.magnitude_squared();
    if length_sq == 0.0 {
        return vertex_impact_time(path, reach, start, window);
    }
    let normal = edge.orthogonal().unit();

    let d = (path.position - start).dot(normal);
    let v = path.velocity.dot(normal);
    let a = path.acceleration.dot(normal) * 0.5;

    let mut roots: Vec<f64> = Vec::with_capacity(4);
    for side in [reach, -reach] {
        for t in solve_quadratic(a, v, d - side) {
            let along = (path.at(t) - start).dot(edge) / length_sq;
            if (0.0..=1.0).contains(&along) {
                roots.push(t);
            }
        }
    }

    let face = latest_contact_time(&roots, window);
    let ends = [
        vertex_impact_time(path, reach, start, window),
        vertex_impact_time(path, reach, end, window),
    ];
    ends.into_iter()
        .chain(std::iter::once(face))
        .flatten()
        .fold(None, |best: Option<f64>, t| Some(best.map_or(t, |b| b.max(t))))
}

/// Most recent time in `[-window, 0]` at which a disc of `radius` touched the obstacle.
pub fn obstacle_impact_time(
    obstacle: &Obstacle,
    path: &Trajectory,
    radius: f64,
    window: f64,
) -> Option<f64> {
    let reach = radius + obstacle.corner_radius();
    let vertices = obstacle.vertices();

    let edge_count = match vertices.len() {
        0 | 1 => 0,
        2 => 1,
        n => n,
    };

    let mut latest: Option<f64> = None;
    let mut consider = |t: Option<f64>| {
        if let Some(t) = t {
            latest = Some(latest.map_or(t, |b: f64| b.max(t)));
        }
    };

    if edge_count == 0 {
        for &v in vertices {
            consider(vertex_impact_time(path, reach, v, window));
        }
    } else {
        for i in 0..edge_count {
            let start = vertices[i];
            let end = vertices[(i + 1) % vertices.len()];
            consider(edge_impact_time(path, reach, start, end, window));
        }
    }

    latest
}
