//! Math primitives: the 2D vector type, scalar helpers and polynomial roots.

mod vector2;
pub mod roots;

pub use roots::{solve_cubic, solve_quadratic, solve_quartic};
pub use vector2::{Vector2, DIRECTION_EPSILON};

/// Three-way sign: `-1`, `0` or `1` (unlike `f64::signum`, zero maps to zero).
#[inline]
pub fn sign(n: f64) -> f64 {
    if n > 0.0 {
        1.0
    } else if n < 0.0 {
        -1.0
    } else {
        0.0
    }
}
