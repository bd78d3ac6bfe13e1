//! Bodies - rigid discs and the forces acting on them

mod body;
mod forces;

pub use body::{Body, BodyId};
pub use forces::{AppliedForce, ForceType};
