//! Constraints - ropes and springs tying a body to a fixed anchor

mod constraint;
mod rope;
mod spring;

pub use constraint::{Constraint, ConstraintId, ConstraintKind};
