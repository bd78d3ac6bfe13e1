//! Systems - bodies, collision, constraints and the per-step dynamics that tie them together

pub mod body;
pub mod collision;
pub mod constraints;
pub mod physics;
