//! Core building blocks with no knowledge of bodies or worlds.

#[macro_use]
pub mod utils;
pub mod error;
pub mod math;

pub use error::{PhysicsError, PhysicsResult};
pub use math::Vector2;
