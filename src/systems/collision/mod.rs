//! Collision detection
//!
//! Narrow phase only: disc/disc and disc/obstacle (rounded SAT). A query
//! keeps just the deepest contact per body.

mod continuous;
mod detect;
mod obstacle;
mod query;
mod types;

pub use continuous::{
    edge_impact_time, latest_contact_time, obstacle_impact_time, vertex_impact_time, Trajectory,
};
pub use detect::disc_disc;
pub use obstacle::{Obstacle, ObstacleId, SatAxis};
pub use query::deepest_contact;
pub use types::{CollisionTarget, ContactInfo};
