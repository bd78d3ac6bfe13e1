//! Engine error type
//!
//! Only construction and editing can fail (bad parameters, unknown ids,
//! malformed scene bundles). Stepping the simulation never returns an error.

use std::fmt;

/// Unified error type for engine operations.
#[derive(Clone, Debug, PartialEq)]
pub enum PhysicsError {
    /// A body parameter violates an invariant (radius > 0, mass > 0, finite values).
    InvalidBody {
        reason: &'static str,
        value: f64,
    },
    /// Obstacle geometry or corner radius is unusable.
    InvalidObstacle {
        reason: &'static str,
    },
    /// Constraint parameters are unusable.
    InvalidConstraint {
        reason: &'static str,
    },
    /// A material coefficient is out of range.
    InvalidMaterial {
        reason: &'static str,
        value: f64,
    },
    /// A loop or world setting is out of range.
    InvalidConfiguration {
        reason: &'static str,
    },
    UnknownBody {
        id: u32,
    },
    UnknownObstacle {
        id: u32,
    },
    UnknownConstraint {
        id: u32,
    },
    UnknownMaterial {
        id: u32,
    },
    UnknownField {
        id: u32,
    },
    /// Material names are unique within a library.
    DuplicateMaterial {
        name: String,
    },
    /// The material is still referenced by a body, obstacle or constraint.
    MaterialInUse {
        id: u32,
    },
    /// A scene bundle failed to parse or referenced something it did not define.
    SceneParse {
        message: String,
    },
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBody { reason, value } => {
                write!(f, "invalid body: {reason} (got {value})")
            }
            Self::InvalidObstacle { reason } => write!(f, "invalid obstacle: {reason}"),
            Self::InvalidConstraint { reason } => write!(f, "invalid constraint: {reason}"),
            Self::InvalidMaterial { reason, value } => {
                write!(f, "invalid material: {reason} (got {value})")
            }
            Self::InvalidConfiguration { reason } => write!(f, "invalid configuration: {reason}"),
            Self::UnknownBody { id } => write!(f, "no body with id {id}"),
            Self::UnknownObstacle { id } => write!(f, "no obstacle with id {id}"),
            Self::UnknownConstraint { id } => write!(f, "no constraint with id {id}"),
            Self::UnknownMaterial { id } => write!(f, "no material with id {id}"),
            Self::UnknownField { id } => write!(f, "no field with id {id}"),
            Self::DuplicateMaterial { name } => write!(f, "material name {name:?} already in use"),
            Self::MaterialInUse { id } => write!(f, "material {id} is still in use"),
            Self::SceneParse { message } => write!(f, "scene bundle: {message}"),
        }
    }
}

impl std::error::Error for PhysicsError {}

impl From<serde_json::Error> for PhysicsError {
    fn from(err: serde_json::Error) -> Self {
        Self::SceneParse { message: err.to_string() }
    }
}

pub type PhysicsResult<T> = Result<T, PhysicsError>;
