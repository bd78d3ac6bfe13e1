use serde::Serialize;

use crate::core::Vector2;

/// Why a force was applied; kept for observability only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum ForceType {
    Unspecified = 0,
    Gravity = 1,
    Electrostatic = 2,
    Normal = 3,
    StaticFriction = 4,
    KineticFriction = 5,
    Tension = 6,
    Restoring = 7,
    Drag = 8,
}

impl ForceType {
    /// Numeric tag used in the flat force arrays handed to JS.
    #[inline]
    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            0 => ForceType::Unspecified,
            1 => ForceType::Gravity,
            2 => ForceType::Electrostatic,
            3 => ForceType::Normal,
            4 => ForceType::StaticFriction,
            5 => ForceType::KineticFriction,
            6 => ForceType::Tension,
            7 => ForceType::Restoring,
            8 => ForceType::Drag,
            _ => return None,
        })
    }
}

/// One entry of a body's per-sub-step force list.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AppliedForce {
    pub vector: Vector2,
    pub kind: ForceType,
}
