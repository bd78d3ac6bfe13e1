//! Domain data: materials, fields, constants and the scene bundle format.

pub mod constants;
pub mod field;
pub mod material;
pub mod scene;

pub use constants::Constants;
pub use field::{Field, FieldId, FieldKind, FieldSet};
pub use material::{ContactCoefficients, HasMaterial, Material, MaterialId, MaterialLibrary};
pub use scene::SceneBundle;
