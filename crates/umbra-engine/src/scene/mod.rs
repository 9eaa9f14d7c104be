//! Scene (shape entity) types.
//!
//! Responsibilities:
//! - store raymarched shape entities with their transforms and CSG settings
//! - re-enumerate enabled shapes every frame (no packer state persists)
//! - resolve per-shape descriptors, including nested compound scaling
//!
//! Shape parameters live on the [`ShapeKind`] variant; GPU serialization is
//! the packer's job (`render::pack`).

mod descriptor;
mod node;
mod registry;
mod shape;

pub use descriptor::ShapeDescriptor;
pub use node::{ShapeId, ShapeNode};
pub use registry::Scene;
pub use shape::{CsgOp, ShapeKind, ShapeType};
