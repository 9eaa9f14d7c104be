use crate::math::{Vec3, Vec4};

use super::{CsgOp, ShapeType};

/// Fully resolved per-shape data, ready for the packer.
///
/// All fields are value copies; descriptors are rebuilt from the scene every
/// frame and never persist.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShapeDescriptor {
    pub position: Vec3,
    /// Effective scale (local scale composed through shape ancestors).
    pub scale: Vec3,
    /// Euler angles in degrees.
    pub rotation: Vec3,
    pub color: Vec3,
    /// Shape-type-specific parameters, see [`ShapeKind::extra_data`](super::ShapeKind::extra_data).
    pub extra: Vec4,
    pub blend_strength: f32,
    pub shape_type: ShapeType,
    pub op: CsgOp,
}
