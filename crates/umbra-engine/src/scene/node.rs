use crate::math::Vec3;

use super::{CsgOp, ShapeKind};

/// Handle to a shape node inside a [`Scene`](super::Scene).
///
/// Ids are stable for the lifetime of the scene (nodes are never removed from
/// the backing store, only disabled).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ShapeId(pub(super) usize);

/// A raymarched shape entity.
///
/// `position` and `rotation` are world-space; `scale` is local and composes
/// multiplicatively with shape ancestors (see
/// [`Scene::effective_scale`](super::Scene::effective_scale)).
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeNode {
    pub enabled: bool,
    pub position: Vec3,
    /// Euler angles in degrees, applied by the kernel in XYZ order.
    pub rotation: Vec3,
    pub scale: Vec3,
    /// RGB; any alpha is ignored by the kernel.
    pub color: Vec3,
    pub op: CsgOp,
    /// Blend factor in [0, 1]; only meaningful for the smooth operations.
    pub blend_strength: f32,
    pub kind: ShapeKind,
    pub parent: Option<ShapeId>,
}

impl ShapeNode {
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            enabled: true,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            color: Vec3::ONE,
            op: CsgOp::default(),
            blend_strength: 0.0,
            kind,
            parent: None,
        }
    }

    // ── builder-style setters ─────────────────────────────────────────────

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn rotated(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn scaled(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn colored(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    pub fn with_op(mut self, op: CsgOp) -> Self {
        self.op = op;
        self
    }

    pub fn blended(mut self, strength: f32) -> Self {
        self.blend_strength = strength.clamp(0.0, 1.0);
        self
    }

    pub fn child_of(mut self, parent: ShapeId) -> Self {
        self.parent = Some(parent);
        self
    }
}
