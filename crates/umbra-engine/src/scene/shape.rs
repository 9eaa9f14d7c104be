use crate::math::{Vec3, Vec4};

/// Shape primitive with its type-specific parameters.
///
/// A closed variant set: the GPU kernel switches on the numeric code from
/// [`ShapeKind::shape_type`], so extending this enum means extending the
/// kernel as well.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ShapeKind {
    Sphere { radius: f32 },
    Cube,
    Plane { axis: Vec3, height: f32 },
    RoundBox { radius: f32 },
    BoxFrame { thickness: f32 },
    Torus { radius: f32, width: f32 },
    Capsule { height: f32, radius: f32 },
    Mandelbulb,
}

/// Numeric shape codes as the kernel sees them.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u32)]
pub enum ShapeType {
    Sphere = 0,
    Cube = 1,
    Plane = 2,
    RoundBox = 3,
    BoxFrame = 4,
    Torus = 5,
    Capsule = 6,
    Mandelbulb = 7,
}

impl ShapeKind {
    pub fn shape_type(&self) -> ShapeType {
        match self {
            ShapeKind::Sphere { .. } => ShapeType::Sphere,
            ShapeKind::Cube => ShapeType::Cube,
            ShapeKind::Plane { .. } => ShapeType::Plane,
            ShapeKind::RoundBox { .. } => ShapeType::RoundBox,
            ShapeKind::BoxFrame { .. } => ShapeType::BoxFrame,
            ShapeKind::Torus { .. } => ShapeType::Torus,
            ShapeKind::Capsule { .. } => ShapeType::Capsule,
            ShapeKind::Mandelbulb => ShapeType::Mandelbulb,
        }
    }

    /// Type-specific auxiliary parameters, packed into one vector.
    ///
    /// Packing per variant:
    /// - Sphere:    (radius, 0, 0, 0)
    /// - Cube:      (0, 0, 0, 0) — the box extents come from the scale
    /// - Plane:     (axis.x, axis.y, axis.z, -height)
    /// - RoundBox:  (corner radius, 0, 0, 0)
    /// - BoxFrame:  (frame thickness, 0, 0, 0)
    /// - Torus:     (ring radius, tube width, 0, 0)
    /// - Capsule:   (height, radius, 0, 0)
    /// - Mandelbulb:(0, 0, 0, 0)
    pub fn extra_data(&self) -> Vec4 {
        match *self {
            ShapeKind::Sphere { radius } => Vec4::new(radius, 0.0, 0.0, 0.0),
            ShapeKind::Cube => Vec4::ZERO,
            ShapeKind::Plane { axis, height } => Vec4::from_vec3(axis, -height),
            ShapeKind::RoundBox { radius } => Vec4::new(radius, 0.0, 0.0, 0.0),
            ShapeKind::BoxFrame { thickness } => Vec4::new(thickness, 0.0, 0.0, 0.0),
            ShapeKind::Torus { radius, width } => Vec4::new(radius, width, 0.0, 0.0),
            ShapeKind::Capsule { height, radius } => Vec4::new(height, radius, 0.0, 0.0),
            ShapeKind::Mandelbulb => Vec4::ZERO,
        }
    }
}

/// CSG combinator applied when merging a shape into the scene's distance
/// field.
///
/// The numeric order is load-bearing: shapes are serialized in ascending
/// operation order, which fixes the evaluation order on the GPU.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Default)]
#[repr(u32)]
pub enum CsgOp {
    #[default]
    Union = 0,
    Subtraction = 1,
    Intersection = 2,
    SmoothUnion = 3,
    SmoothSubtraction = 4,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── extra_data packing ────────────────────────────────────────────────

    #[test]
    fn sphere_packs_radius_only() {
        let kind = ShapeKind::Sphere { radius: 1.0 };
        assert_eq!(kind.extra_data(), Vec4::new(1.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn plane_packs_axis_and_negated_height() {
        let kind = ShapeKind::Plane {
            axis: Vec3::UP,
            height: 2.5,
        };
        assert_eq!(kind.extra_data(), Vec4::new(0.0, 1.0, 0.0, -2.5));
    }

    #[test]
    fn torus_packs_radius_then_width() {
        let kind = ShapeKind::Torus { radius: 3.0, width: 0.5 };
        assert_eq!(kind.extra_data(), Vec4::new(3.0, 0.5, 0.0, 0.0));
    }

    #[test]
    fn capsule_packs_height_then_radius() {
        let kind = ShapeKind::Capsule { height: 2.0, radius: 0.5 };
        assert_eq!(kind.extra_data(), Vec4::new(2.0, 0.5, 0.0, 0.0));
    }

    #[test]
    fn parameterless_shapes_pack_zero() {
        assert_eq!(ShapeKind::Cube.extra_data(), Vec4::ZERO);
        assert_eq!(ShapeKind::Mandelbulb.extra_data(), Vec4::ZERO);
    }

    // ── numeric codes ─────────────────────────────────────────────────────

    #[test]
    fn shape_type_codes_are_stable() {
        assert_eq!(ShapeType::Sphere as u32, 0);
        assert_eq!(ShapeType::Mandelbulb as u32, 7);
    }

    #[test]
    fn csg_op_order_matches_codes() {
        assert!(CsgOp::Union < CsgOp::Subtraction);
        assert!(CsgOp::Subtraction < CsgOp::Intersection);
        assert!(CsgOp::Intersection < CsgOp::SmoothUnion);
        assert!(CsgOp::SmoothUnion < CsgOp::SmoothSubtraction);
        assert_eq!(CsgOp::SmoothSubtraction as u32, 4);
    }
}
