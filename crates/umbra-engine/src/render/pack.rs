use bytemuck::{Pod, Zeroable};

use crate::scene::ShapeDescriptor;

/// Byte stride of one packed shape record. Must match the kernel's struct
/// layout exactly; a divergence is invisible to validation and shows up only
/// as corrupted output.
pub const SHAPE_RECORD_STRIDE: usize = 17 * 4 + 2 * 4;

/// GPU-side shape record (76 bytes, tightly packed):
///
///  offset  0  position        [f32; 3]
///  offset 12  scale           [f32; 3]
///  offset 24  rotation        [f32; 3]   Euler degrees
///  offset 36  color           [f32; 3]
///  offset 48  extra           [f32; 4]   shape-type-specific
///  offset 64  blend_strength  f32
///  offset 68  shape_type      u32
///  offset 72  operation       u32
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ShapeRecord {
    pub position: [f32; 3],
    pub scale: [f32; 3],
    pub rotation: [f32; 3],
    pub color: [f32; 3],
    pub extra: [f32; 4],
    pub blend_strength: f32,
    pub shape_type: u32,
    pub operation: u32,
}

// Layout guard: any field added, removed, or reordered must be mirrored in
// the kernel, and trips these before it can corrupt a frame.
const _: () = assert!(size_of::<ShapeRecord>() == SHAPE_RECORD_STRIDE);
const _: () = assert!(align_of::<ShapeRecord>() == 4);

impl ShapeRecord {
    fn from_descriptor(desc: &ShapeDescriptor) -> Self {
        Self {
            position: desc.position.to_array(),
            scale: desc.scale.to_array(),
            rotation: desc.rotation.to_array(),
            color: desc.color.to_array(),
            extra: desc.extra.to_array(),
            blend_strength: desc.blend_strength,
            shape_type: desc.shape_type as u32,
            operation: desc.op as u32,
        }
    }
}

/// The packed shape stream for one frame.
///
/// Records are ordered by ascending CSG operation (stable with respect to
/// the input); the kernel folds them left-to-right, so this ordering is part
/// of the rendered result, not an optimization.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PackedShapes {
    records: Vec<ShapeRecord>,
}

impl PackedShapes {
    /// Shape count, uploaded separately from the buffer to bound the
    /// kernel's loop.
    pub fn count(&self) -> u32 {
        self.records.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ShapeRecord] {
        &self.records
    }

    /// Raw bytes for upload; always exactly `count × SHAPE_RECORD_STRIDE`.
    pub fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.records)
    }
}

/// Serializes descriptors into the fixed-stride GPU layout.
///
/// Sorting is a stable single-key sort on the operation code; descriptors
/// with equal operations keep their input order.
pub fn pack(descriptors: &[ShapeDescriptor]) -> PackedShapes {
    let mut sorted: Vec<&ShapeDescriptor> = descriptors.iter().collect();
    sorted.sort_by_key(|d| d.op);

    let records = sorted.iter().map(|d| ShapeRecord::from_descriptor(d)).collect();
    PackedShapes { records }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    use crate::scene::{CsgOp, Scene, ShapeKind, ShapeNode};

    fn descriptor(op: CsgOp, kind: ShapeKind) -> crate::scene::ShapeDescriptor {
        let mut scene = Scene::new();
        let id = scene.insert(ShapeNode::new(kind).with_op(op));
        scene.describe(id)
    }

    fn sample_descriptors() -> Vec<crate::scene::ShapeDescriptor> {
        vec![
            descriptor(CsgOp::SmoothUnion, ShapeKind::Sphere { radius: 2.0 }),
            descriptor(CsgOp::Union, ShapeKind::Cube),
            descriptor(CsgOp::Subtraction, ShapeKind::Torus { radius: 1.0, width: 0.3 }),
            descriptor(CsgOp::Union, ShapeKind::Mandelbulb),
        ]
    }

    // ── size and count ────────────────────────────────────────────────────

    #[test]
    fn record_stride_is_76_bytes() {
        assert_eq!(SHAPE_RECORD_STRIDE, 76);
        assert_eq!(size_of::<ShapeRecord>(), 76);
    }

    #[test]
    fn byte_length_is_count_times_stride() {
        let packed = pack(&sample_descriptors());
        assert_eq!(packed.count(), 4);
        assert_eq!(packed.bytes().len(), 4 * SHAPE_RECORD_STRIDE);
    }

    #[test]
    fn empty_input_packs_to_count_zero_and_no_bytes() {
        let packed = pack(&[]);
        assert_eq!(packed.count(), 0);
        assert!(packed.bytes().is_empty());
    }

    // ── ordering ──────────────────────────────────────────────────────────

    #[test]
    fn operations_are_non_decreasing_across_the_buffer() {
        let packed = pack(&sample_descriptors());
        let ops: Vec<u32> = packed.records().iter().map(|r| r.operation).collect();
        assert!(ops.windows(2).all(|w| w[0] <= w[1]), "ops not sorted: {ops:?}");
    }

    #[test]
    fn union_record_precedes_subtraction_record() {
        let descriptors = vec![
            descriptor(CsgOp::Subtraction, ShapeKind::Cube),
            descriptor(CsgOp::Union, ShapeKind::Sphere { radius: 1.0 }),
        ];
        let packed = pack(&descriptors);
        assert_eq!(packed.records()[0].operation, CsgOp::Union as u32);
        assert_eq!(packed.records()[1].operation, CsgOp::Subtraction as u32);
    }

    #[test]
    fn sort_is_stable_for_equal_operations() {
        let descriptors = vec![
            descriptor(CsgOp::Union, ShapeKind::Cube),
            descriptor(CsgOp::Union, ShapeKind::Sphere { radius: 1.0 }),
            descriptor(CsgOp::Union, ShapeKind::Mandelbulb),
        ];
        let packed = pack(&descriptors);
        let types: Vec<u32> = packed.records().iter().map(|r| r.shape_type).collect();
        assert_eq!(types, vec![1, 0, 7]);
    }

    // ── determinism ───────────────────────────────────────────────────────

    #[test]
    fn packing_twice_yields_byte_identical_buffers() {
        let descriptors = sample_descriptors();
        let a = pack(&descriptors);
        let b = pack(&descriptors);
        assert_eq!(a.bytes(), b.bytes());
    }

    // ── field content ─────────────────────────────────────────────────────

    #[test]
    fn unit_union_sphere_serializes_to_the_documented_record() {
        let packed = pack(&[descriptor(CsgOp::Union, ShapeKind::Sphere { radius: 1.0 })]);
        let rec = &packed.records()[0];
        assert_eq!(rec.extra, [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(rec.operation, 0);
        assert_eq!(rec.shape_type, 0);
        assert_eq!(rec.position, [0.0; 3]);
        assert_eq!(rec.scale, [1.0; 3]);
    }

    #[test]
    fn blend_strength_sits_at_byte_offset_64() {
        let mut scene = Scene::new();
        let id = scene.insert(
            ShapeNode::new(ShapeKind::Cube)
                .with_op(CsgOp::SmoothUnion)
                .blended(0.25),
        );
        let packed = pack(&[scene.describe(id)]);

        let bytes = packed.bytes();
        let blend = f32::from_le_bytes(bytes[64..68].try_into().unwrap());
        assert_eq!(blend, 0.25);

        let shape_type = u32::from_le_bytes(bytes[68..72].try_into().unwrap());
        let operation = u32::from_le_bytes(bytes[72..76].try_into().unwrap());
        assert_eq!(shape_type, ShapeKind::Cube.shape_type() as u32);
        assert_eq!(operation, CsgOp::SmoothUnion as u32);
    }

    #[test]
    fn effective_scale_flows_into_the_record() {
        let mut scene = Scene::new();
        let parent = scene.insert(ShapeNode::new(ShapeKind::Cube).scaled(Vec3::splat(2.0)));
        let child = scene.insert(
            ShapeNode::new(ShapeKind::Sphere { radius: 1.0 })
                .scaled(Vec3::new(1.0, 0.5, 3.0))
                .child_of(parent),
        );
        let packed = pack(&[scene.describe(child)]);
        assert_eq!(packed.records()[0].scale, [2.0, 1.0, 6.0]);
    }
}
