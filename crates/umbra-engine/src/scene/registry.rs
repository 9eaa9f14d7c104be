use crate::math::Vec3;

use super::{ShapeDescriptor, ShapeId, ShapeNode};

/// Insertion-ordered store of shape entities.
///
/// The registry is re-enumerated every frame; nothing downstream keeps
/// per-shape state between frames. [`collect`](Scene::collect) makes no
/// ordering promise beyond determinism for an unchanged scene — CSG
/// evaluation order is established later by the packer's stable sort.
#[derive(Debug, Default)]
pub struct Scene {
    nodes: Vec<ShapeNode>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: ShapeNode) -> ShapeId {
        let id = ShapeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn node(&self, id: ShapeId) -> &ShapeNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: ShapeId) -> &mut ShapeNode {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Effective scale of a node: its local scale multiplied componentwise
    /// with every shape ancestor's local scale, recursively. Nodes without a
    /// parent start from unit scale.
    pub fn effective_scale(&self, id: ShapeId) -> Vec3 {
        let node = self.node(id);
        match node.parent {
            Some(parent) => self.effective_scale(parent).mul_components(node.scale),
            None => node.scale,
        }
    }

    /// Produces a descriptor for every enabled shape, in insertion order.
    ///
    /// Read-only scan; allocation of the output vector is the only side
    /// effect.
    pub fn collect(&self) -> Vec<ShapeDescriptor> {
        (0..self.nodes.len())
            .map(ShapeId)
            .filter(|id| self.node(*id).enabled)
            .map(|id| self.describe(id))
            .collect()
    }

    /// Resolves one node into its packed-buffer precursor.
    pub fn describe(&self, id: ShapeId) -> ShapeDescriptor {
        let node = self.node(id);
        ShapeDescriptor {
            position: node.position,
            scale: self.effective_scale(id),
            rotation: node.rotation,
            color: node.color,
            extra: node.kind.extra_data(),
            blend_strength: node.blend_strength,
            shape_type: node.kind.shape_type(),
            op: node.op,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec4;
    use crate::scene::{CsgOp, ShapeKind, ShapeType};

    // ── collect ───────────────────────────────────────────────────────────

    #[test]
    fn collect_skips_disabled_nodes() {
        let mut scene = Scene::new();
        scene.insert(ShapeNode::new(ShapeKind::Cube));
        let hidden = scene.insert(ShapeNode::new(ShapeKind::Sphere { radius: 1.0 }));
        scene.node_mut(hidden).enabled = false;
        scene.insert(ShapeNode::new(ShapeKind::Mandelbulb));

        let shapes = scene.collect();
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].shape_type, ShapeType::Cube);
        assert_eq!(shapes[1].shape_type, ShapeType::Mandelbulb);
    }

    #[test]
    fn collect_preserves_insertion_order() {
        let mut scene = Scene::new();
        scene.insert(ShapeNode::new(ShapeKind::Torus { radius: 2.0, width: 0.2 }));
        scene.insert(ShapeNode::new(ShapeKind::Cube));

        let shapes = scene.collect();
        assert_eq!(shapes[0].shape_type, ShapeType::Torus);
        assert_eq!(shapes[1].shape_type, ShapeType::Cube);
    }

    // ── effective scale ───────────────────────────────────────────────────

    #[test]
    fn root_effective_scale_is_local_scale() {
        let mut scene = Scene::new();
        let id = scene.insert(
            ShapeNode::new(ShapeKind::Cube).scaled(Vec3::new(2.0, 3.0, 4.0)),
        );
        assert_eq!(scene.effective_scale(id), Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn child_scale_is_componentwise_product_with_parent() {
        let mut scene = Scene::new();
        let parent = scene.insert(
            ShapeNode::new(ShapeKind::Cube).scaled(Vec3::new(2.0, 2.0, 2.0)),
        );
        let child = scene.insert(
            ShapeNode::new(ShapeKind::Sphere { radius: 1.0 })
                .scaled(Vec3::new(0.5, 1.0, 3.0))
                .child_of(parent),
        );
        assert_eq!(scene.effective_scale(child), Vec3::new(1.0, 2.0, 6.0));
    }

    #[test]
    fn scale_composes_through_arbitrary_depth() {
        let mut scene = Scene::new();
        let mut parent = None;
        for _ in 0..5 {
            let mut node = ShapeNode::new(ShapeKind::Cube).scaled(Vec3::splat(2.0));
            node.parent = parent;
            parent = Some(scene.insert(node));
        }
        assert_eq!(scene.effective_scale(parent.unwrap()), Vec3::splat(32.0));
    }

    // ── describe ──────────────────────────────────────────────────────────

    #[test]
    fn unit_sphere_at_origin_describes_as_defaults() {
        let mut scene = Scene::new();
        let id = scene.insert(ShapeNode::new(ShapeKind::Sphere { radius: 1.0 }));

        let desc = scene.describe(id);
        assert_eq!(desc.extra, Vec4::new(1.0, 0.0, 0.0, 0.0));
        assert_eq!(desc.op, CsgOp::Union);
        assert_eq!(desc.shape_type, ShapeType::Sphere);
        assert_eq!(desc.position, Vec3::ZERO);
        assert_eq!(desc.blend_strength, 0.0);
    }
}
