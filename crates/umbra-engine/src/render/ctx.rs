use crate::math::Mat4;

/// Camera matrices consumed by the kernel, supplied per frame by the host.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraMatrices {
    /// View-to-world transform.
    pub camera_to_world: Mat4,
    /// Inverse of the projection matrix.
    pub camera_inverse_projection: Mat4,
}

/// Per-frame inputs to the raymarch pass (device/queue + targets + camera).
///
/// This is intentionally small and stable. The embedding application owns
/// every handle in here; the renderer never retains them beyond the call.
pub struct FrameContext<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,

    /// Frame resolution in physical pixels.
    pub width: u32,
    pub height: u32,

    pub camera: CameraMatrices,

    /// Scene color before the raymarch composite (sampled by the kernel).
    pub source_view: &'a wgpu::TextureView,
    /// Scene depth (sampled by the kernel to occlude against rasterized
    /// geometry).
    pub depth_view: &'a wgpu::TextureView,
    /// Where the composited result lands.
    pub destination_view: &'a wgpu::TextureView,
}
