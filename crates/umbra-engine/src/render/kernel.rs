/// Caller-owned description of the raymarch compute kernel.
///
/// The kernel is an external collaborator: this crate never sees its source,
/// only the compiled module, the entry point, and the workgroup size the
/// shader declares. wgpu offers no reflection over `@workgroup_size`, so the
/// declared dimensions travel with the handle.
pub struct KernelDesc {
    pub module: wgpu::ShaderModule,
    pub entry_point: &'static str,
    /// The kernel's declared `@workgroup_size` (x, y). Used to derive the
    /// dispatch grid from the frame resolution.
    pub workgroup_size: (u32, u32),
}

/// Compiled kernel state owned by the renderer.
pub(super) struct Kernel {
    pub pipeline: wgpu::ComputePipeline,
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub workgroup_size: (u32, u32),
}

/// Number of thread groups covering `extent` work items at `group_size`
/// items per group (ceiling division; zero group size is a kernel-contract
/// violation and panics in debug).
pub fn thread_groups(extent: u32, group_size: u32) -> u32 {
    debug_assert!(group_size > 0, "kernel declared a zero workgroup dimension");
    extent.div_ceil(group_size.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_multiple_needs_no_extra_group() {
        assert_eq!(thread_groups(1024, 8), 128);
    }

    #[test]
    fn remainder_rounds_up() {
        assert_eq!(thread_groups(1023, 8), 128);
        assert_eq!(thread_groups(1025, 8), 129);
    }

    #[test]
    fn tiny_extent_still_dispatches_one_group() {
        assert_eq!(thread_groups(1, 8), 1);
    }

    #[test]
    fn zero_extent_dispatches_nothing() {
        assert_eq!(thread_groups(0, 8), 0);
    }
}
