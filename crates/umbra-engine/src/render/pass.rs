use wgpu::util::DeviceExt;

use crate::scene::Scene;
use crate::settings::RaymarchSettings;

use super::ctx::FrameContext;
use super::kernel::{Kernel, KernelDesc, thread_groups};
use super::pack::{SHAPE_RECORD_STRIDE, pack};
use super::params::RaymarchParams;
use super::target::{SCRATCH_FORMAT, ScratchTarget};

/// CPU/GPU synchronization between the compute dispatch and the final copy.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum SyncPolicy {
    /// Submit the compute work and wait for the device before encoding the
    /// copy. Serializes CPU and GPU work; exists for frame-timing parity
    /// with hosts that require the result on the CPU timeline.
    Blocking,
    /// Encode dispatch and copy into one submission and let the queue order
    /// them.
    #[default]
    Pipelined,
}

/// Raymarch pass orchestrator.
///
/// Owns the compiled kernel handle, the scratch target, and the params
/// uniform; everything else is borrowed per frame through [`FrameContext`].
/// Lifecycle is `new` → `render_frame` per frame → `teardown`.
pub struct RaymarchRenderer {
    kernel: Option<Kernel>,
    sync_policy: SyncPolicy,

    blit_pipeline: wgpu::RenderPipeline,
    blit_bind_group_layout: wgpu::BindGroupLayout,

    params_ubo: Option<wgpu::Buffer>,
    scratch: Option<ScratchTarget>,

    warned_missing_kernel: bool,
}

impl RaymarchRenderer {
    /// Creates the renderer for a given destination format.
    ///
    /// `kernel` is the caller-owned compute shader; passing `None` leaves
    /// the pass in pass-through mode (every frame is a straight copy of the
    /// source) until the application is reconfigured.
    pub fn new(
        device: &wgpu::Device,
        destination_format: wgpu::TextureFormat,
        kernel: Option<KernelDesc>,
        sync_policy: SyncPolicy,
    ) -> Self {
        let (blit_pipeline, blit_bind_group_layout) =
            create_blit_pipeline(device, destination_format);

        let kernel = kernel.map(|desc| compile_kernel(device, desc));

        Self {
            kernel,
            sync_policy,
            blit_pipeline,
            blit_bind_group_layout,
            params_ubo: None,
            scratch: None,
            warned_missing_kernel: false,
        }
    }

    /// Runs the raymarch pass for one frame.
    ///
    /// Flow: acquire scratch target → pack shapes + upload params → bind →
    /// dispatch → copy into the destination → release the per-frame shape
    /// buffer. A frame that cannot run (no kernel, empty scene) degrades to
    /// a straight copy of the source; the next frame recovers on its own.
    pub fn render_frame(&mut self, ctx: &FrameContext<'_>, scene: &Scene, settings: &RaymarchSettings) {
        let Some(kernel) = self.kernel.as_ref() else {
            if !self.warned_missing_kernel {
                log::warn!("no raymarch kernel bound; pass degrades to a source copy");
                self.warned_missing_kernel = true;
            }
            self.copy_only(ctx);
            return;
        };

        let packed = pack(&scene.collect());
        if packed.is_empty() {
            // Empty-scene policy: skip the dispatch entirely; the
            // destination still receives the unmodified source.
            log::debug!("raymarch pass skipped: no enabled shapes");
            self.copy_only(ctx);
            return;
        }

        // TargetAcquired: scratch storage target at frame resolution.
        let recreate = !self
            .scratch
            .as_ref()
            .is_some_and(|t| t.matches(ctx.width, ctx.height));
        if recreate {
            self.scratch = Some(ScratchTarget::new(ctx.device, ctx.width, ctx.height));
        }
        let Some(scratch) = self.scratch.as_ref() else { return };

        // ParamsBound: upload the uniform block and the shape stream, then
        // bind source, depth, and scratch to the kernel.
        let params = RaymarchParams::new(&ctx.camera, settings, packed.count());
        let params_ubo = self.params_ubo.get_or_insert_with(|| {
            ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("umbra raymarch params ubo"),
                size: size_of::<RaymarchParams>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        });
        ctx.queue.write_buffer(params_ubo, 0, bytemuck::bytes_of(&params));

        // Per-frame buffer: created here, released when the frame ends.
        let shape_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("umbra raymarch shape buffer"),
            contents: packed.bytes(),
            usage: wgpu::BufferUsages::STORAGE,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("umbra raymarch bind group"),
            layout: &kernel.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: params_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: shape_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(ctx.source_view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(ctx.depth_view),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: wgpu::BindingResource::TextureView(&scratch.view),
                },
            ],
        });

        // Dispatched: grid covers the frame at the kernel's declared
        // workgroup size, one group deep.
        let (group_x, group_y) = kernel.workgroup_size;
        let groups_x = thread_groups(ctx.width, group_x);
        let groups_y = thread_groups(ctx.height, group_y);

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("umbra raymarch encoder"),
            });

        {
            let mut cpass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("umbra raymarch dispatch"),
                timestamp_writes: None,
            });
            cpass.set_pipeline(&kernel.pipeline);
            cpass.set_bind_group(0, &bind_group, &[]);
            cpass.dispatch_workgroups(groups_x, groups_y, 1);
        }

        // Blitted: copy the scratch result into the destination, honoring
        // the synchronization policy.
        match self.sync_policy {
            SyncPolicy::Blocking => {
                ctx.queue.submit(std::iter::once(encoder.finish()));
                if let Err(err) = ctx.device.poll(wgpu::PollType::wait_indefinitely()) {
                    log::warn!("raymarch sync wait failed: {err:?}");
                }

                let mut blit_encoder = ctx
                    .device
                    .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                        label: Some("umbra raymarch blit encoder"),
                    });
                self.encode_blit(ctx, &mut blit_encoder, &scratch.view, ctx.destination_view);
                ctx.queue.submit(std::iter::once(blit_encoder.finish()));
            }
            SyncPolicy::Pipelined => {
                self.encode_blit(ctx, &mut encoder, &scratch.view, ctx.destination_view);
                ctx.queue.submit(std::iter::once(encoder.finish()));
            }
        }

        // Idle: `shape_buffer` drops here, releasing the frame's compute
        // buffer.
    }

    /// Releases retained GPU resources. Safe to call repeatedly, and safe to
    /// call on a renderer that never rendered a frame.
    pub fn teardown(&mut self) {
        if self.params_ubo.take().is_some() || self.scratch.take().is_some() {
            log::debug!("raymarch renderer released retained buffers");
        }
        self.kernel = None;
    }

    // ── private helpers ────────────────────────────────────────────────────

    /// Fallback path: destination receives the unmodified source.
    fn copy_only(&self, ctx: &FrameContext<'_>) {
        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("umbra raymarch copy encoder"),
            });
        self.encode_blit(ctx, &mut encoder, ctx.source_view, ctx.destination_view);
        ctx.queue.submit(std::iter::once(encoder.finish()));
    }

    fn encode_blit(
        &self,
        ctx: &FrameContext<'_>,
        encoder: &mut wgpu::CommandEncoder,
        src: &wgpu::TextureView,
        dst: &wgpu::TextureView,
    ) {
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("umbra blit bind group"),
            layout: &self.blit_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(src),
            }],
        });

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("umbra blit pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: dst,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.blit_pipeline);
        rpass.set_bind_group(0, &bind_group, &[]);
        rpass.draw(0..3, 0..1);
    }
}

fn compile_kernel(device: &wgpu::Device, desc: KernelDesc) -> Kernel {
    let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("umbra raymarch bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::COMPUTE,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(size_of::<RaymarchParams>() as u64),
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::COMPUTE,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Storage { read_only: true },
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(SHAPE_RECORD_STRIDE as u64),
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::COMPUTE,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: false },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 3,
                visibility: wgpu::ShaderStages::COMPUTE,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Depth,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 4,
                visibility: wgpu::ShaderStages::COMPUTE,
                ty: wgpu::BindingType::StorageTexture {
                    access: wgpu::StorageTextureAccess::WriteOnly,
                    format: SCRATCH_FORMAT,
                    view_dimension: wgpu::TextureViewDimension::D2,
                },
                count: None,
            },
        ],
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("umbra raymarch pipeline layout"),
        bind_group_layouts: &[&bind_group_layout],
        immediate_size: 0,
    });

    let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
        label: Some("umbra raymarch pipeline"),
        layout: Some(&pipeline_layout),
        module: &desc.module,
        entry_point: Some(desc.entry_point),
        compilation_options: Default::default(),
        cache: None,
    });

    Kernel {
        pipeline,
        bind_group_layout,
        workgroup_size: desc.workgroup_size,
    }
}

fn create_blit_pipeline(
    device: &wgpu::Device,
    destination_format: wgpu::TextureFormat,
) -> (wgpu::RenderPipeline, wgpu::BindGroupLayout) {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("umbra blit shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shaders/blit.wgsl").into()),
    });

    let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("umbra blit bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: false },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        }],
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("umbra blit pipeline layout"),
        bind_group_layouts: &[&bind_group_layout],
        immediate_size: 0,
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("umbra blit pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: destination_format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    });

    (pipeline, bind_group_layout)
}
