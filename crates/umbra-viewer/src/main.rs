//! Demo viewer for the umbra raymarch engine.
//!
//! Builds a small CSG scene, animates it, and drives the raymarch pass into
//! the window's swapchain each frame. The compute kernel lives in
//! `kernel.wgsl`; the engine only sees it as an opaque handle.

use umbra_engine::core::{App, AppControl, FrameCtx};
use umbra_engine::device::{Gpu, GpuInit, SurfaceErrorAction};
use umbra_engine::logging::{LoggingConfig, init_logging};
use umbra_engine::math::{Mat4, Vec3};
use umbra_engine::render::{
    CameraMatrices, FrameContext, KernelDesc, RaymarchRenderer, SyncPolicy,
};
use umbra_engine::scene::{CsgOp, Scene, ShapeId, ShapeKind, ShapeNode};
use umbra_engine::settings::{DirectionalLight, RaymarchSettings};
use umbra_engine::window::{Runtime, RuntimeConfig};

const FOV_Y: f32 = 60.0_f32.to_radians();
const NEAR: f32 = 0.1;

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let app = ViewerApp::new();

    Runtime::run(
        RuntimeConfig {
            title: "umbra viewer".to_string(),
            ..Default::default()
        },
        GpuInit::default(),
        app,
    )
}

/// Offscreen source/depth targets the kernel reads from.
struct SceneTargets {
    color_view: wgpu::TextureView,
    depth_view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl SceneTargets {
    fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let size = wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        };

        let color = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("viewer scene color"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        let depth = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("viewer scene depth"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        Self {
            color_view: color.create_view(&wgpu::TextureViewDescriptor::default()),
            depth_view: depth.create_view(&wgpu::TextureViewDescriptor::default()),
            width,
            height,
        }
    }

    fn matches(&self, width: u32, height: u32) -> bool {
        self.width == width && self.height == height
    }
}

struct ViewerApp {
    scene: Scene,
    settings: RaymarchSettings,
    orb: ShapeId,

    renderer: Option<RaymarchRenderer>,
    targets: Option<SceneTargets>,
}

impl ViewerApp {
    fn new() -> Self {
        let (scene, orb) = build_scene();

        let settings = RaymarchSettings {
            light: Some(DirectionalLight {
                direction: Vec3::new(-0.4, -1.0, -0.3).normalized(),
                color: Vec3::new(1.0, 0.97, 0.9),
                intensity: 1.2,
            }),
            ..Default::default()
        };

        Self {
            scene,
            settings,
            orb,
            renderer: None,
            targets: None,
        }
    }

    fn ensure_gpu_state(&mut self, gpu: &Gpu<'_>, width: u32, height: u32) {
        if self.renderer.is_none() {
            let module = gpu
                .device()
                .create_shader_module(wgpu::ShaderModuleDescriptor {
                    label: Some("viewer raymarch kernel"),
                    source: wgpu::ShaderSource::Wgsl(include_str!("kernel.wgsl").into()),
                });

            self.renderer = Some(RaymarchRenderer::new(
                gpu.device(),
                gpu.surface_format(),
                Some(KernelDesc {
                    module,
                    entry_point: "cs_main",
                    workgroup_size: (8, 8),
                }),
                SyncPolicy::Pipelined,
            ));
        }

        let stale = !self.targets.as_ref().is_some_and(|t| t.matches(width, height));
        if stale {
            self.targets = Some(SceneTargets::new(gpu.device(), width, height));
        }
    }

    fn animate(&mut self, elapsed: f32) {
        let angle = elapsed * 0.8;
        let orb = self.scene.node_mut(self.orb);
        orb.position = Vec3::new(angle.cos() * 2.2, 1.2 + (elapsed * 1.7).sin() * 0.5, angle.sin() * 2.2);
    }

    fn camera(&self, elapsed: f32, width: u32, height: u32) -> Option<CameraMatrices> {
        let orbit = elapsed * 0.15;
        let eye = Vec3::new(orbit.cos() * 9.0, 4.5, orbit.sin() * 9.0);
        let target = Vec3::new(0.0, 1.0, 0.0);

        let aspect = width as f32 / height.max(1) as f32;
        let projection = Mat4::perspective(FOV_Y, aspect, NEAR, self.settings.max_distance);

        Some(CameraMatrices {
            camera_to_world: Mat4::look_at(eye, target, Vec3::UP),
            camera_inverse_projection: projection.inverse()?,
        })
    }
}

/// Clears the offscreen color/depth pair; the kernel composites over this
/// as its background.
fn clear_scene_targets(gpu: &Gpu<'_>, targets: &SceneTargets) {
    let mut encoder = gpu
        .device()
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("viewer clear encoder"),
        });

    {
        let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("viewer clear pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &targets.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: 0.05,
                        g: 0.07,
                        b: 0.12,
                        a: 1.0,
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &targets.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
    }

    gpu.queue().submit(std::iter::once(encoder.finish()));
}

impl App for ViewerApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let (width, height) = ctx.window.physical_size();

        self.ensure_gpu_state(ctx.gpu, width, height);
        self.animate(ctx.time.elapsed);

        let Some(camera) = self.camera(ctx.time.elapsed, width, height) else {
            log::warn!("degenerate projection matrix; skipping frame");
            return AppControl::Continue;
        };

        let frame = match ctx.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                let action = ctx.gpu.handle_surface_error(err);
                if action == SurfaceErrorAction::Fatal {
                    return AppControl::Exit;
                }
                return AppControl::Continue;
            }
        };

        let (Some(renderer), Some(targets)) = (self.renderer.as_mut(), self.targets.as_ref())
        else {
            ctx.gpu.submit(frame);
            return AppControl::Continue;
        };

        clear_scene_targets(ctx.gpu, targets);

        renderer.render_frame(
            &FrameContext {
                device: ctx.gpu.device(),
                queue: ctx.gpu.queue(),
                width,
                height,
                camera,
                source_view: &targets.color_view,
                depth_view: &targets.depth_view,
                destination_view: &frame.view,
            },
            &self.scene,
            &self.settings,
        );

        ctx.gpu.submit(frame);
        AppControl::Continue
    }
}

impl Drop for ViewerApp {
    fn drop(&mut self) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.teardown();
        }
    }
}

fn build_scene() -> (Scene, ShapeId) {
    let mut scene = Scene::new();

    // Ground.
    scene.insert(
        ShapeNode::new(ShapeKind::Plane {
            axis: Vec3::UP,
            height: 0.0,
        })
        .colored(Vec3::new(0.45, 0.48, 0.5)),
    );

    // Carved pedestal: round box with a sphere subtracted from its top.
    let pedestal = scene.insert(
        ShapeNode::new(ShapeKind::RoundBox { radius: 0.1 })
            .at(Vec3::new(0.0, 0.75, 0.0))
            .scaled(Vec3::new(2.5, 1.5, 2.5))
            .colored(Vec3::new(0.8, 0.75, 0.65)),
    );
    scene.insert(
        ShapeNode::new(ShapeKind::Sphere { radius: 1.1 })
            .at(Vec3::new(0.0, 1.6, 0.0))
            .with_op(CsgOp::Subtraction)
            .child_of(pedestal),
    );

    // Orbiting orb, blended into whatever it passes near.
    let orb = scene.insert(
        ShapeNode::new(ShapeKind::Sphere { radius: 0.6 })
            .at(Vec3::new(2.2, 1.2, 0.0))
            .with_op(CsgOp::SmoothUnion)
            .blended(0.35)
            .colored(Vec3::new(0.9, 0.25, 0.2)),
    );

    // Dressing.
    scene.insert(
        ShapeNode::new(ShapeKind::Torus {
            radius: 1.6,
            width: 0.18,
        })
        .at(Vec3::new(-4.0, 0.9, 2.5))
        .rotated(Vec3::new(90.0, 0.0, 0.0))
        .colored(Vec3::new(0.2, 0.55, 0.85)),
    );
    scene.insert(
        ShapeNode::new(ShapeKind::BoxFrame { thickness: 0.08 })
            .at(Vec3::new(4.2, 1.0, -2.0))
            .scaled(Vec3::splat(1.8))
            .rotated(Vec3::new(0.0, 30.0, 0.0))
            .colored(Vec3::new(0.95, 0.8, 0.2)),
    );
    scene.insert(
        ShapeNode::new(ShapeKind::Capsule {
            height: 1.4,
            radius: 0.35,
        })
        .at(Vec3::new(-3.0, 0.0, -3.2))
        .colored(Vec3::new(0.5, 0.85, 0.4)),
    );

    (scene, orb)
}
