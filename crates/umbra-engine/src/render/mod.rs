//! GPU raymarch pass.
//!
//! The renderer consumes the scene's shape stream and drives a caller-owned
//! compute kernel via wgpu. Binding contract the kernel must declare
//! (group 0):
//!
//! - binding 0: `Params` uniform (see [`RaymarchParams`] for the layout)
//! - binding 1: read-only storage buffer of packed 76-byte shape records
//!   (see [`ShapeRecord`])
//! - binding 2: source color, `texture_2d<f32>` (non-filterable)
//! - binding 3: scene depth, `texture_depth_2d`
//! - binding 4: destination, `texture_storage_2d<rgba32float, write>`
//!
//! All three textures are frame resolution. The record layout and the
//! uniform layout are byte-exact contracts; both are guarded by compile-time
//! assertions on the host side.

mod ctx;
mod kernel;
mod pack;
mod params;
mod pass;
mod target;

pub use ctx::{CameraMatrices, FrameContext};
pub use kernel::{KernelDesc, thread_groups};
pub use pack::{PackedShapes, SHAPE_RECORD_STRIDE, ShapeRecord, pack};
pub use params::RaymarchParams;
pub use pass::{RaymarchRenderer, SyncPolicy};
