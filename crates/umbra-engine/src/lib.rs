//! Umbra engine crate.
//!
//! Host side of a GPU signed-distance-field raymarcher: scene shapes are
//! collected, sorted, and packed into a fixed-stride buffer each frame, then
//! a caller-supplied compute kernel is dispatched against the frame's color
//! and depth targets. The kernel itself is opaque to this crate; only the
//! binding contract (see `render`) is defined here.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod math;
pub mod render;
pub mod scene;
pub mod settings;
