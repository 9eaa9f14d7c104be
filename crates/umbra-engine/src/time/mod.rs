//! Time subsystem.
//!
//! Provides stable frame timing without coupling to the runtime. Intended
//! usage: one `FrameClock` per window (or per render loop), `tick()` once
//! per presented frame.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
