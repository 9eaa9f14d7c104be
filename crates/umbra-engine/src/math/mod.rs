//! 3D math types.
//!
//! Responsibilities:
//! - scene-side vectors (world positions, Euler angles, scales, colors)
//! - camera matrices for the raymarch kernel (view-to-world, inverse
//!   projection)
//!
//! Conventions:
//! - right-handed, +Y up
//! - `Mat4` is column-major, matching WGSL `mat4x4<f32>` memory order

mod mat4;
mod vec3;
mod vec4;

pub use mat4::Mat4;
pub use vec3::Vec3;
pub use vec4::Vec4;
