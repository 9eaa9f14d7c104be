use bytemuck::{Pod, Zeroable};

use crate::render::CameraMatrices;
use crate::settings::RaymarchSettings;

/// Uniform block consumed by the raymarch kernel (208 bytes, std140-safe):
///
///  offset   0  camera_to_world            mat4x4<f32>
///  offset  64  camera_inverse_projection  mat4x4<f32>
///  offset 128  light_direction            vec3<f32>
///  offset 140  light_intensity            f32
///  offset 144  light_color                vec3<f32>
///  offset 156  max_distance               f32
///  offset 160  shadow_distance            vec2<f32>  [near, far]
///  offset 168  shadow_intensity           f32
///  offset 172  shadow_penumbra            f32
///  offset 176  ao_step_size               f32
///  offset 180  ao_intensity               f32
///  offset 184  max_iterations             u32
///  offset 188  soft_shadows               u32  bool
///  offset 192  ao_enabled                 u32  bool
///  offset 196  ao_iterations              u32
///  offset 200  shapes_count               u32  bounds the kernel's loop
///  offset 204  (padding)                  u32
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct RaymarchParams {
    pub camera_to_world: [[f32; 4]; 4],
    pub camera_inverse_projection: [[f32; 4]; 4],

    pub light_direction: [f32; 3],
    pub light_intensity: f32,
    pub light_color: [f32; 3],
    pub max_distance: f32,

    pub shadow_distance: [f32; 2],
    pub shadow_intensity: f32,
    pub shadow_penumbra: f32,

    pub ao_step_size: f32,
    pub ao_intensity: f32,
    pub max_iterations: u32,
    pub soft_shadows: u32,

    pub ao_enabled: u32,
    pub ao_iterations: u32,
    pub shapes_count: u32,
    pub _pad: u32,
}

const _: () = assert!(size_of::<RaymarchParams>() == 208);

impl RaymarchParams {
    /// Builds the frame's parameter block from the camera, the settings
    /// bundle, and the packed shape count.
    pub fn new(camera: &CameraMatrices, settings: &RaymarchSettings, shapes_count: u32) -> Self {
        let light = settings.light_or_default();
        Self {
            camera_to_world: camera.camera_to_world.to_cols_array_2d(),
            camera_inverse_projection: camera.camera_inverse_projection.to_cols_array_2d(),

            light_direction: light.direction.to_array(),
            light_intensity: light.intensity,
            light_color: light.color.to_array(),
            max_distance: settings.max_distance,

            shadow_distance: settings.shadow_distance,
            shadow_intensity: settings.shadow_intensity,
            shadow_penumbra: settings.shadow_penumbra,

            ao_step_size: settings.ao_step_size,
            ao_intensity: settings.ao_intensity,
            max_iterations: settings.max_iterations,
            soft_shadows: settings.soft_shadows as u32,

            ao_enabled: settings.ao_enabled as u32,
            ao_iterations: settings.ao_iterations,
            shapes_count,
            _pad: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::offset_of;

    use crate::math::{Mat4, Vec3};
    use crate::settings::DirectionalLight;

    fn camera() -> CameraMatrices {
        CameraMatrices {
            camera_to_world: Mat4::IDENTITY,
            camera_inverse_projection: Mat4::IDENTITY,
        }
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn field_offsets_match_the_documented_layout() {
        assert_eq!(offset_of!(RaymarchParams, camera_to_world), 0);
        assert_eq!(offset_of!(RaymarchParams, camera_inverse_projection), 64);
        assert_eq!(offset_of!(RaymarchParams, light_direction), 128);
        assert_eq!(offset_of!(RaymarchParams, light_intensity), 140);
        assert_eq!(offset_of!(RaymarchParams, light_color), 144);
        assert_eq!(offset_of!(RaymarchParams, max_distance), 156);
        assert_eq!(offset_of!(RaymarchParams, shadow_distance), 160);
        assert_eq!(offset_of!(RaymarchParams, shadow_intensity), 168);
        assert_eq!(offset_of!(RaymarchParams, shadow_penumbra), 172);
        assert_eq!(offset_of!(RaymarchParams, ao_step_size), 176);
        assert_eq!(offset_of!(RaymarchParams, ao_intensity), 180);
        assert_eq!(offset_of!(RaymarchParams, max_iterations), 184);
        assert_eq!(offset_of!(RaymarchParams, soft_shadows), 188);
        assert_eq!(offset_of!(RaymarchParams, ao_enabled), 192);
        assert_eq!(offset_of!(RaymarchParams, ao_iterations), 196);
        assert_eq!(offset_of!(RaymarchParams, shapes_count), 200);
        assert_eq!(size_of::<RaymarchParams>(), 208);
    }

    // ── content ───────────────────────────────────────────────────────────

    #[test]
    fn unbound_light_uploads_down_white_unit() {
        let params = RaymarchParams::new(&camera(), &RaymarchSettings::default(), 0);
        assert_eq!(params.light_direction, [0.0, -1.0, 0.0]);
        assert_eq!(params.light_color, [1.0, 1.0, 1.0]);
        assert_eq!(params.light_intensity, 1.0);
    }

    #[test]
    fn bound_light_is_uploaded_verbatim() {
        let settings = RaymarchSettings {
            light: Some(DirectionalLight {
                direction: Vec3::new(0.0, -0.8, -0.6),
                color: Vec3::new(1.0, 0.95, 0.9),
                intensity: 1.4,
            }),
            ..Default::default()
        };
        let params = RaymarchParams::new(&camera(), &settings, 3);
        assert_eq!(params.light_direction, [0.0, -0.8, -0.6]);
        assert_eq!(params.light_intensity, 1.4);
        assert_eq!(params.shapes_count, 3);
    }

    #[test]
    fn bool_flags_upload_as_integers() {
        let settings = RaymarchSettings {
            soft_shadows: false,
            ao_enabled: true,
            ..Default::default()
        };
        let params = RaymarchParams::new(&camera(), &settings, 0);
        assert_eq!(params.soft_shadows, 0);
        assert_eq!(params.ao_enabled, 1);
    }

    #[test]
    fn settings_values_flow_through_unchanged() {
        let params = RaymarchParams::new(&camera(), &RaymarchSettings::default(), 7);
        assert_eq!(params.max_distance, 500.0);
        assert_eq!(params.max_iterations, 512);
        assert_eq!(params.shadow_distance, [0.1, 70.0]);
        assert_eq!(params.shadow_penumbra, 3.0);
        assert_eq!(params.ao_step_size, 0.45);
        assert_eq!(params.shapes_count, 7);
    }
}
