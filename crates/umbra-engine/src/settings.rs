use crate::math::Vec3;

/// Directional light feeding the kernel's shading.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

impl Default for DirectionalLight {
    /// Straight-down white light at unit intensity — the values uploaded
    /// when no light is bound at all.
    fn default() -> Self {
        Self {
            direction: Vec3::DOWN,
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }
}

/// Raymarch configuration, read once per frame.
///
/// Keep this structure stable and minimal. Add configuration flags only when
/// the kernel contract actually grows a matching parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct RaymarchSettings {
    /// Sphere-tracing termination distance.
    pub max_distance: f32,
    /// Sphere-tracing iteration cap.
    pub max_iterations: u32,

    pub soft_shadows: bool,
    /// Penumbra sharpness; larger is sharper. Sensible range 1..=128.
    pub shadow_penumbra: f32,
    /// Shadow darkness; sensible range 0..=4.
    pub shadow_intensity: f32,
    /// Shadow ray [near, far] clamp.
    pub shadow_distance: [f32; 2],

    pub ao_enabled: bool,
    /// Step length of the occlusion walk; sensible range 0.01..=10.
    pub ao_step_size: f32,
    /// Sample count of the occlusion walk; sensible range 1..=5.
    pub ao_iterations: u32,
    /// Occlusion darkness in [0, 1].
    pub ao_intensity: f32,

    /// Bound directional light; `None` falls back to
    /// [`DirectionalLight::default`].
    pub light: Option<DirectionalLight>,
}

impl Default for RaymarchSettings {
    fn default() -> Self {
        Self {
            max_distance: 500.0,
            max_iterations: 512,
            soft_shadows: true,
            shadow_penumbra: 3.0,
            shadow_intensity: 0.5,
            shadow_distance: [0.1, 70.0],
            ao_enabled: true,
            ao_step_size: 0.45,
            ao_iterations: 3,
            ao_intensity: 0.197,
            light: None,
        }
    }
}

impl RaymarchSettings {
    /// The light the kernel will see: the bound one, or the default.
    pub fn light_or_default(&self) -> DirectionalLight {
        self.light.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbound_light_falls_back_to_down_white_unit() {
        let settings = RaymarchSettings::default();
        let light = settings.light_or_default();
        assert_eq!(light.direction, Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(light.color, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(light.intensity, 1.0);
    }

    #[test]
    fn bound_light_wins_over_default() {
        let light = DirectionalLight {
            direction: Vec3::new(1.0, -1.0, 0.0).normalized(),
            color: Vec3::new(1.0, 0.9, 0.8),
            intensity: 2.0,
        };
        let settings = RaymarchSettings {
            light: Some(light),
            ..Default::default()
        };
        assert_eq!(settings.light_or_default(), light);
    }

    #[test]
    fn defaults_match_canonical_configuration() {
        let s = RaymarchSettings::default();
        assert_eq!(s.max_distance, 500.0);
        assert_eq!(s.max_iterations, 512);
        assert_eq!(s.shadow_distance, [0.1, 70.0]);
        assert!(s.soft_shadows);
        assert!(s.ao_enabled);
        assert_eq!(s.ao_iterations, 3);
    }
}
