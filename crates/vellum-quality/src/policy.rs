//! Class to profile tables.

use crate::device::DeviceClass;
use crate::profile::{QualityFeatures, QualityProfile, ShaderPrecision};

/// Tunable policy tables.
///
/// Constrained values must never exceed their unconstrained counterparts.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityConfig {
    pub desktop_pixel_ratio_cap: f32,
    pub constrained_pixel_ratio_cap: f32,
    pub desktop_fps: u32,
    pub constrained_fps: u32,
    pub desktop_subdivisions: u32,
    pub constrained_subdivisions: u32,
    pub desktop_anisotropy: u16,
    pub desktop_point_size: f32,
    pub constrained_point_size: f32,
    pub desktop_max_lights: u32,
    pub constrained_max_lights: u32,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            desktop_pixel_ratio_cap: 3.0,
            constrained_pixel_ratio_cap: 2.0,
            desktop_fps: 60,
            constrained_fps: 30,
            desktop_subdivisions: 80,
            constrained_subdivisions: 70,
            desktop_anisotropy: 16,
            desktop_point_size: 15.0,
            constrained_point_size: 8.0,
            desktop_max_lights: 3,
            constrained_max_lights: 2,
        }
    }
}

impl QualityConfig {
    pub fn with_pixel_ratio_caps(mut self, desktop: f32, constrained: f32) -> Self {
        self.desktop_pixel_ratio_cap = desktop;
        self.constrained_pixel_ratio_cap = constrained.min(desktop);
        self
    }

    pub fn with_target_fps(mut self, desktop: u32, constrained: u32) -> Self {
        self.desktop_fps = desktop;
        self.constrained_fps = constrained.min(desktop);
        self
    }
}

/// Pure mapping from [`DeviceClass`] to [`QualityProfile`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QualityPolicy {
    config: QualityConfig,
}

impl QualityPolicy {
    pub fn new(config: QualityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QualityConfig {
        &self.config
    }

    /// Profile for `class`.
    ///
    /// The pixel-ratio cap is a class ceiling only. The live device ratio is
    /// applied later through [`QualityProfile::effective_pixel_ratio`], so a
    /// window moved to a denser display can still use it.
    pub fn profile(&self, class: DeviceClass) -> QualityProfile {
        let c = &self.config;
        match class {
            DeviceClass::Desktop => QualityProfile {
                class,
                pixel_ratio_cap: c.desktop_pixel_ratio_cap,
                target_fps: c.desktop_fps,
                orb_subdivisions: c.desktop_subdivisions,
                precision: ShaderPrecision::High,
                anisotropy: c.desktop_anisotropy,
                point_size: c.desktop_point_size,
                max_lights: c.desktop_max_lights,
                features: QualityFeatures::COMPLEX_NOISE
                    | QualityFeatures::POINT_LIGHT
                    | QualityFeatures::ANTIALIAS,
            },
            DeviceClass::Mobile => QualityProfile {
                class,
                pixel_ratio_cap: c.constrained_pixel_ratio_cap,
                target_fps: c.constrained_fps,
                orb_subdivisions: c.constrained_subdivisions,
                precision: ShaderPrecision::Medium,
                anisotropy: 1,
                point_size: c.constrained_point_size,
                max_lights: c.constrained_max_lights,
                features: QualityFeatures::COMPLEX_NOISE
                    | QualityFeatures::POINT_LIGHT
                    | QualityFeatures::RUNTIME_DEGRADATION,
            },
            DeviceClass::MobileLowEnd => QualityProfile {
                class,
                pixel_ratio_cap: c.constrained_pixel_ratio_cap,
                target_fps: c.constrained_fps,
                orb_subdivisions: c.constrained_subdivisions,
                precision: ShaderPrecision::Medium,
                anisotropy: 1,
                point_size: c.constrained_point_size,
                max_lights: c.constrained_max_lights,
                features: QualityFeatures::FRAME_SKIPPING | QualityFeatures::RUNTIME_DEGRADATION,
            },
        }
    }
}
