//! Quality profile produced by the policy.

use bitflags::bitflags;

use crate::device::DeviceClass;

bitflags! {
    /// Optional rendering features a profile enables.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct QualityFeatures: u32 {
        /// Multi-octave noise in the background shader. Without it the
        /// shader falls back to a single octave.
        const COMPLEX_NOISE = 1 << 0;
        /// Flickering point light on the orb.
        const POINT_LIGHT = 1 << 1;
        /// MSAA on the main canvas.
        const ANTIALIAS = 1 << 2;
        /// Gate frames with a [`FrameLimiter`](crate::FrameLimiter) instead of
        /// drawing every animation frame.
        const FRAME_SKIPPING = 1 << 3;
        /// Shrink noise and animation speed when the frame rate collapses.
        const RUNTIME_DEGRADATION = 1 << 4;
    }
}

/// Float precision requested from shaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShaderPrecision {
    Low,
    Medium,
    High,
}

impl ShaderPrecision {
    /// GLSL precision qualifier.
    pub fn qualifier(self) -> &'static str {
        match self {
            ShaderPrecision::Low => "lowp",
            ShaderPrecision::Medium => "mediump",
            ShaderPrecision::High => "highp",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QualityProfile {
    pub class: DeviceClass,
    pub pixel_ratio_cap: f32,
    pub target_fps: u32,
    /// Sphere segments for the orb geometry.
    pub orb_subdivisions: u32,
    pub precision: ShaderPrecision,
    /// Sampler anisotropy clamp for text textures.
    pub anisotropy: u16,
    pub point_size: f32,
    pub max_lights: u32,
    pub features: QualityFeatures,
}

impl QualityProfile {
    pub fn effective_pixel_ratio(&self, device_pixel_ratio: f32) -> f32 {
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        dpr.min(self.pixel_ratio_cap)
    }

    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.target_fps.max(1) as f64)
    }

    #[inline]
    pub fn has(&self, feature: QualityFeatures) -> bool {
        self.features.contains(feature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(cap: f32) -> QualityProfile {
        QualityProfile {
            class: DeviceClass::Mobile,
            pixel_ratio_cap: cap,
            target_fps: 30,
            orb_subdivisions: 70,
            precision: ShaderPrecision::Medium,
            anisotropy: 1,
            point_size: 8.0,
            max_lights: 2,
            features: QualityFeatures::COMPLEX_NOISE,
        }
    }

    #[test]
    fn test_effective_pixel_ratio() {
        let profile = profile(2.0);
        assert_eq!(profile.effective_pixel_ratio(3.0), 2.0);
        assert_eq!(profile.effective_pixel_ratio(1.5), 1.5);
        assert_eq!(profile.effective_pixel_ratio(f32::NAN), 1.0);
        assert_eq!(profile.effective_pixel_ratio(0.0), 1.0);
    }

    #[test]
    fn test_frame_interval() {
        let interval = profile(2.0).frame_interval();
        assert!((interval.as_secs_f64() - 1.0 / 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_precision_ordering() {
        assert!(ShaderPrecision::Medium < ShaderPrecision::High);
        assert_eq!(ShaderPrecision::Medium.qualifier(), "mediump");
    }
}
