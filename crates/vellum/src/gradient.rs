//! Full-screen gradient background parameters and their uniform block.

use std::time::Duration;

use vellum_core::geometry::Size;
use vellum_core::{Color, ViewportFrame};
use vellum_quality::{DeviceClass, DeviceContext, QualityFeatures, ShaderPrecision};

use crate::config::ScheduleConfig;

/// Most pixels-per-point a constrained device renders the gradient at.
const CONSTRAINED_PIXEL_RATIO_CAP: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientParams {
    /// Animation clock multiplier.
    pub speed: f32,
    pub scale: f32,
    pub warp_strength: f32,
    pub warp_scale: f32,
    pub band_frequency: f32,
    pub color_a: Color,
    pub color_b: Color,
    pub brightness: f32,
    pub contrast: f32,
    pub precision: ShaderPrecision,
    /// Second warp pass and flow noise.
    pub complex_noise: bool,
    pub frame_skipping: bool,
    pub constrained: bool,
    pub pixel_ratio: f32,
    pub resize_debounce: Duration,
}

impl GradientParams {
    pub fn for_context(ctx: &DeviceContext, schedule: &ScheduleConfig) -> Self {
        let constrained = ctx.class.is_constrained();
        let pixel_ratio = if constrained {
            ctx.signals.device_pixel_ratio.min(CONSTRAINED_PIXEL_RATIO_CAP)
        } else {
            ctx.pixel_ratio()
        };

        Self {
            speed: if constrained { 0.07 } else { 0.08 },
            scale: 0.001,
            warp_strength: 8.0,
            warp_scale: 0.5,
            band_frequency: if constrained { 3.5 } else { 4.0 },
            color_a: Color::rgb(0.8, 0.2, 0.2),
            color_b: Color::BLACK,
            brightness: 0.0,
            contrast: 1.0,
            precision: if ctx.class == DeviceClass::MobileLowEnd {
                ShaderPrecision::Medium
            } else {
                ShaderPrecision::High
            },
            complex_noise: ctx.profile.has(QualityFeatures::COMPLEX_NOISE),
            frame_skipping: ctx.profile.has(QualityFeatures::FRAME_SKIPPING),
            constrained,
            pixel_ratio: if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
                pixel_ratio
            } else {
                1.0
            },
            resize_debounce: schedule.gradient_debounce_for(ctx.class),
        }
    }

    /// Drawing-buffer size for `frame`.
    pub fn canvas_size(&self, frame: &ViewportFrame) -> Size<u32> {
        Size::new(
            (frame.width * self.pixel_ratio).floor().max(1.0) as u32,
            (frame.height * self.pixel_ratio).floor().max(1.0) as u32,
        )
    }

    /// Shader time for `elapsed` seconds of wall time.
    pub fn shader_time(&self, elapsed: f32) -> f32 {
        elapsed * self.speed
    }

    pub fn uniforms(&self, elapsed: f32, canvas: Size<u32>) -> GradientUniforms {
        let rgb = |c: Color| [c.r, c.g, c.b, 1.0];
        GradientUniforms {
            color_a: rgb(self.color_a),
            color_b: rgb(self.color_b),
            resolution: [canvas.width as f32, canvas.height as f32],
            time: self.shader_time(elapsed),
            scale: self.scale,
            warp_strength: self.warp_strength,
            warp_scale: self.warp_scale,
            band_frequency: self.band_frequency,
            brightness: self.brightness,
            contrast: self.contrast,
            constrained: self.constrained as u32,
            _padding: [0; 2],
        }
    }
}

/// Uniform block for the gradient fragment shader.
///
/// ```wgsl
/// struct GradientUniforms {
///     color_a: vec4<f32>,
///     color_b: vec4<f32>,
///     resolution: vec2<f32>,
///     time: f32,
///     scale: f32,
///     warp_strength: f32,
///     warp_scale: f32,
///     band_frequency: f32,
///     brightness: f32,
///     contrast: f32,
///     constrained: u32,
/// }
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GradientUniforms {
    pub color_a: [f32; 4],
    pub color_b: [f32; 4],
    pub resolution: [f32; 2],
    pub time: f32,
    pub scale: f32,
    pub warp_strength: f32,
    pub warp_scale: f32,
    pub band_frequency: f32,
    pub brightness: f32,
    pub contrast: f32,
    pub constrained: u32,
    /// Padding for alignment
    pub _padding: [u32; 2],
}
