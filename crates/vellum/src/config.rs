//! Configuration for the overlay effects.
//!
//! Every table the effects read lives here with its defaults; nothing else in
//! the crate hard-codes a threshold.

use std::time::Duration;

use vellum_core::config::RuntimeConfig;
use vellum_quality::{DeviceClass, DeviceContext, DeviceSignals, QualityConfig};
use vellum_text::rasterizer::DEFAULT_MAX_DIMENSION;
use vellum_viewport::ViewportConfig;

use crate::highlight::HighlightRules;

/// Text overlay behaviour.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    /// World-unit size change that triggers a geometry rebuild on constrained
    /// devices.
    pub constrained_geometry_threshold: f32,
    /// Same, for desktop.
    pub geometry_threshold: f32,
    /// Keep a mesh shown after it first became visible.
    pub sticky_visibility: bool,
    /// Prefix for texture labels.
    pub label_prefix: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            constrained_geometry_threshold: 0.2,
            geometry_threshold: 0.1,
            sticky_visibility: false,
            label_prefix: "vellum-text".to_string(),
        }
    }
}

impl OverlayConfig {
    pub fn with_sticky_visibility(mut self, sticky: bool) -> Self {
        self.sticky_visibility = sticky;
        self
    }

    pub fn with_geometry_thresholds(mut self, desktop: f32, constrained: f32) -> Self {
        self.geometry_threshold = desktop;
        self.constrained_geometry_threshold = constrained;
        self
    }

    pub fn with_label_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.label_prefix = prefix.into();
        self
    }

    pub fn geometry_threshold_for(&self, class: DeviceClass) -> f32 {
        if class.is_constrained() {
            self.constrained_geometry_threshold
        } else {
            self.geometry_threshold
        }
    }
}

/// Preloader timing and the three intro words.
#[derive(Debug, Clone, PartialEq)]
pub struct IntroConfig {
    /// Preloader animation length.
    pub duration: Duration,
    /// Delay between completion and the intro text setup.
    pub settle_delay: Duration,
    pub words: [String; 3],
    /// Index into `words` drawn in the accent colour.
    pub accent_word: usize,
    /// Horizontal offset of the outer words in the side-by-side layout.
    pub horizontal_spacing: f32,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(6200),
            settle_delay: Duration::from_millis(200),
            words: ["Looks".to_string(), "Doesn't".to_string(), "Matter".to_string()],
            accent_word: 1,
            horizontal_spacing: 0.9,
        }
    }
}

impl IntroConfig {
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_words(mut self, words: [&str; 3]) -> Self {
        self.words = words.map(str::to_string);
        self
    }
}

/// Debounce windows and event thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleConfig {
    pub constrained_resize_debounce: Duration,
    pub resize_debounce: Duration,
    pub scroll_debounce: Duration,
    /// Scroll movement in CSS pixels below which updates are skipped.
    pub scroll_threshold: f32,
    /// Wait after an orientation change before re-measuring.
    pub orientation_settle: Duration,
    pub constrained_gradient_debounce: Duration,
    pub gradient_debounce: Duration,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            constrained_resize_debounce: Duration::from_millis(300),
            resize_debounce: Duration::from_millis(100),
            scroll_debounce: Duration::from_millis(50),
            scroll_threshold: 5.0,
            orientation_settle: Duration::from_millis(500),
            constrained_gradient_debounce: Duration::from_millis(150),
            gradient_debounce: Duration::from_millis(50),
        }
    }
}

impl ScheduleConfig {
    pub fn with_resize_debounce(mut self, desktop: Duration, constrained: Duration) -> Self {
        self.resize_debounce = desktop;
        self.constrained_resize_debounce = constrained;
        self
    }

    pub fn with_scroll(mut self, debounce: Duration, threshold: f32) -> Self {
        self.scroll_debounce = debounce;
        self.scroll_threshold = threshold;
        self
    }

    pub fn resize_debounce_for(&self, class: DeviceClass) -> Duration {
        if class.is_constrained() {
            self.constrained_resize_debounce
        } else {
            self.resize_debounce
        }
    }

    pub fn gradient_debounce_for(&self, class: DeviceClass) -> Duration {
        if class.is_constrained() {
            self.constrained_gradient_debounce
        } else {
            self.gradient_debounce
        }
    }
}

/// Rasterizer limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterConfig {
    /// Largest canvas edge in device pixels.
    pub max_dimension: u32,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
        }
    }
}

impl RasterConfig {
    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension;
        self
    }
}

/// Everything needed to stand the effects up.
#[derive(Debug, Clone, Default)]
pub struct EffectConfig {
    pub runtime: RuntimeConfig,
    pub viewport: ViewportConfig,
    pub quality: QualityConfig,
    pub raster: RasterConfig,
    pub overlay: OverlayConfig,
    pub intro: IntroConfig,
    pub schedule: ScheduleConfig,
    pub highlight: HighlightRules,
}

impl EffectConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_runtime(mut self, runtime: RuntimeConfig) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn with_viewport(mut self, viewport: ViewportConfig) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_quality(mut self, quality: QualityConfig) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_raster(mut self, raster: RasterConfig) -> Self {
        self.raster = raster;
        self
    }

    pub fn with_overlay(mut self, overlay: OverlayConfig) -> Self {
        self.overlay = overlay;
        self
    }

    pub fn with_intro(mut self, intro: IntroConfig) -> Self {
        self.intro = intro;
        self
    }

    pub fn with_schedule(mut self, schedule: ScheduleConfig) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_highlight(mut self, highlight: HighlightRules) -> Self {
        self.highlight = highlight;
        self
    }

    /// Classify the host once, using this config's quality tables.
    pub fn device_context(&self, signals: DeviceSignals) -> DeviceContext {
        DeviceContext::from_config(signals, &self.quality)
    }
}
