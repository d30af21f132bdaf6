//! Device signals and classification.

use crate::policy::{QualityConfig, QualityPolicy};
use crate::profile::QualityProfile;

/// User-agent tokens that mark a handheld browser.
const MOBILE_UA_TOKENS: &[&str] = &[
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Coarse capability signals reported by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSignals {
    /// CSS pixel width of the layout viewport.
    pub viewport_width: f32,
    pub device_pixel_ratio: f32,
    pub logical_cores: usize,
    /// `None` when the host does not report memory.
    pub device_memory_gb: Option<f32>,
    pub touch_capable: bool,
    pub user_agent: String,
}

impl DeviceSignals {
    pub fn new(viewport_width: f32, device_pixel_ratio: f32) -> Self {
        Self {
            viewport_width,
            device_pixel_ratio,
            logical_cores: 8,
            device_memory_gb: None,
            touch_capable: false,
            user_agent: String::new(),
        }
    }

    /// Signals for the machine this process runs on.
    pub fn detect_native(viewport_width: f32, device_pixel_ratio: f32) -> Self {
        let signals = Self::new(viewport_width, device_pixel_ratio).with_cores(num_cpus::get());
        tracing::debug!(
            cores = signals.logical_cores,
            viewport_width,
            device_pixel_ratio,
            "Detected native device signals"
        );
        signals
    }

    pub fn with_cores(mut self, cores: usize) -> Self {
        self.logical_cores = cores;
        self
    }

    pub fn with_memory_gb(mut self, memory_gb: f32) -> Self {
        self.device_memory_gb = Some(memory_gb);
        self
    }

    pub fn with_touch(mut self, touch_capable: bool) -> Self {
        self.touch_capable = touch_capable;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn has_mobile_user_agent(&self) -> bool {
        let ua = self.user_agent.to_ascii_lowercase();
        MOBILE_UA_TOKENS.iter().any(|token| ua.contains(token))
    }
}

/// Capability tier driving every quality decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeviceClass {
    Desktop,
    Mobile,
    MobileLowEnd,
}

impl DeviceClass {
    /// Mobile and low-end mobile.
    pub fn is_constrained(self) -> bool {
        !matches!(self, DeviceClass::Desktop)
    }

    pub fn is_low_end(self) -> bool {
        matches!(self, DeviceClass::MobileLowEnd)
    }

    pub fn name(self) -> &'static str {
        match self {
            DeviceClass::Desktop => "desktop",
            DeviceClass::Mobile => "mobile",
            DeviceClass::MobileLowEnd => "mobile-low-end",
        }
    }
}

impl std::fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Strategy for turning signals into a [`DeviceClass`].
pub trait DeviceClassifier {
    fn classify(&self, signals: &DeviceSignals) -> DeviceClass;
}

/// Breakpoint and hardware heuristics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicClassifier {
    /// Viewports narrower than this are constrained.
    pub mobile_breakpoint: f32,
    /// Core counts at or below this are low-end.
    pub low_end_cores: usize,
    /// Reported memory at or below this is low-end.
    pub low_end_memory_gb: f32,
}

impl Default for HeuristicClassifier {
    fn default() -> Self {
        Self {
            mobile_breakpoint: 768.0,
            low_end_cores: 4,
            low_end_memory_gb: 4.0,
        }
    }
}

impl HeuristicClassifier {
    pub fn with_mobile_breakpoint(mut self, breakpoint: f32) -> Self {
        self.mobile_breakpoint = breakpoint;
        self
    }

    fn is_constrained(&self, signals: &DeviceSignals) -> bool {
        signals.viewport_width < self.mobile_breakpoint
            || signals.touch_capable
            || signals.has_mobile_user_agent()
    }

    fn is_low_end(&self, signals: &DeviceSignals) -> bool {
        signals.logical_cores <= self.low_end_cores
            || signals
                .device_memory_gb
                .is_some_and(|memory| memory <= self.low_end_memory_gb)
    }
}

impl DeviceClassifier for HeuristicClassifier {
    fn classify(&self, signals: &DeviceSignals) -> DeviceClass {
        if !self.is_constrained(signals) {
            DeviceClass::Desktop
        } else if self.is_low_end(signals) {
            DeviceClass::MobileLowEnd
        } else {
            DeviceClass::Mobile
        }
    }
}

/// Always answers the same class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClassifier(pub DeviceClass);

impl DeviceClassifier for FixedClassifier {
    fn classify(&self, _signals: &DeviceSignals) -> DeviceClass {
        self.0
    }
}

/// Startup-time snapshot passed by reference to every subsystem.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceContext {
    pub signals: DeviceSignals,
    pub class: DeviceClass,
    pub profile: QualityProfile,
}

impl DeviceContext {
    /// Classify with [`HeuristicClassifier`] and the default policy tables.
    pub fn from_signals(signals: DeviceSignals) -> Self {
        Self::from_config(signals, &QualityConfig::default())
    }

    /// Classify with [`HeuristicClassifier`] and custom policy tables.
    pub fn from_config(signals: DeviceSignals, config: &QualityConfig) -> Self {
        Self::classify_with(
            signals,
            &HeuristicClassifier::default(),
            &QualityPolicy::new(config.clone()),
        )
    }

    pub fn classify_with(
        signals: DeviceSignals,
        classifier: &dyn DeviceClassifier,
        policy: &QualityPolicy,
    ) -> Self {
        let class = classifier.classify(&signals);
        let profile = policy.profile(class);
        tracing::info!(
            class = %class,
            pixel_ratio = profile.effective_pixel_ratio(signals.device_pixel_ratio),
            target_fps = profile.target_fps,
            "Device classified"
        );
        Self {
            signals,
            class,
            profile,
        }
    }

    /// Device pixel ratio after the profile cap.
    pub fn pixel_ratio(&self) -> f32 {
        self.profile.effective_pixel_ratio(self.signals.device_pixel_ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)";

    #[test]
    fn test_wide_desktop_is_desktop() {
        let signals = DeviceSignals::new(1920.0, 1.0).with_cores(16);
        assert_eq!(HeuristicClassifier::default().classify(&signals), DeviceClass::Desktop);
    }

    #[test]
    fn test_narrow_viewport_is_constrained() {
        let signals = DeviceSignals::new(767.0, 2.0).with_cores(8);
        assert_eq!(HeuristicClassifier::default().classify(&signals), DeviceClass::Mobile);

        let signals = DeviceSignals::new(768.0, 2.0).with_cores(8);
        assert_eq!(HeuristicClassifier::default().classify(&signals), DeviceClass::Desktop);
    }

    #[test]
    fn test_user_agent_marks_mobile() {
        let signals = DeviceSignals::new(1024.0, 2.0)
            .with_cores(6)
            .with_user_agent(IPHONE_UA);
        assert_eq!(HeuristicClassifier::default().classify(&signals), DeviceClass::Mobile);
    }

    #[test]
    fn test_touch_marks_constrained() {
        let signals = DeviceSignals::new(1280.0, 1.0).with_cores(8).with_touch(true);
        assert!(HeuristicClassifier::default().classify(&signals).is_constrained());
    }

    #[test]
    fn test_low_end_by_cores_or_memory() {
        let classifier = HeuristicClassifier::default();

        let by_cores = DeviceSignals::new(390.0, 3.0).with_cores(4);
        assert_eq!(classifier.classify(&by_cores), DeviceClass::MobileLowEnd);

        let by_memory = DeviceSignals::new(390.0, 3.0).with_cores(8).with_memory_gb(3.0);
        assert_eq!(classifier.classify(&by_memory), DeviceClass::MobileLowEnd);

        let unknown_memory = DeviceSignals::new(390.0, 3.0).with_cores(8);
        assert_eq!(classifier.classify(&unknown_memory), DeviceClass::Mobile);
    }

    #[test]
    fn test_low_end_desktop_stays_desktop() {
        let signals = DeviceSignals::new(1440.0, 1.0).with_cores(2).with_memory_gb(2.0);
        assert_eq!(HeuristicClassifier::default().classify(&signals), DeviceClass::Desktop);
    }

    #[test]
    fn test_fixed_classifier() {
        let signals = DeviceSignals::new(1920.0, 1.0);
        let class = FixedClassifier(DeviceClass::MobileLowEnd).classify(&signals);
        assert_eq!(class, DeviceClass::MobileLowEnd);
    }

    #[test]
    fn test_context_from_config_uses_custom_caps() {
        let config = QualityConfig::default().with_pixel_ratio_caps(1.5, 1.25);
        let desktop = DeviceContext::from_config(DeviceSignals::new(1920.0, 2.0).with_cores(8), &config);
        assert_eq!(desktop.class, DeviceClass::Desktop);
        assert_eq!(desktop.pixel_ratio(), 1.5);

        let phone = DeviceContext::from_config(DeviceSignals::new(390.0, 3.0).with_cores(8), &config);
        assert_eq!(phone.pixel_ratio(), 1.25);
    }

    #[test]
    fn test_context_caps_pixel_ratio() {
        let ctx = DeviceContext::from_signals(DeviceSignals::new(390.0, 3.5).with_cores(8));
        assert_eq!(ctx.class, DeviceClass::Mobile);
        assert_eq!(ctx.pixel_ratio(), 2.0);
    }
}
