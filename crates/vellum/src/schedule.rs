//! Event debouncing and the animation frame loop.
//!
//! All timestamps are [`Duration`]s on the host's animation clock.

use std::time::Duration;

use vellum_core::profiling::{new_frame, profile_function};
use vellum_quality::{
    Degradation, DeviceClass, FpsMonitor, FpsMonitorConfig, FrameLimiter, QualityFeatures,
    QualityProfile,
};

use crate::config::ScheduleConfig;

/// Trailing-edge debouncer: fires once the trigger has been quiet for the
/// whole window.
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    deadline: Option<Duration>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Resize debouncer for `class`; constrained devices wait longer.
    pub fn for_resize(config: &ScheduleConfig, class: DeviceClass) -> Self {
        Self::new(config.resize_debounce_for(class))
    }

    /// Gradient canvas resize debouncer for `class`.
    pub fn for_gradient(config: &ScheduleConfig, class: DeviceClass) -> Self {
        Self::new(config.gradient_debounce_for(class))
    }

    /// Waits out the orientation change before the viewport is re-measured.
    pub fn for_orientation(config: &ScheduleConfig) -> Self {
        Self::new(config.orientation_settle)
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Record an event at `now`, pushing the deadline back.
    pub fn trigger(&mut self, now: Duration) {
        self.deadline = Some(now + self.quiet);
    }

    /// `true` exactly once after the quiet window elapsed.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

/// Debounced scroll position that ignores sub-threshold movement.
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    debouncer: Debouncer,
    threshold: f32,
    applied: f32,
    pending: Option<f32>,
}

impl ScrollTracker {
    pub fn new(debounce: Duration, threshold: f32) -> Self {
        Self {
            debouncer: Debouncer::new(debounce),
            threshold,
            applied: 0.0,
            pending: None,
        }
    }

    pub fn from_config(config: &ScheduleConfig) -> Self {
        Self::new(config.scroll_debounce, config.scroll_threshold)
    }

    pub fn on_scroll(&mut self, now: Duration, scroll_y: f32) {
        self.pending = Some(scroll_y);
        self.debouncer.trigger(now);
    }

    /// Settled scroll position if it moved more than the threshold since the
    /// previous settled position.
    pub fn poll(&mut self, now: Duration) -> Option<f32> {
        if !self.debouncer.poll(now) {
            return None;
        }
        let scroll_y = self.pending.take()?;
        let moved = (scroll_y - self.applied).abs() > self.threshold;
        self.applied = scroll_y;
        moved.then_some(scroll_y)
    }

    /// Last settled position, whether or not it was reported.
    pub fn applied(&self) -> f32 {
        self.applied
    }
}

/// What the host should do with the frame it is about to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameDecision {
    /// Page hidden or context lost: stop requesting frames.
    Suspended,
    /// Frame gated by the limiter; request the next one and draw nothing.
    Skip,
    Render(FrameInfo),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    /// Animation clock in seconds, advanced at the current speed.
    pub animation_time: f32,
    pub noise_intensity: f32,
    pub animation_speed: f32,
    /// Set on the frame that closed a slow measurement window.
    pub degradation: Option<Degradation>,
}

/// Frame pacing for one effect.
///
/// Reads the quality profile once, at construction.
#[derive(Debug, Clone)]
pub struct FrameLoop {
    limiter: Option<FrameLimiter>,
    monitor: Option<FpsMonitor>,
    page_visible: bool,
    context_lost: bool,
    animation_time: f32,
    last_frame: Option<Duration>,
    /// Largest step the animation clock takes in one frame.
    max_delta: Duration,
    frame_count: u64,
}

impl FrameLoop {
    pub fn new(profile: &QualityProfile, monitor: FpsMonitorConfig) -> Self {
        let limiter = (profile.has(QualityFeatures::FRAME_SKIPPING) || profile.target_fps < 60)
            .then(|| FrameLimiter::from_fps(profile.target_fps));
        let monitor = profile
            .has(QualityFeatures::RUNTIME_DEGRADATION)
            .then(|| FpsMonitor::new(profile.class, monitor));

        Self {
            limiter,
            monitor,
            page_visible: true,
            context_lost: false,
            animation_time: 0.0,
            last_frame: None,
            max_delta: Duration::from_millis(100),
            frame_count: 0,
        }
    }

    pub fn set_page_visible(&mut self, visible: bool) {
        if visible && !self.page_visible {
            self.resume();
        }
        self.page_visible = visible;
    }

    pub fn set_context_lost(&mut self, lost: bool) {
        if !lost && self.context_lost {
            self.resume();
        }
        self.context_lost = lost;
    }

    // The pause must not count as one long frame.
    fn resume(&mut self) {
        self.last_frame = None;
        if let Some(limiter) = &mut self.limiter {
            limiter.reset();
        }
        if let Some(monitor) = &mut self.monitor {
            monitor.reset_window();
        }
        tracing::debug!("frame loop resumed");
    }

    /// Whether the host should keep requesting animation frames.
    pub fn should_schedule(&self) -> bool {
        self.page_visible && !self.context_lost
    }

    pub fn is_limited(&self) -> bool {
        self.limiter.is_some()
    }

    pub fn animation_speed(&self) -> f32 {
        self.monitor.as_ref().map_or(1.0, FpsMonitor::animation_speed)
    }

    pub fn noise_intensity(&self) -> f32 {
        self.monitor.as_ref().map_or(1.0, FpsMonitor::noise_intensity)
    }

    pub fn animation_time(&self) -> f32 {
        self.animation_time
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn begin_frame(&mut self, now: Duration) -> FrameDecision {
        profile_function!();
        if !self.should_schedule() {
            return FrameDecision::Suspended;
        }
        if let Some(limiter) = &mut self.limiter
            && !limiter.should_render(now)
        {
            return FrameDecision::Skip;
        }

        new_frame();
        let delta = self
            .last_frame
            .map(|last| now.saturating_sub(last).min(self.max_delta))
            .unwrap_or(Duration::ZERO);
        self.last_frame = Some(now);
        self.frame_count += 1;

        // Speed from the previous window applies to this step.
        self.animation_time += delta.as_secs_f32() * self.animation_speed();
        let degradation = self
            .monitor
            .as_mut()
            .and_then(|monitor| monitor.record_frame(now));

        FrameDecision::Render(FrameInfo {
            animation_time: self.animation_time,
            noise_intensity: self.noise_intensity(),
            animation_speed: self.animation_speed(),
            degradation,
        })
    }
}
