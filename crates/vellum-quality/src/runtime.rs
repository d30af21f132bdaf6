//! Runtime frame-rate monitoring and frame gating.
//!
//! Both types take timestamps as [`Duration`]s since an arbitrary origin
//! (usually the animation clock) instead of reading the wall clock, so the
//! host decides where time comes from.

use std::time::Duration;

use crate::device::DeviceClass;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FpsMonitorConfig {
    /// Length of each measurement window.
    pub window: Duration,
    /// Frame rate below which degradation kicks in.
    pub fps_floor: f32,
    pub noise_factor: f32,
    pub speed_factor: f32,
    /// Scalars never drop below this.
    pub scalar_floor: f32,
}

impl Default for FpsMonitorConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(5),
            fps_floor: 20.0,
            noise_factor: 0.8,
            speed_factor: 0.9,
            scalar_floor: 0.1,
        }
    }
}

/// Scalars to apply before the next frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Degradation {
    /// Frame rate measured over the window that triggered this step.
    pub measured_fps: f32,
    pub noise_intensity: f32,
    pub animation_speed: f32,
}

/// Rolling-window frame-rate monitor.
///
/// Degradation is one-way: scalars only ever shrink and there is no recovery
/// path when the frame rate improves.
#[derive(Debug, Clone)]
pub struct FpsMonitor {
    config: FpsMonitorConfig,
    class: DeviceClass,
    window_start: Option<Duration>,
    frames: u32,
    last_fps: Option<f32>,
    noise_intensity: f32,
    animation_speed: f32,
}

impl FpsMonitor {
    pub fn new(class: DeviceClass, config: FpsMonitorConfig) -> Self {
        Self {
            config,
            class,
            window_start: None,
            frames: 0,
            last_fps: None,
            noise_intensity: 1.0,
            animation_speed: 1.0,
        }
    }

    pub fn noise_intensity(&self) -> f32 {
        self.noise_intensity
    }

    pub fn animation_speed(&self) -> f32 {
        self.animation_speed
    }

    /// Frame rate of the last completed window.
    pub fn last_fps(&self) -> Option<f32> {
        self.last_fps
    }

    /// Count a frame presented at `now`.
    ///
    /// Returns a [`Degradation`] when a window closes below the floor on a
    /// constrained device and at least one scalar actually moved.
    pub fn record_frame(&mut self, now: Duration) -> Option<Degradation> {
        let start = *self.window_start.get_or_insert(now);
        self.frames += 1;

        let elapsed = now.saturating_sub(start);
        if elapsed < self.config.window {
            return None;
        }

        let fps = self.frames as f32 / elapsed.as_secs_f32();
        self.last_fps = Some(fps);
        self.window_start = Some(now);
        self.frames = 0;

        if fps >= self.config.fps_floor || !self.class.is_constrained() {
            return None;
        }

        let floor = self.config.scalar_floor;
        let noise = (self.noise_intensity * self.config.noise_factor).max(floor);
        let speed = (self.animation_speed * self.config.speed_factor).max(floor);
        if noise == self.noise_intensity && speed == self.animation_speed {
            return None;
        }

        self.noise_intensity = noise;
        self.animation_speed = speed;
        tracing::warn!(
            fps,
            noise_intensity = noise,
            animation_speed = speed,
            "Low frame rate, reducing effect quality"
        );
        Some(Degradation {
            measured_fps: fps,
            noise_intensity: noise,
            animation_speed: speed,
        })
    }

    /// Drop the partial window, e.g. after the loop was paused.
    pub fn reset_window(&mut self) {
        self.window_start = None;
        self.frames = 0;
    }
}

/// Fixed-interval frame gate.
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    interval: Duration,
    last: Option<Duration>,
}

impl FrameLimiter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn from_fps(fps: u32) -> Self {
        Self::new(Duration::from_secs_f64(1.0 / fps.max(1) as f64))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a frame at `now` should render.
    ///
    /// The phase is kept aligned to the interval so slow hosts do not
    /// accumulate drift.
    pub fn should_render(&mut self, now: Duration) -> bool {
        let Some(last) = self.last else {
            self.last = Some(now);
            return true;
        };

        let elapsed = now.saturating_sub(last);
        if elapsed < self.interval {
            return false;
        }

        let interval_nanos = self.interval.as_nanos().max(1);
        let remainder = elapsed.as_nanos() % interval_nanos;
        self.last = Some(now.saturating_sub(Duration::from_nanos(remainder as u64)));
        true
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
