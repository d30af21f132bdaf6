//! Particle orb motion: rotation, camera sway, flickering light and slow
//! colour drift, all sampled from the animation clock.

use std::time::Duration;

use vellum_core::ViewportFrame;
use vellum_core::math::{Vec2, Vec3};
use vellum_quality::{DeviceContext, QualityFeatures};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbConfig {
    pub radius: f32,
    pub subdivisions: u32,
    /// Base multiplier on the animation clock.
    pub animation_speed: f32,
    pub noise_intensity: f32,
    pub point_size: f32,
    pub rotation_multiplier: f32,
    pub camera_multiplier: f32,
    /// Pointer influence on yaw and pitch.
    pub pointer_yaw: f32,
    pub pointer_pitch: f32,
    pub camera_distance: f32,
    pub fov_y_degrees: f32,
    pub point_light: bool,
    /// How often a new colour target may be proposed.
    pub color_interval: Duration,
    pub color_steps: u32,
    pub color_step_interval: Duration,
}

impl OrbConfig {
    pub fn for_context(ctx: &DeviceContext) -> Self {
        let constrained = ctx.class.is_constrained();
        let pick = |mobile: f32, desktop: f32| if constrained { mobile } else { desktop };

        Self {
            radius: pick(1.5, 2.0),
            subdivisions: ctx.profile.orb_subdivisions,
            animation_speed: pick(0.8, 1.0),
            noise_intensity: pick(0.8, 1.0),
            point_size: pick(1.5, 2.0),
            rotation_multiplier: pick(0.7, 1.0),
            camera_multiplier: pick(0.5, 1.0),
            pointer_yaw: pick(0.2, 0.3),
            pointer_pitch: pick(0.15, 0.2),
            camera_distance: 5.0,
            fov_y_degrees: 75.0,
            point_light: ctx.profile.has(QualityFeatures::POINT_LIGHT),
            color_interval: Duration::from_millis(if constrained { 5000 } else { 3000 }),
            color_steps: if constrained { 30 } else { 60 },
            color_step_interval: Duration::from_millis(if constrained { 100 } else { 50 }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLightPose {
    pub position: Vec3,
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbPose {
    /// Euler angles in radians.
    pub rotation: Vec3,
    pub camera_position: Vec3,
    /// Uniform orb scale including drift compensation.
    pub scale: f32,
    pub light: Option<PointLightPose>,
}

/// Pointer position in normalised device coordinates.
pub fn pointer_ndc(x: f32, y: f32, frame: &ViewportFrame) -> Vec2 {
    if !frame.is_valid() {
        return Vec2::ZERO;
    }
    Vec2::new((x / frame.width) * 2.0 - 1.0, -(y / frame.height) * 2.0 + 1.0)
}

#[derive(Debug, Clone)]
pub struct OrbMotion {
    config: OrbConfig,
}

impl OrbMotion {
    pub fn new(config: OrbConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OrbConfig {
        &self.config
    }

    /// Pose at animation time `time` (seconds).
    ///
    /// `compensation` is the drift scale factor; it grows the orb and pushes
    /// the camera back by the same amount.
    pub fn pose(&self, time: f32, pointer: Vec2, compensation: f32) -> OrbPose {
        let c = &self.config;
        let t = time * c.animation_speed;
        let rm = c.rotation_multiplier;
        let cm = c.camera_multiplier;

        let rotation = Vec3::new(
            (t * 0.2).sin() * 0.2 * rm + pointer.y * c.pointer_pitch,
            t * 0.15 * rm + pointer.x * c.pointer_yaw,
            (t * 0.1).cos() * 0.1 * rm,
        );

        let camera_position = Vec3::new(
            (t * 0.3).sin() * 0.8 * cm,
            (t * 0.2).cos() * 0.6 * cm,
            (c.camera_distance + (t * 0.1).sin() * 0.5 * cm) * compensation,
        );

        let light = c.point_light.then(|| PointLightPose {
            position: Vec3::new((t * 0.5).sin() * 2.0, (t * 0.7).cos() * 2.0, 3.0),
            intensity: 0.6 + (t * 12.0).sin() * 0.2,
        });

        OrbPose {
            rotation,
            camera_position,
            scale: compensation,
            light,
        }
    }

    /// Noise amplitude after runtime degradation.
    pub fn noise_intensity(&self, runtime_scale: f32) -> f32 {
        self.config.noise_intensity * runtime_scale
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveTransition {
    from: f32,
    to: f32,
    step: u32,
    last_step: Duration,
}

/// Stepped colour drift toward caller-chosen targets.
#[derive(Debug, Clone)]
pub struct ColorTransition {
    value: f32,
    steps: u32,
    step_interval: Duration,
    interval: Duration,
    next_proposal: Option<Duration>,
    active: Option<ActiveTransition>,
}

impl ColorTransition {
    pub fn new(config: &OrbConfig) -> Self {
        Self {
            value: 0.0,
            steps: config.color_steps.max(1),
            step_interval: config.color_step_interval,
            interval: config.color_interval,
            next_proposal: None,
            active: None,
        }
    }

    /// Current colour mix in `[0, 1]`.
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Whether a new target may be proposed at `now`. The first call only
    /// arms the timer.
    pub fn proposal_due(&mut self, now: Duration) -> bool {
        match self.next_proposal {
            None => {
                self.next_proposal = Some(now + self.interval);
                false
            }
            Some(due) if now >= due => {
                self.next_proposal = Some(due + self.interval);
                true
            }
            Some(_) => false,
        }
    }

    /// Begin moving toward `target` from the current value.
    pub fn start(&mut self, now: Duration, target: f32) {
        self.active = Some(ActiveTransition {
            from: self.value,
            to: target.clamp(0.0, 1.0),
            step: 0,
            last_step: now,
        });
    }

    /// Apply every step due by `now`.
    pub fn advance(&mut self, now: Duration) -> f32 {
        let Some(mut active) = self.active else {
            return self.value;
        };

        while active.step < self.steps && now >= active.last_step + self.step_interval {
            active.step += 1;
            active.last_step += self.step_interval;
        }
        self.value = active.from + (active.to - active.from) * (active.step as f32 / self.steps as f32);
        self.active = (active.step < self.steps).then_some(active);
        self.value
    }
}
