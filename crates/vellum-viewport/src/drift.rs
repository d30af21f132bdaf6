//! Mobile viewport drift compensation.
//!
//! Mobile browsers shrink and grow the visual viewport as the URL bar hides
//! and shows. That is not a layout change, and rebuilding every mesh for it
//! makes text visibly jump. [`ViewportTracker`] keeps a *reference* frame and
//! classifies each new frame against it:
//!
//! | change | state |
//! |---|---|
//! | identical dimensions | [`ViewportState::Stable`] |
//! | height-only change within the drift threshold (constrained classes) | [`ViewportState::Drifting`] |
//! | anything else | [`ViewportState::Resizing`] (reference is reset) |
//!
//! While drifting, positions follow the live rectangle in the current
//! viewport, geometry sizes are projected in the reference frame, and a
//! uniform scale of `reference_height / current_height` keeps the on-screen
//! size constant.

use vellum_core::{ElementRect, ViewportFrame};
use vellum_quality::DeviceClass;

use crate::camera::CameraModel;
use crate::error::PlacementResult;
use crate::mapper::{WorldPlacement, map_rect_to_world_position, map_rect_to_world_size};
use crate::visibility::{VisibilityBuffer, is_rect_visible_with_buffer};

/// Thresholds and buffers for the viewport tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportConfig {
    /// Width changes larger than this (px) are real resizes.
    pub width_threshold: f32,
    /// Height changes larger than this (px) are orientation changes or real
    /// resizes; smaller ones are URL-bar drift.
    pub height_threshold: f32,
    pub visibility: VisibilityBuffer,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width_threshold: 10.0,
            height_threshold: 200.0,
            visibility: VisibilityBuffer::default(),
        }
    }
}

impl ViewportConfig {
    pub fn with_width_threshold(mut self, px: f32) -> Self {
        self.width_threshold = px;
        self
    }

    pub fn with_height_threshold(mut self, px: f32) -> Self {
        self.height_threshold = px;
        self
    }

    pub fn with_visibility(mut self, visibility: VisibilityBuffer) -> Self {
        self.visibility = visibility;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportState {
    /// Current frame matches the reference; direct mapping.
    Stable,
    /// URL-bar induced height change; scale compensation applies.
    Drifting,
    /// Real layout change; the reference was reset and every placement must be
    /// rebuilt.
    Resizing,
}

/// Reference/current viewport pair with drift classification.
#[derive(Debug, Clone)]
pub struct ViewportTracker {
    config: ViewportConfig,
    reference: ViewportFrame,
    current: ViewportFrame,
    state: ViewportState,
}

impl ViewportTracker {
    pub fn new(frame: ViewportFrame, config: ViewportConfig) -> Self {
        Self {
            config,
            reference: frame,
            current: frame,
            state: ViewportState::Stable,
        }
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }

    pub fn reference(&self) -> ViewportFrame {
        self.reference
    }

    pub fn current(&self) -> ViewportFrame {
        self.current
    }

    /// Classify a new frame reported by a resize event.
    ///
    /// A frame with a zero or non-finite dimension is ignored and the
    /// previous state is returned unchanged.
    pub fn observe(&mut self, frame: ViewportFrame, class: DeviceClass) -> ViewportState {
        if !frame.is_valid() {
            tracing::debug!(
                width = frame.width,
                height = frame.height,
                pixel_ratio = frame.pixel_ratio,
                "ignoring degenerate viewport frame"
            );
            return self.state;
        }

        let dw = (frame.width - self.reference.width).abs();
        let dh = (frame.height - self.reference.height).abs();
        let ratio_changed = frame.pixel_ratio != self.reference.pixel_ratio;

        let state = if dw == 0.0 && dh == 0.0 && !ratio_changed {
            ViewportState::Stable
        } else if !class.is_constrained()
            || ratio_changed
            || dw > self.config.width_threshold
            || dh > self.config.height_threshold
        {
            ViewportState::Resizing
        } else if dh == 0.0 {
            // Sub-threshold width jitter alone does not move the reference.
            ViewportState::Stable
        } else {
            ViewportState::Drifting
        };

        self.current = frame;
        if state == ViewportState::Resizing {
            tracing::debug!(
                from_width = self.reference.width,
                from_height = self.reference.height,
                to_width = frame.width,
                to_height = frame.height,
                "viewport resized, resetting reference frame"
            );
            self.reference = frame;
        } else if state == ViewportState::Drifting {
            tracing::trace!(
                reference_height = self.reference.height,
                current_height = frame.height,
                "viewport drifting"
            );
        }

        self.state = state;
        state
    }

    /// Unconditionally adopt `frame` as the new reference (orientation change).
    ///
    /// Degenerate frames are ignored here too.
    pub fn force_reset(&mut self, frame: ViewportFrame) {
        if !frame.is_valid() {
            tracing::debug!(width = frame.width, height = frame.height, "ignoring degenerate viewport frame");
            return;
        }
        self.reference = frame;
        self.current = frame;
        self.state = ViewportState::Resizing;
    }

    /// Uniform mesh scale that keeps on-screen size constant.
    pub fn scale_factor(&self) -> f32 {
        match self.state {
            ViewportState::Drifting => self.reference.height / self.current.height,
            ViewportState::Stable | ViewportState::Resizing => 1.0,
        }
    }

    /// Placement for `rect` against the tracker's current state.
    ///
    /// `camera` is the scene camera as currently configured.
    pub fn place(&self, rect: &ElementRect, camera: &CameraModel) -> PlacementResult<WorldPlacement> {
        let position = map_rect_to_world_position(rect, camera, &self.current)?;

        let size = match self.state {
            ViewportState::Drifting => {
                let reference_camera = camera.with_aspect_ratio(self.reference.aspect_ratio());
                map_rect_to_world_size(rect, &reference_camera, &self.reference)?
            }
            ViewportState::Stable | ViewportState::Resizing => {
                map_rect_to_world_size(rect, camera, &self.current)?
            }
        };

        Ok(WorldPlacement {
            position,
            size,
            scale: self.scale_factor(),
        })
    }

    /// Buffered visibility against the live frame.
    pub fn is_visible(&self, rect: &ElementRect, class: DeviceClass) -> bool {
        is_rect_visible_with_buffer(rect, &self.current, self.config.visibility.fraction_for(class))
    }
}
