//! Buffered visibility test.
//!
//! The accepted region is the viewport grown by a fraction of its own size on
//! every side, so meshes exist slightly before their element scrolls in.

use vellum_core::{ElementRect, ViewportFrame};
use vellum_quality::DeviceClass;

/// Buffer fractions per device class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityBuffer {
    /// Used for constrained (mobile) classes.
    pub constrained: f32,
    /// Used for everything else.
    pub unconstrained: f32,
}

impl VisibilityBuffer {
    pub fn fraction_for(&self, class: DeviceClass) -> f32 {
        if class.is_constrained() {
            self.constrained
        } else {
            self.unconstrained
        }
    }
}

impl Default for VisibilityBuffer {
    fn default() -> Self {
        Self {
            constrained: 0.25,
            unconstrained: 0.10,
        }
    }
}

/// Visibility with the default buffer for `class`.
pub fn is_rect_visible(rect: &ElementRect, viewport: &ViewportFrame, class: DeviceClass) -> bool {
    is_rect_visible_with_buffer(rect, viewport, VisibilityBuffer::default().fraction_for(class))
}

/// Visibility with an explicit buffer fraction.
///
/// Vertical margins are `fraction * viewport.height`, horizontal margins
/// `fraction * viewport.width`. Edges are compared strictly, so a rect that
/// merely touches the expanded region is not visible.
pub fn is_rect_visible_with_buffer(
    rect: &ElementRect,
    viewport: &ViewportFrame,
    fraction: f32,
) -> bool {
    let fraction = fraction.max(0.0);
    let buffer_y = viewport.height * fraction;
    let buffer_x = viewport.width * fraction;

    rect.bottom() > -buffer_y
        && rect.top < viewport.height + buffer_y
        && rect.right() > -buffer_x
        && rect.left < viewport.width + buffer_x
}
