//! Screen rectangle to world placement projection.
//!
//! Content lives on the `z = 0` plane. A rectangle's centre is normalized to
//! NDC against the supplied viewport, then scaled by the half extents of the
//! frustum slice at that plane.

use glam::Vec3;
use vellum_core::math::is_finite_vec3;
use vellum_core::{ElementRect, ViewportFrame};

use crate::camera::CameraModel;
use crate::error::{PlacementError, PlacementResult};

/// Plane size in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WorldSize {
    pub width: f32,
    pub height: f32,
}

impl WorldSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Largest per-axis difference, used to decide whether geometry is stale.
    pub fn max_abs_diff(&self, other: &WorldSize) -> f32 {
        (self.width - other.width)
            .abs()
            .max((self.height - other.height).abs())
    }

    pub fn scaled(&self, factor: f32) -> WorldSize {
        WorldSize::new(self.width * factor, self.height * factor)
    }
}

/// Where a mesh goes this tick.
///
/// `size` is the geometry size; `scale` is the uniform mesh scale that keeps
/// the on-screen size constant while the mobile URL bar moves. The rendered
/// extent is `size * scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldPlacement {
    pub position: Vec3,
    pub size: WorldSize,
    pub scale: f32,
}

impl WorldPlacement {
    /// Extent as drawn, after the compensation scale.
    pub fn rendered_size(&self) -> WorldSize {
        self.size.scaled(self.scale)
    }
}

fn check_inputs(
    rect: &ElementRect,
    camera: &CameraModel,
    viewport: &ViewportFrame,
) -> PlacementResult<()> {
    if rect.is_degenerate() {
        return Err(PlacementError::DegenerateRect {
            width: rect.width,
            height: rect.height,
        });
    }
    if !viewport.is_valid() {
        return Err(PlacementError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    camera.validate()
}

/// World position of the rect centre on the `z = 0` plane.
pub fn map_rect_to_world_position(
    rect: &ElementRect,
    camera: &CameraModel,
    viewport: &ViewportFrame,
) -> PlacementResult<Vec3> {
    check_inputs(rect, camera, viewport)?;

    let (center_x, center_y) = rect.center();
    let ndc_x = (center_x / viewport.width) * 2.0 - 1.0;
    let ndc_y = -(center_y / viewport.height) * 2.0 + 1.0;

    let world_height = camera.visible_height();
    let world_width = world_height * camera.aspect_ratio;

    let position = Vec3::new(ndc_x * (world_width / 2.0), ndc_y * (world_height / 2.0), 0.0);

    // Rects far off-screen can still overflow with extreme inputs.
    if !is_finite_vec3(position) {
        return Err(PlacementError::DegenerateRect {
            width: rect.width,
            height: rect.height,
        });
    }
    Ok(position)
}

/// World size of the rect on the `z = 0` plane.
pub fn map_rect_to_world_size(
    rect: &ElementRect,
    camera: &CameraModel,
    viewport: &ViewportFrame,
) -> PlacementResult<WorldSize> {
    check_inputs(rect, camera, viewport)?;

    let world_height = camera.visible_height();
    let world_width = world_height * camera.aspect_ratio;

    let size = WorldSize::new(
        (rect.width / viewport.width) * world_width,
        (rect.height / viewport.height) * world_height,
    );

    if !(size.width.is_finite() && size.height.is_finite()) {
        return Err(PlacementError::DegenerateRect {
            width: rect.width,
            height: rect.height,
        });
    }
    Ok(size)
}
