//! Read-only perspective camera description.
//!
//! The scene owns the real camera; the mapper only needs its vertical field of
//! view, aspect ratio and distance from the content plane at `z = 0`.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::error::{PlacementError, PlacementResult};

/// Perspective camera looking down `-Z` at the origin from `(0, 0, distance)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraModel {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Width / height.
    pub aspect_ratio: f32,
    /// Distance from the camera to the content plane.
    pub distance: f32,
}

impl CameraModel {
    pub const fn perspective(fov_y_degrees: f32, aspect_ratio: f32, distance: f32) -> Self {
        Self {
            fov_y_degrees,
            aspect_ratio,
            distance,
        }
    }

    /// Same camera with another aspect ratio.
    pub fn with_aspect_ratio(self, aspect_ratio: f32) -> Self {
        Self {
            aspect_ratio,
            ..self
        }
    }

    /// Check the parameters produce a finite, non-degenerate frustum.
    pub fn validate(&self) -> PlacementResult<()> {
        let ok = self.fov_y_degrees.is_finite()
            && self.fov_y_degrees > 0.0
            && self.fov_y_degrees < 180.0
            && self.aspect_ratio.is_finite()
            && self.aspect_ratio > 0.0
            && self.distance.is_finite()
            && self.distance > 0.0;

        if ok {
            Ok(())
        } else {
            Err(PlacementError::InvalidCamera {
                fov_y_degrees: self.fov_y_degrees,
                aspect_ratio: self.aspect_ratio,
                distance: self.distance,
            })
        }
    }

    /// Height of the frustum slice at `z = 0`, in world units.
    #[inline]
    pub fn visible_height(&self) -> f32 {
        2.0 * (self.fov_y_degrees.to_radians() / 2.0).tan() * self.distance
    }

    /// Width of the frustum slice at `z = 0`, in world units.
    #[inline]
    pub fn visible_width(&self) -> f32 {
        self.visible_height() * self.aspect_ratio
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, self.distance), Vec3::ZERO, Vec3::Y);
        let projection = Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect_ratio,
            0.1,
            self.distance * 20.0,
        );
        projection * view
    }

    /// Project a world position back to screen pixels.
    ///
    /// Inverse of the mapper when the camera aspect matches the viewport.
    pub fn world_to_screen(&self, world: Vec3, viewport_size: Vec2) -> Vec2 {
        let clip = self.view_projection_matrix() * Vec4::new(world.x, world.y, world.z, 1.0);
        let ndc = Vec2::new(clip.x / clip.w, clip.y / clip.w);

        Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport_size.x,
            (1.0 - ndc.y) * 0.5 * viewport_size.y,
        )
    }
}

impl Default for CameraModel {
    /// The preloader camera: 45° FOV, 16:9, five units back.
    fn default() -> Self {
        Self::perspective(45.0, 16.0 / 9.0, 5.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_extent() {
        let camera = CameraModel::perspective(90.0, 2.0, 1.0);
        assert!((camera.visible_height() - 2.0).abs() < 1e-5);
        assert!((camera.visible_width() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        assert!(CameraModel::perspective(45.0, 1.5, 5.0).validate().is_ok());
        assert!(CameraModel::perspective(45.0, 1.5, 0.0).validate().is_err());
        assert!(CameraModel::perspective(0.0, 1.5, 5.0).validate().is_err());
        assert!(CameraModel::perspective(180.0, 1.5, 5.0).validate().is_err());
        assert!(CameraModel::perspective(45.0, f32::NAN, 5.0).validate().is_err());
    }

    #[test]
    fn test_origin_projects_to_screen_center() {
        let camera = CameraModel::default();
        let screen = camera.world_to_screen(Vec3::ZERO, Vec2::new(1920.0, 1080.0));
        assert!((screen.x - 960.0).abs() < 1e-2);
        assert!((screen.y - 540.0).abs() < 1e-2);
    }
}
