//! Trait abstracting scene resource management.

use glam::Vec3;
use vellum_core::Color;
use vellum_text::{RasterImage, TextureSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshHandle(pub u64);

/// Flat rectangle in world units, centred on its origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneGeometry {
    pub width: f32,
    pub height: f32,
}

impl PlaneGeometry {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Largest per-axis difference to `other`.
    pub fn max_abs_diff(&self, other: &PlaneGeometry) -> f32 {
        (self.width - other.width)
            .abs()
            .max((self.height - other.height).abs())
    }
}

/// Raster plus sampling settings for one texture.
#[derive(Debug, Clone, Copy)]
pub struct TextureUpload<'a> {
    pub label: &'a str,
    pub image: &'a RasterImage,
    pub settings: TextureSettings,
}

impl<'a> TextureUpload<'a> {
    pub fn descriptor(&self) -> wgpu::TextureDescriptor<'a> {
        self.settings.texture_descriptor(self.image, Some(self.label))
    }
}

/// Per-frame mesh state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshState {
    pub position: Vec3,
    /// Uniform scale on top of the geometry size.
    pub scale: f32,
    pub visible: bool,
    /// Seconds since the element first became visible.
    pub canvas_time: f32,
    /// Highlight tint mix in `[0, 1]`.
    pub highlight: f32,
    pub highlight_color: Color,
}

impl Default for MeshState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: 1.0,
            visible: false,
            canvas_time: 0.0,
            highlight: 0.0,
            highlight_color: Color::RED,
        }
    }
}

/// Trait abstracting the renderer that owns meshes and textures.
///
/// Methods take `&self` so one backend can be shared between the overlay,
/// the intro banner and the host; implementations use interior mutability.
/// After a context loss every handle is invalid and must not be disposed.
pub trait SceneBackend: Send + Sync {
    fn create_geometry(&self, geometry: PlaneGeometry) -> GeometryHandle;

    fn create_texture(&self, upload: &TextureUpload<'_>) -> TextureHandle;

    fn create_mesh(&self, geometry: GeometryHandle, texture: TextureHandle) -> MeshHandle;

    /// Point `mesh` at a different geometry. The previous geometry is not
    /// disposed.
    fn set_mesh_geometry(&self, mesh: MeshHandle, geometry: GeometryHandle);

    fn update_mesh(&self, mesh: MeshHandle, state: &MeshState);

    fn dispose_geometry(&self, geometry: GeometryHandle);

    fn dispose_texture(&self, texture: TextureHandle);

    /// Remove `mesh` from the scene. Its geometry and texture are left alone.
    fn dispose_mesh(&self, mesh: MeshHandle);

    fn is_context_lost(&self) -> bool;
}
