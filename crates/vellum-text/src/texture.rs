//! GPU texture settings for rasterized text.
//!
//! Text rasters are re-rendered whenever the viewport or pixel ratio changes,
//! so they are uploaded as a single mip level and sampled linearly.

use vellum_quality::QualityProfile;

use crate::rasterizer::RasterImage;

/// Texture format of every text raster.
pub const TEXT_TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureSettings {
    /// Anisotropy clamp; 1 disables anisotropic filtering.
    pub anisotropy: u16,
    pub format: wgpu::TextureFormat,
}

impl Default for TextureSettings {
    fn default() -> Self {
        Self {
            anisotropy: 1,
            format: TEXT_TEXTURE_FORMAT,
        }
    }
}

impl TextureSettings {
    pub fn from_profile(profile: &QualityProfile) -> Self {
        Self {
            anisotropy: profile.anisotropy.clamp(1, 16),
            ..Self::default()
        }
    }

    /// Always 1: mip chains are never generated for text.
    pub fn mip_level_count(&self) -> u32 {
        1
    }

    pub fn extent(image: &RasterImage) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        }
    }

    pub fn texture_descriptor<'a>(
        &self,
        image: &RasterImage,
        label: Option<&'a str>,
    ) -> wgpu::TextureDescriptor<'a> {
        wgpu::TextureDescriptor {
            label,
            size: Self::extent(image),
            mip_level_count: self.mip_level_count(),
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: self.format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        }
    }

    pub fn sampler_descriptor<'a>(&self, label: Option<&'a str>) -> wgpu::SamplerDescriptor<'a> {
        // Anisotropic sampling requires every filter to be linear.
        let mipmap_filter = if self.anisotropy > 1 {
            wgpu::FilterMode::Linear
        } else {
            wgpu::FilterMode::Nearest
        };

        wgpu::SamplerDescriptor {
            label,
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter,
            anisotropy_clamp: self.anisotropy,
            ..Default::default()
        }
    }

    /// Create the texture and upload `image` into it.
    pub fn upload(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &RasterImage,
        label: Option<&str>,
    ) -> wgpu::Texture {
        let texture = device.create_texture(&self.texture_descriptor(image, label));
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(image.bytes_per_row()),
                rows_per_image: Some(image.height),
            },
            Self::extent(image),
        );
        texture
    }
}
