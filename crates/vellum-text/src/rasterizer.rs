//! CPU text rasterization into RGBA8 canvases.

use cosmic_text::{Buffer, Metrics, Shaping, SwashCache};
use vellum_core::Color;
use vellum_core::profiling::{profile_function, profile_scope};

use crate::error::{TextError, TextResult};
use crate::font::{FontSystem, attrs};
use crate::style::{CanvasSizing, RasterDevice, RasterRequest, ScaleRule, TextAlign};

/// Line height as a multiple of the scaled font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Largest canvas edge the rasterizer will produce.
pub const DEFAULT_MAX_DIMENSION: u32 = 8192;

/// Straight-alpha RGBA8 raster.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Raster pixels per CSS pixel.
    pub scale: f32,
}

impl RasterImage {
    fn blank(width: u32, height: u32, scale: f32) -> Self {
        Self {
            pixels: vec![0; width as usize * height as usize * 4],
            width,
            height,
            scale,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.pixels[i..i + 4]);
        Some(px)
    }

    /// True when every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.pixels.chunks_exact(4).all(|px| px[3] == 0)
    }

    /// Source-over blend of a uniformly coloured span.
    fn blend_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: cosmic_text::Color) {
        let src_a = color.a() as f32 / 255.0;
        if src_a <= 0.0 {
            return;
        }
        let src = [color.r() as f32, color.g() as f32, color.b() as f32];

        for dy in 0..h as i32 {
            let py = y + dy;
            if py < 0 || py >= self.height as i32 {
                continue;
            }
            for dx in 0..w as i32 {
                let px = x + dx;
                if px < 0 || px >= self.width as i32 {
                    continue;
                }
                let i = (py as usize * self.width as usize + px as usize) * 4;
                let dst = &mut self.pixels[i..i + 4];
                let dst_a = dst[3] as f32 / 255.0;
                let out_a = src_a + dst_a * (1.0 - src_a);
                for c in 0..3 {
                    let blended =
                        (src[c] * src_a + dst[c] as f32 * dst_a * (1.0 - src_a)) / out_a;
                    dst[c] = blended.round().clamp(0.0, 255.0) as u8;
                }
                dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}

/// Shaped line ready to draw.
struct ShapedLine {
    buffer: Buffer,
    width: f32,
}

/// Layout computed before any pixel is touched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasLayout {
    pub width: u32,
    pub height: u32,
    pub scale: f32,
    pub font_px: f32,
    pub line_height: f32,
    pub padding: f32,
}

/// Owns the font system and glyph cache used for every raster.
pub struct TextRasterizer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    max_dimension: u32,
}

impl TextRasterizer {
    pub fn new(font_system: FontSystem) -> Self {
        Self {
            font_system,
            swash_cache: SwashCache::new(),
            max_dimension: DEFAULT_MAX_DIMENSION,
        }
    }

    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension.max(1);
        self
    }

    pub fn font_system(&self) -> &FontSystem {
        &self.font_system
    }

    /// Render `request` for `device`.
    ///
    /// Output depends only on the request, the device metrics and the loaded
    /// fonts.
    pub fn rasterize(
        &mut self,
        request: &RasterRequest,
        device: &RasterDevice,
    ) -> TextResult<RasterImage> {
        profile_function!();

        if request.text.trim().is_empty() {
            return Err(TextError::EmptyText);
        }
        if !(request.font_size.is_finite() && request.font_size > 0.0) {
            return Err(TextError::InvalidFontSize(request.font_size));
        }

        let scale = ScaleRule::for_sizing(request.sizing, device.class).apply(device.pixel_ratio);
        let font_px = request.font_size * scale;
        let line_height = font_px * LINE_HEIGHT_FACTOR;

        let lines = self.shape_lines(request, font_px, line_height)?;
        let layout = self.layout(request, device, &lines, scale, font_px, line_height)?;

        tracing::trace!(
            width = layout.width,
            height = layout.height,
            scale,
            lines = lines.len(),
            "Rasterizing text"
        );

        let mut image = RasterImage::blank(layout.width, layout.height, scale);
        self.draw_lines(&mut image, request, &lines, &layout)?;
        Ok(image)
    }

    fn shape_lines(
        &mut self,
        request: &RasterRequest,
        font_px: f32,
        line_height: f32,
    ) -> TextResult<Vec<ShapedLine>> {
        profile_scope!("shape_lines");
        let font_system = self.font_system.inner();
        let mut font_system = font_system.write()?;

        // cosmic-text cannot shape without at least one matching face.
        let attrs = attrs(&request.family, request.weight);
        if font_system.get_font_matches(attrs).is_empty() {
            return Err(TextError::NoFonts);
        }

        let lines = request
            .lines()
            .map(|line| {
                let mut buffer = Buffer::new(&mut font_system, Metrics::new(font_px, line_height));
                buffer.set_size(&mut font_system, None, None);
                buffer.set_text(&mut font_system, line, attrs, Shaping::Advanced);
                buffer.shape_until_scroll(&mut font_system, false);

                let width = buffer
                    .layout_runs()
                    .map(|run| run.line_w)
                    .fold(0.0_f32, f32::max);
                ShapedLine { buffer, width }
            })
            .collect();
        Ok(lines)
    }

    fn layout(
        &self,
        request: &RasterRequest,
        device: &RasterDevice,
        lines: &[ShapedLine],
        scale: f32,
        font_px: f32,
        line_height: f32,
    ) -> TextResult<CanvasLayout> {
        let (width, height, padding) = match request.sizing {
            CanvasSizing::FitText => {
                let padding = device.base_padding() * scale;
                let widest = lines.iter().map(|l| l.width).fold(0.0_f32, f32::max);
                let (min_w, min_h) = device.min_canvas();
                let width = ((widest + padding * 2.0).ceil() as u32).max(min_w);
                let height =
                    ((lines.len() as f32 * line_height + padding * 2.0).ceil() as u32).max(min_h);
                (width, height, padding)
            }
            CanvasSizing::Banner => {
                let (base_w, base_h) = device.banner_canvas();
                let width = (base_w as f32 * scale).ceil() as u32;
                let height = (base_h as f32 * scale).ceil() as u32;
                (width, height, 0.0)
            }
        };

        if width > self.max_dimension || height > self.max_dimension {
            return Err(TextError::CanvasTooLarge {
                width,
                height,
                max: self.max_dimension,
            });
        }

        Ok(CanvasLayout {
            width,
            height,
            scale,
            font_px,
            line_height,
            padding,
        })
    }

    fn draw_lines(
        &mut self,
        image: &mut RasterImage,
        request: &RasterRequest,
        lines: &[ShapedLine],
        layout: &CanvasLayout,
    ) -> TextResult<()> {
        profile_scope!("draw_lines");
        let font_system = self.font_system.inner();
        let mut font_system = font_system.write()?;
        let color = to_cosmic_color(request.color);
        let canvas_w = layout.width as f32;

        let block_top = match request.sizing {
            CanvasSizing::FitText => layout.padding,
            CanvasSizing::Banner => {
                (layout.height as f32 - lines.len() as f32 * layout.line_height) / 2.0
            }
        };

        for (i, line) in lines.iter().enumerate() {
            let x = match (request.sizing, request.align) {
                (CanvasSizing::Banner, _) | (_, TextAlign::Center) => (canvas_w - line.width) / 2.0,
                (_, TextAlign::Left) => layout.padding,
                (_, TextAlign::Right) => canvas_w - layout.padding - line.width,
            };
            let y = block_top + i as f32 * layout.line_height;
            let (ox, oy) = (x.round() as i32, y.round() as i32);

            line.buffer.draw(
                &mut font_system,
                &mut self.swash_cache,
                color,
                |gx, gy, w, h, c| image.blend_rect(ox + gx, oy + gy, w, h, c),
            );
        }
        Ok(())
    }
}

impl Default for TextRasterizer {
    fn default() -> Self {
        Self::new(FontSystem::default())
    }
}

fn to_cosmic_color(color: Color) -> cosmic_text::Color {
    let [r, g, b, a] = color.to_rgba8();
    cosmic_text::Color::rgba(r, g, b, a)
}
