//! Vellum Text - text rasterization with cosmic-text
//!
//! Renders a styled string into a straight-alpha RGBA8 canvas sized for use as
//! a textured quad:
//! - Resolution follows the device pixel ratio with a per-class floor
//! - Multi-line input split on `\n`, stacked at 1.2x the scaled font size
//! - Left, center or right alignment inside symmetric padding
//! - Single-mip, linearly filtered texture settings for wgpu
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vellum_core::Color;
//! use vellum_quality::DeviceClass;
//! use vellum_text::{FontWeight, RasterDevice, RasterRequest, TextAlign, TextRasterizer};
//!
//! let mut rasterizer = TextRasterizer::default();
//! let request = RasterRequest::new("Matter", 120.0)
//!     .color(Color::WHITE)
//!     .align(TextAlign::Center)
//!     .weight(FontWeight::Bold);
//!
//! let image = rasterizer
//!     .rasterize(&request, &RasterDevice::new(DeviceClass::Desktop, 2.0))
//!     .unwrap();
//! assert!(image.width >= 512);
//! ```

pub mod cache;
pub mod error;
pub mod font;
pub mod rasterizer;
pub mod style;
pub mod texture;

pub use cache::{RasterCache, RasterKey};
pub use error::{TextError, TextResult};
pub use font::{DEFAULT_FONT_NAME, FontDatabase, FontFamily, FontSystem, FontWeight};
pub use rasterizer::{CanvasLayout, LINE_HEIGHT_FACTOR, RasterImage, TextRasterizer};
pub use style::{CanvasSizing, RasterDevice, RasterRequest, ScaleRule, TextAlign};
pub use texture::{TEXT_TEXTURE_FORMAT, TextureSettings};
