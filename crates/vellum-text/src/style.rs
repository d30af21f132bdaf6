//! Raster request description.

use vellum_core::Color;
use vellum_quality::{DeviceClass, DeviceContext};

use crate::font::{FontFamily, FontWeight};

/// Horizontal alignment of each line inside the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlign {
    /// Map a computed `text-align` value. Anything unrecognised centres.
    pub fn from_css(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" | "start" => TextAlign::Left,
            "right" | "end" => TextAlign::Right,
            _ => TextAlign::Center,
        }
    }
}

/// How the canvas size is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CanvasSizing {
    /// Canvas wraps the measured text plus padding, with a minimum size.
    #[default]
    FitText,
    /// Fixed banner canvas with the text centred both ways.
    Banner,
}

/// Resolution multiplier rule: `max(floor, pixel_ratio * multiplier)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleRule {
    pub floor: f32,
    pub multiplier: f32,
}

impl ScaleRule {
    pub fn apply(&self, pixel_ratio: f32) -> f32 {
        self.floor.max(pixel_ratio * self.multiplier)
    }

    /// Rule for `sizing` on `class`.
    pub fn for_sizing(sizing: CanvasSizing, class: DeviceClass) -> Self {
        match (sizing, class.is_constrained()) {
            (CanvasSizing::FitText, true) => ScaleRule {
                floor: 2.0,
                multiplier: 1.5,
            },
            (CanvasSizing::FitText, false) => ScaleRule {
                floor: 3.0,
                multiplier: 2.0,
            },
            (CanvasSizing::Banner, true) => ScaleRule {
                floor: 1.5,
                multiplier: 1.5,
            },
            (CanvasSizing::Banner, false) => ScaleRule {
                floor: 2.0,
                multiplier: 2.0,
            },
        }
    }
}

/// Device metrics the rasterizer is allowed to depend on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterDevice {
    pub class: DeviceClass,
    /// Pixel ratio after the quality profile cap.
    pub pixel_ratio: f32,
}

impl RasterDevice {
    pub fn new(class: DeviceClass, pixel_ratio: f32) -> Self {
        Self { class, pixel_ratio }
    }

    /// Padding around fit-text canvases, before scaling.
    pub fn base_padding(&self) -> f32 {
        if self.class.is_constrained() { 10.0 } else { 20.0 }
    }

    /// Minimum fit-text canvas size in raster pixels.
    pub fn min_canvas(&self) -> (u32, u32) {
        if self.class.is_constrained() {
            (256, 64)
        } else {
            (512, 128)
        }
    }

    /// Banner canvas size before scaling.
    pub fn banner_canvas(&self) -> (u32, u32) {
        if self.class.is_constrained() {
            (512, 128)
        } else {
            (1024, 256)
        }
    }
}

impl From<&DeviceContext> for RasterDevice {
    fn from(ctx: &DeviceContext) -> Self {
        Self::new(ctx.class, ctx.pixel_ratio())
    }
}

/// Everything that determines the output pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterRequest {
    pub text: String,
    /// CSS pixel font size.
    pub font_size: f32,
    pub color: Color,
    pub align: TextAlign,
    pub family: FontFamily,
    pub weight: FontWeight,
    pub sizing: CanvasSizing,
}

impl RasterRequest {
    pub fn new(text: impl Into<String>, font_size: f32) -> Self {
        Self {
            text: text.into(),
            font_size,
            color: Color::WHITE,
            align: TextAlign::Center,
            family: FontFamily::SansSerif,
            weight: FontWeight::Normal,
            sizing: CanvasSizing::FitText,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn family(mut self, family: FontFamily) -> Self {
        self.family = family;
        self
    }

    pub fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn sizing(mut self, sizing: CanvasSizing) -> Self {
        self.sizing = sizing;
        self
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n').map(|line| line.trim_end_matches('\r'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_from_css() {
        assert_eq!(TextAlign::from_css("start"), TextAlign::Left);
        assert_eq!(TextAlign::from_css("LEFT"), TextAlign::Left);
        assert_eq!(TextAlign::from_css("end"), TextAlign::Right);
        assert_eq!(TextAlign::from_css("justify"), TextAlign::Center);
    }

    #[test]
    fn test_scale_rule_floors() {
        let desktop = ScaleRule::for_sizing(CanvasSizing::FitText, DeviceClass::Desktop);
        assert_eq!(desktop.apply(1.0), 3.0);
        assert_eq!(desktop.apply(2.0), 4.0);

        let mobile = ScaleRule::for_sizing(CanvasSizing::FitText, DeviceClass::Mobile);
        assert_eq!(mobile.apply(1.0), 2.0);
        assert_eq!(mobile.apply(2.0), 3.0);

        let banner = ScaleRule::for_sizing(CanvasSizing::Banner, DeviceClass::MobileLowEnd);
        assert_eq!(banner.apply(0.5), 1.5);
    }

    #[test]
    fn test_lines_split_on_breaks() {
        let request = RasterRequest::new("one\r\ntwo\nthree", 16.0);
        assert_eq!(request.lines().collect::<Vec<_>>(), vec!["one", "two", "three"]);
    }
}
