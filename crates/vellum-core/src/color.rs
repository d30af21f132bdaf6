/// An RGBA color with `f32` components in the `0.0..=1.0` range.
///
/// ```
/// use vellum_core::Color;
///
/// let red = Color::from_hex(0xFF0000);
/// let css = Color::from_css("rgba(255, 0, 0, 0.5)").unwrap();
/// assert_eq!(css.r, red.r);
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from 8-bit RGBA values (0–255 mapped to 0.0–1.0).
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create a color from a 24-bit RGB hex value (e.g. `0xFF8800`).
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as u8;
        let g = ((hex >> 8) & 0xFF) as u8;
        let b = (hex & 0xFF) as u8;
        Self::from_rgba_u8(r, g, b, 255)
    }

    /// Parse a computed-style color string.
    ///
    /// Accepts the forms browsers report from `getComputedStyle` (`rgb()`,
    /// `rgba()`) plus hex and a handful of keywords used in markup.
    pub fn from_css(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();

        if let Some(hex) = value.strip_prefix('#') {
            return parse_hex(hex);
        }

        if let Some(args) = value
            .strip_prefix("rgba(")
            .or_else(|| value.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_rgb_args(args);
        }

        match value.as_str() {
            "white" => Some(Self::WHITE),
            "black" => Some(Self::BLACK),
            "red" => Some(Self::RED),
            "transparent" => Some(Self::TRANSPARENT),
            _ => None,
        }
    }

    /// Convert to straight-alpha RGBA8.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Linear interpolation toward `other`; `t` is clamped to `0..=1`.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color::rgba(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 3]> for Color {
    fn from(arr: [f32; 3]) -> Self {
        Self::rgb(arr[0], arr[1], arr[2])
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let digit = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok();
    let pair = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        3 => Some(Color::from_rgba_u8(
            digit(0)? * 17,
            digit(1)? * 17,
            digit(2)? * 17,
            255,
        )),
        6 => Some(Color::from_rgba_u8(pair(0)?, pair(2)?, pair(4)?, 255)),
        8 => Some(Color::from_rgba_u8(pair(0)?, pair(2)?, pair(4)?, pair(6)?)),
        _ => None,
    }
}

fn parse_rgb_args(args: &str) -> Option<Color> {
    let parts: Vec<&str> = args
        .split([',', ' ', '/'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }

    let channel = |s: &str| -> Option<f32> {
        match s.strip_suffix('%') {
            Some(pct) => pct.parse::<f32>().ok().map(|v| v / 100.0),
            None => s.parse::<f32>().ok().map(|v| v / 255.0),
        }
    };
    let alpha = match parts.get(3) {
        Some(s) => match s.strip_suffix('%') {
            Some(pct) => pct.parse::<f32>().ok()? / 100.0,
            None => s.parse::<f32>().ok()?,
        },
        None => 1.0,
    };

    Some(Color::rgba(
        channel(parts[0])?.clamp(0.0, 1.0),
        channel(parts[1])?.clamp(0.0, 1.0),
        channel(parts[2])?.clamp(0.0, 1.0),
        alpha.clamp(0.0, 1.0),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_css_computed_style() {
        assert_eq!(Color::from_css("rgb(255, 255, 255)"), Some(Color::WHITE));
        let c = Color::from_css("rgba(255, 0, 0, 0.5)").unwrap();
        assert_eq!(c.to_rgba8(), [255, 0, 0, 128]);
    }

    #[test]
    fn test_from_css_hex_and_keywords() {
        assert_eq!(Color::from_css("#ff0000"), Some(Color::RED));
        assert_eq!(Color::from_css("#FFF"), Some(Color::WHITE));
        assert_eq!(Color::from_css(" white "), Some(Color::WHITE));
        assert_eq!(Color::from_css("chartreuse-ish"), None);
        assert_eq!(Color::from_css("#12"), None);
    }

    #[test]
    fn test_lerp_clamps() {
        let mid = Color::WHITE.lerp(Color::RED, 0.5);
        assert_eq!(mid.r, 1.0);
        assert_eq!(mid.g, 0.5);
        assert_eq!(Color::WHITE.lerp(Color::RED, 4.0), Color::RED);
    }
}
