use std::ops::Mul;

/// Snapshot of a DOM element's bounding box in CSS pixels.
///
/// Values are read fresh from the host each query and never cached across
/// frames; the origin is the top-left of the layout viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ElementRect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Centre point in CSS pixels.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// A rect that cannot be placed: zero, negative or non-finite extents.
    pub fn is_degenerate(&self) -> bool {
        !(self.left.is_finite() && self.top.is_finite())
            || !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    /// Same rect moved vertically by `dy` pixels.
    pub fn offset_y(self, dy: f32) -> Self {
        Self {
            top: self.top + dy,
            ..self
        }
    }
}

/// Current viewport dimensions in CSS pixels plus the device pixel ratio.
///
/// Recomputed on every resize/orientation event. Replace the value, never
/// patch it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportFrame {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl ViewportFrame {
    pub const fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    /// Positive, finite width and height.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// The full viewport as an element rect, handy for visibility tests.
    pub fn as_rect(&self) -> ElementRect {
        ElementRect::new(0.0, 0.0, self.width, self.height)
    }

    /// Backing-store size in device pixels for a canvas covering the viewport.
    pub fn physical_size(&self, pixel_ratio: f32) -> Size<u32> {
        Size::new(
            (self.width * pixel_ratio).floor().max(1.0) as u32,
            (self.height * pixel_ratio).floor().max(1.0) as u32,
        )
    }
}

impl Default for ViewportFrame {
    fn default() -> Self {
        Self::new(1920.0, 1080.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size<T> {
    pub width: T,
    pub height: T,
}

impl<T> Size<T> {
    pub fn new(width: T, height: T) -> Self {
        Size { width, height }
    }
}

impl<T: Mul + Copy> Mul<T> for Size<T> {
    type Output = Size<<T as Mul>::Output>;

    fn mul(self, rhs: T) -> Self::Output {
        Size {
            width: self.width * rhs,
            height: self.height * rhs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = ElementRect::new(860.0, 510.0, 200.0, 60.0);
        assert_eq!(rect.right(), 1060.0);
        assert_eq!(rect.bottom(), 570.0);
        assert_eq!(rect.center(), (960.0, 540.0));
    }

    #[test]
    fn test_rect_degenerate() {
        assert!(ElementRect::new(0.0, 0.0, 0.0, 10.0).is_degenerate());
        assert!(ElementRect::new(0.0, 0.0, 10.0, 0.0).is_degenerate());
        assert!(ElementRect::new(f32::NAN, 0.0, 10.0, 10.0).is_degenerate());
        assert!(!ElementRect::new(-50.0, -50.0, 10.0, 10.0).is_degenerate());
    }

    #[test]
    fn test_viewport_physical_size() {
        let frame = ViewportFrame::new(390.0, 844.0, 3.0);
        assert_eq!(frame.physical_size(1.5), Size::new(585, 1266));
        assert!(frame.is_valid());
        assert!(!ViewportFrame::new(0.0, 844.0, 1.0).is_valid());
    }
}
