//! DOM-side collaborators: element ids, computed styles and the source that
//! reports them.

use vellum_core::alloc::HashMap;
use vellum_core::{Color, ElementRect};
use vellum_text::{FontFamily, FontWeight, RasterRequest, TextAlign};

/// Stable identifier for a tracked text element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The subset of computed CSS the rasterizer needs, as the host reports it.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedStyle {
    /// CSS pixels.
    pub font_size: f32,
    /// Raw `font-family` list.
    pub font_family: String,
    /// Raw `font-weight`.
    pub font_weight: String,
    /// Raw `color`.
    pub color: String,
    /// Raw `text-align`.
    pub text_align: String,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            font_family: "sans-serif".to_string(),
            font_weight: "400".to_string(),
            color: "rgb(255, 255, 255)".to_string(),
            text_align: "center".to_string(),
        }
    }
}

impl ComputedStyle {
    pub fn new(font_size: f32) -> Self {
        Self {
            font_size,
            ..Self::default()
        }
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    pub fn with_weight(mut self, weight: impl Into<String>) -> Self {
        self.font_weight = weight.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_align(mut self, align: impl Into<String>) -> Self {
        self.text_align = align.into();
        self
    }

    /// Build the raster request for `text` in this style. Unparseable colours
    /// fall back to white.
    pub fn to_request(&self, text: &str) -> RasterRequest {
        let color = Color::from_css(&self.color).unwrap_or_else(|| {
            tracing::debug!(color = %self.color, "unrecognised CSS color, using white");
            Color::WHITE
        });
        RasterRequest::new(text, self.font_size)
            .color(color)
            .align(TextAlign::from_css(&self.text_align))
            .family(FontFamily::from_css_list(&self.font_family))
            .weight(FontWeight::from_css(&self.font_weight))
    }
}

/// Where the overlay reads element geometry, text and style from.
///
/// `None` from any lookup means the element is gone.
pub trait ElementSource {
    fn element_ids(&self) -> Vec<ElementId>;

    /// Bounding box in CSS pixels relative to the viewport.
    fn rect(&self, id: ElementId) -> Option<ElementRect>;

    fn text(&self, id: ElementId) -> Option<String>;

    fn style(&self, id: ElementId) -> Option<ComputedStyle>;
}

/// In-memory element source, for hosts that snapshot the page themselves.
#[derive(Debug, Clone, Default)]
pub struct StaticElements {
    elements: HashMap<ElementId, StaticElement>,
}

#[derive(Debug, Clone)]
struct StaticElement {
    rect: ElementRect,
    text: String,
    style: ComputedStyle,
}

impl StaticElements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        id: ElementId,
        rect: ElementRect,
        text: impl Into<String>,
        style: ComputedStyle,
    ) {
        self.elements.insert(
            id,
            StaticElement {
                rect,
                text: text.into(),
                style,
            },
        );
    }

    pub fn remove(&mut self, id: ElementId) -> bool {
        self.elements.remove(&id).is_some()
    }

    /// Replace an element's rect. Returns `false` if `id` is unknown.
    pub fn set_rect(&mut self, id: ElementId, rect: ElementRect) -> bool {
        match self.elements.get_mut(&id) {
            Some(element) => {
                element.rect = rect;
                true
            }
            None => false,
        }
    }

    /// Shift every element vertically, as a page scroll does.
    pub fn scroll_by(&mut self, dy: f32) {
        for element in self.elements.values_mut() {
            element.rect = element.rect.offset_y(-dy);
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl ElementSource for StaticElements {
    fn element_ids(&self) -> Vec<ElementId> {
        let mut ids: Vec<_> = self.elements.keys().copied().collect();
        ids.sort();
        ids
    }

    fn rect(&self, id: ElementId) -> Option<ElementRect> {
        self.elements.get(&id).map(|e| e.rect)
    }

    fn text(&self, id: ElementId) -> Option<String> {
        self.elements.get(&id).map(|e| e.text.clone())
    }

    fn style(&self, id: ElementId) -> Option<ComputedStyle> {
        self.elements.get(&id).map(|e| e.style.clone())
    }
}

/// Per-element visibility history.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementRecord {
    /// Set the first time the element enters the buffered viewport.
    pub ever_visible: bool,
    /// Overlay time (seconds) at which the current visible stretch began.
    pub visible_since: Option<f32>,
    pub last_rect: Option<ElementRect>,
}

impl ElementRecord {
    /// Seconds visible as of `elapsed`, or zero while hidden.
    pub fn canvas_time(&self, elapsed: f32) -> f32 {
        self.visible_since
            .map(|since| (elapsed - since).max(0.0))
            .unwrap_or(0.0)
    }
}
