use cosmic_text::{Attrs, fontdb};
use std::sync::{Arc, RwLock};

// Embedded fallback face, used when the host has no usable system fonts.
const DEFAULT_FONT: &[u8] = include_bytes!("fonts/Inter-Regular.ttf");
pub const DEFAULT_FONT_NAME: &str = "Inter";

/// A font database that manages available fonts.
pub struct FontDatabase {
    inner: fontdb::Database,
}

impl FontDatabase {
    /// Create a new font database with system fonts loaded.
    ///
    /// Falls back to the embedded face when the host has none.
    pub fn new() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "Loaded system fonts");
        let mut db = Self { inner: db };
        if db.is_empty() {
            tracing::warn!("No system fonts found, using the embedded {}", DEFAULT_FONT_NAME);
            db.load_default_font();
        }
        db
    }

    /// Create a database holding only the embedded face.
    ///
    /// Output does not depend on which fonts the host has installed.
    pub fn with_default_font() -> Self {
        let mut db = Self::empty();
        db.load_default_font();
        db
    }

    /// Create an empty font database.
    pub fn empty() -> Self {
        Self {
            inner: fontdb::Database::new(),
        }
    }

    /// Load a font from bytes.
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.inner
            .load_font_source(fontdb::Source::Binary(Arc::new(data)));
    }

    pub fn load_default_font(&mut self) {
        self.load_font_data(DEFAULT_FONT.to_vec());
    }

    pub fn has_family(&self, family: &str) -> bool {
        self.inner
            .faces()
            .any(|face| face.families.iter().any(|(f, _)| f.eq_ignore_ascii_case(family)))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for FontDatabase {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared cosmic-text font system.
#[derive(Clone)]
pub struct FontSystem {
    inner: Arc<RwLock<cosmic_text::FontSystem>>,
}

impl FontSystem {
    pub fn new(db: FontDatabase) -> Self {
        let cosmic_font_system = cosmic_text::FontSystem::new_with_locale_and_db(
            sys_locale::get_locale().unwrap_or_else(|| String::from("en-US")),
            db.inner,
        );
        Self {
            inner: Arc::new(RwLock::new(cosmic_font_system)),
        }
    }

    pub fn with_system_fonts() -> Self {
        Self::new(FontDatabase::new())
    }

    /// Font system with only the embedded face loaded.
    pub fn with_default_font() -> Self {
        Self::new(FontDatabase::with_default_font())
    }

    pub(crate) fn inner(&self) -> Arc<RwLock<cosmic_text::FontSystem>> {
        self.inner.clone()
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::with_system_fonts()
    }
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Thin,
    ExtraLight,
    Light,
    Normal,
    Medium,
    SemiBold,
    Bold,
    ExtraBold,
    Black,
}

impl FontWeight {
    /// Parse a computed `font-weight` value.
    ///
    /// Numeric values snap to the nearest hundred; unknown input is `Normal`.
    pub fn from_css(value: &str) -> Self {
        let value = value.trim();
        match value.to_ascii_lowercase().as_str() {
            "normal" => return FontWeight::Normal,
            "bold" | "bolder" => return FontWeight::Bold,
            "lighter" => return FontWeight::Light,
            _ => {}
        }

        match value.parse::<f32>() {
            Ok(numeric) if numeric.is_finite() => Self::from_numeric(numeric),
            _ => FontWeight::Normal,
        }
    }

    fn from_numeric(weight: f32) -> Self {
        match (weight / 100.0).round().clamp(1.0, 9.0) as u16 {
            1 => FontWeight::Thin,
            2 => FontWeight::ExtraLight,
            3 => FontWeight::Light,
            4 => FontWeight::Normal,
            5 => FontWeight::Medium,
            6 => FontWeight::SemiBold,
            7 => FontWeight::Bold,
            8 => FontWeight::ExtraBold,
            _ => FontWeight::Black,
        }
    }

    pub(crate) fn to_cosmic(self) -> cosmic_text::Weight {
        match self {
            FontWeight::Thin => cosmic_text::Weight::THIN,
            FontWeight::ExtraLight => cosmic_text::Weight::EXTRA_LIGHT,
            FontWeight::Light => cosmic_text::Weight::LIGHT,
            FontWeight::Normal => cosmic_text::Weight::NORMAL,
            FontWeight::Medium => cosmic_text::Weight::MEDIUM,
            FontWeight::SemiBold => cosmic_text::Weight::SEMIBOLD,
            FontWeight::Bold => cosmic_text::Weight::BOLD,
            FontWeight::ExtraBold => cosmic_text::Weight::EXTRA_BOLD,
            FontWeight::Black => cosmic_text::Weight::BLACK,
        }
    }
}

/// Font family requested for a raster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum FontFamily {
    Named(String),
    #[default]
    SansSerif,
    Serif,
    Monospace,
}

impl FontFamily {
    /// Primary family of a CSS `font-family` list.
    ///
    /// `"Inter", Arial, sans-serif` resolves to `Named("Inter")`.
    pub fn from_css_list(value: &str) -> Self {
        value
            .split(',')
            .map(|part| part.trim().trim_matches(|c| c == '"' || c == '\''))
            .find(|part| !part.is_empty())
            .map(Self::from_name)
            .unwrap_or(FontFamily::SansSerif)
    }

    fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "sans-serif" | "system-ui" | "-apple-system" => FontFamily::SansSerif,
            "serif" => FontFamily::Serif,
            "monospace" => FontFamily::Monospace,
            _ => FontFamily::Named(name.to_string()),
        }
    }

    pub(crate) fn to_cosmic(&self) -> cosmic_text::Family<'_> {
        match self {
            FontFamily::Named(name) => cosmic_text::Family::Name(name),
            FontFamily::SansSerif => cosmic_text::Family::SansSerif,
            FontFamily::Serif => cosmic_text::Family::Serif,
            FontFamily::Monospace => cosmic_text::Family::Monospace,
        }
    }
}

pub(crate) fn attrs<'a>(family: &'a FontFamily, weight: FontWeight) -> Attrs<'a> {
    Attrs::new()
        .family(family.to_cosmic())
        .weight(weight.to_cosmic())
}
