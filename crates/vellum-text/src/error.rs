/// Errors that can occur while rasterizing text.
#[derive(Debug, Clone, PartialEq)]
pub enum TextError {
    /// Nothing but whitespace to draw.
    EmptyText,

    /// Font size was zero, negative or not finite.
    InvalidFontSize(f32),

    /// Resulting canvas exceeds the texture dimension limit.
    CanvasTooLarge { width: u32, height: u32, max: u32 },

    /// No loaded face can shape the requested style.
    NoFonts,

    /// Lock was poisoned (RwLock/Mutex).
    LockPoisoned(String),
}

impl std::fmt::Display for TextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextError::EmptyText => write!(f, "Text is empty"),
            TextError::InvalidFontSize(size) => write!(f, "Invalid font size: {}", size),
            TextError::CanvasTooLarge { width, height, max } => write!(
                f,
                "Text canvas {}x{} exceeds the {}px texture limit",
                width, height, max
            ),
            TextError::NoFonts => write!(f, "No font available to shape the text"),
            TextError::LockPoisoned(msg) => {
                write!(
                    f,
                    "Lock was poisoned (likely due to panic in another thread): {}",
                    msg
                )
            }
        }
    }
}

impl std::error::Error for TextError {}

impl<T> From<std::sync::PoisonError<T>> for TextError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        TextError::LockPoisoned(err.to_string())
    }
}

/// Result type for text operations.
pub type TextResult<T> = Result<T, TextError>;
