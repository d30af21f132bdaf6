use vellum_text::TextError;
use vellum_viewport::PlacementError;

/// Errors surfaced by the overlay layer.
#[derive(Debug, Clone, PartialEq)]
pub enum VellumError {
    /// No rendering context could be obtained. There is no fallback path.
    UnsupportedEnvironment(String),

    /// An element could not be placed this tick.
    Placement(PlacementError),

    /// An element's text could not be rasterized.
    Text(TextError),
}

impl VellumError {
    /// Whether the visual layer cannot continue at all.
    pub fn is_fatal(&self) -> bool {
        matches!(self, VellumError::UnsupportedEnvironment(_))
    }

    /// Message to show to the visitor, if this error warrants one.
    pub fn user_notice(&self) -> Option<String> {
        match self {
            VellumError::UnsupportedEnvironment(reason) => Some(format!(
                "Your browser does not support the graphics features this page needs ({}).",
                reason
            )),
            VellumError::Placement(_) | VellumError::Text(_) => None,
        }
    }
}

impl std::fmt::Display for VellumError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VellumError::UnsupportedEnvironment(reason) => {
                write!(f, "Unsupported environment: {}", reason)
            }
            VellumError::Placement(err) => write!(f, "Placement failed: {}", err),
            VellumError::Text(err) => write!(f, "Text rasterization failed: {}", err),
        }
    }
}

impl std::error::Error for VellumError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VellumError::UnsupportedEnvironment(_) => None,
            VellumError::Placement(err) => Some(err),
            VellumError::Text(err) => Some(err),
        }
    }
}

impl From<PlacementError> for VellumError {
    fn from(err: PlacementError) -> Self {
        VellumError::Placement(err)
    }
}

impl From<TextError> for VellumError {
    fn from(err: TextError) -> Self {
        VellumError::Text(err)
    }
}

/// Result type for overlay operations.
pub type VellumResult<T> = Result<T, VellumError>;

/// Fail loudly when the host reports no rendering context.
pub fn require_context(available: bool, reason: &str) -> VellumResult<()> {
    if available {
        Ok(())
    } else {
        let err = VellumError::UnsupportedEnvironment(reason.to_string());
        tracing::error!("{}", err);
        Err(err)
    }
}
