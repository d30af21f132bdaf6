/// Reasons a rectangle cannot be turned into a world placement.
///
/// None of these are fatal: the caller skips the element for this tick and
/// tries again on the next one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementError {
    /// The element has zero, negative or non-finite extents.
    DegenerateRect { width: f32, height: f32 },

    /// Camera parameters would produce a non-finite projection.
    InvalidCamera {
        fov_y_degrees: f32,
        aspect_ratio: f32,
        distance: f32,
    },

    /// The viewport has no area.
    InvalidViewport { width: f32, height: f32 },
}

impl std::fmt::Display for PlacementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementError::DegenerateRect { width, height } => {
                write!(f, "Element rect is not placeable: {}x{}", width, height)
            }
            PlacementError::InvalidCamera {
                fov_y_degrees,
                aspect_ratio,
                distance,
            } => write!(
                f,
                "Invalid camera: fov {}°, aspect {}, distance {}",
                fov_y_degrees, aspect_ratio, distance
            ),
            PlacementError::InvalidViewport { width, height } => {
                write!(f, "Invalid viewport: {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for PlacementError {}

/// Result type for placement operations.
pub type PlacementResult<T> = Result<T, PlacementError>;
