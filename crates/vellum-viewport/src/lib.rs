//! Vellum Viewport - screen rectangles to world placements
//!
//! Converts DOM bounding boxes into positions and sizes on the `z = 0` plane of
//! a perspective camera, answers buffered visibility queries, and tells real
//! resizes apart from mobile URL-bar drift.
//!
//! ```
//! use vellum_core::{ElementRect, ViewportFrame};
//! use vellum_viewport::{CameraModel, map_rect_to_world_position};
//!
//! let camera = CameraModel::perspective(45.0, 16.0 / 9.0, 5.0);
//! let viewport = ViewportFrame::new(1920.0, 1080.0, 1.0);
//! let rect = ElementRect::new(860.0, 510.0, 200.0, 60.0);
//!
//! let position = map_rect_to_world_position(&rect, &camera, &viewport).unwrap();
//! assert!(position.length() < 1e-4);
//! ```

pub mod camera;
pub mod drift;
pub mod error;
pub mod mapper;
pub mod visibility;

pub use camera::CameraModel;
pub use drift::{ViewportConfig, ViewportState, ViewportTracker};
pub use error::{PlacementError, PlacementResult};
pub use mapper::{WorldPlacement, WorldSize, map_rect_to_world_position, map_rect_to_world_size};
pub use visibility::{VisibilityBuffer, is_rect_visible, is_rect_visible_with_buffer};
