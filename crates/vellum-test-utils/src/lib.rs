//! Test utilities for Vellum.
//!
//! This crate provides the boundary between the overlay logic and whatever
//! actually draws textured planes.
//!
//! # Overview
//!
//! - [`SceneBackend`] - Trait abstracting geometry, texture and mesh lifetimes
//! - `MockSceneBackend` - Recording implementation for tests (requires `mock` feature)
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use vellum_test_utils::{MockSceneBackend, PlaneGeometry, SceneBackend};
//!
//! let backend = MockSceneBackend::new();
//! let geometry = backend.create_geometry(PlaneGeometry::new(2.0, 0.5));
//! backend.dispose_geometry(geometry);
//!
//! assert_eq!(backend.live_geometries(), 0);
//! assert_eq!(backend.invalid_disposals(), 0);
//! # }
//! ```
//!
//! Handles are plain ids. Resources stay alive until explicitly disposed, so
//! callers own the full create/dispose lifecycle and mocks can verify it.

#[cfg(feature = "mock")]
pub mod mock_backend;
pub mod scene_backend;

#[cfg(feature = "mock")]
pub use mock_backend::*;
pub use scene_backend::*;
