//! Vellum Core
//!
//! Shared value types and ambient utilities for the vellum overlay crates:
//! screen/viewport geometry, colors, math re-exports, hashing collections,
//! logging and profiling setup.

pub mod alloc;
pub mod color;
pub mod config;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;

pub use color::Color;
pub use geometry::{ElementRect, ViewportFrame};
