//! Vellum - DOM-synchronised 3D text and ambient effects
//!
//! Vellum mirrors page text into a perspective scene as textured quads and
//! drives the page's ambient effects:
//!
//! - **Text overlay**: one mesh per element, kept on top of its DOM box every
//!   frame, stable through mobile URL-bar drift
//! - **Quality policy**: device classification decides pixel ratio, frame
//!   rate and feature set once at startup
//! - **Intro**: timed preloader with a one-shot completion signal
//! - **Orb and gradient**: motion and shader parameters sampled from the
//!   animation clock
//!
//! The renderer is abstracted behind [`SceneBackend`]; a recording mock lives
//! in `vellum-test-utils` behind the `mock` feature.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use vellum::prelude::*;
//!
//! let config = EffectConfig::default();
//! vellum::init(&config.runtime);
//!
//! let frame = ViewportFrame::new(390.0, 844.0, 3.0);
//! let ctx = DeviceContext::from_signals(DeviceSignals::new(frame.width, frame.pixel_ratio));
//! let camera = CameraModel::perspective(75.0, frame.aspect_ratio(), 5.0);
//!
//! let mut overlay = TextOverlay::new(backend, &ctx, frame, &config, FontSystem::with_system_fonts())?;
//! overlay.sync(&page, &camera);
//! overlay.tick(&page, &camera, elapsed);
//! ```

pub mod config;
pub mod element;
pub mod error;
pub mod gradient;
pub mod highlight;
pub mod intro;
pub mod orb;
pub mod overlay;
pub mod schedule;

pub use vellum_core as core;
pub use vellum_core::math;
pub use vellum_quality as quality;
pub use vellum_text as text;
pub use vellum_viewport as viewport;

pub use config::{EffectConfig, IntroConfig, OverlayConfig, RasterConfig, ScheduleConfig};
pub use element::{ComputedStyle, ElementId, ElementRecord, ElementSource, StaticElements};
pub use error::{VellumError, VellumResult, require_context};
pub use gradient::{GradientParams, GradientUniforms};
pub use highlight::HighlightRules;
pub use intro::{CompletionSignal, IntroBanner, IntroEvent, IntroLayout, IntroSequence};
pub use orb::{ColorTransition, OrbConfig, OrbMotion, OrbPose, PointLightPose, pointer_ndc};
pub use overlay::{SyncReport, TextOverlay, TickReport};
pub use schedule::{Debouncer, FrameDecision, FrameInfo, FrameLoop, ScrollTracker};
pub use vellum_test_utils::{MeshHandle, MeshState, PlaneGeometry, SceneBackend, TextureUpload};

use vellum_core::config::RuntimeConfig;

/// Install logging and profiling for the process.
pub fn init(config: &RuntimeConfig) {
    vellum_core::logging::init_with(config);
    vellum_core::profiling::init_profiling(config.profiling);
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{EffectConfig, IntroConfig, OverlayConfig, ScheduleConfig};
    pub use crate::element::{ComputedStyle, ElementId, ElementSource, StaticElements};
    pub use crate::error::{VellumError, VellumResult};
    pub use crate::highlight::HighlightRules;
    pub use crate::intro::{CompletionSignal, IntroEvent, IntroSequence};
    pub use crate::overlay::TextOverlay;
    pub use crate::schedule::{FrameDecision, FrameLoop};

    pub use vellum_core::math::{Vec2, Vec3};
    pub use vellum_core::{Color, ElementRect, ViewportFrame};
    pub use vellum_quality::{DeviceClass, DeviceContext, DeviceSignals};
    pub use vellum_test_utils::SceneBackend;
    pub use vellum_text::FontSystem;
    pub use vellum_viewport::{CameraModel, ViewportState};
}
