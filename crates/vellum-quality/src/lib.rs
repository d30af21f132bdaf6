//! Vellum Quality - responsive quality policy
//!
//! Classifies the host device from a handful of coarse signals and maps the
//! class to a [`QualityProfile`]: pixel-ratio cap, frame-rate target, geometry
//! subdivision, shader precision and optional features.
//!
//! Everything here is pure except [`FpsMonitor`], which accumulates frame
//! timestamps and hands back a [`Degradation`] for the caller to apply between
//! frames.
//!
//! ```
//! use vellum_quality::{DeviceContext, DeviceSignals, QualityFeatures};
//!
//! let signals = DeviceSignals::new(390.0, 3.0)
//!     .with_cores(4)
//!     .with_user_agent("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)");
//! let ctx = DeviceContext::from_signals(signals);
//!
//! assert!(ctx.class.is_constrained());
//! assert_eq!(ctx.profile.pixel_ratio_cap, 2.0);
//! assert!(!ctx.profile.features.contains(QualityFeatures::POINT_LIGHT));
//! ```

pub mod device;
pub mod policy;
pub mod profile;
pub mod runtime;

pub use device::{
    DeviceClass, DeviceClassifier, DeviceContext, DeviceSignals, FixedClassifier,
    HeuristicClassifier,
};
pub use policy::{QualityConfig, QualityPolicy};
pub use profile::{QualityFeatures, QualityProfile, ShaderPrecision};
pub use runtime::{Degradation, FpsMonitor, FpsMonitorConfig, FrameLimiter};
