//! Hash collections used throughout vellum.
//!
//! Per-element registries are keyed by small integer ids and rebuilt often,
//! so they use AHash instead of SipHash.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
