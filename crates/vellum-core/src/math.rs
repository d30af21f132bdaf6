//! Math types used by the mapper and overlay.
//!
//! Re-exports the SIMD-accelerated [`glam`] types plus a couple of helpers for
//! guarding projection output.
//!
//! [`glam`]: https://docs.rs/glam

pub use glam::*;

/// `true` when every component is finite (no NaN, no infinity).
#[inline]
pub fn is_finite_vec3(v: Vec3) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}

/// Absolute-tolerance float comparison.
#[inline]
pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() <= epsilon
}

/// A 3D vector with `#[repr(C)]` layout for per-mesh uniform uploads.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PackedVec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Vec3> for PackedVec3 {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}
