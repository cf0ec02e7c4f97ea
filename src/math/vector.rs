//! Vector helpers over `cgmath::Vector3<f32>`.

use cgmath::{InnerSpace, Vector3, Zero};

/// Squared lengths below this are treated as zero
pub const EPSILON_LENGTH2: f32 = 1e-12;

/// Returns `v` scaled to unit length, or the zero vector if `v` has no length
pub fn normalize(v: Vector3<f32>) -> Vector3<f32> {
    let length2 = v.magnitude2();
    if !length2.is_finite() || length2 <= EPSILON_LENGTH2 {
        log::warn!("normalize() called with a zero-length or non-finite vector {:?}", v);
        return Vector3::zero();
    }
    v / length2.sqrt()
}

/// Like [`normalize`] but silent; for call sites where zero is an expected value
pub fn try_normalize(v: Vector3<f32>) -> Option<Vector3<f32>> {
    let length2 = v.magnitude2();
    if length2.is_finite() && length2 > EPSILON_LENGTH2 {
        Some(v / length2.sqrt())
    } else {
        None
    }
}

pub fn cross(a: Vector3<f32>, b: Vector3<f32>) -> Vector3<f32> {
    a.cross(b)
}

pub fn dot(a: Vector3<f32>, b: Vector3<f32>) -> f32 {
    a.dot(b)
}

pub fn length(v: Vector3<f32>) -> f32 {
    v.magnitude()
}

pub fn add(a: Vector3<f32>, b: Vector3<f32>) -> Vector3<f32> {
    a + b
}

pub fn subtract(a: Vector3<f32>, b: Vector3<f32>) -> Vector3<f32> {
    a - b
}

pub fn scale(v: Vector3<f32>, s: f32) -> Vector3<f32> {
    v * s
}

/// True when every component is finite
pub fn is_finite(v: Vector3<f32>) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}
