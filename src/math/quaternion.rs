//! Axis-angle and quaternion conversions.

use cgmath::{InnerSpace, Matrix4, One, Quaternion, Rad, Rotation, Rotation3, Vector3};

use super::vector::try_normalize;

/// Quaternion rotating by `angle` radians about `axis`.
///
/// The axis is normalized here, so callers may pass any non-zero vector. A
/// zero or non-finite axis yields the identity rotation.
pub fn axis_angle_to_quat(axis: Vector3<f32>, angle: f32) -> Quaternion<f32> {
    if !angle.is_finite() {
        log::warn!("axis_angle_to_quat() called with a non-finite angle {}", angle);
        return Quaternion::one();
    }
    match try_normalize(axis) {
        Some(axis) => Quaternion::from_axis_angle(axis, Rad(angle)),
        None => {
            if angle != 0.0 {
                log::warn!("axis_angle_to_quat() called with a zero-length axis");
            }
            Quaternion::one()
        }
    }
}

/// Rotation matrix equivalent of `q` (normalized first)
pub fn quat_to_matrix(q: Quaternion<f32>) -> Matrix4<f32> {
    Matrix4::from(normalize_quat(q))
}

/// Unit quaternion, identity when `q` has no length
pub fn normalize_quat(q: Quaternion<f32>) -> Quaternion<f32> {
    let length2 = q.magnitude2();
    if !length2.is_finite() || length2 <= f32::EPSILON {
        return Quaternion::one();
    }
    q.normalize()
}

/// Rotates `v` by `angle` radians about `axis`
pub fn rotate_about_axis(v: Vector3<f32>, axis: Vector3<f32>, angle: f32) -> Vector3<f32> {
    axis_angle_to_quat(axis, angle).rotate_vector(v)
}
