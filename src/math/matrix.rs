//! Matrix construction and transformation helpers (column-major).
//!
//! The projection builders are written out by hand rather than delegating to
//! `cgmath::perspective`/`frustum`, which assert on invalid planes. Invalid
//! parameters here return the identity sentinel and log instead of panicking.

use cgmath::{InnerSpace, Matrix, Matrix4, SquareMatrix, Vector3, Vector4};

use super::vector::{normalize, try_normalize};

/// Orthonormal look-at basis.
///
/// `forward = normalize(eye - center)`, `right = normalize(up x forward)`,
/// `true_up = forward x right`. The returned matrix has columns
/// `right, true_up, forward` and no translation. Returns `None` when `up` is
/// parallel to the eye-center axis or `eye == center`.
pub fn look_at(eye: Vector3<f32>, center: Vector3<f32>, up: Vector3<f32>) -> Option<Matrix4<f32>> {
    let Some(forward) = try_normalize(eye - center) else {
        log::warn!("look_at() called with eye == center ({:?})", eye);
        return None;
    };
    let Some(right) = try_normalize(up.cross(forward)) else {
        log::warn!("look_at() called with up {:?} parallel to the view axis", up);
        return None;
    };
    let true_up = forward.cross(right);

    Some(Matrix4::from_cols(
        right.extend(0.0),
        true_up.extend(0.0),
        forward.extend(0.0),
        Vector4::unit_w(),
    ))
}

/// World-to-view matrix for a camera at `eye` looking at `center`
pub fn view_matrix(
    eye: Vector3<f32>,
    center: Vector3<f32>,
    up: Vector3<f32>,
) -> Option<Matrix4<f32>> {
    let basis = look_at(eye, center, up)?;
    Some(basis.transpose() * Matrix4::from_translation(-eye))
}

/// Pose (camera-to-world) matrix with columns `left, up, dir, pos`
pub fn make_pose_matrix(
    left: Vector3<f32>,
    up: Vector3<f32>,
    dir: Vector3<f32>,
    pos: Vector3<f32>,
) -> Matrix4<f32> {
    Matrix4::from_cols(
        left.extend(0.0),
        up.extend(0.0),
        dir.extend(0.0),
        pos.extend(1.0),
    )
}

/// Perspective projection, `fovy` in degrees
pub fn make_perspective(fovy_degrees: f32, aspect: f32, near: f32, far: f32) -> Matrix4<f32> {
    let valid = fovy_degrees > 0.0
        && fovy_degrees < 180.0
        && aspect.is_finite()
        && aspect != 0.0
        && near > 0.0
        && far > near;
    if !valid {
        log::warn!(
            "make_perspective() called with invalid parameters fovy={} aspect={} near={} far={}",
            fovy_degrees,
            aspect,
            near,
            far
        );
        return Matrix4::identity();
    }

    let f = 1.0 / (fovy_degrees.to_radians() / 2.0).tan();
    let depth = near - far;

    Matrix4::from_cols(
        Vector4::new(f / aspect, 0.0, 0.0, 0.0),
        Vector4::new(0.0, f, 0.0, 0.0),
        Vector4::new(0.0, 0.0, (far + near) / depth, -1.0),
        Vector4::new(0.0, 0.0, 2.0 * far * near / depth, 0.0),
    )
}

/// Orthographic projection
pub fn make_ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Matrix4<f32> {
    if right == left || top == bottom || far == near {
        log::warn!("make_ortho() called with a zero-sized volume");
        return Matrix4::identity();
    }

    let width = right - left;
    let height = top - bottom;
    let depth = far - near;

    Matrix4::from_cols(
        Vector4::new(2.0 / width, 0.0, 0.0, 0.0),
        Vector4::new(0.0, 2.0 / height, 0.0, 0.0),
        Vector4::new(0.0, 0.0, -2.0 / depth, 0.0),
        Vector4::new(
            -(right + left) / width,
            -(top + bottom) / height,
            -(far + near) / depth,
            1.0,
        ),
    )
}

/// Perspective projection from explicit clipping planes (glFrustum)
pub fn make_frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Matrix4<f32> {
    if right == left || top == bottom || far == near || near <= 0.0 {
        log::warn!("make_frustum() called with a degenerate volume");
        return Matrix4::identity();
    }

    let width = right - left;
    let height = top - bottom;
    let depth = far - near;

    Matrix4::from_cols(
        Vector4::new(2.0 * near / width, 0.0, 0.0, 0.0),
        Vector4::new(0.0, 2.0 * near / height, 0.0, 0.0),
        Vector4::new(
            (right + left) / width,
            (top + bottom) / height,
            -(far + near) / depth,
            -1.0,
        ),
        Vector4::new(0.0, 0.0, -2.0 * far * near / depth, 0.0),
    )
}

/// Inverse of `m`, or `None` if it is singular or the inverse is not finite.
///
/// Only an exactly zero determinant counts as singular. Large projections
/// have tiny determinants and still invert cleanly.
pub fn inverse_matrix(m: &Matrix4<f32>) -> Option<Matrix4<f32>> {
    let inverse = m.invert().filter(|inverse| {
        let entries: &[f32; 16] = inverse.as_ref();
        entries.iter().all(|x| x.is_finite())
    });
    if inverse.is_none() {
        log::warn!("inverse_matrix() called with a singular matrix (det = {})", m.determinant());
    }
    inverse
}

/// Inverse of `m`, falling back to identity when singular
pub fn inverse_or_identity(m: &Matrix4<f32>) -> Matrix4<f32> {
    inverse_matrix(m).unwrap_or_else(Matrix4::identity)
}

pub fn multiply_matrix_by_vector(m: &Matrix4<f32>, v: Vector4<f32>) -> Vector4<f32> {
    m * v
}

/// Transforms a direction (w = 0), ignoring translation
pub fn multiply_matrix_by_direction(m: &Matrix4<f32>, v: Vector3<f32>) -> Vector3<f32> {
    (m * v.extend(0.0)).truncate()
}

/// Transforms a point (w = 1) with perspective divide.
///
/// A zero `w` yields the undivided result rather than infinities.
pub fn transform_point(m: &Matrix4<f32>, p: Vector3<f32>) -> Vector3<f32> {
    let h = m * p.extend(1.0);
    if h.w == 0.0 || !h.w.is_finite() {
        return h.truncate();
    }
    h.truncate() / h.w
}

/// Length of the longest basis column, i.e. the largest scale factor of `m`
pub fn max_scale(m: &Matrix4<f32>) -> f32 {
    m.x.truncate()
        .magnitude()
        .max(m.y.truncate().magnitude())
        .max(m.z.truncate().magnitude())
}

/// Unit direction from `from` towards `to`; zero if they coincide
pub fn direction_between(from: Vector3<f32>, to: Vector3<f32>) -> Vector3<f32> {
    normalize(to - from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use cgmath::Point3;

    fn assert_matrix_eq(a: &Matrix4<f32>, b: &Matrix4<f32>) {
        let a: &[f32; 16] = a.as_ref();
        let b: &[f32; 16] = b.as_ref();
        for (x, y) in a.iter().zip(b.iter()) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_look_at_basis_is_orthonormal() {
        let basis = look_at(
            Vector3::new(0.0, 50.0, 30.0),
            Vector3::new(0.0, 0.0, -10.0),
            Vector3::unit_y(),
        )
        .unwrap();

        let right = basis.x.truncate();
        let up = basis.y.truncate();
        let forward = basis.z.truncate();

        assert_abs_diff_eq!(right.magnitude(), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(up.magnitude(), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(forward.magnitude(), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(right.dot(up), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(right.dot(forward), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(up.dot(forward), 0.0, epsilon = 1e-6);
        assert_eq!(basis.w, Vector4::unit_w());
    }

    #[test]
    fn test_look_at_along_negative_z() {
        let basis = look_at(Vector3::new(0.0, 0.0, 10.0), Vector3::new(0.0, 0.0, 0.0), Vector3::unit_y())
            .unwrap();
        assert_abs_diff_eq!((basis.x.truncate() - Vector3::unit_x()).magnitude(), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!((basis.y.truncate() - Vector3::unit_y()).magnitude(), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!((basis.z.truncate() - Vector3::unit_z()).magnitude(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_look_at_degenerate_up_is_none() {
        assert!(look_at(Vector3::new(0.0, 10.0, 0.0), Vector3::new(0.0, 0.0, 0.0), Vector3::unit_y()).is_none());
        assert!(look_at(Vector3::new(1.0, 1.0, 1.0), Vector3::new(1.0, 1.0, 1.0), Vector3::unit_y()).is_none());
    }

    #[test]
    fn test_view_matrix_matches_cgmath() {
        let eye = Vector3::new(3.0, 4.0, 5.0);
        let center = Vector3::new(-1.0, 0.5, 0.0);
        let ours = view_matrix(eye, center, Vector3::unit_y()).unwrap();
        let theirs = Matrix4::look_at_rh(
            Point3::new(eye.x, eye.y, eye.z),
            Point3::new(center.x, center.y, center.z),
            Vector3::unit_y(),
        );
        assert_matrix_eq(&ours, &theirs);
    }

    #[test]
    fn test_perspective_matches_cgmath() {
        let ours = make_perspective(45.0, 1.5, 0.1, 1000.0);
        let theirs = cgmath::perspective(cgmath::Deg(45.0), 1.5, 0.1, 1000.0);
        assert_matrix_eq(&ours, &theirs);
    }

    #[test]
    fn test_ortho_and_frustum_match_cgmath() {
        assert_matrix_eq(
            &make_ortho(-2.0, 2.0, -1.0, 1.0, 0.5, 50.0),
            &cgmath::ortho(-2.0, 2.0, -1.0, 1.0, 0.5, 50.0),
        );
        assert_matrix_eq(
            &make_frustum(-2.0, 2.0, -1.0, 1.0, 0.5, 50.0),
            &cgmath::frustum(-2.0, 2.0, -1.0, 1.0, 0.5, 50.0),
        );
    }

    #[test]
    fn test_invalid_projection_is_identity() {
        assert_eq!(make_perspective(45.0, 0.0, 0.1, 100.0), Matrix4::identity());
        assert_eq!(make_perspective(45.0, 1.0, 10.0, 10.0), Matrix4::identity());
        assert_eq!(make_ortho(1.0, 1.0, 0.0, 1.0, 0.0, 1.0), Matrix4::identity());
    }

    #[test]
    fn test_inverse_matrix() {
        let m = make_perspective(60.0, 1.0, 0.1, 100.0);
        let inv = inverse_matrix(&m).unwrap();
        assert_matrix_eq(&(m * inv), &Matrix4::identity());

        let singular = Matrix4::from_nonuniform_scale(1.0, 0.0, 1.0);
        assert!(inverse_matrix(&singular).is_none());
        assert_eq!(inverse_or_identity(&singular), Matrix4::identity());

        let overflowing = Matrix4::from_scale(f32::NAN);
        assert!(inverse_matrix(&overflowing).is_none());
    }

    #[test]
    fn test_inverse_of_large_ortho() {
        let m = make_ortho(-5e4, 5e4, -5e4, 5e4, 0.1, 1e5);
        assert!(m.determinant().abs() < 1e-12);

        let inv = inverse_matrix(&m).unwrap();
        let corner = multiply_matrix_by_vector(&inv, Vector4::new(1.0, 1.0, 0.0, 1.0));
        assert_abs_diff_eq!(corner.x, 5e4, epsilon = 1.0);
        assert_abs_diff_eq!(corner.y, 5e4, epsilon = 1.0);
    }

    #[test]
    fn test_direction_ignores_translation() {
        let pose = make_pose_matrix(
            Vector3::unit_x(),
            Vector3::unit_y(),
            Vector3::unit_z(),
            Vector3::new(10.0, 20.0, 30.0),
        );
        assert_eq!(
            multiply_matrix_by_direction(&pose, Vector3::new(1.0, 2.0, 3.0)),
            Vector3::new(1.0, 2.0, 3.0)
        );
        assert_eq!(
            transform_point(&pose, Vector3::new(1.0, 2.0, 3.0)),
            Vector3::new(11.0, 22.0, 33.0)
        );
    }

    #[test]
    fn test_max_scale() {
        let m = Matrix4::from_nonuniform_scale(0.25, 3.0, 1.0);
        assert_abs_diff_eq!(max_scale(&m), 3.0);
    }
}
