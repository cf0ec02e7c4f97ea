//! Ray intersection tests.
//!
//! Each test comes in two forms: a `*_distance` function returning the ray
//! parameter `t` of the nearest forward hit, and a boolean wrapper. Picking
//! uses the distances to order hits.

use cgmath::{InnerSpace, Vector3};

use crate::math::{normalize, try_normalize};

/// Allowed difference between a triangle's area and the summed areas of the
/// three sub-triangles around the hit point
pub const TRIANGLE_AREA_TOLERANCE: f32 = 1e-4;

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized; zero if constructed from a zero vector)
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Create a new ray, normalizing `direction`
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: normalize(direction),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }

    /// True if the direction is usable for intersection tests
    pub fn is_valid(&self) -> bool {
        self.direction.magnitude2() > 0.0 && crate::math::is_finite(self.origin)
    }
}

/// Distance along the ray to the nearest forward sphere hit.
///
/// Solves `|O + tD - C|^2 = r^2` with `D` normalized. Returns `None` when the
/// discriminant is negative or both roots lie behind the origin. When the
/// origin is inside the sphere the far root is returned.
pub fn ray_sphere_distance(
    origin: Vector3<f32>,
    dir: Vector3<f32>,
    center: Vector3<f32>,
    radius: f32,
) -> Option<f32> {
    let dir = try_normalize(dir)?;
    let v = origin - center;

    let a = dir.dot(dir);
    let b = 2.0 * v.dot(dir);
    let c = v.dot(v) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 || !discriminant.is_finite() {
        return None;
    }

    // q takes the sign of b so the two roots never come from subtracting
    // nearly equal values.
    let sqrt_d = discriminant.sqrt();
    let q = if b < 0.0 {
        -0.5 * (b - sqrt_d)
    } else {
        -0.5 * (b + sqrt_d)
    };

    if q == 0.0 {
        // b == 0 and c == 0: origin on the surface, ray tangent to it
        return Some(0.0);
    }

    let mut t0 = q / a;
    let mut t1 = c / q;
    if t0 > t1 {
        std::mem::swap(&mut t0, &mut t1);
    }

    if t1 < 0.0 {
        return None;
    }
    Some(if t0 >= 0.0 { t0 } else { t1 })
}

/// Does the ray hit the sphere in front of its origin?
pub fn ray_intersects_sphere(
    origin: Vector3<f32>,
    dir: Vector3<f32>,
    center: Vector3<f32>,
    radius: f32,
) -> bool {
    ray_sphere_distance(origin, dir, center, radius).is_some()
}

/// Distance along the ray to the triangle `v0, v1, v2`.
///
/// Intersects the triangle's plane, then accepts the point when the
/// triangle's area equals the summed areas of the sub-triangles formed with
/// each edge (within [`TRIANGLE_AREA_TOLERANCE`]). Rays parallel to the plane
/// and hits behind the origin return `None`.
pub fn ray_triangle_distance(
    origin: Vector3<f32>,
    dir: Vector3<f32>,
    v0: Vector3<f32>,
    v1: Vector3<f32>,
    v2: Vector3<f32>,
) -> Option<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let normal = edge1.cross(edge2);
    let area = 0.5 * normal.magnitude();

    let normal_dot_dir = normal.dot(dir);
    if normal_dot_dir == 0.0 || !normal_dot_dir.is_finite() {
        return None;
    }

    // n . (O + tD) = n . v  =>  t = (n . v - n . O) / (n . D)
    let t = (normal.dot(v1) - normal.dot(origin)) / normal_dot_dir;
    if t < 0.0 || !t.is_finite() {
        return None;
    }

    let hit = origin + dir * t;
    let to_v0 = v0 - hit;
    let to_v1 = v1 - hit;
    let to_v2 = v2 - hit;

    let area1 = 0.5 * to_v0.cross(to_v1).magnitude();
    let area2 = 0.5 * to_v1.cross(to_v2).magnitude();
    let area3 = 0.5 * to_v2.cross(to_v0).magnitude();

    if (area - (area1 + area2 + area3)).abs() <= TRIANGLE_AREA_TOLERANCE {
        Some(t)
    } else {
        None
    }
}

/// Does the ray hit the triangle in front of its origin?
pub fn ray_intersects_triangle(
    origin: Vector3<f32>,
    dir: Vector3<f32>,
    v0: Vector3<f32>,
    v1: Vector3<f32>,
    v2: Vector3<f32>,
) -> bool {
    ray_triangle_distance(origin, dir, v0, v1, v2).is_some()
}
