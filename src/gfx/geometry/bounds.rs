//! Bounding spheres for coarse picking.

use cgmath::{InnerSpace, Matrix4, Vector3, Zero};

use crate::math::{max_scale, transform_point};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vector3<f32>,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(center: Vector3<f32>, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    /// Sphere centered on the points' axis-aligned extent, reaching the
    /// farthest point. An empty set yields a zero sphere at the origin.
    pub fn from_points(points: &[Vector3<f32>]) -> Self {
        let Some(first) = points.first() else {
            return Self::new(Vector3::zero(), 0.0);
        };

        let mut min = *first;
        let mut max = *first;
        for p in points.iter().skip(1) {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        let center = (min + max) * 0.5;
        let radius = points
            .iter()
            .map(|p| (p - center).magnitude())
            .fold(0.0_f32, f32::max);

        Self::new(center, radius)
    }

    /// World-space sphere under `model`; the radius grows with the largest scale axis
    pub fn transformed(&self, model: &Matrix4<f32>) -> Self {
        Self::new(transform_point(model, self.center), self.radius * max_scale(model))
    }

    pub fn contains(&self, point: Vector3<f32>) -> bool {
        (point - self.center).magnitude2() <= self.radius * self.radius
    }
}
