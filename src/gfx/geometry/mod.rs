//! # Geometry and Geometric Queries
//!
//! Triangle meshes, bounding volumes and the ray intersection tests used by
//! picking.
//!
//! ## Contents
//!
//! - [`Mesh`] - positions plus triangle indices, as supplied by a model loader
//! - [`BoundingSphere`] - the coarse volume every pickable object carries
//! - [`intersection`] - ray/sphere and ray/triangle tests
//! - [`primitives`] - procedural cube, sphere and plane meshes
//!
//! ## Usage
//!
//! ```rust
//! use canvas3d::gfx::geometry::{generate_cube, ray_intersects_sphere};
//! use cgmath::Vector3;
//!
//! let cube = generate_cube();
//! assert_eq!(cube.triangle_count(), 12);
//!
//! let hit = ray_intersects_sphere(
//!     Vector3::new(0.0, 0.0, 10.0),
//!     Vector3::new(0.0, 0.0, -1.0),
//!     Vector3::new(0.0, 0.0, 0.0),
//!     1.0,
//! );
//! assert!(hit);
//! ```

pub mod bounds;
pub mod intersection;
pub mod primitives;

pub use bounds::BoundingSphere;
pub use intersection::*;
pub use primitives::*;

use cgmath::{Matrix4, Vector3};

use crate::math::transform_point;

/// Triangle mesh in object space
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions
    pub positions: Vec<Vector3<f32>>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a mesh from flat `[x, y, z, ...]` positions and indices
    pub fn from_flat(positions: &[f32], indices: Vec<u32>) -> Self {
        let positions = positions
            .chunks_exact(3)
            .map(|p| Vector3::new(p[0], p[1], p[2]))
            .collect();
        Self { positions, indices }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.triangle_count() == 0
    }

    /// Iterates triangles as vertex triples, skipping any with out-of-range indices
    pub fn triangles(&self) -> impl Iterator<Item = [Vector3<f32>; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(move |tri| {
            let a = *self.positions.get(tri[0] as usize)?;
            let b = *self.positions.get(tri[1] as usize)?;
            let c = *self.positions.get(tri[2] as usize)?;
            Some([a, b, c])
        })
    }

    /// Iterates triangles transformed into world space by `model`
    pub fn world_triangles<'a>(
        &'a self,
        model: &'a Matrix4<f32>,
    ) -> impl Iterator<Item = [Vector3<f32>; 3]> + 'a {
        self.triangles().map(move |[a, b, c]| {
            [
                transform_point(model, a),
                transform_point(model, b),
                transform_point(model, c),
            ]
        })
    }

    /// Smallest sphere (about the extent's center) enclosing all vertices
    pub fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::from_points(&self.positions)
    }

    /// Appends another mesh, offsetting its indices
    pub fn append(&mut self, other: &Mesh) {
        let offset = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.indices.extend(other.indices.iter().map(|i| i + offset));
    }
}
