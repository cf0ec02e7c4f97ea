//! # Primitive Shape Generation
//!
//! Procedural meshes for tests, demos and placeholder bounds. All shapes are
//! centered on the origin with counter-clockwise winding, Y up.

use super::Mesh;
use cgmath::Vector3;
use std::f32::consts::PI;

/// Generate a unit cube centered at the origin
///
/// Returns a cube with vertices from -0.5 to 0.5 on all axes, four vertices
/// per face so faces stay independent.
pub fn generate_cube() -> Mesh {
    #[rustfmt::skip]
    let positions: [[f32; 3]; 24] = [
        // Front face
        [-0.5, -0.5,  0.5], [ 0.5, -0.5,  0.5], [ 0.5,  0.5,  0.5], [-0.5,  0.5,  0.5],
        // Back face
        [-0.5, -0.5, -0.5], [-0.5,  0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5, -0.5, -0.5],
        // Left face
        [-0.5, -0.5, -0.5], [-0.5, -0.5,  0.5], [-0.5,  0.5,  0.5], [-0.5,  0.5, -0.5],
        // Right face
        [ 0.5, -0.5,  0.5], [ 0.5, -0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5,  0.5,  0.5],
        // Top face
        [-0.5,  0.5,  0.5], [ 0.5,  0.5,  0.5], [ 0.5,  0.5, -0.5], [-0.5,  0.5, -0.5],
        // Bottom face
        [-0.5, -0.5, -0.5], [ 0.5, -0.5, -0.5], [ 0.5, -0.5,  0.5], [-0.5, -0.5,  0.5],
    ];

    let indices = (0..6u32)
        .flat_map(|face| {
            let base = face * 4;
            [base, base + 1, base + 2, base + 2, base + 3, base]
        })
        .collect();

    Mesh {
        positions: positions
            .iter()
            .map(|p| Vector3::new(p[0], p[1], p[2]))
            .collect(),
        indices,
    }
}

/// Generate a UV sphere of radius 1.0
///
/// # Arguments
/// * `longitude_segments` - Number of vertical segments (at least 3)
/// * `latitude_segments` - Number of horizontal segments (at least 2)
pub fn generate_sphere(longitude_segments: u32, latitude_segments: u32) -> Mesh {
    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);
    let mut mesh = Mesh::default();

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32;
        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32;
            mesh.positions.push(Vector3::new(
                theta.sin() * phi.cos(),
                theta.cos(),
                theta.sin() * phi.sin(),
            ));
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            mesh.indices.extend_from_slice(&[first, second, first + 1]);
            mesh.indices.extend_from_slice(&[second, second + 1, first + 1]);
        }
    }

    mesh
}

/// Generate a flat plane in XZ (normal +Y), e.g. an RTS ground tile
pub fn generate_plane(width: f32, depth: f32, width_segments: u32, depth_segments: u32) -> Mesh {
    let w_segs = width_segments.max(1);
    let d_segs = depth_segments.max(1);
    let mut mesh = Mesh::default();

    for z in 0..=d_segs {
        let v = z as f32 / d_segs as f32;
        for x in 0..=w_segs {
            let u = x as f32 / w_segs as f32;
            mesh.positions
                .push(Vector3::new((u - 0.5) * width, 0.0, (v - 0.5) * depth));
        }
    }

    for z in 0..d_segs {
        for x in 0..w_segs {
            let i = z * (w_segs + 1) + x;
            let next_row = i + w_segs + 1;

            // Counter-clockwise when viewed from +Y
            mesh.indices.extend_from_slice(&[i, next_row, i + 1]);
            mesh.indices.extend_from_slice(&[next_row, next_row + 1, i + 1]);
        }
    }

    mesh
}
