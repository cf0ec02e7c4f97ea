//! # Math Kernel
//!
//! Stateless vector, matrix and quaternion operations on top of `cgmath`.
//! Matrices are column-major, matching both `cgmath` and the GPU convention.
//!
//! Degenerate input never produces NaN: normalizing a zero vector yields the
//! zero vector, a singular matrix has no inverse (`None`), and a parallel
//! up/forward pair has no look-at basis (`None`). Each case logs a warning.

pub mod matrix;
pub mod quaternion;
pub mod scalar;
pub mod vector;

pub use matrix::*;
pub use quaternion::*;
pub use scalar::*;
pub use vector::*;

/// World up axis used by cameras and orbit rotations
pub const WORLD_UP: cgmath::Vector3<f32> = cgmath::Vector3::new(0.0, 1.0, 0.0);
