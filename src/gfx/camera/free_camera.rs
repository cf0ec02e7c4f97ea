use cgmath::{Matrix4, SquareMatrix, Vector3};

use super::camera_utils::{basis_toward, Viewpoint};
use crate::math::{view_matrix, WORLD_UP};

/// Camera placed explicitly at a position, looking at a target point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeCamera {
    pub position: Vector3<f32>,
    pub look_at: Vector3<f32>,
    pub up: Vector3<f32>,
}

impl Default for FreeCamera {
    fn default() -> Self {
        Self::new(Vector3::new(0.0, 0.0, 10.0), Vector3::new(0.0, 0.0, 0.0))
    }
}

impl FreeCamera {
    pub fn new(position: Vector3<f32>, look_at: Vector3<f32>) -> Self {
        Self {
            position,
            look_at,
            up: WORLD_UP,
        }
    }

    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
    }

    pub fn set_look_at_point(&mut self, look_at: Vector3<f32>) {
        self.look_at = look_at;
    }

    pub fn set_up(&mut self, up: Vector3<f32>) {
        self.up = up;
    }

    /// Moves the camera and its target together, keeping the view direction
    pub fn translate(&mut self, offset: Vector3<f32>) {
        self.position += offset;
        self.look_at += offset;
    }
}

impl Viewpoint for FreeCamera {
    fn position(&self) -> Vector3<f32> {
        self.position
    }

    fn dir(&self) -> Vector3<f32> {
        basis_toward(self.position, self.look_at, self.up).0
    }

    fn left(&self) -> Vector3<f32> {
        basis_toward(self.position, self.look_at, self.up).1
    }

    fn up(&self) -> Vector3<f32> {
        basis_toward(self.position, self.look_at, self.up).2
    }

    fn view_matrix(&self) -> Matrix4<f32> {
        view_matrix(self.position, self.look_at, self.up).unwrap_or_else(Matrix4::identity)
    }
}
