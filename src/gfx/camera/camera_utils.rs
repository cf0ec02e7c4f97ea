use cgmath::{Matrix4, SquareMatrix, Vector3};

use super::{free_camera::FreeCamera, orbit_camera::OrbitCamera};
use crate::config::ProjectionConfig;
use crate::math::{make_frustum, make_ortho, make_perspective, try_normalize, WORLD_UP};

/// Capabilities shared by every camera variant
pub trait Viewpoint {
    fn position(&self) -> Vector3<f32>;

    /// Unit vector from the camera toward what it looks at
    fn dir(&self) -> Vector3<f32>;

    /// Unit vector toward the left edge of the screen
    fn left(&self) -> Vector3<f32>;

    /// Unit vector toward the top edge of the screen
    fn up(&self) -> Vector3<f32>;

    /// World-to-view transform
    fn view_matrix(&self) -> Matrix4<f32>;
}

/// Camera owned by a scene
#[derive(Debug, Clone, PartialEq)]
pub enum Camera {
    Free(FreeCamera),
    Orbit(OrbitCamera),
}

impl Camera {
    pub fn as_orbit(&self) -> Option<&OrbitCamera> {
        match self {
            Camera::Orbit(camera) => Some(camera),
            Camera::Free(_) => None,
        }
    }

    pub fn as_orbit_mut(&mut self) -> Option<&mut OrbitCamera> {
        match self {
            Camera::Orbit(camera) => Some(camera),
            Camera::Free(_) => None,
        }
    }

    pub fn as_free_mut(&mut self) -> Option<&mut FreeCamera> {
        match self {
            Camera::Free(camera) => Some(camera),
            Camera::Orbit(_) => None,
        }
    }

    fn inner(&self) -> &dyn Viewpoint {
        match self {
            Camera::Free(camera) => camera,
            Camera::Orbit(camera) => camera,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Camera::Free(FreeCamera::default())
    }
}

impl Viewpoint for Camera {
    fn position(&self) -> Vector3<f32> {
        self.inner().position()
    }

    fn dir(&self) -> Vector3<f32> {
        self.inner().dir()
    }

    fn left(&self) -> Vector3<f32> {
        self.inner().left()
    }

    fn up(&self) -> Vector3<f32> {
        self.inner().up()
    }

    fn view_matrix(&self) -> Matrix4<f32> {
        self.inner().view_matrix()
    }
}

impl From<FreeCamera> for Camera {
    fn from(camera: FreeCamera) -> Self {
        Camera::Free(camera)
    }
}

impl From<OrbitCamera> for Camera {
    fn from(camera: OrbitCamera) -> Self {
        Camera::Orbit(camera)
    }
}

/// Camera basis `(dir, left, up)` looking from `position` toward `target`.
///
/// `left = normalize(up_hint x dir)` and `up = dir x left`. When `up_hint` is
/// parallel to the view direction the world X axis stands in for `left`.
pub(crate) fn basis_toward(
    position: Vector3<f32>,
    target: Vector3<f32>,
    up_hint: Vector3<f32>,
) -> (Vector3<f32>, Vector3<f32>, Vector3<f32>) {
    let dir = match try_normalize(target - position) {
        Some(dir) => dir,
        None => {
            log::warn!("Camera position and target coincide at {:?}", position);
            -Vector3::unit_z()
        }
    };
    let left = match try_normalize(up_hint.cross(dir)) {
        Some(left) => left,
        None => {
            log::warn!("Camera up vector {:?} is parallel to its view direction", up_hint);
            try_normalize(WORLD_UP.cross(dir)).unwrap_or(Vector3::unit_x())
        }
    };
    (dir, left, dir.cross(left))
}

/// Projection used for rendering and unprojection
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Perspective {
        fovy_degrees: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },
    Orthographic {
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    },
    Frustum {
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    },
    /// Caller-supplied matrix; may be singular
    Matrix(Matrix4<f32>),
}

impl Projection {
    pub fn from_config(config: &ProjectionConfig, width: u32, height: u32) -> Self {
        Projection::Perspective {
            fovy_degrees: config.fovy_degrees,
            aspect: aspect_ratio(width, height),
            near: config.near,
            far: config.far,
        }
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        match *self {
            Projection::Perspective {
                fovy_degrees,
                aspect,
                near,
                far,
            } => make_perspective(fovy_degrees, aspect, near, far),
            Projection::Orthographic {
                left,
                right,
                bottom,
                top,
                near,
                far,
            } => make_ortho(left, right, bottom, top, near, far),
            Projection::Frustum {
                left,
                right,
                bottom,
                top,
                near,
                far,
            } => make_frustum(left, right, bottom, top, near, far),
            Projection::Matrix(matrix) => matrix,
        }
    }

    /// Update the aspect ratio after the canvas changes size
    pub fn resize(&mut self, width: u32, height: u32) {
        if let Projection::Perspective { aspect, .. } = self {
            *aspect = aspect_ratio(width, height);
        }
    }
}

impl Default for Projection {
    fn default() -> Self {
        Projection::from_config(&ProjectionConfig::default(), 1, 1)
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    if height == 0 {
        log::warn!("Canvas height is zero, using an aspect ratio of 1");
        return 1.0;
    }
    width as f32 / height as f32
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    /// Creates a default [CameraUniform].
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: convert_matrix4_to_array(Matrix4::identity()),
        }
    }
}

impl CameraUniform {
    /// Refresh from the current camera state
    pub fn update(&mut self, camera: &impl Viewpoint, projection: &Projection) {
        let eye = camera.position();
        self.view_position = [eye.x, eye.y, eye.z, 1.0];
        self.view_proj = convert_matrix4_to_array(projection.matrix() * camera.view_matrix());
    }
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix4.into()
}
