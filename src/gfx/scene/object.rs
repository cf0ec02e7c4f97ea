use std::fmt;

use cgmath::{Matrix4, One, Quaternion, Rad, Rotation, Rotation3, Vector3, Zero};

use crate::gfx::geometry::{BoundingSphere, Mesh};
use crate::math::{normalize_quat, quat_to_matrix};

/// Scene-assigned identity of a live object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub(crate) u64);

impl ObjectId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How angular velocity is applied each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Rotate in place about the object's own origin
    Spin,
    /// Rotate the position about `center`; orientation follows
    Orbit { center: Vector3<f32> },
}

/// Lifecycle tag resolved by the frame scheduler
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleKind {
    Standard,
    /// Lives until `age` exceeds `life_time` (both in milliseconds)
    AgingParticle {
        age: f32,
        life_time: f32,
        direction: Vector3<f32>,
    },
}

impl ParticleKind {
    pub fn aging(life_time: f32, direction: Vector3<f32>) -> Self {
        Self::AgingParticle {
            age: 0.0,
            life_time,
            direction,
        }
    }
}

/// One renderable, trackable entity
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub position: Vector3<f32>,
    pub orientation: Quaternion<f32>,
    pub scale: Vector3<f32>,
    /// Units per millisecond
    pub linear_velocity: Vector3<f32>,
    /// Rotation axis scaled by radians per millisecond
    pub angular_velocity: Vector3<f32>,
    pub motion: Motion,
    pub particle: ParticleKind,
    pub visible: bool,
    pub pickable: bool,
    pub mesh: Option<Mesh>,
    /// Object-space bounding volume used by picking
    pub bounds: Option<BoundingSphere>,
}

impl Default for SceneObject {
    fn default() -> Self {
        Self::new("object")
    }
}

impl SceneObject {
    /// Create an object with identity transform and no velocity
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: Vector3::zero(),
            orientation: Quaternion::one(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            linear_velocity: Vector3::zero(),
            angular_velocity: Vector3::zero(),
            motion: Motion::Spin,
            particle: ParticleKind::Standard,
            visible: true,
            pickable: true,
            mesh: None,
            bounds: None,
        }
    }

    /// Attach a mesh and derive bounds from it
    pub fn with_mesh(mut self, mesh: Mesh) -> Self {
        self.bounds = Some(mesh.bounding_sphere());
        self.mesh = Some(mesh);
        self
    }

    pub fn with_bounds(mut self, bounds: BoundingSphere) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_position(mut self, position: Vector3<f32>) -> Self {
        self.position = position;
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: Vector3<f32>) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn with_linear_velocity(mut self, linear_velocity: Vector3<f32>) -> Self {
        self.linear_velocity = linear_velocity;
        self
    }

    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion = motion;
        self
    }

    pub fn with_particle(mut self, particle: ParticleKind) -> Self {
        self.particle = particle;
        self
    }

    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
    }

    pub fn translate(&mut self, offset: Vector3<f32>) {
        self.position += offset;
    }

    pub fn set_scale(&mut self, scale: Vector3<f32>) {
        self.scale = scale;
    }

    /// Object's local +X axis in world space
    pub fn left(&self) -> Vector3<f32> {
        self.orientation.rotate_vector(Vector3::unit_x())
    }

    /// Object's local +Y axis in world space
    pub fn up(&self) -> Vector3<f32> {
        self.orientation.rotate_vector(Vector3::unit_y())
    }

    /// Object's local +Z axis in world space
    pub fn dir(&self) -> Vector3<f32> {
        self.orientation.rotate_vector(Vector3::unit_z())
    }

    /// Rotate about the object's own left axis
    pub fn pitch(&mut self, angle: f32) {
        self.rotate_local(Vector3::unit_x(), angle);
    }

    /// Rotate about the object's own up axis
    pub fn yaw(&mut self, angle: f32) {
        self.rotate_local(Vector3::unit_y(), angle);
    }

    /// Rotate about the object's own forward axis
    pub fn roll(&mut self, angle: f32) {
        self.rotate_local(Vector3::unit_z(), angle);
    }

    fn rotate_local(&mut self, axis: Vector3<f32>, angle: f32) {
        if !angle.is_finite() {
            log::warn!("Ignoring non-finite rotation {} on '{}'", angle, self.name);
            return;
        }
        self.orientation =
            normalize_quat(self.orientation * Quaternion::from_axis_angle(axis, Rad(angle)));
    }

    /// Apply a world-space rotation to the orientation
    pub fn rotate_world(&mut self, rotation: Quaternion<f32>) {
        self.orientation = normalize_quat(rotation * self.orientation);
    }

    /// Translation * rotation * scale
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * quat_to_matrix(self.orientation)
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    /// Bounding sphere in world space, if the object has one
    pub fn world_bounds(&self) -> Option<BoundingSphere> {
        self.bounds.map(|b| b.transformed(&self.model_matrix()))
    }

    pub fn is_aging(&self) -> bool {
        matches!(self.particle, ParticleKind::AgingParticle { .. })
    }

    /// Adds `delta` to an aging particle's age. Returns true once it has expired.
    pub fn advance_age(&mut self, delta: f32) -> bool {
        match &mut self.particle {
            ParticleKind::Standard => false,
            ParticleKind::AgingParticle { age, life_time, .. } => {
                *age += delta;
                *age > *life_time
            }
        }
    }
}
