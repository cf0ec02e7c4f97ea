//! # Object Picking System
//!
//! Resolves a click on the canvas to the scene objects under it.
//!
//! ## How it works
//!
//! 1. **Mouse to Ray**: canvas pixels become normalized device coordinates,
//!    the inverse projection turns them into a view-space direction, and the
//!    camera basis carries that direction into world space
//! 2. **Ray-Object Intersection**: the ray is tested against each pickable
//!    object's world bounding sphere, optionally refined against its triangles
//! 3. **Ordering**: hits are sorted nearest first; equal distances keep the
//!    scene's iteration order
//!
//! A projection that cannot be inverted yields no ray and therefore no hits.
//!
//! ## Usage
//!
//! ```
//! use canvas3d::gfx::picking::ObjectPicker;
//! use canvas3d::gfx::scene::SceneContext;
//! use canvas3d::SceneConfig;
//!
//! let scene = SceneContext::new(&SceneConfig::default());
//! let hits = ObjectPicker::new().pick(&scene, 250.0, 250.0);
//! assert!(hits.is_empty());
//! ```

use cgmath::{Matrix4, Vector3, Vector4};

use crate::gfx::camera::Viewpoint;
use crate::gfx::geometry::{ray_sphere_distance, ray_triangle_distance, Ray};
use crate::gfx::scene::{ObjectId, ObjectSet, SceneContext, SceneObject};
use crate::math::{
    inverse_matrix, make_pose_matrix, multiply_matrix_by_direction, multiply_matrix_by_vector,
    try_normalize,
};

/// How closely hits are tested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickMode {
    /// Bounding spheres only
    #[default]
    Bounds,
    /// Bounding sphere, then mesh triangles when the object has a mesh
    Precise,
}

/// Result of an object picking operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub id: ObjectId,
    /// Distance from the ray origin to the intersection
    pub distance: f32,
    /// World space intersection point
    pub point: Vector3<f32>,
}

/// Convert canvas coordinates to a world-space ray from the camera.
///
/// Returns `None` for a zero-sized canvas, a singular projection or any
/// unprojection that does not produce a usable direction.
pub fn screen_to_ray(
    screen_pos: (f32, f32),
    canvas: (u32, u32),
    projection: &Matrix4<f32>,
    camera: &impl Viewpoint,
) -> Option<Ray> {
    let (width, height) = canvas;
    if width == 0 || height == 0 {
        log::warn!("Cannot pick on a {}x{} canvas", width, height);
        return None;
    }

    let (mouse_x, mouse_y) = screen_pos;
    let ndc_x = 2.0 * mouse_x / width as f32 - 1.0;
    let ndc_y = -(2.0 * mouse_y / height as f32 - 1.0); // Flip Y axis

    let Some(inverse_projection) = inverse_matrix(projection) else {
        log::warn!("Projection matrix is singular, no pick ray");
        return None;
    };

    // Far-plane point in view space
    let view = multiply_matrix_by_vector(&inverse_projection, Vector4::new(ndc_x, ndc_y, 1.0, 1.0));
    if view.w == 0.0 || !view.w.is_finite() {
        log::warn!("Unprojection produced w = {}, no pick ray", view.w);
        return None;
    }
    // View space looks down -Z; flip so +Z runs along the camera direction
    let view_dir = Vector3::new(view.x / view.w, view.y / view.w, -(view.z / view.w));

    let pose = make_pose_matrix(-camera.left(), camera.up(), camera.dir(), camera.position());
    let world_dir = multiply_matrix_by_direction(&pose, view_dir);

    match try_normalize(world_dir) {
        Some(direction) if crate::math::is_finite(direction) => {
            Some(Ray::new(camera.position(), direction))
        }
        _ => {
            log::warn!("Pick ray direction degenerated to {:?}", world_dir);
            None
        }
    }
}

/// Object picker for 3D mouse selection
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectPicker {
    pub mode: PickMode,
}

impl ObjectPicker {
    /// Create a bounds-only picker
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: PickMode) -> Self {
        Self { mode }
    }

    /// Every object under the canvas point, nearest first
    pub fn pick(&self, scene: &SceneContext, x: f32, y: f32) -> Vec<PickHit> {
        match screen_to_ray(
            (x, y),
            scene.canvas_size(),
            &scene.projection.matrix(),
            &scene.camera,
        ) {
            Some(ray) => self.cast(&scene.objects, &ray),
            None => Vec::new(),
        }
    }

    /// Every visible, pickable object the ray hits, nearest first
    pub fn cast(&self, objects: &ObjectSet, ray: &Ray) -> Vec<PickHit> {
        if !ray.is_valid() {
            return Vec::new();
        }

        let mut hits: Vec<PickHit> = objects
            .iter()
            .filter(|(_, object)| object.visible && object.pickable)
            .filter_map(|(id, object)| {
                let distance = self.intersect(object, ray)?;
                Some(PickHit {
                    id,
                    distance,
                    point: ray.point_at(distance),
                })
            })
            .collect();

        // Stable: equal distances keep iteration order
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        log::trace!("Pick ray {:?} hit {} objects", ray.direction, hits.len());
        hits
    }

    fn intersect(&self, object: &SceneObject, ray: &Ray) -> Option<f32> {
        let bounds = object.world_bounds()?;
        let sphere_distance =
            ray_sphere_distance(ray.origin, ray.direction, bounds.center, bounds.radius)?;

        match (self.mode, &object.mesh) {
            (PickMode::Precise, Some(mesh)) if !mesh.is_empty() => {
                let model = object.model_matrix();
                mesh.world_triangles(&model)
                    .filter_map(|[v0, v1, v2]| {
                        ray_triangle_distance(ray.origin, ray.direction, v0, v1, v2)
                    })
                    .min_by(|a, b| a.total_cmp(b))
            }
            _ => Some(sphere_distance),
        }
    }
}
