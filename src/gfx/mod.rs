//! # Graphics Module
//!
//! Scene-side graphics state for the Canvas3D engine: cameras, geometry,
//! picking and the scene object model.
//!
//! ## Architecture Overview
//!
//! - **Camera System** ([`camera`]) - free and orbit cameras, projections
//! - **Geometry** ([`geometry`]) - meshes, bounds and ray intersection tests
//! - **Picking** ([`picking`]) - canvas coordinates to ordered object hits
//! - **Scene Management** ([`scene`]) - live objects, lights and the scene context
//!
//! Drawing is not done here. A [`RenderBackend`] receives the updated scene
//! once per frame and owns shaders, buffers and draw calls.

pub mod camera;
pub mod geometry;
pub mod picking;
pub mod scene;

// Re-export commonly used types
pub use camera::{Camera, CameraUniform, FreeCamera, OrbitCamera, Projection, Viewpoint};
pub use picking::{ObjectPicker, PickHit, PickMode};
pub use scene::{Light, ObjectId, ObjectSet, SceneContext, SceneObject};

/// Draws a scene; called once per tick after the update pass
pub trait RenderBackend {
    fn render(
        &mut self,
        objects: &ObjectSet,
        camera: &Camera,
        lights: &[Light],
        camera_uniform: &CameraUniform,
    );

    /// Canvas size changed
    fn resize(&mut self, _width: u32, _height: u32) {}
}
