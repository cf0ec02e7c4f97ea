//! # Canvas3D Prelude
//!
//! Commonly used types and traits in one import.
//!
//! ## Usage
//!
//! ```rust
//! use canvas3d::prelude::*;
//!
//! let mut app = canvas3d::default();
//! let id = app.context_mut().objects.add(SceneObject::new("earth").with_mesh(generate_sphere(16, 8)));
//! app.set_update_callback(move |scene, delta| {
//!     if let Some(earth) = scene.objects.get_mut(id) {
//!         earth.yaw(delta / 1000.0);
//!     }
//! });
//! app.start().unwrap();
//! app.tick(16.0);
//! ```

// Re-export core application types
pub use crate::app::SceneApp;
pub use crate::config::SceneConfig;
pub use crate::default;
pub use crate::error::{Result, SceneError};
pub use crate::input::{ButtonMask, InputEvent, KeyCode};

// Re-export graphics and scene types
pub use crate::gfx::camera::{
    Camera, FreeCamera, OrbitCamera, OrbitController, Projection, Viewpoint,
};
pub use crate::gfx::geometry::{generate_cube, generate_plane, generate_sphere, BoundingSphere, Mesh, Ray};
pub use crate::gfx::picking::{ObjectPicker, PickHit, PickMode};
pub use crate::gfx::scene::{
    Light, Motion, ObjectId, ObjectSet, ParticleKind, SceneContext, SceneObject,
};
pub use crate::gfx::RenderBackend;

// Re-export simulation types
pub use crate::simulation::{FrameScheduler, SpawnPolicy, Spawner, SurfaceSpawner};

// Re-export common external dependencies
pub use cgmath::{InnerSpace, Vector3, Zero};
