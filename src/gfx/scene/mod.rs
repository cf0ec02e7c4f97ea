//! # Scene Object Model
//!
//! The owned set of live objects plus the camera, lights and projection that
//! make up one scene.
//!
//! ## Key Components
//!
//! - [`SceneContext`] - one scene's complete state, passed explicitly to the
//!   scheduler, the picker and user callbacks
//! - [`ObjectSet`] - live objects in insertion order, addressed by [`ObjectId`]
//! - [`SceneObject`] - transform, velocities, motion mode and lifecycle tag
//! - [`Light`] - directional or positional light with optional rotation
//!
//! ## Usage
//!
//! ```
//! use canvas3d::gfx::scene::{SceneContext, SceneObject};
//! use canvas3d::SceneConfig;
//!
//! let mut scene = SceneContext::new(&SceneConfig::default());
//! let id = scene.objects.add(SceneObject::new("earth"));
//! assert!(scene.objects.contains(id));
//! scene.objects.remove(id);
//! assert_eq!(scene.objects.size(), 0);
//! ```

pub mod light;
pub mod loader;
pub mod object;
pub mod scene;

// Re-export main types
pub use light::{Light, LightKind, LightRotation, LightUniform};
pub use loader::{load_obj, load_obj_from_reader};
pub use object::{Motion, ObjectId, ParticleKind, SceneObject};
pub use scene::{ObjectSet, SceneContext};
