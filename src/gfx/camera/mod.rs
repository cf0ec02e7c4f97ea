//! # Camera Model
//!
//! Two camera variants behind one [`Viewpoint`] capability set:
//!
//! - [`FreeCamera`] - explicit position and look-at target
//! - [`OrbitCamera`] - eye derived from a target, a clamped distance and
//!   accumulated yaw/pitch
//!
//! Scenes hold the closed [`Camera`] enum. [`Projection`] and
//! [`CameraUniform`] turn a camera into the matrices a render backend uploads.

pub mod camera_controller;
pub mod camera_utils;
pub mod free_camera;
pub mod orbit_camera;

// Re-export main types
pub use camera_controller::OrbitController;
pub use camera_utils::{Camera, CameraUniform, Projection, Viewpoint};
pub use free_camera::FreeCamera;
pub use orbit_camera::{OrbitCamera, OrbitCameraBounds};
