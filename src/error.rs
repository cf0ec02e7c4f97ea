//! Error types for the configuration, registration and loading boundary.
//!
//! The math and geometry kernels never fail; they degrade to sentinels and log.
//! Only operations that touch configuration, files or scene capacity return
//! [`SceneError`].

use thiserror::Error;

use crate::gfx::scene::ObjectId;

/// Errors raised by scene setup and asset loading
#[derive(Error, Debug)]
pub enum SceneError {
    /// Canvas has a zero dimension, so no projection or picking is possible
    #[error("invalid canvas size {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },

    /// Orbit camera limits are inverted or non-finite
    #[error("invalid orbit bounds: closest {closest} > farthest {farthest}")]
    InvalidOrbitBounds { closest: f32, farthest: f32 },

    /// Projection planes are unusable
    #[error("invalid projection: near {near}, far {far}")]
    InvalidProjection { near: f32, far: f32 },

    /// Scene already holds the maximum number of lights
    #[error("scene already has the maximum of {max} lights")]
    TooManyLights { max: usize },

    /// Object id does not refer to a live object
    #[error("object {0} is not in the scene")]
    UnknownObject(ObjectId),

    /// OBJ model could not be loaded
    #[error("model load error: {0}")]
    ModelLoad(#[from] tobj::LoadError),

    /// Model file contained no triangles
    #[error("model '{0}' contains no geometry")]
    EmptyModel(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration parse error
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration serialization error
    #[error("config serialization error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, SceneError>;
