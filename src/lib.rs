// src/lib.rs
//! Canvas3D Scene Engine
//!
//! The scene-graph core of a canvas 3D library: an owned set of live scene
//! objects, free and orbit cameras, lights, a per-frame kinematic scheduler and
//! ray-based picking. Rendering, model parsing and window/event wiring are
//! external collaborators that plug in through [`gfx::RenderBackend`] and
//! [`input::InputEvent`].

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod input;
pub mod math;
pub mod prelude;
pub mod simulation;

// Re-export main types for convenience
pub use app::SceneApp;
pub use config::SceneConfig;
pub use error::{Result, SceneError};

/// Installs `env_logger` with `filter` as the default directive.
///
/// `RUST_LOG` still takes precedence. Calling this more than once is harmless.
pub fn init_logging(filter: &str) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp_millis()
        .try_init();
}

/// Creates a scene application with the default configuration
pub fn default() -> SceneApp {
    SceneApp::new(SceneConfig::default())
}
