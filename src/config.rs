//! # Scene Configuration
//!
//! Startup settings for a scene: canvas size, projection, orbit camera limits,
//! spawn policy, light capacity and logging. Every field has a default, so a
//! TOML file only needs the values it wants to change:
//!
//! ```toml
//! max_lights = 4
//!
//! [canvas]
//! width = 500
//! height = 500
//!
//! [orbit]
//! closest = 60.0
//! farthest = 1000.0
//! distance = 200.0
//!
//! [spawn]
//! mode = "per_frame"
//! one_in = 50
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SceneError};
use crate::simulation::SpawnPolicy;

/// Canvas dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
        }
    }
}

/// Perspective projection parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub fovy_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fovy_degrees: 45.0,
            near: 0.1,
            far: 3000.0,
        }
    }
}

/// Orbit camera distance limits and starting distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub closest: f32,
    pub farthest: f32,
    pub distance: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            closest: 1.0,
            farthest: 1000.0,
            distance: 200.0,
        }
    }
}

/// Top-level scene configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub canvas: CanvasConfig,
    pub projection: ProjectionConfig,
    pub orbit: OrbitConfig,
    pub spawn: SpawnPolicy,
    pub max_lights: usize,
    /// Seed for the scene RNG; `None` seeds from the OS
    pub rng_seed: Option<u64>,
    pub log_filter: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            projection: ProjectionConfig::default(),
            orbit: OrbitConfig::default(),
            spawn: SpawnPolicy::default(),
            max_lights: 8,
            rng_seed: None,
            log_filter: "info".to_string(),
        }
    }
}

impl SceneConfig {
    /// Parses a configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: SceneConfig = toml::from_str(contents)?;
        Ok(config)
    }

    /// Loads a configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&contents)?;
        log::debug!("Loaded scene config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Serializes the configuration back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks the values that would otherwise produce a degenerate scene
    pub fn validate(&self) -> Result<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(SceneError::InvalidCanvas {
                width: self.canvas.width,
                height: self.canvas.height,
            });
        }

        let orbit = &self.orbit;
        if !(orbit.closest.is_finite() && orbit.farthest.is_finite())
            || orbit.closest < 0.0
            || orbit.closest > orbit.farthest
        {
            return Err(SceneError::InvalidOrbitBounds {
                closest: orbit.closest,
                farthest: orbit.farthest,
            });
        }

        let projection = &self.projection;
        if projection.near <= 0.0 || projection.near >= projection.far {
            return Err(SceneError::InvalidProjection {
                near: projection.near,
                far: projection.far,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SceneConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SceneConfig::from_toml_str(
            r#"
            max_lights = 4

            [orbit]
            closest = 60.0
            farthest = 1000.0

            [spawn]
            mode = "per_frame"
            one_in = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.max_lights, 4);
        assert_eq!(config.orbit.closest, 60.0);
        assert_eq!(config.orbit.distance, OrbitConfig::default().distance);
        assert_eq!(config.canvas, CanvasConfig::default());
        assert_eq!(config.spawn, SpawnPolicy::PerFrame { one_in: 50 });
    }

    #[test]
    fn test_toml_round_trip_preserves_values() {
        let mut config = SceneConfig::default();
        config.rng_seed = Some(7);
        config.canvas.width = 640;

        let text = config.to_toml_string().unwrap();
        assert_eq!(SceneConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_validate_rejects_zero_canvas() {
        let mut config = SceneConfig::default();
        config.canvas.height = 0;
        assert!(matches!(
            config.validate(),
            Err(SceneError::InvalidCanvas { width: 500, height: 0 })
        ));
    }

    #[test]
    fn test_validate_rejects_inverted_orbit_bounds() {
        let mut config = SceneConfig::default();
        config.orbit.closest = 50.0;
        config.orbit.farthest = 10.0;
        assert!(matches!(
            config.validate(),
            Err(SceneError::InvalidOrbitBounds { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_projection() {
        let mut config = SceneConfig::default();
        config.projection.near = 10.0;
        config.projection.far = 5.0;
        assert!(matches!(
            config.validate(),
            Err(SceneError::InvalidProjection { .. })
        ));
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(matches!(
            SceneConfig::from_toml_str("max_lights = \"many\""),
            Err(SceneError::ConfigParse(_))
        ));
    }
}
