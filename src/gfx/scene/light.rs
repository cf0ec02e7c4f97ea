use cgmath::Vector3;

use crate::math::rotate_about_axis;

/// Slow rotation of a light about a fixed axis, `delta / divisor` radians per tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightRotation {
    pub axis: Vector3<f32>,
    /// Milliseconds per radian
    pub divisor: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Directional {
        direction: Vector3<f32>,
    },
    Positional {
        position: Vector3<f32>,
        /// Constant, linear and quadratic attenuation factors
        attenuation: [f32; 3],
    },
}

/// A directional or positional light consumed by the render backend
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub name: String,
    pub kind: LightKind,
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub enabled: bool,
    pub rotation: Option<LightRotation>,
}

impl Light {
    pub fn directional(name: impl Into<String>, direction: Vector3<f32>) -> Self {
        Self::with_kind(name, LightKind::Directional { direction })
    }

    pub fn positional(name: impl Into<String>, position: Vector3<f32>) -> Self {
        Self::with_kind(
            name,
            LightKind::Positional {
                position,
                attenuation: [1.0, 0.0, 0.0],
            },
        )
    }

    fn with_kind(name: impl Into<String>, kind: LightKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ambient: [0.0, 0.0, 0.0],
            diffuse: [1.0, 1.0, 1.0],
            specular: [0.0, 0.0, 0.0],
            enabled: true,
            rotation: None,
        }
    }

    pub fn with_colors(mut self, ambient: [f32; 3], diffuse: [f32; 3], specular: [f32; 3]) -> Self {
        self.ambient = ambient;
        self.diffuse = diffuse;
        self.specular = specular;
        self
    }

    pub fn with_rotation(mut self, axis: Vector3<f32>, divisor: f32) -> Self {
        self.rotation = Some(LightRotation { axis, divisor });
        self
    }

    /// Direction for directional lights, position for positional ones
    pub fn vector(&self) -> Vector3<f32> {
        match self.kind {
            LightKind::Directional { direction } => direction,
            LightKind::Positional { position, .. } => position,
        }
    }

    /// Advance the configured rotation by `delta` milliseconds
    pub fn animate(&mut self, delta: f32) {
        let Some(rotation) = self.rotation else {
            return;
        };
        if delta == 0.0 {
            return;
        }
        if rotation.divisor == 0.0 || !rotation.divisor.is_finite() {
            log::warn!("Light '{}' has an unusable rotation divisor {}", self.name, rotation.divisor);
            return;
        }

        let angle = delta / rotation.divisor;
        match &mut self.kind {
            LightKind::Directional { direction } => {
                *direction = rotate_about_axis(*direction, rotation.axis, angle);
            }
            LightKind::Positional { position, .. } => {
                *position = rotate_about_axis(*position, rotation.axis, angle);
            }
        }
    }

    pub fn to_uniform(&self) -> LightUniform {
        let (vector, w, attenuation) = match self.kind {
            LightKind::Directional { direction } => (direction, 0.0, [1.0, 0.0, 0.0]),
            LightKind::Positional {
                position,
                attenuation,
            } => (position, 1.0, attenuation),
        };
        LightUniform {
            vector: [vector.x, vector.y, vector.z, w],
            ambient: extend(self.ambient),
            diffuse: extend(self.diffuse),
            specular: extend(self.specular),
            attenuation: [
                attenuation[0],
                attenuation[1],
                attenuation[2],
                if self.enabled { 1.0 } else { 0.0 },
            ],
        }
    }
}

fn extend(rgb: [f32; 3]) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], 1.0]
}

/// GPU-ready light block, 16-byte aligned rows
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq)]
pub struct LightUniform {
    /// Direction (w = 0) or position (w = 1)
    pub vector: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    /// Attenuation factors; w is 1 when the light is on
    pub attenuation: [f32; 4],
}
