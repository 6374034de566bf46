//! Viewer settings, read from TOML.
//!
//! Every section and field has a default, so a partial file (or none at
//! all) is fine:
//!
//! ```toml
//! [window]
//! width = 1920
//! height = 1080
//!
//! [camera]
//! speed = 8.0
//! ```

use std::path::{Path, PathBuf};

use glam::{Mat4, Vec3};
use serde::Deserialize;

use crate::core::{camera::CameraConfig, input::KeyBindings};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config `{}`: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub target_fps: u32,
    pub clear_color: [f32; 3],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "ve viewer".to_owned(),
            target_fps: 60,
            clear_color: [0.5, 0.8, 0.9],
        }
    }
}

impl WindowConfig {
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Vertical field of view in degrees
    pub fovy: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl ProjectionConfig {
    /// Right-handed perspective with OpenGL depth range.
    pub fn matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fovy.to_radians(), aspect, self.near, self.far)
    }
}

/// The single directional light plus ambient term.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Lighting {
    pub direction: Vec3,
    pub ambient_color: Vec3,
    pub ambient_strength: f32,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            direction: Vec3::new(-0.2, -0.5, -0.3),
            ambient_color: Vec3::ONE,
            ambient_strength: 0.25,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub projection: ProjectionConfig,
    pub lighting: Lighting,
    pub camera: CameraConfig,
    pub keys: KeyBindings,
}

impl ViewerConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(data: &str) -> Result<Self, toml::de::Error> {
        let config: Self = toml::from_str(data)?;
        if config.camera.pitch_limit >= 90.0 {
            log::warn!(
                "Pitch limit of {}° lets the camera flip over, consider staying below 90°",
                config.camera.pitch_limit
            );
        }
        Ok(config)
    }

    /// Projection for the configured window size.
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix(self.window.aspect())
    }
}
