use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::Deserialize;

use super::SceneError;

/// A static scene, as written in a `scene.toml`:
///
/// ```toml
/// [camera]
/// position = [0.0, 2.0, 6.0]
///
/// [[mesh]]
/// id = "barrel"
/// path = "barrels.obj"
/// material = "barrel"
///
/// [[texture]]
/// id = "barrel"
/// path = "barrel.png"
///
/// [[object]]
/// mesh = "barrel"
/// texture = "barrel"
/// position = [1.5, 0.0, 1.0]
/// rotation = 90.0
/// ```
///
/// Paths are relative to the descriptor's folder.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SceneDescriptor {
    #[serde(default)]
    pub camera: CameraStart,
    #[serde(default, rename = "mesh")]
    pub meshes: Vec<MeshEntry>,
    #[serde(default, rename = "texture")]
    pub textures: Vec<TextureEntry>,
    #[serde(default, rename = "object")]
    pub objects: Vec<ObjectEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraStart {
    pub position: Vec3,
}

impl Default for CameraStart {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 2.0, 6.0),
        }
    }
}

/// One drawable buffer: a material of an `.obj` file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MeshEntry {
    pub id: String,
    pub path: PathBuf,
    /// Material to draw. Without it the file is expected to hold a single
    /// material; otherwise the first one by name is used.
    #[serde(default)]
    pub material: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TextureEntry {
    pub id: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObjectEntry {
    pub mesh: String,
    pub texture: String,
    pub position: Vec3,
    /// Rotation around +Y in degrees
    #[serde(default)]
    pub rotation: f32,
}

impl SceneDescriptor {
    pub fn from_file(path: &Path) -> Result<Self, SceneError> {
        let data = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&data).map_err(|source| SceneError::Descriptor {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_descriptor() -> Result<(), toml::de::Error> {
        let scene: SceneDescriptor = toml::from_str(
            r#"
            [[mesh]]
            id = "fence"
            path = "fence.obj"

            [[mesh]]
            id = "stand"
            path = "barrels.obj"
            material = "planks"

            [[texture]]
            id = "atlas"
            path = "colormap.png"

            [[object]]
            mesh = "fence"
            texture = "atlas"
            position = [-4.0, 0.0, -2.0]

            [[object]]
            mesh = "stand"
            texture = "atlas"
            position = [3.0, 0.0, 2.0]
            rotation = 123.0
            "#,
        )?;

        assert_eq!(scene.camera, CameraStart::default());
        assert_eq!(scene.meshes.len(), 2);
        assert_eq!(scene.meshes[0].material, None);
        assert_eq!(scene.meshes[1].material.as_deref(), Some("planks"));
        assert_eq!(scene.objects[0].rotation, 0.0);
        assert_eq!(scene.objects[1].position, Vec3::new(3.0, 0.0, 2.0));
        Ok(())
    }
}
