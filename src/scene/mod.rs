pub mod descriptor;
pub mod object;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use glam::Vec3;
use log::{info, warn};
use ve_asset::obj::{self, LoadError, ObjMeta};
use ve_format::{vertex::FLOATS_PER_VERTEX, MeshBuffers};

use crate::renderer::{BackendError, MeshHandle, RenderBackend, TextureHandle};

pub use descriptor::SceneDescriptor;
pub use object::RenderObject;

#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    #[error("Could not read scene `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid scene descriptor `{}`: {source}", path.display())]
    Descriptor {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to load mesh `{id}`: {source}")]
    Load {
        id: String,
        #[source]
        source: LoadError,
    },
    #[error("Mesh `{id}`: `{}` has no material `{material}`", path.display())]
    MissingMaterial {
        id: String,
        path: PathBuf,
        material: String,
    },
    #[error("Duplicate {kind} id `{id}`")]
    DuplicateId { kind: &'static str, id: String },
    #[error("Object #{index} references unknown {kind} `{id}`")]
    UnknownReference {
        index: usize,
        kind: &'static str,
        id: String,
    },
    #[error("Upload of {what} failed: {source}")]
    Upload {
        what: String,
        #[source]
        source: BackendError,
    },
}

pub type SceneResult<T> = ::std::result::Result<T, SceneError>;

#[derive(Debug, Clone, Copy)]
struct UploadedMesh {
    handle: MeshHandle,
    vertex_count: u32,
}

/// The uploaded, placed objects of a [`SceneDescriptor`].
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<RenderObject>,
    camera_start: Vec3,
}

impl Scene {
    /// Loads a descriptor file and builds it; relative paths in the
    /// descriptor are resolved against its folder.
    pub fn load(path: &Path, backend: &mut impl RenderBackend) -> SceneResult<Self> {
        let descriptor = SceneDescriptor::from_file(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Self::build(&descriptor, base_dir, backend)
    }

    /// Loads every referenced `.obj` once, uploads the selected material
    /// buffers and textures, and places the objects.
    pub fn build(descriptor: &SceneDescriptor, base_dir: &Path, backend: &mut impl RenderBackend) -> SceneResult<Self> {
        let mut sources: HashMap<PathBuf, MeshBuffers> = HashMap::new();
        let mut meshes: HashMap<&str, UploadedMesh> = HashMap::new();

        for entry in &descriptor.meshes {
            if meshes.contains_key(entry.id.as_str()) {
                return Err(SceneError::DuplicateId {
                    kind: "mesh",
                    id: entry.id.clone(),
                });
            }

            let path = base_dir.join(&entry.path);
            if !sources.contains_key(&path) {
                let buffers = load_mesh(&path).map_err(|source| SceneError::Load {
                    id: entry.id.clone(),
                    source,
                })?;
                sources.insert(path.clone(), buffers);
            }
            let buffers = &sources[&path];

            let vertices = select_material(&entry.id, &path, buffers, entry.material.as_deref())?;
            let handle = backend.upload_mesh(vertices).map_err(|source| SceneError::Upload {
                what: format!("mesh `{}`", entry.id),
                source,
            })?;

            meshes.insert(
                &entry.id,
                UploadedMesh {
                    handle,
                    vertex_count: (vertices.len() / FLOATS_PER_VERTEX) as u32,
                },
            );
        }

        let mut textures: HashMap<&str, TextureHandle> = HashMap::new();
        for entry in &descriptor.textures {
            if textures.contains_key(entry.id.as_str()) {
                return Err(SceneError::DuplicateId {
                    kind: "texture",
                    id: entry.id.clone(),
                });
            }

            let handle = backend
                .upload_texture(&base_dir.join(&entry.path))
                .map_err(|source| SceneError::Upload {
                    what: format!("texture `{}`", entry.id),
                    source,
                })?;
            textures.insert(&entry.id, handle);
        }

        let mut objects = Vec::with_capacity(descriptor.objects.len());
        for (index, entry) in descriptor.objects.iter().enumerate() {
            let mesh = meshes
                .get(entry.mesh.as_str())
                .ok_or_else(|| SceneError::UnknownReference {
                    index,
                    kind: "mesh",
                    id: entry.mesh.clone(),
                })?;
            let texture = textures
                .get(entry.texture.as_str())
                .ok_or_else(|| SceneError::UnknownReference {
                    index,
                    kind: "texture",
                    id: entry.texture.clone(),
                })?;

            objects.push(RenderObject::new(
                mesh.handle,
                mesh.vertex_count,
                *texture,
                entry.position,
                entry.rotation.to_radians(),
            ));
        }

        info!(
            "Built scene: {} meshes from {} files, {} textures, {} objects",
            meshes.len(),
            sources.len(),
            textures.len(),
            objects.len()
        );

        Ok(Self {
            objects,
            camera_start: descriptor.camera.position,
        })
    }

    /// A scene from objects that were uploaded elsewhere.
    pub fn from_objects(objects: Vec<RenderObject>, camera_start: Vec3) -> Self {
        Self {
            objects,
            camera_start,
        }
    }

    pub fn objects(&self) -> &[RenderObject] {
        &self.objects
    }

    /// Objects that actually have vertices to draw.
    pub fn drawables(&self) -> impl Iterator<Item = &RenderObject> {
        self.objects.iter().filter(|object| object.is_drawable())
    }

    pub fn camera_start(&self) -> Vec3 {
        self.camera_start
    }
}

fn load_mesh(path: &Path) -> Result<MeshBuffers, LoadError> {
    let meta = ObjMeta::resolve_for(path)?;
    obj::load_with(path, meta)
}

fn select_material<'a>(
    id: &str,
    path: &Path,
    buffers: &'a MeshBuffers,
    material: Option<&str>,
) -> SceneResult<&'a [f32]> {
    match material {
        Some(material) => buffers.get(material).ok_or_else(|| SceneError::MissingMaterial {
            id: id.to_owned(),
            path: path.to_path_buf(),
            material: material.to_owned(),
        }),
        None => {
            let (name, vertices) = match buffers.primary() {
                Some(primary) => primary,
                None => {
                    warn!("Mesh `{}`: `{}` contains no faces, nothing will be drawn", id, path.display());
                    return Ok(&[]);
                }
            };
            if buffers.len() > 1 {
                warn!(
                    "Mesh `{}`: `{}` has {} materials and none was chosen, using `{}`",
                    id,
                    path.display(),
                    buffers.len(),
                    name
                );
            }
            Ok(vertices)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ve_format::vertex::Vertex;

    fn two_materials() -> MeshBuffers {
        let mut buffers = MeshBuffers::new();
        for _ in 0..3 {
            buffers.push_vertex("planks", &Vertex::default());
        }
        for _ in 0..6 {
            buffers.push_vertex("barrel", &Vertex::default());
        }
        buffers
    }

    #[test]
    fn test_select_named_material() -> SceneResult<()> {
        let buffers = two_materials();
        let planks = select_material("stand", Path::new("barrels.obj"), &buffers, Some("planks"))?;
        assert_eq!(planks.len(), 24);

        let missing = select_material("lid", Path::new("barrels.obj"), &buffers, Some("lid"));
        assert!(matches!(missing, Err(SceneError::MissingMaterial { .. })));
        Ok(())
    }

    #[test]
    fn test_unnamed_material_falls_back_to_primary() -> SceneResult<()> {
        let buffers = two_materials();
        let vertices = select_material("barrels", Path::new("barrels.obj"), &buffers, None)?;
        // `barrel` sorts before `planks`
        assert_eq!(vertices.len(), 48);

        let no_faces = MeshBuffers::new();
        let empty = select_material("nothing", Path::new("empty.obj"), &no_faces, None)?;
        assert!(empty.is_empty());
        Ok(())
    }
}
