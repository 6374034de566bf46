use std::path::{Path, PathBuf};

use log::debug;
use ve_format::vertex::FLOATS_PER_VERTEX;

use super::{BackendError, MeshHandle, RenderBackend, TextureHandle};

/// Backend without a GPU: remembers what was uploaded and hands out
/// sequential handles. Used by the dry-run binary and in tests.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    meshes: Vec<usize>,
    textures: Vec<PathBuf>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertex count of an uploaded mesh.
    pub fn mesh_vertices(&self, handle: MeshHandle) -> Option<usize> {
        self.meshes.get(handle.0 as usize).copied()
    }

    pub fn texture_path(&self, handle: TextureHandle) -> Option<&Path> {
        self.textures.get(handle.0 as usize).map(PathBuf::as_path)
    }

    pub fn mesh_uploads(&self) -> usize {
        self.meshes.len()
    }

    pub fn texture_uploads(&self) -> usize {
        self.textures.len()
    }
}

impl RenderBackend for HeadlessBackend {
    fn upload_mesh(&mut self, vertices: &[f32]) -> Result<MeshHandle, BackendError> {
        if vertices.len() % FLOATS_PER_VERTEX != 0 {
            return Err(format!(
                "vertex data of {} floats is not made of whole vertices",
                vertices.len()
            )
            .into());
        }

        let handle = MeshHandle(self.meshes.len() as u32);
        self.meshes.push(vertices.len() / FLOATS_PER_VERTEX);
        debug!("Uploaded mesh {:?} with {} vertices", handle, vertices.len() / FLOATS_PER_VERTEX);
        Ok(handle)
    }

    fn upload_texture(&mut self, path: &Path) -> Result<TextureHandle, BackendError> {
        let handle = TextureHandle(self.textures.len() as u32);
        self.textures.push(path.to_path_buf());
        debug!("Uploaded texture {:?} from `{}`", handle, path.display());
        Ok(handle)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_handles_are_sequential() -> Result<(), BackendError> {
        let mut backend = HeadlessBackend::new();
        let a = backend.upload_mesh(&[0.0; 24])?;
        let b = backend.upload_mesh(&[])?;
        let t = backend.upload_texture(Path::new("ground.png"))?;

        assert_eq!((a, b), (MeshHandle(0), MeshHandle(1)));
        assert_eq!(backend.mesh_vertices(a), Some(3));
        assert_eq!(backend.mesh_vertices(b), Some(0));
        assert_eq!(backend.texture_path(t), Some(Path::new("ground.png")));
        Ok(())
    }

    #[test]
    fn test_partial_vertex_is_refused() {
        let mut backend = HeadlessBackend::new();
        assert!(backend.upload_mesh(&[0.0; 10]).is_err());
        assert_eq!(backend.mesh_uploads(), 0);
    }
}
