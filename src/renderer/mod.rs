//! The boundary to the graphics API.
//!
//! The viewer core never talks to the GPU. It hands vertex buffers and
//! texture paths to a [`RenderBackend`] and only keeps the opaque handles
//! it gets back.

mod headless;

use std::path::Path;

pub use headless::HeadlessBackend;

/// Opaque handle of an uploaded vertex buffer (a VAO, a buffer id, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u32);

/// Opaque handle of an uploaded texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Whatever the graphics API reports when an upload fails.
pub type BackendError = Box<dyn std::error::Error + Send + Sync>;

pub trait RenderBackend {
    /// Uploads interleaved vertices (position, normal, texcoord; 8 floats each).
    fn upload_mesh(&mut self, vertices: &[f32]) -> Result<MeshHandle, BackendError>;

    /// Decodes and uploads the image at `path`.
    fn upload_texture(&mut self, path: &Path) -> Result<TextureHandle, BackendError>;
}
