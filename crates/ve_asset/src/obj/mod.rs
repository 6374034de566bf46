mod builder;
mod error;
mod meta;
mod parser;

use log::info;
use std::fs;
use std::io::BufReader;
use std::path::Path;
use ve_format::MeshBuffers;

pub use self::error::{LoadError, Result};
pub use self::meta::{ObjMeta, ParseMode};

/// Loads a Wavefront `.obj` file with the default (strict) settings.
///
/// Returns one interleaved buffer (position, normal, texcoord) per material.
/// Faces before the first `usemtl` land under [`ve_format::DEFAULT_MATERIAL`].
pub fn load(path: impl AsRef<Path>) -> Result<MeshBuffers> {
    load_with(path, ObjMeta::default())
}

pub fn load_with(path: impl AsRef<Path>, meta: ObjMeta) -> Result<MeshBuffers> {
    let path = path.as_ref();
    let file = fs::File::open(path).map_err(|e| LoadError::unavailable(path, e))?;

    info!("Loading mesh: {}", path.display());
    let mesh = parser::parse(BufReader::new(file), meta, path)?;
    info!(
        "Loaded `{}`: {} vertices in {} material(s)",
        path.display(),
        mesh.total_vertex_count(),
        mesh.len()
    );

    Ok(mesh)
}

/// Parses `.obj` text that is already in memory.
pub fn parse_str(source: &str, meta: ObjMeta) -> Result<MeshBuffers> {
    parser::parse(source.as_bytes(), meta, Path::new("<memory>"))
}
