//! Geometry ingestion.
//!
//! Reads Wavefront `.obj` text into [`ve_format::MeshBuffers`]: one flat,
//! interleaved vertex buffer per material, ready for upload.

pub mod obj;

pub use obj::{load, load_with, LoadError, ObjMeta, ParseMode};
