//! Hardware-oriented mesh structures.
//!
//! A loaded mesh is a set of flat `f32` buffers keyed by material name. Each
//! vertex occupies [`vertex::FLOATS_PER_VERTEX`] floats laid out as
//! position, normal, texcoord.

pub mod error;
pub mod mesh;
pub mod vertex;

pub use error::{FormatError, Result};
pub use mesh::{MeshBuffers, DEFAULT_MATERIAL};
