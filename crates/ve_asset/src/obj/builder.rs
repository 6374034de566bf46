use log::trace;
use ve_format::{mesh::DEFAULT_MATERIAL, vertex::Vertex, MeshBuffers};

use super::error::{LoadError, Result};
use super::meta::ObjMeta;

/// One `p/t/n` corner of a face, 1-based as written in the file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ObjFaceIndex {
    pub(crate) vert_i: usize,
    pub(crate) uv_i: usize,
    pub(crate) normal_i: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ObjFace {
    pub(crate) face_i: [ObjFaceIndex; 3],
}

/// Accumulates the attribute pools of a single pass and emits one
/// interleaved vertex per face corner into the active material's buffer.
#[derive(Debug)]
pub(crate) struct ObjMeshBuilder {
    pub(crate) positions: Vec<[f32; 3]>,
    pub(crate) uvs: Vec<[f32; 2]>,
    pub(crate) normals: Vec<[f32; 3]>,
    pub(crate) curr_material: String,
    pub(crate) meta: ObjMeta,
    buffers: MeshBuffers,
    faces: usize,
}

impl Default for ObjMeshBuilder {
    fn default() -> Self {
        Self::new(ObjMeta::default())
    }
}

impl ObjMeshBuilder {
    pub(crate) fn new(meta: ObjMeta) -> Self {
        Self {
            positions: Vec::new(),
            uvs: Vec::new(),
            normals: Vec::new(),
            curr_material: DEFAULT_MATERIAL.to_owned(),
            meta,
            buffers: MeshBuffers::new(),
            faces: 0,
        }
    }

    pub(crate) fn set_material(&mut self, name: &str) {
        if self.curr_material != name {
            trace!("Switching material to `{}`", name);
            self.curr_material = name.to_owned();
        }
    }

    pub(crate) fn push_vertex(&mut self, mut position: [f32; 3]) {
        self.flip(&mut position);
        self.positions.push(position);
    }

    pub(crate) fn push_uv(&mut self, uv: [f32; 2]) {
        self.uvs.push(uv);
    }

    pub(crate) fn push_normal(&mut self, mut normal: [f32; 3]) {
        self.flip(&mut normal);
        self.normals.push(normal);
    }

    /// Resolves every corner against the attributes read so far, then
    /// appends the three vertices. Nothing is appended if any corner fails.
    pub(crate) fn push_face(&mut self, line: usize, face: &ObjFace) -> Result<()> {
        let mut vertices = [Vertex::default(); 3];

        for (n, (corner, vertex)) in face.face_i.iter().zip(vertices.iter_mut()).enumerate() {
            let field = |component: &str| format!("f[{}].{}", n + 1, component);

            *vertex = Vertex::new(
                resolve(&self.positions, corner.vert_i, line, || field("position"))?,
                resolve(&self.normals, corner.normal_i, line, || field("normal"))?,
                resolve(&self.uvs, corner.uv_i, line, || field("texcoord"))?,
            );
        }

        for vertex in &vertices {
            self.buffers.push_vertex(&self.curr_material, vertex);
        }
        self.faces += 1;

        Ok(())
    }

    pub(crate) fn face_count(&self) -> usize {
        self.faces
    }

    pub(crate) fn build(self) -> MeshBuffers {
        self.buffers
    }

    fn flip(&self, v: &mut [f32; 3]) {
        for n in 0..3 {
            if self.meta.flip_axis[n] {
                v[n] = -v[n];
            }
        }
    }
}

// 1-based lookup; an index may only name an entry that was declared above the face
fn resolve<T: Copy, F: Fn() -> String>(pool: &[T], index: usize, line: usize, field: F) -> Result<T> {
    if index == 0 {
        return Err(LoadError::malformed(line, field(), "indices are 1-based, found 0"));
    }

    pool.get(index - 1).copied().ok_or_else(|| {
        LoadError::malformed(
            line,
            field(),
            format!("index {} out of range, only {} declared so far", index, pool.len()),
        )
    })
}
