use serde::{Deserialize, Serialize};

/// Number of `f32` components each interleaved vertex occupies: position
/// at offset 0, normal at 3, texcoord at 6.
pub const FLOATS_PER_VERTEX: usize = 8;

/// One interleaved vertex. Only used to assemble and inspect buffers; the
/// buffers themselves are stored flat.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }

    /// Appends the vertex to `buffer` in position, normal, texcoord order.
    pub fn write_to(&self, buffer: &mut Vec<f32>) {
        buffer.extend_from_slice(&self.position);
        buffer.extend_from_slice(&self.normal);
        buffer.extend_from_slice(&self.uv);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_write_order() {
        let mut buffer = Vec::new();
        Vertex::new([1.0, 2.0, 3.0], [0.0, 1.0, 0.0], [0.25, 0.75]).write_to(&mut buffer);

        assert_eq!(buffer.len(), FLOATS_PER_VERTEX);
        assert_eq!(buffer, vec![1.0, 2.0, 3.0, 0.0, 1.0, 0.0, 0.25, 0.75]);
    }
}
