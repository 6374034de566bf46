use crate::error::{FormatError, Result};
use crate::vertex::{Vertex, FLOATS_PER_VERTEX};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Material name used for faces that appear before any material switch.
pub const DEFAULT_MATERIAL: &str = "default";

/// Interleaved vertex data keyed by material name.
///
/// Every buffer holds whole vertices only, so its length is always a
/// multiple of [`FLOATS_PER_VERTEX`]. Entries are created when the first
/// vertex for a material is pushed; there are no empty buffers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshBuffers {
    buffers: BTreeMap<String, Vec<f32>>,
}

impl MeshBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_vertex(&mut self, material: &str, vertex: &Vertex) {
        if let Some(buffer) = self.buffers.get_mut(material) {
            vertex.write_to(buffer);
            return;
        }

        let mut buffer = Vec::with_capacity(FLOATS_PER_VERTEX * 3);
        vertex.write_to(&mut buffer);
        self.buffers.insert(material.to_owned(), buffer);
    }

    /// Returns the flat buffer for `material`.
    pub fn get(&self, material: &str) -> Option<&[f32]> {
        self.buffers.get(material).map(Vec::as_slice)
    }

    /// Number of vertices stored for `material`, zero if the material is unknown.
    pub fn vertex_count(&self, material: &str) -> usize {
        self.buffers
            .get(material)
            .map_or(0, |buffer| buffer.len() / FLOATS_PER_VERTEX)
    }

    pub fn total_vertex_count(&self) -> usize {
        self.buffers
            .values()
            .map(|buffer| buffer.len() / FLOATS_PER_VERTEX)
            .sum()
    }

    /// Material names in ascending order.
    pub fn materials(&self) -> impl Iterator<Item = &str> {
        self.buffers.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f32])> {
        self.buffers
            .iter()
            .map(|(name, buffer)| (name.as_str(), buffer.as_slice()))
    }

    /// The buffer a single-material mesh should be drawn with: the only
    /// entry, or the first one by name when there are several.
    pub fn primary(&self) -> Option<(&str, &[f32])> {
        self.iter().next()
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Checks that every buffer contains whole vertices.
    pub fn validate(&self) -> Result<()> {
        for (material, buffer) in &self.buffers {
            if buffer.len() % FLOATS_PER_VERTEX != 0 {
                return Err(FormatError::Layout {
                    material: material.clone(),
                    len: buffer.len(),
                    stride: FLOATS_PER_VERTEX,
                });
            }
        }
        Ok(())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let buffers: Self = bincode::deserialize(bytes)?;
        buffers.validate()?;
        Ok(buffers)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        MeshBuffers::from_bytes(&data)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(&self)?)
    }

    pub fn to_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }
}

impl TryFrom<BTreeMap<String, Vec<f32>>> for MeshBuffers {
    type Error = FormatError;

    fn try_from(buffers: BTreeMap<String, Vec<f32>>) -> Result<Self> {
        let buffers = Self { buffers };
        buffers.validate()?;
        Ok(buffers)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn vertex(x: f32) -> Vertex {
        Vertex::new([x, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0])
    }

    #[test]
    fn test_counts_per_material() {
        let mut mesh = MeshBuffers::new();
        mesh.push_vertex("planks", &vertex(1.0));
        mesh.push_vertex("barrel", &vertex(2.0));
        mesh.push_vertex("barrel", &vertex(3.0));

        assert_eq!(mesh.len(), 2);
        assert_eq!(mesh.vertex_count("barrel"), 2);
        assert_eq!(mesh.vertex_count("planks"), 1);
        assert_eq!(mesh.vertex_count("missing"), 0);
        assert_eq!(mesh.total_vertex_count(), 3);
        assert_eq!(mesh.materials().collect::<Vec<_>>(), vec!["barrel", "planks"]);
    }

    #[test]
    fn test_primary_is_first_by_name() {
        let mut mesh = MeshBuffers::new();
        assert!(mesh.primary().is_none());

        mesh.push_vertex("zinc", &vertex(1.0));
        mesh.push_vertex("amber", &vertex(2.0));

        let (name, buffer) = mesh.primary().expect("mesh has buffers");
        assert_eq!(name, "amber");
        assert_eq!(buffer[0], 2.0);
    }

    fn partial_vertex() -> BTreeMap<String, Vec<f32>> {
        let mut raw = BTreeMap::new();
        raw.insert(DEFAULT_MATERIAL.to_owned(), vec![0.0; FLOATS_PER_VERTEX + 1]);
        raw
    }

    #[test]
    fn test_map_with_partial_vertex_is_rejected() {
        assert!(matches!(
            MeshBuffers::try_from(partial_vertex()),
            Err(FormatError::Layout { len: 9, .. })
        ));

        let mut whole = partial_vertex();
        whole.insert("planks".to_owned(), vec![1.0; FLOATS_PER_VERTEX * 2]);
        whole.remove(DEFAULT_MATERIAL);
        assert!(matches!(MeshBuffers::try_from(whole), Ok(mesh) if mesh.vertex_count("planks") == 2));
    }

    #[test]
    fn test_decode_rejects_partial_vertex() -> std::result::Result<(), Box<dyn std::error::Error>> {
        // a single-field struct encodes exactly like its field
        let bytes = bincode::serialize(&partial_vertex())?;

        match MeshBuffers::from_bytes(&bytes) {
            Err(FormatError::Layout { material, len, .. }) => {
                assert_eq!(material, DEFAULT_MATERIAL);
                assert_eq!(len, 9);
            }
            other => panic!("expected layout error, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_bytes_keep_buffers() -> Result<()> {
        let mut mesh = MeshBuffers::new();
        mesh.push_vertex(DEFAULT_MATERIAL, &vertex(4.0));

        let decoded = MeshBuffers::from_bytes(&mesh.to_bytes()?)?;
        assert_eq!(decoded, mesh);
        Ok(())
    }

    #[test]
    fn test_file_round_trip() -> Result<()> {
        let mut mesh = MeshBuffers::new();
        mesh.push_vertex("barrel", &vertex(1.0));
        mesh.push_vertex("barrel", &vertex(2.0));
        mesh.push_vertex("planks", &vertex(3.0));

        let path = std::env::temp_dir().join(format!("ve_format_round_trip_{}.vem", std::process::id()));
        mesh.to_file(&path)?;
        let loaded = MeshBuffers::from_file(&path);
        std::fs::remove_file(&path)?;

        assert_eq!(loaded?, mesh);
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let result = MeshBuffers::from_file(Path::new("no/such/mesh.vem"));
        assert!(matches!(result, Err(FormatError::IoError(_))));
    }
}
