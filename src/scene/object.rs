use glam::{Mat4, Vec3};

use crate::renderer::{MeshHandle, TextureHandle};

/// A placed, textured mesh. No hierarchy and no scale: just a position and
/// a rotation around +Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderObject {
    pub mesh: MeshHandle,
    pub vertex_count: u32,
    pub texture: TextureHandle,
    pub position: Vec3,
    /// Radians around +Y
    pub rotation: f32,
}

impl RenderObject {
    pub fn new(mesh: MeshHandle, vertex_count: u32, texture: TextureHandle, position: Vec3, rotation: f32) -> Self {
        Self {
            mesh,
            vertex_count,
            texture,
            position,
            rotation,
        }
    }

    /// translate * rotate_y
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position) * Mat4::from_rotation_y(self.rotation)
    }

    pub fn is_drawable(&self) -> bool {
        self.vertex_count > 0
    }
}
