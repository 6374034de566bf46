//! Core of a small real-time scene viewer.
//!
//! Meshes come in through [`ve_asset`], get uploaded through a
//! [`renderer::RenderBackend`] and are placed by a data-driven
//! [`scene::SceneDescriptor`]. Each frame a [`core::gameloop::GameLoop`]
//! feeds an [`core::input::InputSnapshot`] to the free-look
//! [`core::camera::Camera`] and produces a backend-independent draw list.

pub mod config;
pub mod core;
pub mod renderer;
pub mod scene;

pub mod prelude {
    pub use crate::config::{Lighting, ViewerConfig};
    pub use crate::core::camera::{Camera, CameraConfig, CursorCommand};
    pub use crate::core::gameloop::{DrawCall, FrameClock, FrameOutput, GameLoop};
    pub use crate::core::input::{Input, InputSnapshot, Key, KeyBindings, KeyState, PointerState};
    pub use crate::renderer::{MeshHandle, RenderBackend, TextureHandle};
    pub use crate::scene::{RenderObject, Scene, SceneDescriptor};
    pub use glam::{Mat4, Vec3};
}
