use std::time::{Duration, Instant};

use glam::Mat4;

use super::camera::{Camera, CursorCommand};
use super::input::InputSnapshot;
use crate::config::{Lighting, ViewerConfig};
use crate::renderer::{MeshHandle, TextureHandle};
use crate::scene::Scene;

/// Everything the render glue needs to draw one object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub mesh: MeshHandle,
    pub texture: TextureHandle,
    pub vertex_count: u32,
    pub model: Mat4,
}

/// Result of one frame update: uniforms plus the draw list.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    pub view: Mat4,
    pub projection: Mat4,
    pub lighting: Lighting,
    pub clear_color: [f32; 3],
    pub draws: Vec<DrawCall>,
    /// Cursor change the window has to apply this frame
    pub cursor: Option<CursorCommand>,
}

/// Drives the camera from input and turns the scene into draw calls.
pub struct GameLoop {
    camera: Camera,
    scene: Scene,
    config: ViewerConfig,
    projection: Mat4,
}

impl GameLoop {
    pub fn new(scene: Scene, config: ViewerConfig) -> Self {
        let camera = Camera::with_config(scene.camera_start(), config.camera);
        let projection = config.projection_matrix();

        Self {
            camera,
            scene,
            config,
            projection,
        }
    }

    /// Keyboard movement first, then pointer look, then the draw list.
    pub fn update(&mut self, input: &InputSnapshot, delta: f32) -> FrameOutput {
        self.camera.update_from_keys(&input.keys, delta);
        let cursor = self.camera.update_from_pointer(&input.pointer);

        let draws = self
            .scene
            .drawables()
            .map(|object| DrawCall {
                mesh: object.mesh,
                texture: object.texture,
                vertex_count: object.vertex_count,
                model: object.model_matrix(),
            })
            .collect();

        FrameOutput {
            view: self.camera.view_matrix(),
            projection: self.projection,
            lighting: self.config.lighting,
            clear_color: self.config.window.clear_color,
            draws,
            cursor,
        }
    }

    /// Recomputes the projection after the window was resized.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.config.window.width = width;
        self.config.window.height = height;
        self.projection = self.config.projection_matrix();
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }
}

/// Measures frame deltas and counts frames per second.
#[derive(Debug)]
pub struct FrameClock {
    last_time: Instant,
    frame_time: Instant,
    frame_count: u32,
    fps: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        Self {
            last_time: now,
            frame_time: now,
            frame_count: 0,
            fps: 0,
        }
    }

    /// Seconds since the previous tick.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Like [`FrameClock::tick`] with an explicit timestamp. Never negative,
    /// even if `now` lies before the previous tick.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let delta = now.saturating_duration_since(self.last_time).as_secs_f32();
        self.last_time = now;

        self.frame_count += 1;
        if now.saturating_duration_since(self.frame_time) >= Duration::from_secs(1) {
            self.fps = self.frame_count;
            self.frame_count = 0;
            self.frame_time = now;
        }

        delta
    }

    /// Frames counted during the last full second.
    pub fn fps(&self) -> u32 {
        self.fps
    }
}
