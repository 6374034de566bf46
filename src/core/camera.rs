use glam::{Mat4, Vec3};
use serde::Deserialize;

use super::input::{Key, KeyState, PointerState};

/// Vertical axis of the world; pitch is measured against it.
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Tunables of the free-look camera.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Movement speed in world units per second
    pub speed: f32,
    /// Degrees of rotation per unit of pointer movement
    pub sensitivity: f32,
    /// Pitch is clamped to `[-pitch_limit, pitch_limit]` degrees
    pub pitch_limit: f32,
    /// Pointer deltas larger than this (on either axis) are dropped
    pub jump_threshold: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            sensitivity: 0.1,
            pitch_limit: 89.0,
            jump_threshold: 100.0,
        }
    }
}

/// What the windowing layer has to do with the OS cursor after a pointer update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorCommand {
    /// Hide the cursor and grab it exclusively
    Capture,
    /// Give the cursor back
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum CursorState {
    Unlocked,
    Locked { last_x: f64, last_y: f64 },
}

/// First-person free-look camera.
///
/// Orientation is kept as yaw/pitch in degrees; `front`, `right` and `up`
/// are derived from them in [`Camera::update_vectors`] and never set
/// anywhere else.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    yaw: f32,
    pitch: f32,
    config: CameraConfig,
    cursor: CursorState,
}

impl Camera {
    /// Creates a camera at `position` looking down -Z, with default tunables.
    pub fn new(position: Vec3) -> Self {
        Self::with_config(position, CameraConfig::default())
    }

    pub fn with_config(position: Vec3, config: CameraConfig) -> Self {
        let mut cam = Self {
            position,
            front: Vec3::NEG_Z,
            up: WORLD_UP,
            right: Vec3::X,
            yaw: -90.0,
            pitch: 0.0,
            config,
            cursor: CursorState::Unlocked,
        };
        cam.update_vectors();
        cam
    }

    /// Right-handed look-at transform from `position` towards `position + front`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Moves the camera along its own axes for every held key.
    ///
    /// Keys add up, so diagonal movement is faster than straight movement.
    pub fn update_from_keys(&mut self, keys: &KeyState, delta: f32) {
        let velocity = self.config.speed * delta;

        if keys.is_pressed(Key::Forward) {
            self.position += self.front * velocity;
        }
        if keys.is_pressed(Key::Backward) {
            self.position -= self.front * velocity;
        }
        if keys.is_pressed(Key::StrafeLeft) {
            self.position -= self.right * velocity;
        }
        if keys.is_pressed(Key::StrafeRight) {
            self.position += self.right * velocity;
        }
        if keys.is_pressed(Key::Ascend) {
            self.position += WORLD_UP * velocity;
        }
        if keys.is_pressed(Key::Descend) {
            self.position -= WORLD_UP * velocity;
        }
    }

    /// Turns the camera while the look trigger is held.
    ///
    /// The first frame of a hold only locks the cursor and remembers its
    /// position, so the capture itself never causes a turn. Returns the
    /// cursor change the window has to apply, if any.
    pub fn update_from_pointer(&mut self, pointer: &PointerState) -> Option<CursorCommand> {
        let (x, y) = pointer.position;

        match (pointer.look_button_down, self.cursor) {
            (true, CursorState::Unlocked) => {
                self.cursor = CursorState::Locked {
                    last_x: x,
                    last_y: y,
                };
                Some(CursorCommand::Capture)
            }
            (true, CursorState::Locked { last_x, last_y }) => {
                let xoffset = x - last_x;
                // reversed since window y grows downwards
                let yoffset = last_y - y;
                self.cursor = CursorState::Locked {
                    last_x: x,
                    last_y: y,
                };

                let threshold = self.config.jump_threshold;
                if xoffset.abs() > threshold || yoffset.abs() > threshold {
                    log::debug!("Dropping pointer jump of ({}, {})", xoffset, yoffset);
                    return None;
                }

                self.rotate(
                    xoffset as f32 * self.config.sensitivity,
                    yoffset as f32 * self.config.sensitivity,
                );
                None
            }
            (false, CursorState::Locked { .. }) => {
                self.cursor = CursorState::Unlocked;
                Some(CursorCommand::Release)
            }
            (false, CursorState::Unlocked) => None,
        }
    }

    /// Adds to yaw and pitch (degrees), clamping pitch.
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        let limit = self.config.pitch_limit;
        self.yaw += yaw_delta;
        self.pitch = (self.pitch + pitch_delta).clamp(-limit, limit);
        self.update_vectors();
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());

        self.front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize();
        self.right = self.front.cross(WORLD_UP).normalize();
        self.up = self.right.cross(self.front).normalize();
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Yaw in degrees, unbounded
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn is_cursor_locked(&self) -> bool {
        matches!(self.cursor, CursorState::Locked { .. })
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }
}
