use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// The movement keys the camera reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
    Ascend,
    Descend,
}

/// Which movement keys are held down this frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyState {
    pressed: HashSet<Key>,
}

impl KeyState {
    pub fn new(pressed: impl IntoIterator<Item = Key>) -> Self {
        Self {
            pressed: pressed.into_iter().collect(),
        }
    }

    /// Returns whether the key is pressed down right now
    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.pressed.is_empty()
    }
}

/// Pointer position in window coordinates plus the look trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub position: (f64, f64),
    /// Whether the look trigger (right mouse button) is held
    pub look_button_down: bool,
}

/// Everything the camera needs from the windowing layer for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    pub keys: KeyState,
    pub pointer: PointerState,
}

/// Maps key names as reported by the windowing layer to movement keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub bindings: HashMap<String, Key>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = [
            ("W", Key::Forward),
            ("S", Key::Backward),
            ("A", Key::StrafeLeft),
            ("D", Key::StrafeRight),
            ("Space", Key::Ascend),
            ("LShift", Key::Descend),
        ]
        .iter()
        .map(|(name, key)| ((*name).to_owned(), *key))
        .collect();

        Self { bindings }
    }
}

impl KeyBindings {
    pub fn lookup(&self, name: &str) -> Option<Key> {
        self.bindings.get(name).copied()
    }
}

/// Collects window events between frames and hands out snapshots.
///
/// Key and button state persists across frames until a release event
/// arrives; the pointer position is the last one reported.
#[derive(Debug, Default)]
pub struct Input {
    bindings: KeyBindings,
    state: InputSnapshot,
}

impl Input {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            state: InputSnapshot::default(),
        }
    }

    pub fn set_key(&mut self, key: Key, pressed: bool) {
        if pressed {
            self.state.keys.pressed.insert(key);
        } else {
            self.state.keys.pressed.remove(&key);
        }
    }

    /// Feeds a key event by name; unbound keys are ignored.
    /// Returns whether the key is bound.
    pub fn key_named(&mut self, name: &str, pressed: bool) -> bool {
        match self.bindings.lookup(name) {
            Some(key) => {
                self.set_key(key, pressed);
                true
            }
            None => false,
        }
    }

    pub fn cursor_moved(&mut self, x: f64, y: f64) {
        self.state.pointer.position = (x, y);
    }

    pub fn set_look_button(&mut self, down: bool) {
        self.state.pointer.look_button_down = down;
    }

    /// Releases everything, e.g. when the window loses focus and release
    /// events would be missed.
    pub fn focus_lost(&mut self) {
        self.state.keys.pressed.clear();
        self.state.pointer.look_button_down = false;
    }

    pub fn snapshot(&self) -> InputSnapshot {
        self.state.clone()
    }
}
