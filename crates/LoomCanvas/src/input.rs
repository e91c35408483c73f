//! # Input Protocol
//!
//! The host samples its window once per frame and hands the canvas an
//! [`InputState`]. The canvas never talks to a windowing system itself.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Pointer buttons the canvas reacts to.
///
/// `primary` drives selection, dragging and connecting; `middle` pans.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerButtons {
    pub primary: bool,
    pub middle: bool,
}

/// Editing keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Delete,
    Backspace,
    /// Cancels a connection being drawn.
    Escape,
}

impl Key {
    /// Both `Delete` and `Backspace` remove the selected node.
    pub fn removes_selection(self) -> bool {
        matches!(self, Key::Delete | Key::Backspace)
    }
}

/// Everything the canvas needs to know about one frame of user input.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InputState {
    /// Pointer position in screen pixels, relative to the canvas' top-left.
    pub pointer_pos: Vec2,
    /// Buttons currently held. Presses are derived by the canvas from the
    /// previous frame, so hosts report levels, not edges.
    pub buttons: PointerButtons,
    /// Wheel movement this frame, in notches (positive zooms in).
    pub scroll_delta: f32,
    /// Keys that went down this frame.
    pub pressed_keys: Vec<Key>,
    /// Size of the canvas area in pixels.
    pub screen_size: Vec2,
    /// Set when the pointer is over host UI (the property panel, a dialog).
    /// Clicks and keys are then ignored; zoom still applies.
    pub event_consumed_by_content: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            pointer_pos: Vec2::ZERO,
            buttons: PointerButtons::default(),
            scroll_delta: 0.0,
            pressed_keys: Vec::new(),
            screen_size: Vec2::new(800.0, 600.0),
            event_consumed_by_content: false,
        }
    }
}

impl InputState {
    /// Pointer at `pos` with the primary button held or released.
    pub fn pointer(pos: Vec2, down: bool) -> Self {
        Self {
            pointer_pos: pos,
            buttons: PointerButtons {
                primary: down,
                middle: false,
            },
            ..Default::default()
        }
    }

    /// A single key press and nothing else.
    pub fn key(key: Key) -> Self {
        Self {
            pressed_keys: vec![key],
            ..Default::default()
        }
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed_keys.contains(&key)
    }

    pub fn removes_selection(&self) -> bool {
        self.pressed_keys.iter().any(|key| key.removes_selection())
    }
}
