//! # Draw Commands
//!
//! The canvas emits screen-space primitives and the host rasterizes them.
//! Colors are RGBA in `[0, 1]`.

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Node body.
    Rect {
        /// Top-left corner.
        pos: Vec2,
        size: Vec2,
        color: Vec4,
        corner_radius: f32,
        stroke_width: f32,
        stroke_color: Option<Vec4>,
    },
    /// Port marker.
    Circle {
        center: Vec2,
        radius: f32,
        color: Vec4,
        stroke_color: Option<Vec4>,
    },
    /// Grid line.
    Line {
        start: Vec2,
        end: Vec2,
        color: Vec4,
        width: f32,
    },
    Text {
        /// Left end of the baseline.
        pos: Vec2,
        text: String,
        color: Vec4,
        size: f32,
    },
    /// Edge or provisional connection.
    Bezier {
        start: Vec2,
        cp1: Vec2,
        cp2: Vec2,
        end: Vec2,
        color: Vec4,
        width: f32,
    },
}

/// One frame's worth of draw commands, back to front.
pub type RenderList = Vec<DrawCommand>;
