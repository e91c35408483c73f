//! # Viewport
//!
//! Maps between world space, where node positions live, and screen space,
//! where the host draws. World coordinates are `f64` so positions loaded from
//! JSON are written back unchanged; screen coordinates are `f32`.

use glam::{DVec2, Vec2};
use serde::{Deserialize, Serialize};

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;

/// Camera state: `screen = world * zoom + pan`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Screen offset of the world origin, in pixels.
    pub pan: DVec2,
    /// 1.0 is 100%.
    pub zoom: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            pan: DVec2::ZERO,
            zoom: 1.0,
        }
    }
}

pub struct View {
    pub transform: Transform,
    /// Size of the canvas area in pixels.
    pub viewport_size: Vec2,
}

impl View {
    pub fn new(transform: Transform, viewport_size: Vec2) -> Self {
        Self {
            transform,
            viewport_size,
        }
    }

    pub fn world_to_screen(&self, world_pos: DVec2) -> Vec2 {
        (world_pos * self.transform.zoom + self.transform.pan).as_vec2()
    }

    pub fn screen_to_world(&self, screen_pos: Vec2) -> DVec2 {
        (screen_pos.as_dvec2() - self.transform.pan) / self.transform.zoom
    }

    /// Scales a world-space length into screen pixels.
    pub fn scale(&self, world_len: f64) -> f32 {
        (world_len * self.transform.zoom) as f32
    }

    /// Converts a screen-space radius into world units at the current zoom.
    pub fn world_radius(&self, screen_radius: f64) -> f64 {
        screen_radius / self.transform.zoom
    }

    /// Multiplies the zoom by `factor` while keeping the world point under
    /// `anchor` in place. Zoom is clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    ///
    /// Returns false when the clamp left the zoom unchanged.
    pub fn zoom_around(&mut self, anchor: Vec2, factor: f64) -> bool {
        let old_zoom = self.transform.zoom;
        let new_zoom = (old_zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        if (new_zoom - old_zoom).abs() <= f64::EPSILON {
            return false;
        }

        let world_anchor = self.screen_to_world(anchor);
        self.transform.zoom = new_zoom;
        self.transform.pan = anchor.as_dvec2() - world_anchor * new_zoom;
        true
    }

    /// World-space corners of the visible area, as (min, max).
    pub fn visible_world_bounds(&self, screen_size: Vec2) -> (DVec2, DVec2) {
        let a = self.screen_to_world(Vec2::ZERO);
        let b = self.screen_to_world(screen_size);
        (a.min(b), a.max(b))
    }
}
