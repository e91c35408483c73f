use glam::{DVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in world space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: DVec2,
    pub max: DVec2,
}

impl Rect {
    pub fn new(pos: DVec2, size: DVec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Calculates the two control points for a cubic Bezier curve connecting `start` to `end`.
///
/// This assumes a horizontal flow (left-to-right): the curve leaves the output
/// port to the right and enters the input port from the left.
pub fn calculate_bezier_points(start: Vec2, end: Vec2) -> (Vec2, Vec2) {
    let dist = start.distance(end);
    let control_dist = (dist * 0.5).min(150.0);
    let cp1 = start + Vec2::new(control_dist, 0.0);
    let cp2 = end - Vec2::new(control_dist, 0.0);
    (cp1, cp2)
}

/// Evaluates a cubic Bezier curve at `t` in `[0, 1]`.
pub fn cubic_bezier_point(start: Vec2, cp1: Vec2, cp2: Vec2, end: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    start * (u * u * u) + cp1 * (3.0 * u * u * t) + cp2 * (3.0 * u * t * t) + end * (t * t * t)
}

/// Flattens a cubic Bezier curve into `segments + 1` points, for hosts that
/// can only draw line segments.
pub fn flatten_bezier(start: Vec2, cp1: Vec2, cp2: Vec2, end: Vec2, segments: usize) -> Vec<Vec2> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| cubic_bezier_point(start, cp1, cp2, end, i as f32 / segments as f32))
        .collect()
}
