//! Canvas tuning and palette.

use glam::{DVec2, Vec4};
use serde::{Deserialize, Serialize};

/// Interaction and layout settings.
///
/// Screen-space values stay the same size on screen at any zoom; world-space
/// values scale with the graph.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Multiplier on middle-drag distance.
    pub pan_speed: f64,
    /// Zoom change per wheel notch (0.1 means 10%).
    pub zoom_speed: f64,
    /// Screen-space radius within which the pointer hits a port.
    pub snap_threshold: f64,
    /// World-space side of the square `×` control in a node's header.
    pub delete_control_size: f64,
    /// Size for loaded nodes, whose wire form carries no size.
    pub default_node_size: DVec2,
    /// World-space spacing of the background grid.
    pub grid_spacing: f64,
    /// World-space radius of the port markers.
    pub port_radius: f64,
    pub style: CanvasStyle,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            pan_speed: 1.0,
            zoom_speed: 0.1,
            snap_threshold: 10.0,
            delete_control_size: 18.0,
            default_node_size: DVec2::new(150.0, 80.0),
            grid_spacing: 100.0,
            port_radius: 5.0,
            style: CanvasStyle::default(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasStyle {
    pub grid_color: Vec4,
    pub node_fill: Vec4,
    pub node_border: Vec4,
    /// Border of the selected node.
    pub selected_border: Vec4,
    pub text_color: Vec4,
    /// Node id line under the header.
    pub muted_text_color: Vec4,
    pub port_color: Vec4,
    /// Output port a connection is being drawn from.
    pub connecting_port_color: Vec4,
    pub edge_color: Vec4,
    pub edge_width: f32,
    /// Provisional connection curve.
    pub pending_edge_color: Vec4,
    pub delete_color: Vec4,
}

impl Default for CanvasStyle {
    fn default() -> Self {
        Self {
            grid_color: Vec4::new(0.2, 0.2, 0.2, 1.0),
            node_fill: Vec4::new(0.15, 0.15, 0.15, 1.0),
            node_border: Vec4::new(0.5, 0.5, 0.5, 1.0),
            selected_border: Vec4::new(0.3, 0.6, 1.0, 1.0),
            text_color: Vec4::ONE,
            muted_text_color: Vec4::new(0.7, 0.7, 0.7, 1.0),
            port_color: Vec4::new(0.7, 0.7, 0.7, 1.0),
            connecting_port_color: Vec4::new(1.0, 0.75, 0.2, 1.0),
            edge_color: Vec4::new(0.4, 0.4, 0.4, 1.0),
            edge_width: 2.0,
            pending_edge_color: Vec4::ONE,
            delete_color: Vec4::new(0.9, 0.3, 0.3, 1.0),
        }
    }
}
