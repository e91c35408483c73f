use glam::{DVec2, Vec2};

use crate::config::CanvasConfig;
use crate::interaction::InteractionMode;
use crate::math;
use crate::model::{self, GraphState, Node, NodeFlags, NodeId, PortKind};
use crate::render::{DrawCommand, RenderList};
use crate::view::View;

/// High-level renderer for the canvas.
///
/// The view is a pure projection of the graph: every call recomputes the
/// whole display list from node positions, the edge list and the current
/// interaction mode. It handles:
/// - Grid rendering
/// - Edge curves (output anchor to input anchor)
/// - The provisional curve of an in-progress connection
/// - Node body, header label, id, delete control and ports
pub struct Painter;

impl Painter {
    /// Generates a list of draw commands to render the entire graph.
    ///
    /// # Arguments
    /// * `view` - The current viewport transform (pan/zoom).
    /// * `config` - Canvas configuration (style, delete control size).
    /// * `graph` - The graph state to render.
    /// * `interaction_mode` - Current interaction state (provisional wire, connecting port).
    /// * `screen_size` - dimensions of the viewport in pixels (used for the grid).
    pub fn draw_graph<T: model::NodeData>(
        view: &View,
        config: &CanvasConfig,
        graph: &GraphState<T>,
        interaction_mode: &InteractionMode,
        screen_size: Vec2,
    ) -> RenderList {
        let mut draw_list = Vec::new();
        let style = &config.style;

        // 1. Background grid
        Self::draw_grid(view, config, screen_size, &mut draw_list);

        // 2. Edges (behind nodes). Dangling edges are skipped.
        for edge in &graph.edges {
            if let Some((start_world, end_world)) = graph.edge_anchors(edge) {
                Self::push_wire(
                    view,
                    start_world,
                    end_world,
                    style.edge_color,
                    style.edge_width,
                    &mut draw_list,
                );
            }
        }

        // 3. Provisional connection
        let connecting = match interaction_mode {
            InteractionMode::DrawingConnection {
                source,
                curr_pos_world,
            } => {
                if let Some(node) = graph.nodes.get(*source) {
                    Self::push_wire(
                        view,
                        node.port_anchor(PortKind::Output),
                        *curr_pos_world,
                        style.pending_edge_color,
                        style.edge_width,
                        &mut draw_list,
                    );
                }
                Some(*source)
            }
            _ => None,
        };

        // 4. Nodes in insertion order
        for node in graph.ordered_nodes() {
            Self::draw_node(view, config, node, connecting, &mut draw_list);
        }

        draw_list
    }

    fn push_wire(
        view: &View,
        start_world: DVec2,
        end_world: DVec2,
        color: glam::Vec4,
        width: f32,
        draw_list: &mut RenderList,
    ) {
        let start = view.world_to_screen(start_world);
        let end = view.world_to_screen(end_world);
        let (cp1, cp2) = math::calculate_bezier_points(start, end);
        draw_list.push(DrawCommand::Bezier {
            start,
            cp1,
            cp2,
            end,
            color,
            width,
        });
    }

    fn draw_node<T: model::NodeData>(
        view: &View,
        config: &CanvasConfig,
        node: &Node<T>,
        connecting: Option<NodeId>,
        draw_list: &mut RenderList,
    ) {
        let style = &config.style;
        let zoom = view.transform.zoom as f32;
        let screen_pos = view.world_to_screen(node.position);
        let scaled_size = (node.size * view.transform.zoom).as_vec2();

        let selected = node.flags.contains(NodeFlags::SELECTED);
        let (stroke_color, stroke_width) = if selected {
            (style.selected_border, 2.0)
        } else {
            (style.node_border, 1.0)
        };

        draw_list.push(DrawCommand::Rect {
            pos: screen_pos,
            size: scaled_size,
            color: style.node_fill,
            corner_radius: 5.0 * zoom,
            stroke_width,
            stroke_color: Some(stroke_color),
        });

        // Header: type label + delete control
        draw_list.push(DrawCommand::Text {
            pos: screen_pos + Vec2::new(8.0, 18.0) * zoom,
            text: node.data.label(),
            color: style.text_color,
            size: 16.0 * zoom,
        });

        let delete = node.delete_control(config.delete_control_size);
        draw_list.push(DrawCommand::Text {
            pos: view.world_to_screen(DVec2::new(delete.min.x + 4.0, delete.max.y - 3.0)),
            text: "×".to_string(),
            color: style.delete_color,
            size: view.scale(delete.size().y),
        });

        // Body: node id
        draw_list.push(DrawCommand::Text {
            pos: screen_pos + Vec2::new(8.0, 44.0) * zoom,
            text: node.id.clone(),
            color: style.muted_text_color,
            size: 12.0 * zoom,
        });

        // Ports
        for kind in [PortKind::Input, PortKind::Output] {
            let color = if kind == PortKind::Output && connecting == Some(node.key) {
                style.connecting_port_color
            } else {
                style.port_color
            };
            draw_list.push(DrawCommand::Circle {
                center: view.world_to_screen(node.port_anchor(kind)),
                radius: view.scale(config.port_radius),
                color,
                stroke_color: Some(glam::Vec4::new(0.0, 0.0, 0.0, 1.0)),
            });
        }
    }

    /// Grid lines covering the visible world area.
    fn draw_grid(view: &View, config: &CanvasConfig, screen_size: Vec2, draw_list: &mut RenderList) {
        let spacing = config.grid_spacing;
        if spacing <= 0.0 {
            return;
        }
        let color = config.style.grid_color;
        let (min, max) = view.visible_world_bounds(screen_size);

        let mut x = (min.x / spacing).floor() * spacing;
        while x <= max.x {
            draw_list.push(DrawCommand::Line {
                start: view.world_to_screen(DVec2::new(x, min.y)),
                end: view.world_to_screen(DVec2::new(x, max.y)),
                color,
                width: 1.0,
            });
            x += spacing;
        }

        let mut y = (min.y / spacing).floor() * spacing;
        while y <= max.y {
            draw_list.push(DrawCommand::Line {
                start: view.world_to_screen(DVec2::new(min.x, y)),
                end: view.world_to_screen(DVec2::new(max.x, y)),
                color,
                width: 1.0,
            });
            y += spacing;
        }
    }
}
