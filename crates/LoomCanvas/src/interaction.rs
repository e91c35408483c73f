use glam::{DVec2, Vec2};

use crate::config::CanvasConfig;
use crate::input::{InputState, Key};
use crate::model::{self, GraphState, NodeId, PortKind};
use crate::view::{Transform, View};

/// Events emitted by the Canvas logic to the host application.
///
/// Position and selection changes are applied to the graph directly; the
/// structural requests (`Connect`, `DeleteNode`, `DeleteSelection`) are left
/// to the owner of the graph.
#[derive(Clone, Debug, PartialEq)]
pub enum LogicEvent {
    /// A connection gesture was released over the input port of another node.
    Connect { source: NodeId, target: NodeId },
    /// The delete control of a node was clicked.
    DeleteNode(NodeId),
    /// The delete key was pressed while a node was selected.
    DeleteSelection,
    /// The selected node changed (or selection was cleared).
    SelectionChanged(Option<NodeId>),
    /// A node was dragged to a new world position.
    NodeMoved { node: NodeId, position: DVec2 },
    /// A connection gesture was aborted with the cancel key.
    ConnectionCancelled,
    /// The graph visual state has changed, requiring a repaint.
    RepaintNeeded,
}

/// The current state of user interaction.
#[derive(Clone, Debug)]
pub enum InteractionMode {
    /// No active interaction.
    Idle,
    /// User is panning the canvas (Middle click drag).
    Panning {
        /// Mouse position at start of drag (Screen Space).
        start_drag: Vec2,
        /// Transform at start of drag.
        initial_transform: Transform,
    },
    /// User is moving a single node.
    DraggingNode {
        node: NodeId,
        /// Pointer offset inside the node at pointer-down (World Space),
        /// so the node does not jump to align its corner with the pointer.
        grab_offset: DVec2,
    },
    /// User is drawing a connection out of a node's output port.
    DrawingConnection {
        /// Node whose output port the gesture started on.
        source: NodeId,
        /// Current temporary endpoint of the wire (World Space).
        curr_pos_world: DVec2,
    },
}

impl InteractionMode {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionMode::Idle)
    }
}

/// Advances the gesture state machine by one frame.
///
/// `pointer_pressed` is true only on the frame the primary button went down.
/// Zoom applies in every mode; keys and clicks are skipped while
/// `input.event_consumed_by_content` is set.
pub fn handle_interactions<T: model::NodeData>(
    mode: &mut InteractionMode,
    view: &mut View,
    config: &CanvasConfig,
    input: &InputState,
    pointer_pressed: bool,
    graph: &mut GraphState<T>,
    events: &mut Vec<LogicEvent>,
) {
    // Zoom around the pointer
    if input.scroll_delta != 0.0 {
        let factor = 1.0 + input.scroll_delta as f64 * config.zoom_speed;
        if view.zoom_around(input.pointer_pos, factor) {
            events.push(LogicEvent::RepaintNeeded);
        }
    }

    if !input.event_consumed_by_content {
        handle_keys(mode, input, graph, events);
    }

    let next_mode = match mode {
        InteractionMode::Idle => handle_idle(view, config, input, pointer_pressed, graph, events),
        InteractionMode::Panning {
            start_drag,
            initial_transform,
        } => handle_panning(view, config, input, *start_drag, *initial_transform, events),
        InteractionMode::DraggingNode { node, grab_offset } => {
            handle_dragging_node(view, input, graph, *node, *grab_offset, events)
        }
        InteractionMode::DrawingConnection {
            source,
            curr_pos_world,
        } => handle_drawing_connection(view, config, input, graph, *source, curr_pos_world, events),
    };

    if let Some(new_mode) = next_mode {
        *mode = new_mode;
    }
}

/// Keyboard shortcuts.
///
/// Deleting always drops the active gesture first, so the owner never removes
/// a node that a drag or connection still refers to.
fn handle_keys<T: model::NodeData>(
    mode: &mut InteractionMode,
    input: &InputState,
    graph: &GraphState<T>,
    events: &mut Vec<LogicEvent>,
) {
    if input.is_pressed(Key::Escape) && matches!(mode, InteractionMode::DrawingConnection { .. }) {
        *mode = InteractionMode::Idle;
        events.push(LogicEvent::ConnectionCancelled);
        events.push(LogicEvent::RepaintNeeded);
    }

    if input.removes_selection() && graph.selected().is_some() {
        *mode = InteractionMode::Idle;
        events.push(LogicEvent::DeleteSelection);
        events.push(LogicEvent::RepaintNeeded);
    }
}

/// Handles the `Idle` state interactions.
///
/// This checks for inputs to transition into:
/// - `Panning` (middle click)
/// - `DrawingConnection` (pressing an output port)
/// - `DraggingNode` (pressing a node body)
///
/// Pressing the delete control or empty space keeps the canvas `Idle`.
fn handle_idle<T: model::NodeData>(
    view: &View,
    config: &CanvasConfig,
    input: &InputState,
    pointer_pressed: bool,
    graph: &mut GraphState<T>,
    events: &mut Vec<LogicEvent>,
) -> Option<InteractionMode> {
    if input.event_consumed_by_content {
        return None;
    }

    if input.buttons.middle {
        return Some(InteractionMode::Panning {
            start_drag: input.pointer_pos,
            initial_transform: view.transform,
        });
    }

    if !pointer_pressed {
        return None;
    }

    let world_mouse = view.screen_to_world(input.pointer_pos);
    let radius = view.world_radius(config.snap_threshold);

    // Ports take priority over bodies. Input ports only receive connections,
    // so pressing one does nothing.
    if let Some(port) = graph.ports_at(world_mouse, radius).next() {
        if port.kind == PortKind::Input {
            return None;
        }
        if let Some(anchor) = graph.port_position(port) {
            events.push(LogicEvent::RepaintNeeded);
            return Some(InteractionMode::DrawingConnection {
                source: port.node,
                curr_pos_world: anchor,
            });
        }
    }

    let Some(node_id) = graph.node_at(world_mouse) else {
        // Empty canvas clears the selection.
        if graph.selected().is_some() {
            graph.deselect_all();
            events.push(LogicEvent::SelectionChanged(None));
            events.push(LogicEvent::RepaintNeeded);
        }
        return None;
    };

    let node = &graph.nodes[node_id];
    if node
        .delete_control(config.delete_control_size)
        .contains(world_mouse)
    {
        events.push(LogicEvent::DeleteNode(node_id));
        return None;
    }
    let grab_offset = world_mouse - node.position;

    if graph.selected() != Some(node_id) {
        graph.select(node_id);
        events.push(LogicEvent::SelectionChanged(Some(node_id)));
    }
    events.push(LogicEvent::RepaintNeeded);

    Some(InteractionMode::DraggingNode {
        node: node_id,
        grab_offset,
    })
}

/// Handles the `Panning` state interactions.
///
/// Updates the view's pan offset based on mouse delta.
/// Returns to `Idle` on mouse release.
fn handle_panning(
    view: &mut View,
    config: &CanvasConfig,
    input: &InputState,
    start_drag: Vec2,
    initial_transform: Transform,
    events: &mut Vec<LogicEvent>,
) -> Option<InteractionMode> {
    if !input.buttons.middle {
        Some(InteractionMode::Idle)
    } else {
        let delta = (input.pointer_pos - start_drag).as_dvec2() * config.pan_speed;
        view.transform.pan = initial_transform.pan + delta;
        events.push(LogicEvent::RepaintNeeded);
        None
    }
}

/// Handles the `DraggingNode` state interactions.
///
/// Moves only the dragged node, keeping the grab offset constant.
/// Returns to `Idle` on mouse release, unconditionally.
fn handle_dragging_node<T: model::NodeData>(
    view: &View,
    input: &InputState,
    graph: &mut GraphState<T>,
    node_id: NodeId,
    grab_offset: DVec2,
    events: &mut Vec<LogicEvent>,
) -> Option<InteractionMode> {
    if !input.buttons.primary {
        return Some(InteractionMode::Idle);
    }

    let Some(node) = graph.nodes.get_mut(node_id) else {
        // The node vanished under the gesture.
        return Some(InteractionMode::Idle);
    };

    let position = view.screen_to_world(input.pointer_pos) - grab_offset;
    if position != node.position {
        node.position = position;
        events.push(LogicEvent::NodeMoved {
            node: node_id,
            position,
        });
        events.push(LogicEvent::RepaintNeeded);
    }
    None
}

/// Handles the `DrawingConnection` state interactions.
///
/// Updates the provisional wire, snapping it to an input port of another node
/// when one is under the pointer. On release over such a port it emits
/// `LogicEvent::Connect`; any other release silently discards the gesture.
fn handle_drawing_connection<T: model::NodeData>(
    view: &View,
    config: &CanvasConfig,
    input: &InputState,
    graph: &GraphState<T>,
    source: NodeId,
    curr_pos_world: &mut DVec2,
    events: &mut Vec<LogicEvent>,
) -> Option<InteractionMode> {
    if !graph.nodes.contains_key(source) {
        return Some(InteractionMode::Idle);
    }

    let world_mouse = view.screen_to_world(input.pointer_pos);
    let radius = view.world_radius(config.snap_threshold);

    let target = graph
        .ports_at(world_mouse, radius)
        .find(|port| port.kind == PortKind::Input && port.node != source);

    *curr_pos_world = target
        .and_then(|port| graph.port_position(port))
        .unwrap_or(world_mouse);
    events.push(LogicEvent::RepaintNeeded);

    if !input.buttons.primary {
        if let Some(port) = target {
            events.push(LogicEvent::Connect {
                source,
                target: port.node,
            });
        }
        return Some(InteractionMode::Idle);
    }
    None
}
