use glam::{DVec2, Vec2};
use loom_canvas::{
    Canvas, CanvasConfig, InteractionMode, LogicEvent,
    input::{InputState, Key, PointerButtons},
    model::{GraphState, Node, NodeId},
};

fn add(graph: &mut GraphState<String>, id: &str, x: f64, y: f64) -> NodeId {
    graph.insert_node(Node::new(
        id,
        DVec2::new(x, y),
        DVec2::new(150.0, 80.0),
        id.to_string(),
    ))
}

fn press(x: f32, y: f32) -> InputState {
    InputState::pointer(Vec2::new(x, y), true)
}

fn release(x: f32, y: f32) -> InputState {
    InputState::pointer(Vec2::new(x, y), false)
}

/// Two nodes side by side: A at (0,0), B at (300,0), both 150x80.
/// A's output anchor is (150,40); B's input anchor is (300,40).
fn two_nodes() -> (GraphState<String>, NodeId, NodeId) {
    let mut graph = GraphState::default();
    let a = add(&mut graph, "a", 0.0, 0.0);
    let b = add(&mut graph, "b", 300.0, 0.0);
    (graph, a, b)
}

#[test]
fn test_panning() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let mut graph: GraphState<String> = GraphState::default();

    let mut input = InputState {
        pointer_pos: Vec2::new(100.0, 100.0),
        buttons: PointerButtons {
            middle: true,
            ..Default::default()
        },
        ..Default::default()
    };
    canvas.update(&input, 0.016, &mut graph);
    assert!(matches!(
        canvas.interaction_mode,
        InteractionMode::Panning { .. }
    ));

    input.pointer_pos = Vec2::new(150.0, 120.0);
    canvas.update(&input, 0.016, &mut graph);
    assert_eq!(canvas.view.transform.pan, DVec2::new(50.0, 20.0));

    input.buttons.middle = false;
    canvas.update(&input, 0.016, &mut graph);
    assert!(canvas.interaction_mode.is_idle());
}

#[test]
fn test_zooming_keeps_point_under_cursor() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let mut graph: GraphState<String> = GraphState::default();

    let input = InputState {
        pointer_pos: Vec2::new(100.0, 100.0),
        scroll_delta: 1.0,
        ..Default::default()
    };
    canvas.update(&input, 0.016, &mut graph);

    assert!((canvas.view.transform.zoom - 1.1).abs() < 1e-9);
    let world = canvas.view.screen_to_world(Vec2::new(100.0, 100.0));
    assert!((world.x - 100.0).abs() < 1e-3);
    assert!((world.y - 100.0).abs() < 1e-3);
}

#[test]
fn test_drag_preserves_grab_offset_and_moves_only_that_node() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let (mut graph, a, b) = two_nodes();

    // Grab A 20px right of and 30px below its corner.
    let (_, events) = canvas.update(&press(20.0, 30.0), 0.016, &mut graph);
    assert!(events.contains(&LogicEvent::SelectionChanged(Some(a))));
    assert_eq!(graph.selected(), Some(a));
    assert!(matches!(
        canvas.interaction_mode,
        InteractionMode::DraggingNode { node, .. } if node == a
    ));

    let (_, events) = canvas.update(&press(220.0, 230.0), 0.016, &mut graph);
    assert_eq!(graph.nodes[a].position, DVec2::new(200.0, 200.0));
    assert_eq!(graph.nodes[b].position, DVec2::new(300.0, 0.0));
    assert!(events.contains(&LogicEvent::NodeMoved {
        node: a,
        position: DVec2::new(200.0, 200.0)
    }));

    canvas.update(&release(220.0, 230.0), 0.016, &mut graph);
    assert!(canvas.interaction_mode.is_idle());
    assert_eq!(graph.nodes[a].position, DVec2::new(200.0, 200.0));
}

#[test]
fn test_connection_released_on_input_port() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let (mut graph, a, b) = two_nodes();

    let (_, events) = canvas.update(&press(150.0, 40.0), 0.016, &mut graph);
    assert!(!events.iter().any(|e| matches!(e, LogicEvent::Connect { .. })));
    assert!(matches!(
        canvas.interaction_mode,
        InteractionMode::DrawingConnection { source, .. } if source == a
    ));
    // Starting a connection does not select.
    assert_eq!(graph.selected(), None);

    // Near B's input port: the provisional wire snaps to the anchor.
    canvas.update(&press(303.0, 42.0), 0.016, &mut graph);
    match canvas.interaction_mode {
        InteractionMode::DrawingConnection { curr_pos_world, .. } => {
            assert_eq!(curr_pos_world, DVec2::new(300.0, 40.0));
        }
        _ => panic!("Should still be drawing a connection"),
    }

    let (_, events) = canvas.update(&release(303.0, 42.0), 0.016, &mut graph);
    assert!(events.contains(&LogicEvent::Connect {
        source: a,
        target: b
    }));
    assert!(canvas.interaction_mode.is_idle());
}

#[test]
fn test_connection_released_on_empty_canvas_is_discarded() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let (mut graph, _, _) = two_nodes();

    canvas.update(&press(150.0, 40.0), 0.016, &mut graph);
    canvas.update(&press(200.0, 300.0), 0.016, &mut graph);
    let (_, events) = canvas.update(&release(200.0, 300.0), 0.016, &mut graph);

    assert!(!events.iter().any(|e| matches!(e, LogicEvent::Connect { .. })));
    assert!(canvas.interaction_mode.is_idle());
}

#[test]
fn test_connection_released_on_output_port_is_discarded() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let (mut graph, _, _) = two_nodes();

    canvas.update(&press(150.0, 40.0), 0.016, &mut graph);
    // B's output anchor.
    canvas.update(&press(450.0, 40.0), 0.016, &mut graph);
    let (_, events) = canvas.update(&release(450.0, 40.0), 0.016, &mut graph);

    assert!(!events.iter().any(|e| matches!(e, LogicEvent::Connect { .. })));
    assert!(canvas.interaction_mode.is_idle());
}

#[test]
fn test_connection_released_on_own_input_is_discarded() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let (mut graph, _, _) = two_nodes();

    canvas.update(&press(150.0, 40.0), 0.016, &mut graph);
    canvas.update(&press(0.0, 40.0), 0.016, &mut graph);
    let (_, events) = canvas.update(&release(0.0, 40.0), 0.016, &mut graph);

    assert!(!events.iter().any(|e| matches!(e, LogicEvent::Connect { .. })));
}

#[test]
fn test_escape_cancels_connection() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let (mut graph, _, _) = two_nodes();

    canvas.update(&press(150.0, 40.0), 0.016, &mut graph);

    let mut input = press(300.0, 40.0);
    input.pressed_keys = vec![Key::Escape];
    let (_, events) = canvas.update(&input, 0.016, &mut graph);
    assert!(events.contains(&LogicEvent::ConnectionCancelled));
    assert!(canvas.interaction_mode.is_idle());

    // Releasing afterwards over the input port commits nothing.
    let (_, events) = canvas.update(&release(300.0, 40.0), 0.016, &mut graph);
    assert!(!events.iter().any(|e| matches!(e, LogicEvent::Connect { .. })));
}

#[test]
fn test_click_on_empty_canvas_clears_selection() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let (mut graph, a, _) = two_nodes();

    canvas.update(&press(20.0, 30.0), 0.016, &mut graph);
    canvas.update(&release(20.0, 30.0), 0.016, &mut graph);
    assert_eq!(graph.selected(), Some(a));

    let (_, events) = canvas.update(&press(700.0, 500.0), 0.016, &mut graph);
    assert!(events.contains(&LogicEvent::SelectionChanged(None)));
    assert_eq!(graph.selected(), None);
    assert!(canvas.interaction_mode.is_idle());
}

#[test]
fn test_held_button_does_not_retrigger() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let (mut graph, _, _) = two_nodes();

    // Press on empty space, then sweep over node A without releasing.
    canvas.update(&press(700.0, 500.0), 0.016, &mut graph);
    canvas.update(&press(20.0, 30.0), 0.016, &mut graph);

    assert!(canvas.interaction_mode.is_idle());
    assert_eq!(graph.selected(), None);
}

#[test]
fn test_delete_key_exits_drag_before_requesting_deletion() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let (mut graph, _, _) = two_nodes();

    canvas.update(&press(20.0, 30.0), 0.016, &mut graph);
    assert!(matches!(
        canvas.interaction_mode,
        InteractionMode::DraggingNode { .. }
    ));

    let mut input = press(40.0, 30.0);
    input.pressed_keys = vec![Key::Delete];
    let (_, events) = canvas.update(&input, 0.016, &mut graph);

    assert!(events.contains(&LogicEvent::DeleteSelection));
    assert!(canvas.interaction_mode.is_idle());
}

#[test]
fn test_delete_key_without_selection_is_ignored() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let (mut graph, _, _) = two_nodes();

    let (_, events) = canvas.update(&InputState::key(Key::Delete), 0.016, &mut graph);
    assert!(events.is_empty());
}

#[test]
fn test_delete_control_requests_node_deletion() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let (mut graph, a, _) = two_nodes();

    // Delete control of A spans (128..146, 4..22).
    let (_, events) = canvas.update(&press(137.0, 12.0), 0.016, &mut graph);

    assert_eq!(events, vec![LogicEvent::DeleteNode(a)]);
    assert!(canvas.interaction_mode.is_idle());
}

#[test]
fn test_consumed_input_is_ignored() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let (mut graph, _, _) = two_nodes();

    let mut input = press(20.0, 30.0);
    input.event_consumed_by_content = true;
    canvas.update(&input, 0.016, &mut graph);

    assert!(canvas.interaction_mode.is_idle());
    assert_eq!(graph.selected(), None);
}

#[test]
fn test_press_on_input_port_does_nothing() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let (mut graph, a, _) = two_nodes();

    canvas.update(&press(20.0, 30.0), 0.016, &mut graph);
    canvas.update(&release(20.0, 30.0), 0.016, &mut graph);
    assert_eq!(graph.selected(), Some(a));

    // B's input anchor sits on its body edge; the port wins and is inert.
    let (_, events) = canvas.update(&press(300.0, 40.0), 0.016, &mut graph);
    assert!(canvas.interaction_mode.is_idle());
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, LogicEvent::SelectionChanged(_)))
    );
    assert_eq!(graph.selected(), Some(a));

    canvas.update(&release(300.0, 40.0), 0.016, &mut graph);
    assert!(graph.edges.is_empty());
}
