use loom_canvas::{
    Canvas, CanvasConfig,
    input::InputState,
    model::{Edge, GraphState, Node},
    render::DrawCommand,
};
use glam::{DVec2, Vec2};

fn graph_ab() -> GraphState<String> {
    let mut graph = GraphState::default();
    graph.insert_node(Node::new(
        "a",
        DVec2::new(100.0, 100.0),
        DVec2::new(150.0, 80.0),
        "Node A".to_string(),
    ));
    graph.insert_node(Node::new(
        "b",
        DVec2::new(400.0, 100.0),
        DVec2::new(150.0, 80.0),
        "Node B".to_string(),
    ));
    graph
}

fn beziers(draw_list: &[DrawCommand]) -> Vec<(Vec2, Vec2)> {
    draw_list
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCommand::Bezier { start, end, .. } => Some((*start, *end)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_basic_rendering() {
    let mut graph = graph_ab();
    let mut canvas = Canvas::new(CanvasConfig::default());

    let (draw_list, _events) = canvas.update(&InputState::default(), 0.016, &mut graph);
    assert!(!draw_list.is_empty(), "Draw list should not be empty");

    // Default pan is (0,0), zoom is 1.0, so the node body lands at its world position.
    let rect_cmd = draw_list
        .iter()
        .find(|cmd| matches!(cmd, DrawCommand::Rect { .. }));
    match rect_cmd {
        Some(DrawCommand::Rect { pos, size, .. }) => {
            assert_eq!(*pos, Vec2::new(100.0, 100.0));
            assert_eq!(*size, Vec2::new(150.0, 80.0));
        }
        _ => panic!("Expected Rect command not found in draw_list"),
    }

    let texts: Vec<&str> = draw_list
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert!(texts.contains(&"a"));
    assert!(texts.contains(&"b"));
    assert!(texts.contains(&"×"));
}

#[test]
fn test_edge_follows_moved_node() {
    let mut graph = graph_ab();
    graph.add_edge("a", "b");
    let canvas = Canvas::new(CanvasConfig::default());

    let curves = beziers(&canvas.render(&graph, Vec2::new(800.0, 600.0)));
    assert_eq!(curves, vec![(Vec2::new(250.0, 140.0), Vec2::new(400.0, 140.0))]);

    graph.node_by_id_mut("a").unwrap().position = DVec2::new(0.0, 300.0);

    let curves = beziers(&canvas.render(&graph, Vec2::new(800.0, 600.0)));
    assert_eq!(curves, vec![(Vec2::new(150.0, 340.0), Vec2::new(400.0, 140.0))]);
}

#[test]
fn test_dangling_edges_are_not_drawn() {
    let mut graph = graph_ab();
    graph.edges.push(Edge::between("a", "missing"));
    graph.edges.push(Edge::between("start", "b"));

    let canvas = Canvas::new(CanvasConfig::default());
    let draw_list = canvas.render(&graph, Vec2::new(800.0, 600.0));

    assert!(beziers(&draw_list).is_empty());
    // Dangling edges still belong to the document.
    assert_eq!(graph.edges.len(), 2);
}

#[test]
fn test_pending_wire_starts_at_output_port() {
    let mut graph = graph_ab();
    let mut canvas = Canvas::new(CanvasConfig::default());

    canvas.update(&InputState::pointer(Vec2::new(250.0, 140.0), true), 0.016, &mut graph);
    let (draw_list, _) = canvas.update(
        &InputState::pointer(Vec2::new(320.0, 200.0), true),
        0.016,
        &mut graph,
    );

    assert_eq!(
        beziers(&draw_list),
        vec![(Vec2::new(250.0, 140.0), Vec2::new(320.0, 200.0))]
    );
}

#[test]
fn test_zoom_scales_node_rects() {
    let graph = graph_ab();
    let mut canvas = Canvas::new(CanvasConfig::default());
    canvas.view.transform.zoom = 2.0;
    canvas.view.transform.pan = DVec2::new(10.0, -20.0);

    let draw_list = canvas.render(&graph, Vec2::new(800.0, 600.0));
    let rect = draw_list.iter().find_map(|cmd| match cmd {
        DrawCommand::Rect { pos, size, .. } => Some((*pos, *size)),
        _ => None,
    });

    assert_eq!(rect, Some((Vec2::new(210.0, 180.0), Vec2::new(300.0, 160.0))));
}

#[test]
fn test_connecting_port_is_highlighted() {
    let mut graph = graph_ab();
    let config = CanvasConfig::default();
    let connecting = config.style.connecting_port_color;
    let mut canvas = Canvas::new(config);

    let (draw_list, _) = canvas.update(
        &InputState::pointer(Vec2::new(250.0, 140.0), true),
        0.016,
        &mut graph,
    );

    let ports: Vec<(Vec2, bool)> = draw_list
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCommand::Circle { center, color, .. } => Some((*center, *color == connecting)),
            _ => None,
        })
        .collect();

    assert_eq!(ports.len(), 4);
    assert!(ports.contains(&(Vec2::new(250.0, 140.0), true)));
    assert_eq!(ports.iter().filter(|(_, lit)| *lit).count(), 1);
}
