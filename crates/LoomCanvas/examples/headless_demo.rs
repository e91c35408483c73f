use glam::{DVec2, Vec2};
use loom_canvas::input::{InputState, Key};
use loom_canvas::model::{GraphState, Node, NodeData};
use loom_canvas::{Canvas, CanvasConfig, LogicEvent};

#[derive(Clone, Debug)]
struct StepData {
    kind: &'static str,
}

impl NodeData for StepData {
    fn node_type(&self) -> String {
        self.kind.to_string()
    }
}

fn main() {
    println!("=== LoomCanvas Headless Demo ===");

    let config = CanvasConfig::default();
    let size = config.default_node_size;
    let mut canvas = Canvas::new(config);
    canvas.update_viewport_size(Vec2::new(1280.0, 720.0));

    let mut graph = GraphState::<StepData>::default();
    graph.insert_node(Node::new("prompt", DVec2::new(100.0, 100.0), size, StepData { kind: "llm" }));
    graph.insert_node(Node::new("lookup", DVec2::new(400.0, 200.0), size, StepData { kind: "rag" }));

    // Drag "prompt" down, wire it to "lookup", then delete the selection.
    let script = [
        InputState::pointer(Vec2::new(120.0, 130.0), true),
        InputState::pointer(Vec2::new(140.0, 180.0), true),
        InputState::pointer(Vec2::new(140.0, 180.0), false),
        InputState::pointer(Vec2::new(270.0, 190.0), true),
        InputState::pointer(Vec2::new(402.0, 241.0), true),
        InputState::pointer(Vec2::new(402.0, 241.0), false),
        InputState::key(Key::Delete),
    ];

    for (frame, input) in script.iter().enumerate() {
        println!("\n--- Frame {} ---", frame);

        let (draw_list, events) = canvas.update(input, 0.016, &mut graph);

        for event in &events {
            match event {
                LogicEvent::Connect { source, target } => {
                    let (s, t) = (graph.nodes[*source].id.clone(), graph.nodes[*target].id.clone());
                    if let Some(edge) = graph.add_edge(&s, &t) {
                        println!("  Connected: {}", edge.id);
                    }
                }
                LogicEvent::DeleteSelection => {
                    if let Some(key) = graph.selected() {
                        graph.remove_node(key);
                    }
                }
                LogicEvent::DeleteNode(key) => {
                    graph.remove_node(*key);
                }
                _ => {}
            }
        }

        println!("  Mode: {:?}", canvas.interaction_mode);
        println!("  Logic Events: {:?}", events);
        println!(
            "  Nodes: {}, Edges: {}, Draw commands: {}",
            graph.nodes.len(),
            graph.edges.len(),
            draw_list.len()
        );
    }

    println!("\nDemo Complete.");
}
