use glam::DVec2;
use loom_canvas::model::{GraphState, Node, NodeData};
use loom_canvas::persistence::SavedGraph;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Payload {
    node_type: String,
    data: serde_json::Value,
}

impl NodeData for Payload {
    fn node_type(&self) -> String {
        self.node_type.clone()
    }
}

fn payload(node_type: &str, data: serde_json::Value) -> Payload {
    Payload {
        node_type: node_type.to_string(),
        data,
    }
}

#[test]
fn test_roundtrip_persistence() {
    let mut graph: GraphState<Payload> = GraphState::default();
    graph.insert_node(Node::new(
        "node_a",
        DVec2::new(12.345678901, -0.1),
        DVec2::new(150.0, 80.0),
        payload("llm", json!({ "temperature": 0.7 })),
    ));
    graph.insert_node(Node::new(
        "node_b",
        DVec2::new(300.0, 1e-9),
        DVec2::new(150.0, 80.0),
        payload("rag", json!({ "top_k": 3 })),
    ));
    graph.add_edge("node_a", "node_b");

    let saved = graph.save();
    assert_eq!(saved.nodes.len(), 2);
    assert_eq!(saved.edges.len(), 1);

    let text = serde_json::to_string(&saved).unwrap();
    let parsed: SavedGraph<Payload> = serde_json::from_str(&text).unwrap();

    let mut new_graph: GraphState<Payload> = GraphState::default();
    new_graph.load(parsed, DVec2::new(150.0, 80.0));

    assert_eq!(new_graph.save(), saved);
    let a = new_graph.node_by_id("node_a").expect("Node A missing");
    assert_eq!(a.position, DVec2::new(12.345678901, -0.1));
    assert_eq!(a.data.data["temperature"], json!(0.7));
    assert_eq!(new_graph.edges[0].id, "edge_node_a_node_b");
}

#[test]
fn test_wire_shape_flattens_payload() {
    let mut graph: GraphState<Payload> = GraphState::default();
    graph.insert_node(Node::new(
        "n1",
        DVec2::new(1.0, 2.0),
        DVec2::new(150.0, 80.0),
        payload("code", json!({ "timeout": 30 })),
    ));

    let value = serde_json::to_value(graph.save()).unwrap();
    assert_eq!(
        value,
        json!({
            "nodes": [{
                "node_id": "n1",
                "position": { "x": 1.0, "y": 2.0 },
                "node_type": "code",
                "data": { "timeout": 30 }
            }],
            "edges": []
        })
    );
}

#[test]
fn test_load_keeps_edges_verbatim_and_replaces_state() {
    let mut graph: GraphState<Payload> = GraphState::default();
    graph.insert_node(Node::new(
        "old",
        DVec2::ZERO,
        DVec2::new(150.0, 80.0),
        payload("llm", json!({})),
    ));

    let saved: SavedGraph<Payload> = serde_json::from_value(json!({
        "nodes": [
            { "node_id": "rag_1", "position": { "x": 100, "y": 50 }, "node_type": "rag", "data": {} }
        ],
        "edges": [
            { "id": "e1", "source": "start", "target": "rag_1" }
        ]
    }))
    .unwrap();
    graph.load(saved, DVec2::new(150.0, 80.0));

    assert!(graph.node_by_id("old").is_none());
    assert_eq!(graph.nodes.len(), 1);
    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.edges[0].source, "start");
    assert_eq!(
        graph.node_by_id("rag_1").unwrap().position,
        DVec2::new(100.0, 50.0)
    );
}

#[test]
fn test_missing_sections_default_to_empty() {
    let saved: SavedGraph<Payload> = serde_json::from_str("{}").unwrap();
    assert!(saved.nodes.is_empty());
    assert!(saved.edges.is_empty());
}

#[test]
fn test_edge_extra_fields_survive_load_and_save() {
    let stored = json!({
        "nodes": [
            { "node_id": "cond", "position": { "x": 0.0, "y": 0.0 },
              "node_type": "condition", "data": {} },
            { "node_id": "next", "position": { "x": 300.0, "y": 0.0 },
              "node_type": "llm", "data": {} }
        ],
        "edges": [
            { "id": "e1", "source": "cond", "target": "next",
              "source_handle": "true", "condition": "x > 1" }
        ]
    });
    let saved: SavedGraph<Payload> = serde_json::from_value(stored).unwrap();

    let mut graph: GraphState<Payload> = GraphState::default();
    graph.load(saved, DVec2::new(150.0, 80.0));
    assert_eq!(graph.edges[0].extra["source_handle"], json!("true"));

    let written = serde_json::to_value(graph.save()).unwrap();
    let edge = &written["edges"][0];
    assert_eq!(edge["id"], "e1");
    assert_eq!(edge["source_handle"], "true");
    assert_eq!(edge["condition"], "x > 1");
}
