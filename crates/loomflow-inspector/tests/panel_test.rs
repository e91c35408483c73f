use glam::DVec2;
use loom_canvas::model::{GraphState, Node};
use loomflow_core::{NodeKind, WorkflowNodeData};
use loomflow_inspector::schema::FieldType;
use loomflow_inspector::{NO_CONNECTIONS, PropertyPanel};
use serde_json::json;

fn graph_with(nodes: &[(&str, NodeKind)]) -> GraphState<WorkflowNodeData> {
    let mut graph = GraphState::default();
    for (i, (id, kind)) in nodes.iter().enumerate() {
        graph.insert_node(Node::new(
            *id,
            DVec2::new(i as f64 * 200.0, 0.0),
            DVec2::new(150.0, 80.0),
            WorkflowNodeData::new(kind.clone()),
        ));
    }
    graph
}

#[test]
fn test_no_selection_shows_placeholder() {
    let graph = graph_with(&[("a", NodeKind::Llm)]);
    let panel = PropertyPanel::for_selection(&graph, &[]);
    assert!(matches!(panel, PropertyPanel::Placeholder));
}

#[test]
fn test_llm_fields_and_structured_output_toggle() {
    let mut graph = graph_with(&[("a", NodeKind::Llm)]);
    graph.select(graph.key_of("a").unwrap());

    let panel = PropertyPanel::for_selection(&graph, &[]);
    let inspector = panel.inspector().expect("node panel");
    assert_eq!(inspector.node_id, "a");
    assert_eq!(inspector.type_label, "LLM");

    let visible: Vec<&str> = inspector.visible_fields().map(|f| f.id.as_str()).collect();
    assert_eq!(
        visible,
        vec![
            "config_id",
            "model",
            "system_prompt",
            "temperature",
            "user_message",
            "enable_structured_output"
        ]
    );

    // Switching the toggle on reveals the schema field with its stored text.
    let node = graph.node_by_id_mut("a").unwrap();
    node.data.set_field("structured_output_schema", "{\"type\": \"object\"}");
    node.data.set_field("enable_structured_output", "true");

    let panel = PropertyPanel::for_selection(&graph, &[]);
    let inspector = panel.inspector().unwrap();
    assert!(inspector.visible_fields().any(|f| f.id == "structured_output_schema"));
    assert_eq!(
        inspector.display("structured_output_schema"),
        "{\n  \"type\": \"object\"\n}"
    );

    // Switching it off hides the field but keeps the value.
    graph
        .node_by_id_mut("a")
        .unwrap()
        .data
        .set_field("enable_structured_output", "false");
    let panel = PropertyPanel::for_selection(&graph, &[]);
    let inspector = panel.inspector().unwrap();
    assert!(!inspector.visible_fields().any(|f| f.id == "structured_output_schema"));
    assert_eq!(
        inspector.values["structured_output_schema"],
        json!({ "type": "object" })
    );
}

#[test]
fn test_connection_summary() {
    let mut graph = graph_with(&[
        ("a", NodeKind::Llm),
        ("b", NodeKind::Rag),
        ("c", NodeKind::Template),
    ]);
    graph.add_edge("a", "b");
    graph.add_edge("b", "c");

    graph.select(graph.key_of("b").unwrap());
    let panel = PropertyPanel::for_selection(&graph, &[]);
    assert_eq!(
        panel.inspector().unwrap().connection_summary(),
        vec!["← a".to_string(), "→ c".to_string()]
    );

    let mut lonely = graph_with(&[("x", NodeKind::Code)]);
    lonely.select(lonely.key_of("x").unwrap());
    let panel = PropertyPanel::for_selection(&lonely, &[]);
    assert_eq!(
        panel.inspector().unwrap().connection_summary(),
        vec![NO_CONNECTIONS.to_string()]
    );
}

#[test]
fn test_foreign_node_gets_generic_json_fields() {
    let mut graph = GraphState::default();
    let mut data = WorkflowNodeData::new(NodeKind::Other("end".to_string()));
    data.data
        .insert("output_mapping".to_string(), json!({ "response": "{{llm_1}}" }));
    let key = graph.insert_node(Node::new("end", DVec2::ZERO, DVec2::new(150.0, 80.0), data));
    graph.select(key);

    let panel = PropertyPanel::for_selection(&graph, &[]);
    let inspector = panel.inspector().unwrap();
    assert_eq!(inspector.type_label, "end");
    assert_eq!(inspector.fields.len(), 1);
    assert_eq!(inspector.fields[0].id, "output_mapping");
    assert_eq!(inspector.fields[0].field_type, FieldType::Json);
}

#[test]
fn test_http_headers_display_literal_after_bad_json() {
    let mut graph = graph_with(&[("h", NodeKind::Http)]);
    graph.select(graph.key_of("h").unwrap());
    assert_eq!(
        PropertyPanel::for_selection(&graph, &[])
            .inspector()
            .unwrap()
            .display("headers"),
        "{}"
    );

    graph
        .node_by_id_mut("h")
        .unwrap()
        .data
        .set_field("headers", "{not valid");
    let panel = PropertyPanel::for_selection(&graph, &[]);
    assert_eq!(panel.inspector().unwrap().display("headers"), "{not valid");
}
