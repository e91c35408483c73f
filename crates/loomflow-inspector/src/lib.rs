//! # LoomFlow Inspector
//!
//! This crate provides the headless logic for the property panel.
//! It turns the selected node's data into an ordered list of editable fields
//! and the summary lines shown next to them.

pub mod schema;

use loom_canvas::model::{GraphState, Node};
use loomflow_core::schema::fields_for;
use loomflow_core::{ConfigPreset, NodeKind, WorkflowNodeData};
use schema::{VisualField, display_value};
use serde_json::Value;
use std::collections::HashMap;

pub const PLACEHOLDER_TEXT: &str = "Select a node to view its properties";
pub const NO_CONNECTIONS: &str = "No connections";

/// What the side panel currently shows.
#[derive(Debug, Default)]
pub enum PropertyPanel {
    #[default]
    Placeholder,
    Node(NodeInspector),
}

impl PropertyPanel {
    /// Panel for the graph's current selection.
    pub fn for_selection(graph: &GraphState<WorkflowNodeData>, presets: &[ConfigPreset]) -> Self {
        graph
            .selected()
            .and_then(|key| graph.nodes.get(key))
            .map(|node| PropertyPanel::Node(NodeInspector::new(node, graph, presets)))
            .unwrap_or_default()
    }

    pub fn inspector(&self) -> Option<&NodeInspector> {
        match self {
            PropertyPanel::Node(inspector) => Some(inspector),
            PropertyPanel::Placeholder => None,
        }
    }
}

/// The state of the inspector for a specific node.
#[derive(Debug)]
pub struct NodeInspector {
    pub node_id: String,
    pub kind: NodeKind,
    pub type_label: String,
    /// All fields in display order, including hidden ones.
    pub fields: Vec<VisualField>,
    /// The current values of each field.
    pub values: HashMap<String, Value>,
    /// `→ target` / `← source` lines, in edge order.
    pub connections: Vec<String>,
}

impl NodeInspector {
    pub fn new(
        node: &Node<WorkflowNodeData>,
        graph: &GraphState<WorkflowNodeData>,
        presets: &[ConfigPreset],
    ) -> Self {
        let specs = fields_for(&node.data.node_type);
        let mut fields: Vec<VisualField> = specs
            .iter()
            .map(|spec| VisualField::from_spec(spec, presets))
            .collect();

        // Keys without a schema entry (foreign types, server extras).
        fields.extend(
            node.data
                .data
                .keys()
                .filter(|key| !specs.iter().any(|spec| spec.key == key.as_str()))
                .map(|key| VisualField::generic(key)),
        );

        let connections = graph
            .edges_of(&node.id)
            .map(|edge| {
                if edge.source == node.id {
                    format!("→ {}", edge.target)
                } else {
                    format!("← {}", edge.source)
                }
            })
            .collect();

        tracing::trace!(node_id = %node.id, fields = fields.len(), "Built node inspector");
        Self {
            node_id: node.id.clone(),
            kind: node.data.node_type.clone(),
            type_label: node.data.node_type.label(),
            fields,
            values: node
                .data
                .data
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            connections,
        }
    }

    pub fn is_visible(&self, field: &VisualField) -> bool {
        match &field.visible_when {
            Some(toggle) => matches!(self.values.get(toggle), Some(Value::Bool(true))),
            None => true,
        }
    }

    /// Fields to render right now.
    pub fn visible_fields(&self) -> impl Iterator<Item = &VisualField> {
        self.fields.iter().filter(|field| self.is_visible(field))
    }

    /// Editor text of a field; missing values show as empty.
    pub fn display(&self, field_id: &str) -> String {
        self.values.get(field_id).map(display_value).unwrap_or_default()
    }

    /// Connection lines, or the single "no connections" indicator.
    pub fn connection_summary(&self) -> Vec<String> {
        if self.connections.is_empty() {
            vec![NO_CONNECTIONS.to_string()]
        } else {
            self.connections.clone()
        }
    }
}
