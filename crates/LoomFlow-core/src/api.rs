//! Request and response bodies of the workflow server.

use crate::node::WorkflowNodeData;
use loom_canvas::model::Edge;
use loom_canvas::persistence::{SavedGraph, SavedNode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The `{ nodes, edges }` document exchanged on save and load.
pub type WorkflowGraph = SavedGraph<WorkflowNodeData>;

/// A node as it appears on the wire.
pub type WorkflowNode = SavedNode<WorkflowNodeData>;

/// A named LLM connection preset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfigPreset {
    pub name: String,
    #[serde(default)]
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConfigList {
    #[serde(default)]
    pub configs: Vec<ConfigPreset>,
}

/// A server-provided starter graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkflowTemplate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub graph: WorkflowGraph,
    #[serde(default)]
    pub variables: Map<String, Value>,
}

/// A workflow stored on the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    pub workflow_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub graph: WorkflowGraph,
    #[serde(default)]
    pub variables: Map<String, Value>,
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WorkflowList {
    #[serde(default)]
    pub workflows: Vec<WorkflowDefinition>,
}

/// Body of a save request.
#[derive(Clone, Debug, Serialize)]
pub struct SaveRequest<'a> {
    pub nodes: &'a [WorkflowNode],
    pub edges: &'a [Edge],
}

impl<'a> From<&'a WorkflowGraph> for SaveRequest<'a> {
    fn from(graph: &'a WorkflowGraph) -> Self {
        Self {
            nodes: &graph.nodes,
            edges: &graph.edges,
        }
    }
}
