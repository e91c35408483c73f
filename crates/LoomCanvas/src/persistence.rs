//! # Snapshots
//!
//! Converts the arena-backed `GraphState` into the flat `{ nodes, edges }`
//! document exchanged with a workflow server, and back.
//!
//! A saved node is `{ node_id, position: { x, y }, ...payload }`: the payload
//! type is flattened into the node object, so the workflow layer decides the
//! remaining keys (`node_type`, `data`). Edges are saved verbatim.

use crate::model::{Edge, GraphState, Node, NodeData};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Plain `{ x, y }` position as it appears on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedPosition {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

impl From<DVec2> for SavedPosition {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<SavedPosition> for DVec2 {
    fn from(p: SavedPosition) -> Self {
        DVec2::new(p.x, p.y)
    }
}

/// A serializable representation of a Node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedNode<T> {
    pub node_id: String,
    #[serde(default)]
    pub position: SavedPosition,
    #[serde(flatten)]
    pub payload: T,
}

/// A serializable snapshot of the Graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedGraph<T> {
    // A plain `default` would put a `T: Default` bound on the impl.
    #[serde(default = "Vec::new")]
    pub nodes: Vec<SavedNode<T>>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl<T> Default for SavedGraph<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }
}

impl<T: NodeData> GraphState<T> {
    /// Serializes the graph state into a `SavedGraph` payload.
    ///
    /// Nodes are emitted in insertion order and edges in list order, so a
    /// save/load cycle reproduces the same document.
    pub fn save(&self) -> SavedGraph<T> {
        SavedGraph {
            nodes: self
                .ordered_nodes()
                .map(|node| SavedNode {
                    node_id: node.id.clone(),
                    position: node.position.into(),
                    payload: node.data.clone(),
                })
                .collect(),
            edges: self.edges.clone(),
        }
    }

    /// Loads a `SavedGraph` payload, REPLACING the current state.
    ///
    /// The payload is taken verbatim: edges are kept even if they reference
    /// node ids that are not part of `saved.nodes`.
    pub fn load(&mut self, saved: SavedGraph<T>, node_size: DVec2) {
        self.clear();
        for saved_node in saved.nodes {
            self.insert_node(Node::new(
                saved_node.node_id,
                saved_node.position.into(),
                node_size,
                saved_node.payload,
            ));
        }
        self.edges = saved.edges;
    }
}
