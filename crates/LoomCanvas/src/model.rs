//! # Core Data Models
//!
//! This module defines the node/edge store behind the editor surface.
//! Nodes live in a flat arena (`SlotMap`) keyed by a transient `NodeId`, while
//! every node also carries a stable string id that edges and the wire format
//! refer to.
//!
//! The graph is generic over `T: NodeData` so the workflow layer can embed its
//! own typed payload.

use crate::math::Rect;
use bitflags::bitflags;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use slotmap::SlotMap;
use slotmap::new_key_type;
use std::collections::HashMap;

/// Trait that user data must implement to be stored in the graph.
pub trait NodeData: Clone + std::fmt::Debug {
    /// Returns the type string of this node (e.g. `llm`, `rag`).
    fn node_type(&self) -> String;

    /// Human readable title drawn in the node header.
    fn label(&self) -> String {
        self.node_type()
    }
}

impl NodeData for String {
    fn node_type(&self) -> String {
        "Default".to_string()
    }
}

new_key_type! {
    /// Transient arena key for a Node.
    pub struct NodeId;
}

bitflags! {
    /// Per-node view state.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u8 {
        /// The node is currently selected by the user.
        const SELECTED = 1 << 0;
    }
}

/// A Node in the graph.
#[derive(Clone, Debug)]
pub struct Node<T> {
    /// Self-reference arena key.
    pub key: NodeId,
    /// Stable id used by edges and persistence.
    pub id: String,
    /// World-space position of the top-left corner.
    pub position: DVec2,
    /// Size of the node layout.
    pub size: DVec2,
    /// User-defined payload.
    pub data: T,
    /// State flags.
    pub flags: NodeFlags,
}

impl<T> Node<T> {
    /// Creates an unselected node.
    pub fn new(id: impl Into<String>, position: DVec2, size: DVec2, data: T) -> Self {
        Self {
            key: NodeId::default(),
            id: id.into(),
            position,
            size,
            data,
            flags: NodeFlags::default(),
        }
    }

    /// World-space anchor of one of the node's two ports.
    ///
    /// The input port sits in the middle of the left edge, the output port in
    /// the middle of the right edge.
    pub fn port_anchor(&self, kind: PortKind) -> DVec2 {
        let y = self.position.y + self.size.y * 0.5;
        match kind {
            PortKind::Input => DVec2::new(self.position.x, y),
            PortKind::Output => DVec2::new(self.position.x + self.size.x, y),
        }
    }

    /// Square hit area of the delete control in the top-right corner of the header.
    pub fn delete_control(&self, side: f64) -> Rect {
        let inset = 4.0;
        Rect::new(
            DVec2::new(
                self.position.x + self.size.x - side - inset,
                self.position.y + inset,
            ),
            DVec2::splat(side),
        )
    }

    /// Returns true if `p` lies inside the node body.
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.position.x
            && p.x <= self.position.x + self.size.x
            && p.y >= self.position.y
            && p.y <= self.position.y + self.size.y
    }
}

/// Which of a node's two connection points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PortKind {
    Input,
    Output,
}

/// Reference to a specific port on a specific node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PortRef {
    pub node: NodeId,
    pub kind: PortKind,
}

/// A directed connection from one node's output to another node's input.
///
/// Endpoints are stable node ids, so an edge survives serialization verbatim
/// even when it references a node that is not (or no longer) present.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    /// Fields the canvas does not interpret (`source_handle`, `condition`, ...),
    /// kept so a loaded edge is written back unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Edge {
    /// Builds an edge whose id is derived from its endpoints.
    pub fn between(source: &str, target: &str) -> Self {
        Self {
            id: edge_id(source, target),
            source: source.to_string(),
            target: target.to_string(),
            extra: Map::new(),
        }
    }

    /// Returns true if the edge touches the node with the given id.
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// Edge id for an ordered (source, target) pair.
///
/// Node ids may contain `_`, so two pairs can map to the same id;
/// [`GraphState::add_edge`] suffixes the id when that happens.
pub fn edge_id(source: &str, target: &str) -> String {
    format!("edge_{source}_{target}")
}

/// The entire state of the Graph.
///
/// Responsible for data storage and the structural invariants (unique node
/// ids, no self-loops, no duplicate edges, cascade on delete, single
/// selection), not for rendering or interaction.
#[derive(Clone, Debug)]
pub struct GraphState<T> {
    /// Arena for Nodes.
    pub nodes: SlotMap<NodeId, Node<T>>,
    /// Edges in insertion order.
    pub edges: Vec<Edge>,
    /// Insertion order, which is also the draw order.
    /// Lower index = Background/Bottom.
    pub draw_order: Vec<NodeId>,
    /// Index for O(1) stable id to NodeId lookup.
    pub id_index: HashMap<String, NodeId>,
}

impl<T> Default for GraphState<T> {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            edges: Vec::new(),
            draw_order: Vec::new(),
            id_index: HashMap::new(),
        }
    }
}

impl<T: NodeData> GraphState<T> {
    /// Inserts a node at the top of the draw order and indexes its stable id.
    pub fn insert_node(&mut self, mut node: Node<T>) -> NodeId {
        let key = self.nodes.insert_with_key(|key| {
            node.key = key;
            node
        });
        let id = self.nodes[key].id.clone();
        self.id_index.insert(id, key);
        self.draw_order.push(key);
        key
    }

    /// Removes a node together with every edge that references it.
    pub fn remove_node(&mut self, key: NodeId) -> Option<Node<T>> {
        let node = self.nodes.remove(key)?;
        if self.id_index.get(&node.id) == Some(&key) {
            self.id_index.remove(&node.id);
        }
        self.draw_order.retain(|&k| k != key);
        self.edges.retain(|edge| !edge.touches(&node.id));
        Some(node)
    }

    /// Looks up the arena key of a node by its stable id.
    pub fn key_of(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id).copied()
    }

    pub fn node_by_id(&self, id: &str) -> Option<&Node<T>> {
        self.key_of(id).and_then(|key| self.nodes.get(key))
    }

    pub fn node_by_id_mut(&mut self, id: &str) -> Option<&mut Node<T>> {
        let key = self.key_of(id)?;
        self.nodes.get_mut(key)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.id_index.contains_key(id)
    }

    /// Nodes in insertion order.
    pub fn ordered_nodes(&self) -> impl Iterator<Item = &Node<T>> {
        self.draw_order.iter().filter_map(|&key| self.nodes.get(key))
    }

    /// Appends an edge from `source` to `target`.
    ///
    /// Returns `None` without touching the graph for self-loops, for a pair
    /// that is already connected, or when either endpoint is missing.
    pub fn add_edge(&mut self, source: &str, target: &str) -> Option<&Edge> {
        if source == target || !self.contains_id(source) || !self.contains_id(target) {
            return None;
        }
        if self.has_edge(source, target) {
            return None;
        }
        let mut edge = Edge::between(source, target);
        let base = edge.id.clone();
        let mut n = 2;
        while self.has_edge_id(&edge.id) {
            edge.id = format!("{base}_{n}");
            n += 1;
        }
        self.edges.push(edge);
        self.edges.last()
    }

    pub fn has_edge_id(&self, id: &str) -> bool {
        self.edges.iter().any(|edge| edge.id == id)
    }

    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edges
            .iter()
            .any(|edge| edge.source == source && edge.target == target)
    }

    /// Edges where the node is the source or the target.
    pub fn edges_of<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |edge| edge.touches(node_id))
    }

    /// Currently selected node, if any.
    pub fn selected(&self) -> Option<NodeId> {
        self.draw_order.iter().copied().find(|&key| {
            self.nodes
                .get(key)
                .is_some_and(|node| node.flags.contains(NodeFlags::SELECTED))
        })
    }

    /// Selects exactly one node, deselecting the previous one first.
    ///
    /// Returns false if the key is unknown, in which case nothing changes.
    pub fn select(&mut self, key: NodeId) -> bool {
        if !self.nodes.contains_key(key) {
            return false;
        }
        self.deselect_all();
        if let Some(node) = self.nodes.get_mut(key) {
            node.flags.insert(NodeFlags::SELECTED);
        }
        true
    }

    pub fn deselect_all(&mut self) {
        for (_, node) in &mut self.nodes {
            node.flags.remove(NodeFlags::SELECTED);
        }
    }

    /// Removes all nodes and edges.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.draw_order.clear();
        self.id_index.clear();
    }

    /// Helper to find the world position of a port.
    pub fn port_position(&self, port: PortRef) -> Option<DVec2> {
        self.nodes.get(port.node).map(|node| node.port_anchor(port.kind))
    }

    /// World-space anchors for an edge, or `None` if an endpoint is missing.
    pub fn edge_anchors(&self, edge: &Edge) -> Option<(DVec2, DVec2)> {
        let source = self.node_by_id(&edge.source)?;
        let target = self.node_by_id(&edge.target)?;
        Some((
            source.port_anchor(PortKind::Output),
            target.port_anchor(PortKind::Input),
        ))
    }

    /// Ports within `radius` of `world`, front to back (output before input per node).
    pub fn ports_at(&self, world: DVec2, radius: f64) -> impl Iterator<Item = PortRef> + '_ {
        self.draw_order
            .iter()
            .rev()
            .filter_map(move |&key| self.nodes.get(key).map(|node| (key, node)))
            .flat_map(move |(key, node)| {
                [PortKind::Output, PortKind::Input]
                    .into_iter()
                    .filter(move |&kind| node.port_anchor(kind).distance(world) <= radius)
                    .map(move |kind| PortRef { node: key, kind })
            })
    }

    /// Hit-tests node bodies, front to back.
    pub fn node_at(&self, world: DVec2) -> Option<NodeId> {
        self.draw_order.iter().rev().copied().find(|&key| {
            self.nodes
                .get(key)
                .is_some_and(|node| node.contains(world))
        })
    }
}
