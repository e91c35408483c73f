//! # LoomFlow SDK
//!
//! [`WorkflowEditor`] is the single editor instance a host application
//! drives. It owns the canvas, the node/edge store and the property panel,
//! applies the canvas' logic events, and performs the server round-trips for
//! presets, templates and saving.

use glam::{DVec2, Vec2};
use loom_canvas::input::InputState;
use loom_canvas::model::{GraphState, Node, NodeId};
use loom_canvas::render::RenderList;
use loom_canvas::{Canvas, CanvasConfig, InteractionMode, LogicEvent};
use loomflow_core::ids::unique_node_id;
use loomflow_core::{
    ClientError, ConfigPreset, ConfigProvider, EditorConfig, EditorError, HttpWorkflowClient,
    NodeKind, WorkflowDefinition, WorkflowGraph, WorkflowNodeData, WorkflowStore,
};
use loomflow_inspector::PropertyPanel;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::Value;

/// The graph editor.
///
/// Every mutation goes through `&mut self`, so the store has exactly one
/// writer. Network calls finish before any local state is touched: a failed
/// load or save leaves the graph as it was.
pub struct WorkflowEditor<S = HttpWorkflowClient> {
    pub canvas: Canvas,
    graph: GraphState<WorkflowNodeData>,
    panel: PropertyPanel,
    presets: Vec<ConfigPreset>,
    config: EditorConfig,
    server: S,
    rng: StdRng,
    /// Id of the stored workflow the canvas was loaded from.
    workflow_id: Option<String>,
}

impl<S> WorkflowEditor<S>
where
    S: ConfigProvider + WorkflowStore,
{
    /// Creates an empty editor talking to `server`.
    pub fn new(server: S, config: EditorConfig, canvas_config: CanvasConfig) -> Self {
        Self {
            canvas: Canvas::new(canvas_config),
            graph: GraphState::default(),
            panel: PropertyPanel::Placeholder,
            presets: Vec::new(),
            config,
            server,
            rng: StdRng::from_entropy(),
            workflow_id: None,
        }
    }

    pub fn with_server(server: S) -> Self {
        Self::new(server, EditorConfig::default(), CanvasConfig::default())
    }

    pub fn graph(&self) -> &GraphState<WorkflowNodeData> {
        &self.graph
    }

    pub fn panel(&self) -> &PropertyPanel {
        &self.panel
    }

    pub fn presets(&self) -> &[ConfigPreset] {
        &self.presets
    }

    pub fn server(&self) -> &S {
        &self.server
    }

    /// Set by [`load_workflow`](Self::load_workflow); cleared whenever the
    /// canvas is emptied or replaced by a template.
    pub fn workflow_id(&self) -> Option<&str> {
        self.workflow_id.as_deref()
    }

    pub fn node(&self, id: &str) -> Option<&Node<WorkflowNodeData>> {
        self.graph.node_by_id(id)
    }

    pub fn selected_node_id(&self) -> Option<&str> {
        self.graph
            .selected()
            .and_then(|key| self.graph.nodes.get(key))
            .map(|node| node.id.as_str())
    }

    /// Adds a node of `kind` with its default data near the spawn origin.
    ///
    /// Returns the new node's id. Only the built-in kinds can be created.
    pub fn add_node(&mut self, kind: NodeKind) -> Result<String, EditorError> {
        if !kind.is_builtin() {
            return Err(EditorError::UnknownNodeType(kind.to_string()));
        }

        let graph = &self.graph;
        let id = unique_node_id(&mut self.rng, |candidate| graph.contains_id(candidate));
        let jitter = DVec2::new(self.rng.r#gen::<f64>(), self.rng.r#gen::<f64>());
        let position = self.config.spawn_origin + jitter * self.config.spawn_jitter;

        self.graph.insert_node(Node::new(
            id.clone(),
            position,
            self.config.node_size,
            WorkflowNodeData::new(kind.clone()),
        ));
        tracing::info!(node_id = %id, node_type = %kind, "Added node");
        Ok(id)
    }

    /// String-typed variant of [`add_node`](Self::add_node), for palette buttons.
    pub fn add_node_by_name(&mut self, node_type: &str) -> Result<String, EditorError> {
        let kind: NodeKind = node_type.parse()?;
        self.add_node(kind)
    }

    /// Removes a node and every edge touching it.
    pub fn delete_node(&mut self, id: &str) -> Result<(), EditorError> {
        let key = self
            .graph
            .key_of(id)
            .ok_or_else(|| EditorError::NodeNotFound(id.to_string()))?;
        self.remove_by_key(key);
        Ok(())
    }

    fn remove_by_key(&mut self, key: NodeId) {
        // Leave any gesture that still points at the node.
        let in_use = match self.canvas.interaction_mode {
            InteractionMode::DraggingNode { node, .. } => node == key,
            InteractionMode::DrawingConnection { source, .. } => source == key,
            _ => false,
        };
        if in_use {
            self.canvas.reset_interaction();
        }

        let edges_before = self.graph.edges.len();
        if let Some(node) = self.graph.remove_node(key) {
            tracing::info!(
                node_id = %node.id,
                removed_edges = edges_before - self.graph.edges.len(),
                "Deleted node"
            );
        }
        self.refresh_panel();
    }

    /// Connects `source`'s output to `target`'s input.
    ///
    /// Returns false for self-loops, duplicates and unknown endpoints.
    pub fn add_edge(&mut self, source: &str, target: &str) -> bool {
        let added = match self.graph.add_edge(source, target) {
            Some(edge) => {
                tracing::info!(edge_id = %edge.id, "Added edge");
                true
            }
            None => {
                tracing::debug!(source, target, "Edge rejected");
                false
            }
        };
        if added {
            self.refresh_panel();
        }
        added
    }

    /// Stores a raw field edit, parsed as JSON when possible.
    pub fn update_node_field(&mut self, id: &str, key: &str, raw: &str) -> Result<(), EditorError> {
        let node = self
            .graph
            .node_by_id_mut(id)
            .ok_or_else(|| EditorError::NodeNotFound(id.to_string()))?;
        let value = node.data.set_field(key, raw);
        tracing::debug!(node_id = %id, field = key, is_string = value.is_string(), "Updated field");
        self.refresh_panel();
        Ok(())
    }

    pub fn select_node(&mut self, id: &str) -> Result<(), EditorError> {
        let key = self
            .graph
            .key_of(id)
            .ok_or_else(|| EditorError::NodeNotFound(id.to_string()))?;
        self.graph.select(key);
        self.refresh_panel();
        Ok(())
    }

    pub fn deselect_all(&mut self) {
        self.graph.deselect_all();
        self.panel = PropertyPanel::Placeholder;
    }

    /// Empties the canvas.
    pub fn clear_all(&mut self) {
        self.canvas.reset_interaction();
        self.graph.clear();
        self.panel = PropertyPanel::Placeholder;
        self.workflow_id = None;
        tracing::info!("Cleared canvas");
    }

    /// Runs one frame of the canvas and applies the resulting logic events.
    pub fn handle_input(&mut self, input: &InputState, dt: f32) -> RenderList {
        let (draw_list, events) = self.canvas.update(input, dt, &mut self.graph);
        // The canvas drew before the structural events were applied.
        if self.apply_events(events) {
            self.render(input.screen_size)
        } else {
            draw_list
        }
    }

    pub fn render(&self, screen_size: Vec2) -> RenderList {
        self.canvas.render(&self.graph, screen_size)
    }

    fn apply_events(&mut self, events: Vec<LogicEvent>) -> bool {
        let mut structural = false;
        for event in events {
            match event {
                LogicEvent::Connect { source, target } => {
                    let ids = self
                        .graph
                        .nodes
                        .get(source)
                        .zip(self.graph.nodes.get(target))
                        .map(|(s, t)| (s.id.clone(), t.id.clone()));
                    if let Some((source_id, target_id)) = ids {
                        structural |= self.add_edge(&source_id, &target_id);
                    }
                }
                LogicEvent::DeleteNode(key) => {
                    self.remove_by_key(key);
                    structural = true;
                }
                LogicEvent::DeleteSelection => {
                    if let Some(key) = self.graph.selected() {
                        self.remove_by_key(key);
                        structural = true;
                    }
                }
                LogicEvent::SelectionChanged(_) => self.refresh_panel(),
                LogicEvent::ConnectionCancelled => tracing::debug!("Connection cancelled"),
                LogicEvent::NodeMoved { .. } | LogicEvent::RepaintNeeded => {}
            }
        }
        structural
    }

    fn refresh_panel(&mut self) {
        self.panel = PropertyPanel::for_selection(&self.graph, &self.presets);
    }

    /// Serialized `{ nodes, edges }` of the current graph.
    pub fn snapshot(&self) -> WorkflowGraph {
        self.graph.save()
    }

    /// Replaces the whole graph with `saved`, taken verbatim.
    pub fn load_graph(&mut self, saved: WorkflowGraph) {
        self.clear_all();
        let (nodes, edges) = (saved.nodes.len(), saved.edges.len());
        self.graph.load(saved, self.config.node_size);
        tracing::info!(nodes, edges, "Loaded graph");
    }

    /// Replaces the presets offered by the `llm` config selector.
    pub fn set_presets(&mut self, presets: Vec<ConfigPreset>) {
        self.presets = presets;
        self.refresh_panel();
    }

    /// Fetches the LLM connection presets offered on `llm` nodes.
    pub async fn load_configs(&mut self) -> Result<&[ConfigPreset], ClientError> {
        let presets = self.server.list_configs().await?;
        self.set_presets(presets);
        Ok(&self.presets)
    }

    /// Replaces the canvas with a server template, once it has arrived.
    pub async fn load_template(&mut self, name: &str) -> Result<(), ClientError> {
        let template = self.server.fetch_template(name).await?;
        tracing::info!(template = name, "Applying template");
        self.load_graph(template.graph);
        Ok(())
    }

    /// Sends the current graph to the workflow store as a new workflow named `name`.
    pub async fn save(&self, name: &str) -> Result<Value, ClientError> {
        let snapshot = self.snapshot();
        self.server.save_workflow(name, &snapshot).await
    }

    /// Writes the current graph back over the stored workflow it was loaded
    /// from. Returns `Ok(None)` when the canvas did not come from one.
    pub async fn update_workflow(&self) -> Result<Option<Value>, ClientError> {
        let Some(workflow_id) = self.workflow_id.as_deref() else {
            return Ok(None);
        };
        let snapshot = self.snapshot();
        let ack = self.server.update_workflow(workflow_id, &snapshot).await?;
        Ok(Some(ack))
    }

    pub async fn list_workflows(&self) -> Result<Vec<WorkflowDefinition>, ClientError> {
        self.server.list_workflows().await
    }

    /// Replaces the canvas with a stored workflow.
    pub async fn load_workflow(&mut self, workflow_id: &str) -> Result<WorkflowDefinition, ClientError> {
        let definition = self.server.fetch_workflow(workflow_id).await?;
        self.load_graph(definition.graph.clone());
        self.workflow_id = Some(definition.workflow_id.clone());
        Ok(definition)
    }

    pub async fn delete_workflow(&self, workflow_id: &str) -> Result<(), ClientError> {
        self.server.delete_workflow(workflow_id).await
    }
}
