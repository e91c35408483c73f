//! # LoomCanvas
//!
//! A headless node-graph editing surface. The crate keeps the node/edge
//! store, the pan/zoom camera and the drag/connect state machine; the host
//! feeds it an [`input::InputState`] per frame and rasterizes the returned
//! [`render::DrawCommand`]s.
//!
//! - `model`: nodes in a `SlotMap` in insertion order, edges in a list keyed by node id.
//! - `view`: world/screen conversion.
//! - `interaction`: `Idle`, `Panning`, `DraggingNode` and `DrawingConnection`.
//! - `painter`: graph to draw commands.
//! - `persistence`: the `{ nodes, edges }` wire snapshot.

pub mod config;
pub mod input;
pub mod interaction;
pub mod math;
pub mod model;
pub mod painter;
pub mod persistence;
pub mod render;
pub mod view;

use glam::Vec2;
use input::InputState;
use model::GraphState;
use render::RenderList;
use view::{Transform, View};

pub use config::{CanvasConfig, CanvasStyle};
pub use interaction::{InteractionMode, LogicEvent};
pub use model::{Edge, NodeData, NodeId};

/// Transient editor state around a graph: camera, gesture in progress, and
/// the primary button level seen last frame.
///
/// The graph itself is passed in on every call so its owner stays the only
/// writer of structural changes.
pub struct Canvas {
    pub config: CanvasConfig,
    pub view: View,
    pub interaction_mode: InteractionMode,
    pointer_was_down: bool,
}

impl Canvas {
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            config,
            // Hosts report the real size through `update_viewport_size`.
            view: View::new(Transform::default(), Vec2::new(800.0, 600.0)),
            interaction_mode: InteractionMode::Idle,
            pointer_was_down: false,
        }
    }

    pub fn update_viewport_size(&mut self, size: Vec2) {
        self.view.viewport_size = size;
    }

    /// Drops any in-progress gesture.
    ///
    /// Call this before replacing the graph wholesale so the mode never
    /// refers to a node that no longer exists.
    pub fn reset_interaction(&mut self) {
        self.interaction_mode = InteractionMode::Idle;
    }

    /// Runs one frame: advances the gesture state machine against `graph`,
    /// then draws the result.
    ///
    /// Moves and selection are written to `graph` directly. Connections and
    /// deletions come back as [`LogicEvent`]s for the owner to apply.
    pub fn update<T: model::NodeData>(
        &mut self,
        input: &InputState,
        _dt: f32,
        graph: &mut GraphState<T>,
    ) -> (RenderList, Vec<LogicEvent>) {
        let pointer_pressed = input.buttons.primary && !self.pointer_was_down;
        self.pointer_was_down = input.buttons.primary;

        let mut events = Vec::new();
        interaction::handle_interactions(
            &mut self.interaction_mode,
            &mut self.view,
            &self.config,
            input,
            pointer_pressed,
            graph,
            &mut events,
        );

        (self.render(graph, input.screen_size), events)
    }

    /// Draws `graph` without consuming input.
    pub fn render<T: model::NodeData>(&self, graph: &GraphState<T>, screen_size: Vec2) -> RenderList {
        painter::Painter::draw_graph(&self.view, &self.config, graph, &self.interaction_mode, screen_size)
    }
}
