//! The interactive map: topology, positions, view and gesture in one owner.
//!
//! All handlers run synchronously on the input thread. A node drag is
//! settled by one relaxation pass when its gesture ends, strictly after the
//! last move has been applied.

use crate::drag::{DragController, DragSession};
use crate::error::Result;
use crate::hierarchy::{reference_hierarchy, HierarchyInput, NodeId, Topology};
use crate::layout::{LayoutConfig, LayoutState, Point, RelaxStats};
use crate::output::{ConnectorOutput, NodeOutput, SceneOutput, ViewOutput};
use crate::view::{wheel_factor, ViewTransform, Viewport};

#[derive(Debug, Clone)]
pub struct CauseMap {
    cfg: LayoutConfig,
    topology: Topology,
    state: LayoutState,
    view: ViewTransform,
    drag: DragController,
    viewport: Viewport,
}

impl CauseMap {
    pub fn new(input: &HierarchyInput, cfg: LayoutConfig) -> Result<Self> {
        cfg.validate()?;
        let topology = Topology::from_input(input, &cfg)?;
        let state = LayoutState::seed(&topology, &cfg);
        Ok(Self {
            view: ViewTransform::new(&cfg),
            viewport: Viewport::identity(cfg.canvas),
            drag: DragController::new(),
            topology,
            state,
            cfg,
        })
    }

    pub fn from_json(input: &str, cfg: LayoutConfig) -> Result<Self> {
        Self::new(&HierarchyInput::from_json(input)?, cfg)
    }

    /// The bundled two-problem map with default tunables.
    pub fn reference() -> Result<Self> {
        Self::new(&reference_hierarchy(), LayoutConfig::default())
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.cfg
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn layout(&self) -> &LayoutState {
        &self.state
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn session(&self) -> &DragSession {
        self.drag.session()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Record where the canvas element currently sits on screen.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn client_to_canvas(&self, client: Point) -> Point {
        self.viewport.client_to_canvas(client, self.cfg.canvas)
    }

    pub fn client_to_world(&self, client: Point) -> Point {
        self.view.screen_to_world(self.client_to_canvas(client))
    }

    /// Press on empty background: start panning.
    pub fn on_canvas_pointer_down(&mut self, pointer_id: i32, client: Point) -> bool {
        self.drag.press_canvas(pointer_id, client, self.view.pan())
    }

    /// Press on a node: start dragging it, keeping the grab offset.
    pub fn on_node_pointer_down(&mut self, pointer_id: i32, node: NodeId, client: Point) -> bool {
        let Some(center) = self.state.position(node) else {
            tracing::debug!(%node, "press on unknown node ignored");
            return false;
        };
        let offset = center - self.client_to_world(client);
        self.drag.press_node(pointer_id, node, offset)
    }

    /// Returns true if the move changed the view or a node.
    pub fn on_pointer_move(&mut self, pointer_id: i32, client: Point) -> bool {
        let Some(&session) = self.drag.active_for(pointer_id) else {
            return false;
        };
        match session {
            DragSession::Idle => false,
            DragSession::Panning { start_client, start_pan, .. } => {
                // Pan lives in canvas units, ahead of the zoom scale.
                let moved = self.client_to_canvas(client) - self.client_to_canvas(start_client);
                self.view.set_pan(start_pan + moved);
                true
            }
            DragSession::DraggingNode { node, offset, .. } => {
                let target = self.client_to_world(client) + offset;
                self.state.move_node(node, target, &self.cfg)
            }
        }
    }

    /// Pointer released. Returns relaxation stats if a node drag was settled.
    pub fn on_pointer_up(&mut self, pointer_id: i32) -> Option<RelaxStats> {
        let ended = self.drag.release(pointer_id)?;
        self.settle(ended)
    }

    /// Pointer left the canvas. Ends any gesture.
    pub fn on_pointer_leave(&mut self) -> Option<RelaxStats> {
        let ended = self.drag.cancel()?;
        self.settle(ended)
    }

    fn settle(&mut self, ended: DragSession) -> Option<RelaxStats> {
        match ended {
            DragSession::DraggingNode { node, .. } => {
                let stats = self.state.relax_sub_layer(&self.cfg);
                tracing::debug!(%node, passes = stats.passes, converged = stats.converged, "node drag settled");
                Some(stats)
            }
            DragSession::Panning { .. } | DragSession::Idle => None,
        }
    }

    pub fn on_wheel(&mut self, client: Point, delta_y: f64) {
        let at = self.client_to_canvas(client);
        self.view.zoom_at_point(at, wheel_factor(delta_y, self.cfg.wheel_base));
    }

    pub fn zoom_in(&mut self) {
        self.view.zoom_at_point(self.cfg.canvas.center(), self.cfg.zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.view.zoom_at_point(self.cfg.canvas.center(), 1.0 / self.cfg.zoom_step);
    }

    pub fn reset_view(&mut self) {
        self.view.reset();
    }

    /// Throw away every move and re-seed positions from the spoke rules.
    pub fn reset_layout(&mut self) {
        self.state = LayoutState::seed(&self.topology, &self.cfg);
    }

    pub fn node(&self, id: NodeId) -> Option<NodeOutput> {
        let center = self.state.position(id)?;
        let label = self.topology.label(id)?;
        Some(NodeOutput {
            id,
            level: id.level(),
            label: label.to_string(),
            x: center.x,
            y: center.y,
            r: self.cfg.radius(id.level()),
        })
    }

    pub fn scene(&self) -> SceneOutput {
        let nodes: Vec<NodeOutput> = self.topology.node_ids().into_iter().filter_map(|id| self.node(id)).collect();

        let connectors = self
            .state
            .iter()
            .filter_map(|(id, to)| {
                let parent = id.parent()?;
                let from = self.state.position(parent)?;
                Some(ConnectorOutput { from: parent, to: id, x1: from.x, y1: from.y, x2: to.x, y2: to.y })
            })
            .collect();

        let pan = self.view.pan();
        SceneOutput {
            width: self.cfg.canvas.width,
            height: self.cfg.canvas.height,
            nodes,
            connectors,
            view: ViewOutput { zoom: self.view.zoom(), pan_x: pan.x, pan_y: pan.y },
            interaction: self.drag.session().mode(),
        }
    }

    pub fn scene_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.scene())?)
    }
}
