//! Output types for the rendering layer.
//!
//! These structs are serialized to JSON and handed to the host, which draws
//! connectors first, then circles, inside a `translate(pan) scale(zoom)` group.

use serde::Serialize;

use crate::hierarchy::{Level, NodeId};

/// A circle ready to draw, in world coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeOutput {
    pub id: NodeId,
    pub level: Level,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

/// A parent-to-child line, center to center
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectorOutput {
    pub from: NodeId,
    pub to: NodeId,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewOutput {
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

/// Everything the host needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneOutput {
    pub width: f64,
    pub height: f64,
    pub nodes: Vec<NodeOutput>,
    pub connectors: Vec<ConnectorOutput>,
    pub view: ViewOutput,
    /// Active gesture: "idle", "pan" or "node"
    pub interaction: &'static str,
}
