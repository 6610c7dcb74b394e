// Immutable hierarchy shape.
//
// Built once from the host's description. Holds labels, child order, root
// origins and arcs; positions live in `layout::LayoutState` instead so a move
// never copies any of this.

use crate::error::{MapError, Result};
use crate::layout::{Arc, LayoutConfig, Point};

use super::input::HierarchyInput;
use super::NodeId;

#[derive(Debug, Clone)]
pub struct Topology {
    pub trees: Vec<TreeShape>,
}

#[derive(Debug, Clone)]
pub struct TreeShape {
    pub label: String,
    /// Root center the layout is seeded from.
    pub origin: Point,
    pub arc: Arc,
    pub causes: Vec<CauseShape>,
}

#[derive(Debug, Clone)]
pub struct CauseShape {
    pub label: String,
    pub subs: Vec<String>,
}

impl Topology {
    pub fn from_input(input: &HierarchyInput, cfg: &LayoutConfig) -> Result<Self> {
        if input.trees.is_empty() {
            return Err(MapError::EmptyHierarchy);
        }
        let trees = input
            .trees
            .iter()
            .map(|t| TreeShape {
                label: t.label.clone(),
                origin: Point::new(t.x, t.y),
                arc: t.arc.unwrap_or(cfg.default_arc),
                causes: t
                    .causes
                    .iter()
                    .map(|c| CauseShape {
                        label: c.label.clone(),
                        subs: c.subs.iter().map(|s| s.label.clone()).collect(),
                    })
                    .collect(),
            })
            .collect();
        Ok(Self { trees })
    }

    pub fn label(&self, id: NodeId) -> Option<&str> {
        match id {
            NodeId::Root { tree } => self.trees.get(tree).map(|t| t.label.as_str()),
            NodeId::Cause { tree, cause } => {
                self.trees.get(tree)?.causes.get(cause).map(|c| c.label.as_str())
            }
            NodeId::Sub { tree, cause, sub } => self
                .trees
                .get(tree)?
                .causes
                .get(cause)?
                .subs
                .get(sub)
                .map(String::as_str),
        }
    }

    /// Every node id, parents before children, trees in input order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        for (tree, t) in self.trees.iter().enumerate() {
            out.push(NodeId::Root { tree });
            for (cause, c) in t.causes.iter().enumerate() {
                out.push(NodeId::Cause { tree, cause });
                out.extend((0..c.subs.len()).map(|sub| NodeId::Sub { tree, cause, sub }));
            }
        }
        out
    }
}
