// Position table for every node of every tree.
//
// Indexed the same way `Topology` is (tree -> cause -> sub), so a `NodeId`
// resolves with plain indexing. Every write goes through `LayoutConfig::clamp`,
// which keeps each circle inside the canvas at all times.
//
// Rigid moves translate a subtree by one delta but clamp each descendant on
// its own, so a large move against an edge can squash a subtree.

use crate::hierarchy::{Level, NodeId, Topology};

use super::collision::{resolve_collisions, Circle, RelaxStats};
use super::spokes::{place_child_spokes, place_root_spokes};
use super::{LayoutConfig, Point};

/// A center plus the angle (degrees) it was seeded at.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Placed {
    pub center: Point,
    pub angle: f64,
}

#[derive(Debug, Clone)]
struct TreePositions {
    root: Point,
    causes: Vec<CausePositions>,
}

#[derive(Debug, Clone)]
struct CausePositions {
    at: Placed,
    subs: Vec<Placed>,
}

#[derive(Debug, Clone)]
pub struct LayoutState {
    trees: Vec<TreePositions>,
}

impl LayoutState {
    /// Seed every position from the spoke rules.
    pub fn seed(topology: &Topology, cfg: &LayoutConfig) -> Self {
        let trees = topology
            .trees
            .iter()
            .map(|tree| {
                let root = cfg.clamp(tree.origin, Level::Root);
                let spokes = place_root_spokes(root, tree.causes.len(), cfg.root_cause_distance, tree.arc);
                let causes = tree
                    .causes
                    .iter()
                    .zip(spokes)
                    .map(|(shape, spoke)| {
                        let center = cfg.clamp(spoke.center, Level::Cause);
                        let subs = place_child_spokes(
                            center,
                            spoke.angle,
                            shape.subs.len(),
                            cfg.cause_sub_distance,
                            cfg.sub_spread,
                        )
                        .into_iter()
                        .map(|s| Placed { center: cfg.clamp(s.center, Level::Sub), angle: s.angle })
                        .collect();
                        CausePositions { at: Placed { center, angle: spoke.angle }, subs }
                    })
                    .collect();
                TreePositions { root, causes }
            })
            .collect();
        Self { trees }
    }

    fn placed(&self, id: NodeId) -> Option<Placed> {
        match id {
            NodeId::Root { tree } => {
                self.trees.get(tree).map(|t| Placed { center: t.root, angle: 0.0 })
            }
            NodeId::Cause { tree, cause } => self.trees.get(tree)?.causes.get(cause).map(|c| c.at),
            NodeId::Sub { tree, cause, sub } => {
                self.trees.get(tree)?.causes.get(cause)?.subs.get(sub).copied()
            }
        }
    }

    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.placed(id).map(|p| p.center)
    }

    /// Seed angle of a cause or sub. Roots have none.
    pub fn angle(&self, id: NodeId) -> Option<f64> {
        match id {
            NodeId::Root { .. } => None,
            _ => self.placed(id).map(|p| p.angle),
        }
    }

    /// Move a root or cause to `target` and drag its descendants by the same delta.
    ///
    /// Returns false (and changes nothing) for subs and unknown ids.
    pub fn move_point_rigid(&mut self, id: NodeId, target: Point, cfg: &LayoutConfig) -> bool {
        match id {
            NodeId::Root { tree } => {
                let Some(t) = self.trees.get_mut(tree) else {
                    tracing::debug!(%id, "rigid move of unknown node ignored");
                    return false;
                };
                let clamped = cfg.clamp(target, Level::Root);
                let delta = clamped - t.root;
                t.root = clamped;
                for c in &mut t.causes {
                    c.at.center = cfg.clamp(c.at.center + delta, Level::Cause);
                    translate_subs(&mut c.subs, delta, cfg);
                }
                true
            }
            NodeId::Cause { tree, cause } => {
                let Some(c) = self.trees.get_mut(tree).and_then(|t| t.causes.get_mut(cause)) else {
                    tracing::debug!(%id, "rigid move of unknown node ignored");
                    return false;
                };
                let clamped = cfg.clamp(target, Level::Cause);
                let delta = clamped - c.at.center;
                c.at.center = clamped;
                translate_subs(&mut c.subs, delta, cfg);
                true
            }
            NodeId::Sub { .. } => false,
        }
    }

    /// Move a single sub. Nothing else is touched.
    pub fn move_leaf(&mut self, id: NodeId, target: Point, cfg: &LayoutConfig) -> bool {
        let NodeId::Sub { tree, cause, sub } = id else {
            return false;
        };
        match self
            .trees
            .get_mut(tree)
            .and_then(|t| t.causes.get_mut(cause))
            .and_then(|c| c.subs.get_mut(sub))
        {
            Some(s) => {
                s.center = cfg.clamp(target, Level::Sub);
                true
            }
            None => {
                tracing::debug!(%id, "leaf move of unknown node ignored");
                false
            }
        }
    }

    /// Dispatch to `move_point_rigid` or `move_leaf` by level.
    pub fn move_node(&mut self, id: NodeId, target: Point, cfg: &LayoutConfig) -> bool {
        match id.level() {
            Level::Root | Level::Cause => self.move_point_rigid(id, target, cfg),
            Level::Sub => self.move_leaf(id, target, cfg),
        }
    }

    /// De-overlap the sub layer of every tree, with all roots and causes pinned.
    pub fn relax_sub_layer(&mut self, cfg: &LayoutConfig) -> RelaxStats {
        let mut circles: Vec<Circle> = Vec::new();
        for t in &self.trees {
            circles.push(Circle::Anchor { center: t.root, radius: cfg.root_radius });
        }
        for t in &self.trees {
            for c in &t.causes {
                circles.push(Circle::Anchor { center: c.at.center, radius: cfg.cause_radius });
            }
        }
        let first_sub = circles.len();
        for t in &self.trees {
            for c in &t.causes {
                for s in &c.subs {
                    circles.push(Circle::Movable { center: s.center, radius: cfg.sub_radius });
                }
            }
        }

        let stats = resolve_collisions(&mut circles, &cfg.collision_settings());

        let mut resolved = circles[first_sub..].iter();
        for t in &mut self.trees {
            for c in &mut t.causes {
                for s in &mut c.subs {
                    if let Some(circle) = resolved.next() {
                        s.center = circle.center();
                    }
                }
            }
        }
        stats
    }

    /// Every node with its current center, parents before children.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Point)> + '_ {
        self.trees.iter().enumerate().flat_map(|(tree, t)| {
            std::iter::once((NodeId::Root { tree }, t.root)).chain(t.causes.iter().enumerate().flat_map(
                move |(cause, c)| {
                    std::iter::once((NodeId::Cause { tree, cause }, c.at.center)).chain(
                        c.subs
                            .iter()
                            .enumerate()
                            .map(move |(sub, s)| (NodeId::Sub { tree, cause, sub }, s.center)),
                    )
                },
            ))
        })
    }
}

fn translate_subs(subs: &mut [Placed], delta: Point, cfg: &LayoutConfig) {
    for s in subs {
        s.center = cfg.clamp(s.center + delta, Level::Sub);
    }
}
