//! Single-pointer gesture state machine.
//!
//! ```text
//!            press_canvas                 release / cancel
//!   Idle ───────────────────▶ Panning ─────────────────────▶ Idle
//!     │                                                       ▲
//!     │      press_node                   release / cancel    │
//!     └─────────────────────▶ DraggingNode ───────────────────┘
//! ```
//!
//! The session is keyed by pointer id. A second pointer pressing while a
//! gesture is live is rejected, and its moves and releases are ignored.
//! This module only tracks the session; `CauseMap` applies its effects.

use crate::hierarchy::NodeId;
use crate::layout::Point;

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum DragSession {
    #[default]
    Idle,
    Panning {
        pointer_id: i32,
        /// Pointer position at press, in client pixels.
        start_client: Point,
        /// View pan at press.
        start_pan: Point,
    },
    DraggingNode {
        pointer_id: i32,
        node: NodeId,
        /// `node center - pointer world position` at grab time.
        offset: Point,
    },
}

impl DragSession {
    pub fn pointer_id(&self) -> Option<i32> {
        match *self {
            DragSession::Idle => None,
            DragSession::Panning { pointer_id, .. } | DragSession::DraggingNode { pointer_id, .. } => {
                Some(pointer_id)
            }
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, DragSession::Idle)
    }

    /// Short name for the host (cursor choice etc).
    pub fn mode(&self) -> &'static str {
        match self {
            DragSession::Idle => "idle",
            DragSession::Panning { .. } => "pan",
            DragSession::DraggingNode { .. } => "node",
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct DragController {
    session: DragSession,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    /// Start panning. Rejected while another gesture is live.
    pub fn press_canvas(&mut self, pointer_id: i32, start_client: Point, start_pan: Point) -> bool {
        self.begin(DragSession::Panning { pointer_id, start_client, start_pan })
    }

    /// Start dragging `node`. Rejected while another gesture is live.
    pub fn press_node(&mut self, pointer_id: i32, node: NodeId, offset: Point) -> bool {
        self.begin(DragSession::DraggingNode { pointer_id, node, offset })
    }

    fn begin(&mut self, next: DragSession) -> bool {
        if !self.session.is_idle() {
            tracing::debug!(active = ?self.session, rejected = ?next, "press ignored while a gesture is active");
            return false;
        }
        self.session = next;
        true
    }

    /// The live session, if `pointer_id` owns it.
    pub fn active_for(&self, pointer_id: i32) -> Option<&DragSession> {
        (self.session.pointer_id() == Some(pointer_id)).then_some(&self.session)
    }

    /// Pointer up. Ends the session only if `pointer_id` owns it.
    pub fn release(&mut self, pointer_id: i32) -> Option<DragSession> {
        if self.session.pointer_id() != Some(pointer_id) {
            return None;
        }
        Some(std::mem::take(&mut self.session))
    }

    /// Pointer left the canvas. Always ends whatever is live.
    pub fn cancel(&mut self) -> Option<DragSession> {
        match std::mem::take(&mut self.session) {
            DragSession::Idle => None,
            ended => Some(ended),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NODE: NodeId = NodeId::Cause { tree: 0, cause: 1 };

    #[test]
    fn test_pan_press_and_release() {
        let mut d = DragController::new();
        assert!(d.press_canvas(1, Point::new(10.0, 20.0), Point::new(5.0, 5.0)));
        assert_eq!(d.session().mode(), "pan");
        let ended = d.release(1).unwrap();
        assert!(matches!(ended, DragSession::Panning { pointer_id: 1, .. }));
        assert!(d.session().is_idle());
    }

    #[test]
    fn test_second_press_is_rejected() {
        let mut d = DragController::new();
        assert!(d.press_node(1, NODE, Point::ORIGIN));
        assert!(!d.press_canvas(2, Point::ORIGIN, Point::ORIGIN));
        assert!(!d.press_node(1, NodeId::Root { tree: 0 }, Point::ORIGIN));
        assert!(matches!(d.session(), DragSession::DraggingNode { node: NODE, .. }));
    }

    #[test]
    fn test_foreign_pointer_cannot_move_or_release() {
        let mut d = DragController::new();
        d.press_node(7, NODE, Point::new(1.0, 2.0));
        assert!(d.active_for(8).is_none());
        assert!(d.release(8).is_none());
        assert!(d.active_for(7).is_some());
    }

    #[test]
    fn test_cancel_always_clears() {
        let mut d = DragController::new();
        assert!(d.cancel().is_none());
        d.press_canvas(3, Point::ORIGIN, Point::ORIGIN);
        assert!(d.cancel().is_some());
        assert!(d.session().is_idle());
        assert!(d.release(3).is_none());
    }
}
