//! Layout and interaction engine for two-level problem/cause maps.
//!
//! Each tree is a root circle with causes on an arc around it and sub-causes
//! fanned out around each cause. Users pan and zoom the canvas and drag any
//! circle; descendants follow their parent rigidly and sub-causes are
//! de-overlapped when a drag ends.

pub mod drag;
pub mod error;
pub mod hierarchy;
pub mod layout;
pub mod map;
pub mod output;
pub mod view;
mod wasm;

pub use error::{MapError, Result};
pub use hierarchy::{reference_hierarchy, HierarchyInput, Level, NodeId};
pub use layout::{LayoutConfig, Point};
pub use map::CauseMap;
pub use view::{ViewTransform, Viewport};
pub use wasm::CauseMapHandle;
