mod id;
mod input;
mod sample;
mod topology;

pub use id::{Level, NodeId};
pub use input::{CauseInput, HierarchyInput, SubInput, TreeInput};
pub use sample::reference_hierarchy;
pub use topology::{CauseShape, Topology, TreeShape};
