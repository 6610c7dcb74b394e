use serde::{Deserialize, Serialize};

use crate::layout::Arc;

/// Static description of the map, as supplied by the host.
///
/// Serialized as a bare JSON array of trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HierarchyInput {
    pub trees: Vec<TreeInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeInput {
    pub label: String,
    /// Initial root center
    pub x: f64,
    pub y: f64,
    /// Arc the causes are spread along; falls back to `LayoutConfig::default_arc`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arc: Option<Arc>,
    #[serde(default)]
    pub causes: Vec<CauseInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CauseInput {
    pub label: String,
    #[serde(default)]
    pub subs: Vec<SubInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubInput {
    pub label: String,
}

impl HierarchyInput {
    pub fn from_json(input: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(input)?)
    }
}
