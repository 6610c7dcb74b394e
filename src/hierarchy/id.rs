//! Stable node identifiers.
//!
//! A node is addressed structurally by its position in the fixed three-level
//! hierarchy. The textual form (`t0`, `t0.c2`, `t0.c2.s1`) is what crosses the
//! JS boundary.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::MapError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Root,
    Cause,
    Sub,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum NodeId {
    Root { tree: usize },
    Cause { tree: usize, cause: usize },
    Sub { tree: usize, cause: usize, sub: usize },
}

impl NodeId {
    pub fn level(&self) -> Level {
        match self {
            NodeId::Root { .. } => Level::Root,
            NodeId::Cause { .. } => Level::Cause,
            NodeId::Sub { .. } => Level::Sub,
        }
    }

    pub fn tree(&self) -> usize {
        match *self {
            NodeId::Root { tree } | NodeId::Cause { tree, .. } | NodeId::Sub { tree, .. } => tree,
        }
    }

    /// The node this one hangs off, if any.
    pub fn parent(&self) -> Option<NodeId> {
        match *self {
            NodeId::Root { .. } => None,
            NodeId::Cause { tree, .. } => Some(NodeId::Root { tree }),
            NodeId::Sub { tree, cause, .. } => Some(NodeId::Cause { tree, cause }),
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Root { tree } => write!(f, "t{tree}"),
            NodeId::Cause { tree, cause } => write!(f, "t{tree}.c{cause}"),
            NodeId::Sub { tree, cause, sub } => write!(f, "t{tree}.c{cause}.s{sub}"),
        }
    }
}

impl Serialize for NodeId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn index(part: Option<&str>, prefix: char) -> Option<usize> {
    part?.strip_prefix(prefix)?.parse().ok()
}

impl FromStr for NodeId {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || MapError::MalformedNodeId(s.to_string());
        let mut parts = s.split('.');
        let tree = index(parts.next(), 't').ok_or_else(malformed)?;
        let id = match parts.next() {
            None => NodeId::Root { tree },
            Some(c) => {
                let cause = index(Some(c), 'c').ok_or_else(malformed)?;
                match parts.next() {
                    None => NodeId::Cause { tree, cause },
                    Some(sb) => {
                        let sub = index(Some(sb), 's').ok_or_else(malformed)?;
                        NodeId::Sub { tree, cause, sub }
                    }
                }
            }
        };
        if parts.next().is_some() {
            return Err(malformed());
        }
        Ok(id)
    }
}
