//! Event graph module: node/edge extraction, canonical mentions, and assembly.
//!
//! Turns an [`ExtractionResult`](crate::result::ExtractionResult) into node and
//! edge lists, then into an attributed undirected graph ready for rendering.

mod assembly;
mod canonical;
mod extraction;
mod ids;

pub use assembly::{build_network_graph, EdgeAttrs, EventGraph, NodeAttrs};
pub use canonical::{get_canonical_mention, CanonicalPolicy};
pub use extraction::{get_nodes_and_edges, ExtractOptions};
pub use ids::NodeId;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EventGraphError;

/// Which part of the extraction result a node was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeCategory {
    Event,
    Trigger,
    EntityGroup,
    Entity,
}

impl NodeCategory {
    pub const ALL: [NodeCategory; 4] = [
        NodeCategory::Event,
        NodeCategory::Trigger,
        NodeCategory::EntityGroup,
        NodeCategory::Entity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeCategory::Event => "event",
            NodeCategory::Trigger => "trigger",
            NodeCategory::EntityGroup => "entity_group",
            NodeCategory::Entity => "entity",
        }
    }

    /// Parse a comma-separated list such as `event,entity_group`.
    pub fn parse_list(list: &str) -> Result<Vec<NodeCategory>, EventGraphError> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeCategory {
    type Err = EventGraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "event" => Ok(NodeCategory::Event),
            "trigger" => Ok(NodeCategory::Trigger),
            "entity_group" => Ok(NodeCategory::EntityGroup),
            "entity" => Ok(NodeCategory::Entity),
            other => Err(EventGraphError::InvalidInput(format!(
                "unknown node category `{}` (expected event|trigger|entity_group|entity)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Event -> entity group filling one of its roles
    Argument,
    /// Group -> member mention, or event -> trigger
    Coref,
}

/// A node before assembly: `(id, tag, label, score, category)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: NodeId,
    /// Type label from the extraction service, e.g. `ORGANIZATION` or `IPO`.
    pub tag: String,
    /// Display text.
    pub label: String,
    pub score: f64,
    pub category: NodeCategory,
}

/// An edge before assembly: `(from, to, role, score, kind)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: NodeId,
    pub to: NodeId,
    /// Argument role; empty for coref edges.
    pub role: String,
    pub score: f64,
    pub kind: EdgeKind,
}
