//! Positional node identifiers.
//!
//! Every node id is derived from the position of its source record in the
//! extraction result, so the extractor and the assembler always agree on it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EventGraphError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum NodeId {
    /// `ev{event}`
    Event(usize),
    /// `ev{event}-tr{trigger}`
    Trigger(usize, usize),
    /// `gr{group}`
    Group(usize),
    /// `gr{group}-en{mention}`
    Mention(usize, usize),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Event(i) => write!(f, "ev{}", i),
            NodeId::Trigger(i, j) => write!(f, "ev{}-tr{}", i, j),
            NodeId::Group(i) => write!(f, "gr{}", i),
            NodeId::Mention(i, j) => write!(f, "gr{}-en{}", i, j),
        }
    }
}

fn parse_index(s: &str, prefix: &str, whole: &str) -> Result<usize, EventGraphError> {
    s.strip_prefix(prefix)
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| EventGraphError::InvalidInput(format!("invalid node id `{}`", whole)))
}

impl FromStr for NodeId {
    type Err = EventGraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (head, tail) = match s.split_once('-') {
            Some((head, tail)) => (head, Some(tail)),
            None => (s, None),
        };

        if head.starts_with("ev") {
            let i = parse_index(head, "ev", s)?;
            match tail {
                None => Ok(NodeId::Event(i)),
                Some(t) => Ok(NodeId::Trigger(i, parse_index(t, "tr", s)?)),
            }
        } else if head.starts_with("gr") {
            let i = parse_index(head, "gr", s)?;
            match tail {
                None => Ok(NodeId::Group(i)),
                Some(t) => Ok(NodeId::Mention(i, parse_index(t, "en", s)?)),
            }
        } else {
            Err(EventGraphError::InvalidInput(format!("invalid node id `{}`", s)))
        }
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for NodeId {
    type Error = EventGraphError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
