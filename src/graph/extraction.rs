//! Node and edge extraction from an extraction result.

use std::collections::{HashMap, HashSet};

use super::canonical::{get_canonical_mention, CanonicalPolicy};
use super::{EdgeKind, GraphEdge, GraphNode, NodeCategory, NodeId};
use crate::error::{EventGraphError, Result};
use crate::result::ExtractionResult;

/// What to pull out of a result and how strict to be about scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOptions {
    pub categories: Vec<NodeCategory>,
    /// Exclusive lower bound: only scores strictly above it survive.
    pub threshold: f64,
    pub canonical_policy: CanonicalPolicy,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            categories: NodeCategory::ALL.to_vec(),
            threshold: 0.0,
            canonical_policy: CanonicalPolicy::Longest,
        }
    }
}

impl ExtractOptions {
    pub fn new(categories: &[NodeCategory], threshold: f64) -> Self {
        Self {
            categories: categories.to_vec(),
            threshold,
            ..Self::default()
        }
    }

    /// Replace the threshold; it must lie in `[0, 1]`.
    pub fn set_threshold(&mut self, threshold: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(EventGraphError::InvalidInput(format!(
                "threshold must be between 0.0 and 1.0, got {}",
                threshold
            )));
        }
        self.threshold = threshold;
        Ok(())
    }

    fn wants(&self, category: NodeCategory) -> bool {
        self.categories.contains(&category)
    }
}

/// Collapse nodes sharing `(tag, label)`.
///
/// The surviving node keeps the slot of the first occurrence but takes the
/// id and score of the last one.
fn dedup_by_tag_and_label(nodes: Vec<GraphNode>) -> Vec<GraphNode> {
    let mut slots: HashMap<(String, String), usize> = HashMap::new();
    let mut out: Vec<GraphNode> = Vec::with_capacity(nodes.len());

    for node in nodes {
        let key = (node.tag.clone(), node.label.clone());
        match slots.get(&key) {
            Some(&slot) => out[slot] = node,
            None => {
                slots.insert(key, out.len());
                out.push(node);
            }
        }
    }

    out
}

fn id_set(nodes: &[GraphNode]) -> HashSet<NodeId> {
    nodes.iter().map(|n| n.id).collect()
}

/// Convert an extraction result into `(nodes, edges)` for the requested categories.
///
/// Nodes come out as events, triggers, entity groups, entities; edges as
/// arguments, group corefs, trigger corefs. Argument edges are not score
/// filtered, and may point at groups that were.
pub fn get_nodes_and_edges(
    result: &ExtractionResult,
    options: &ExtractOptions,
) -> Result<(Vec<GraphNode>, Vec<GraphEdge>)> {
    let thr = options.threshold;
    let mut nodes = Vec::new();
    let mut edges = Vec::new();

    let mut event_nodes = Vec::new();
    let mut trigger_nodes = Vec::new();
    let mut entity_group_nodes = Vec::new();
    let mut entity_nodes = Vec::new();

    if options.wants(NodeCategory::Event) {
        for (i, event) in result.events.iter().enumerate() {
            for t in event.triggers.iter().take(1) {
                if t.group_score > thr {
                    event_nodes.push(GraphNode {
                        id: NodeId::Event(i),
                        tag: t.trigger_type.clone(),
                        label: t.trigger_type.clone(),
                        score: t.group_score,
                        category: NodeCategory::Event,
                    });
                }
            }
        }
        nodes.extend(event_nodes.iter().cloned());
    }

    if options.wants(NodeCategory::Trigger) {
        let mut raw = Vec::new();
        for (i, event) in result.events.iter().enumerate() {
            for (j, t) in event.triggers.iter().enumerate() {
                if t.score > thr {
                    raw.push(GraphNode {
                        id: NodeId::Trigger(i, j),
                        tag: t.trigger_type.clone(),
                        label: t.text.clone(),
                        score: t.score,
                        category: NodeCategory::Trigger,
                    });
                }
            }
        }
        trigger_nodes = dedup_by_tag_and_label(raw);
        nodes.extend(trigger_nodes.iter().cloned());
    }

    if options.wants(NodeCategory::EntityGroup) {
        // Members get their own nodes; keep the group label short then.
        let show_members = options.wants(NodeCategory::Entity);
        for (i, group) in result.entities.iter().enumerate() {
            for m in get_canonical_mention(&group.mentions, options.canonical_policy)? {
                if m.group_score > thr {
                    entity_group_nodes.push(GraphNode {
                        id: NodeId::Group(i),
                        tag: m.mention_type.clone(),
                        label: if show_members {
                            m.mention_type.clone()
                        } else {
                            m.text.clone()
                        },
                        score: m.group_score,
                        category: NodeCategory::EntityGroup,
                    });
                }
            }
        }
        nodes.extend(entity_group_nodes.iter().cloned());
    }

    if options.wants(NodeCategory::Entity) {
        let mut raw = Vec::new();
        for (i, group) in result.entities.iter().enumerate() {
            for (j, m) in group.mentions.iter().enumerate() {
                if m.score > thr {
                    raw.push(GraphNode {
                        id: NodeId::Mention(i, j),
                        tag: m.mention_type.clone(),
                        label: m.text.clone(),
                        score: m.score,
                        category: NodeCategory::Entity,
                    });
                }
            }
        }
        entity_nodes = dedup_by_tag_and_label(raw);
        nodes.extend(entity_nodes.iter().cloned());
    }

    if !event_nodes.is_empty() && !entity_group_nodes.is_empty() {
        for (i, event) in result.events.iter().enumerate() {
            for a in &event.arguments {
                edges.push(GraphEdge {
                    from: NodeId::Event(i),
                    to: NodeId::Group(a.entity_index),
                    role: a.role.clone(),
                    score: a.score,
                    kind: EdgeKind::Argument,
                });
            }
        }
    }

    if !entity_nodes.is_empty() && !entity_group_nodes.is_empty() {
        let entity_ids = id_set(&entity_nodes);
        for (i, group) in result.entities.iter().enumerate() {
            for (j, m) in group.mentions.iter().enumerate() {
                let id = NodeId::Mention(i, j);
                if entity_ids.contains(&id) && m.group_score > thr {
                    edges.push(GraphEdge {
                        from: NodeId::Group(i),
                        to: id,
                        role: String::new(),
                        score: m.group_score,
                        kind: EdgeKind::Coref,
                    });
                }
            }
        }
    }

    if !event_nodes.is_empty() && !trigger_nodes.is_empty() {
        let trigger_ids = id_set(&trigger_nodes);
        for (i, event) in result.events.iter().enumerate() {
            for (j, t) in event.triggers.iter().enumerate() {
                let id = NodeId::Trigger(i, j);
                if trigger_ids.contains(&id) && t.group_score > thr {
                    edges.push(GraphEdge {
                        from: NodeId::Event(i),
                        to: id,
                        role: String::new(),
                        score: t.group_score,
                        kind: EdgeKind::Coref,
                    });
                }
            }
        }
    }

    log::debug!(
        "Extracted {} nodes ({} events, {} triggers, {} groups, {} entities) and {} edges at threshold {}",
        nodes.len(),
        event_nodes.len(),
        trigger_nodes.len(),
        entity_group_nodes.len(),
        entity_nodes.len(),
        edges.len(),
        thr
    );

    Ok((nodes, edges))
}
