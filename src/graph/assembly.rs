//! Assemble extracted nodes and edges into an attributed undirected graph.

use petgraph::stable_graph::{NodeIndex, StableUnGraph};
use std::collections::HashMap;

use super::{EdgeKind, GraphEdge, GraphNode, NodeCategory, NodeId};
use crate::error::{EventGraphError, Result};
use crate::render::{Network, NetworkEdge, NetworkNode};
use crate::style::StyleTable;

/// Per-node attributes carried into rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeAttrs {
    pub id: NodeId,
    pub label: String,
    pub tag: String,
    pub group: NodeCategory,
    pub score: f64,
    pub size: u32,
    pub shape: String,
    pub color: String,
}

/// Per-edge attributes carried into rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeAttrs {
    pub label: String,
    pub weight: f64,
    pub color: String,
    pub kind: EdgeKind,
}

/// Attributed graph built once per extraction result.
///
/// At most one edge joins any pair of nodes; adding another one replaces
/// the attributes of the existing edge.
#[derive(Debug, Clone, Default)]
pub struct EventGraph {
    graph: StableUnGraph<NodeAttrs, EdgeAttrs>,
    index: HashMap<NodeId, NodeIndex>,
    skipped_edges: Vec<GraphEdge>,
}

impl EventGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Re-adding an identical node is a no-op; re-adding an id
    /// with different attributes is an error.
    pub fn add_node(&mut self, attrs: NodeAttrs) -> Result<NodeIndex> {
        if let Some(&idx) = self.index.get(&attrs.id) {
            if self.graph[idx] == attrs {
                return Ok(idx);
            }
            return Err(EventGraphError::DuplicateNode(format!(
                "node `{}` added twice with conflicting attributes",
                attrs.id
            )));
        }

        let id = attrs.id;
        let idx = self.graph.add_node(attrs);
        self.index.insert(id, idx);
        Ok(idx)
    }

    /// Connect two existing nodes. Returns false if either endpoint is missing.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, attrs: EdgeAttrs) -> bool {
        match (self.index.get(&from), self.index.get(&to)) {
            (Some(&a), Some(&b)) => {
                self.graph.update_edge(a, b, attrs);
                true
            }
            _ => false,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeAttrs> {
        self.index.get(&id).map(|&idx| &self.graph[idx])
    }

    pub fn degree(&self, id: NodeId) -> Option<usize> {
        self.index
            .get(&id)
            .map(|&idx| self.graph.neighbors(idx).count())
    }

    /// Edge between two nodes, in either direction.
    pub fn edge(&self, a: NodeId, b: NodeId) -> Option<&EdgeAttrs> {
        let (&a, &b) = (self.index.get(&a)?, self.index.get(&b)?);
        self.graph
            .find_edge(a, b)
            .and_then(|e| self.graph.edge_weight(e))
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeAttrs> {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// Edges in insertion order as `(from, to, attrs)`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, &EdgeAttrs)> {
        self.graph.edge_indices().filter_map(move |e| {
            let (a, b) = self.graph.edge_endpoints(e)?;
            Some((self.graph[a].id, self.graph[b].id, &self.graph[e]))
        })
    }

    /// Ids of nodes with no incident edges.
    pub fn isolates(&self) -> Vec<NodeId> {
        self.graph
            .node_indices()
            .filter(|&idx| self.graph.neighbors(idx).next().is_none())
            .map(|idx| self.graph[idx].id)
            .collect()
    }

    /// Drop every node without incident edges; returns how many went.
    pub fn remove_isolates(&mut self) -> usize {
        let isolates = self.isolates();
        for id in &isolates {
            if let Some(idx) = self.index.remove(id) {
                self.graph.remove_node(idx);
            }
        }
        isolates.len()
    }

    /// Edges that were not added because an endpoint was missing.
    pub fn skipped_edges(&self) -> &[GraphEdge] {
        &self.skipped_edges
    }

    /// Flatten into the generic node/edge form renderers consume.
    pub fn to_network(&self) -> Network {
        let nodes = self
            .nodes()
            .map(|n| NetworkNode {
                id: n.id.to_string(),
                label: n.label.clone(),
                tag: n.tag.clone(),
                group: n.group.to_string(),
                score: n.score,
                size: n.size,
                color: n.color.clone(),
                shape: n.shape.clone(),
            })
            .collect();
        let edges = self
            .edges()
            .map(|(from, to, e)| NetworkEdge {
                from: from.to_string(),
                to: to.to_string(),
                label: e.label.clone(),
                weight: e.weight,
                color: e.color.clone(),
            })
            .collect();
        Network { nodes, edges }
    }
}

/// Build the attributed graph from extracted nodes and edges.
///
/// Edges whose endpoints are not among `nodes` are skipped and recorded.
/// With `drop_isolates` set and a non-empty edge list, nodes left without
/// edges are removed; an empty edge list always keeps every node.
pub fn build_network_graph(
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    style: &StyleTable,
    drop_isolates: bool,
) -> Result<EventGraph> {
    let mut graph = EventGraph::new();

    for node in nodes {
        let category = style.category(node.category);
        graph.add_node(NodeAttrs {
            id: node.id,
            label: node.label.clone(),
            tag: node.tag.clone(),
            group: node.category,
            score: node.score,
            size: category.size,
            shape: category.shape,
            color: style.tag_color(&node.tag).to_string(),
        })?;
    }

    for edge in edges {
        let label = match edge.kind {
            EdgeKind::Argument => edge.role.clone(),
            EdgeKind::Coref => "coref".to_string(),
        };
        let attrs = EdgeAttrs {
            label,
            weight: edge.score * 100.0,
            color: style.edge_color.clone(),
            kind: edge.kind,
        };
        if !graph.add_edge(edge.from, edge.to, attrs) {
            log::warn!(
                "Skipping edge {} -> {} ({}): endpoint not in graph",
                edge.from,
                edge.to,
                edge.role
            );
            graph.skipped_edges.push(edge.clone());
        }
    }

    if drop_isolates && !edges.is_empty() {
        let removed = graph.remove_isolates();
        log::debug!("Dropped {} isolated nodes", removed);
    }

    log::debug!(
        "Assembled graph: {} nodes, {} edges, {} skipped edges",
        graph.node_count(),
        graph.edge_count(),
        graph.skipped_edges.len()
    );

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: NodeId, tag: &str, label: &str, category: NodeCategory) -> GraphNode {
        GraphNode {
            id,
            tag: tag.to_string(),
            label: label.to_string(),
            score: 0.9,
            category,
        }
    }

    fn edge(from: NodeId, to: NodeId, role: &str, score: f64, kind: EdgeKind) -> GraphEdge {
        GraphEdge {
            from,
            to,
            role: role.to_string(),
            score,
            kind,
        }
    }

    fn sample_nodes() -> Vec<GraphNode> {
        vec![
            node(NodeId::Event(0), "IPO", "IPO", NodeCategory::Event),
            node(NodeId::Group(0), "ORGANIZATION", "Acme Corp", NodeCategory::EntityGroup),
            node(NodeId::Group(1), "DATE", "Friday", NodeCategory::EntityGroup),
        ]
    }

    #[test]
    fn test_node_attributes_from_style() {
        let style = StyleTable::default();
        let graph = build_network_graph(&sample_nodes(), &[], &style, true).unwrap();

        let ev = graph.node(NodeId::Event(0)).unwrap();
        assert_eq!(ev.size, 10);
        assert_eq!(ev.shape, "box");
        assert_eq!(ev.color, style.tag_color("IPO"));
        assert_eq!(ev.group, NodeCategory::Event);

        let gr = graph.node(NodeId::Group(0)).unwrap();
        assert_eq!(gr.label, "Acme Corp");
        assert_eq!(gr.shape, "dot");
        assert_eq!(gr.tag, "ORGANIZATION");
    }

    #[test]
    fn test_edge_labels_and_weights() {
        let edges = vec![
            edge(NodeId::Event(0), NodeId::Group(0), "COMPANY", 0.5, EdgeKind::Argument),
            edge(NodeId::Group(0), NodeId::Group(1), "", 0.25, EdgeKind::Coref),
        ];
        let graph = build_network_graph(&sample_nodes(), &edges, &StyleTable::default(), true).unwrap();

        let arg = graph.edge(NodeId::Group(0), NodeId::Event(0)).unwrap();
        assert_eq!(arg.label, "COMPANY");
        assert_eq!(arg.weight, 50.0);
        assert_eq!(arg.color, "grey");

        let coref = graph.edge(NodeId::Group(0), NodeId::Group(1)).unwrap();
        assert_eq!(coref.label, "coref");
        assert_eq!(coref.weight, 25.0);
    }

    #[test]
    fn test_isolates_dropped_when_edges_exist() {
        let edges = vec![edge(NodeId::Event(0), NodeId::Group(0), "COMPANY", 0.5, EdgeKind::Argument)];
        let graph = build_network_graph(&sample_nodes(), &edges, &StyleTable::default(), true).unwrap();

        assert_eq!(graph.node_count(), 2);
        assert!(!graph.contains(NodeId::Group(1)));
        assert!(graph.isolates().is_empty());
    }

    #[test]
    fn test_isolates_kept_when_disabled() {
        let edges = vec![edge(NodeId::Event(0), NodeId::Group(0), "COMPANY", 0.5, EdgeKind::Argument)];
        let graph = build_network_graph(&sample_nodes(), &edges, &StyleTable::default(), false).unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.isolates(), vec![NodeId::Group(1)]);
        assert_eq!(graph.degree(NodeId::Group(1)), Some(0));
    }

    #[test]
    fn test_empty_edge_list_keeps_every_node() {
        for drop in [true, false] {
            let graph = build_network_graph(&sample_nodes(), &[], &StyleTable::default(), drop).unwrap();
            assert_eq!(graph.node_count(), 3);
            assert_eq!(graph.edge_count(), 0);
        }
    }

    #[test]
    fn test_dangling_edge_is_skipped() {
        let edges = vec![
            edge(NodeId::Event(0), NodeId::Group(0), "COMPANY", 0.5, EdgeKind::Argument),
            edge(NodeId::Event(0), NodeId::Group(7), "DATE", 0.1, EdgeKind::Argument),
        ];
        let graph = build_network_graph(&sample_nodes(), &edges, &StyleTable::default(), true).unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert!(!graph.contains(NodeId::Group(7)));
        assert_eq!(graph.skipped_edges().len(), 1);
        assert_eq!(graph.skipped_edges()[0].to, NodeId::Group(7));
    }

    #[test]
    fn test_parallel_edges_collapse_last_wins() {
        let edges = vec![
            edge(NodeId::Event(0), NodeId::Group(0), "BUYER", 0.5, EdgeKind::Argument),
            edge(NodeId::Event(0), NodeId::Group(0), "SELLER", 0.7, EdgeKind::Argument),
        ];
        let graph = build_network_graph(&sample_nodes(), &edges, &StyleTable::default(), true).unwrap();

        assert_eq!(graph.edge_count(), 1);
        let e = graph.edge(NodeId::Event(0), NodeId::Group(0)).unwrap();
        assert_eq!(e.label, "SELLER");
        assert_eq!(e.weight, 70.0);
    }

    #[test]
    fn test_conflicting_duplicate_node_fails() {
        let mut nodes = sample_nodes();
        nodes.push(node(NodeId::Group(0), "ORGANIZATION", "Acme", NodeCategory::EntityGroup));
        let err = build_network_graph(&nodes, &[], &StyleTable::default(), true).unwrap_err();
        assert!(matches!(err, EventGraphError::DuplicateNode(_)));
        assert!(err.to_string().contains("gr0"));
    }

    #[test]
    fn test_identical_duplicate_node_is_ignored() {
        let mut nodes = sample_nodes();
        nodes.push(nodes[0].clone());
        let graph = build_network_graph(&nodes, &[], &StyleTable::default(), true).unwrap();
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn test_to_network_preserves_order() {
        let edges = vec![
            edge(NodeId::Event(0), NodeId::Group(1), "DATE", 0.3, EdgeKind::Argument),
            edge(NodeId::Event(0), NodeId::Group(0), "COMPANY", 0.5, EdgeKind::Argument),
        ];
        let graph = build_network_graph(&sample_nodes(), &edges, &StyleTable::default(), true).unwrap();
        let network = graph.to_network();

        let ids: Vec<&str> = network.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["ev0", "gr0", "gr1"]);
        assert_eq!(network.edges[0].to, "gr1");
        assert_eq!(network.edges[1].label, "COMPANY");
        assert_eq!(network.nodes[1].group, "entity_group");
    }
}
