//! Structural statistics over a built graph.

use nodex_core::GraphData;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of nodes reported in [`GraphStats::most_connected`]
pub const MOST_CONNECTED_LIMIT: usize = 5;

/// In/out degree of a node, counted from edges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Degree {
    pub incoming: usize,
    pub outgoing: usize,
}

impl Degree {
    pub fn total(&self) -> usize {
        self.incoming + self.outgoing
    }
}

/// A node ranked by total degree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedNode {
    pub id: String,
    pub label: String,
    pub connections: usize,
}

/// Summary statistics for a graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub orphan_count: usize,
    /// Labels of nodes with no incoming and no outgoing edges
    pub orphans: Vec<String>,
    pub most_connected: Vec<RankedNode>,
    /// `2 * edges / nodes`, rounded to one decimal
    pub avg_connections: f64,
}

impl GraphStats {
    /// Average connections as shown to users: `"1.5"`, or `"0"` for an
    /// empty or edgeless graph
    pub fn avg_connections_display(&self) -> String {
        if self.node_count == 0 || self.edge_count == 0 {
            "0".to_string()
        } else {
            format!("{:.1}", self.avg_connections)
        }
    }
}

/// Per-node degrees recomputed from the edge list, keyed by node id.
///
/// Every node gets an entry, including those with no edges. Edge endpoints
/// that are not nodes are ignored.
pub fn degree_table(graph: &GraphData) -> HashMap<&str, Degree> {
    let mut table: HashMap<&str, Degree> = graph
        .nodes
        .iter()
        .map(|n| (n.id.as_str(), Degree::default()))
        .collect();

    for edge in &graph.edges {
        if let Some(degree) = table.get_mut(edge.source.as_str()) {
            degree.outgoing += 1;
        }
        if let Some(degree) = table.get_mut(edge.target.as_str()) {
            degree.incoming += 1;
        }
    }

    table
}

/// Compute statistics for a graph.
///
/// Degrees come from the edges alone; the builder's `connections` counter is
/// not consulted.
///
/// # Example
/// ```
/// use nodex_core::{GraphData, GraphEdge, GraphNode};
/// use nodex_graph::get_graph_stats;
///
/// let node = |id: &str| GraphNode {
///     id: id.to_string(),
///     label: id.to_string(),
///     connections: 0,
///     is_orphan: false,
/// };
/// let graph = GraphData {
///     nodes: vec![node("a"), node("b"), node("c"), node("d")],
///     edges: vec![
///         GraphEdge::new("a", "b"),
///         GraphEdge::new("b", "c"),
///         GraphEdge::new("c", "a"),
///     ],
/// };
/// let stats = get_graph_stats(&graph);
/// assert_eq!(stats.avg_connections_display(), "1.5");
/// assert_eq!(stats.orphans, vec!["d"]);
/// ```
pub fn get_graph_stats(graph: &GraphData) -> GraphStats {
    let degrees = degree_table(graph);
    let degree_of = |id: &str| degrees.get(id).copied().unwrap_or_default();

    let orphans: Vec<String> = graph
        .nodes
        .iter()
        .filter(|n| degree_of(&n.id).total() == 0)
        .map(|n| n.label.clone())
        .collect();

    let mut ranked: Vec<RankedNode> = graph
        .nodes
        .iter()
        .map(|n| RankedNode {
            id: n.id.clone(),
            label: n.label.clone(),
            connections: degree_of(&n.id).total(),
        })
        .collect();
    // Vec::sort_by is stable: ties keep input order
    ranked.sort_by(|a, b| b.connections.cmp(&a.connections));
    ranked.truncate(MOST_CONNECTED_LIMIT);

    let node_count = graph.nodes.len();
    let edge_count = graph.edges.len();
    let avg_connections = if node_count > 0 && edge_count > 0 {
        let raw = (2 * edge_count) as f64 / node_count as f64;
        (raw * 10.0).round() / 10.0
    } else {
        0.0
    };

    GraphStats {
        node_count,
        edge_count,
        orphan_count: orphans.len(),
        orphans,
        most_connected: ranked,
        avg_connections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodex_core::{GraphEdge, GraphNode};

    fn node(id: &str) -> GraphNode {
        GraphNode {
            id: format!("{}.md", id),
            label: id.to_string(),
            connections: 0,
            is_orphan: false,
        }
    }

    fn edge(s: &str, t: &str) -> GraphEdge {
        GraphEdge::new(format!("{}.md", s), format!("{}.md", t))
    }

    #[test]
    fn test_average_for_four_nodes_three_edges() {
        let graph = GraphData {
            nodes: vec![node("a"), node("b"), node("c"), node("d")],
            edges: vec![edge("a", "b"), edge("a", "c"), edge("b", "c")],
        };
        let stats = get_graph_stats(&graph);
        assert_eq!(stats.avg_connections, 1.5);
        assert_eq!(stats.avg_connections_display(), "1.5");
        assert_eq!(stats.orphan_count, 1);
        assert_eq!(stats.orphans, vec!["d"]);
    }

    #[test]
    fn test_average_rounds_to_one_decimal() {
        let graph = GraphData {
            nodes: vec![node("a"), node("b"), node("c")],
            edges: vec![edge("a", "b")],
        };
        let stats = get_graph_stats(&graph);
        assert_eq!(stats.avg_connections_display(), "0.7");
    }

    #[test]
    fn test_average_whole_number_keeps_decimal() {
        let graph = GraphData {
            nodes: vec![node("a"), node("b")],
            edges: vec![edge("a", "b")],
        };
        assert_eq!(get_graph_stats(&graph).avg_connections_display(), "1.0");
    }

    #[test]
    fn test_empty_and_edgeless_graphs() {
        let empty = get_graph_stats(&GraphData::default());
        assert_eq!(empty.node_count, 0);
        assert_eq!(empty.avg_connections_display(), "0");
        assert!(empty.most_connected.is_empty());

        let edgeless = get_graph_stats(&GraphData {
            nodes: vec![node("a"), node("b")],
            edges: vec![],
        });
        assert_eq!(edgeless.avg_connections_display(), "0");
        assert_eq!(edgeless.orphan_count, 2);
    }

    #[test]
    fn test_degree_sums_match_edge_count() {
        let graph = GraphData {
            nodes: vec![node("a"), node("b"), node("c"), node("d"), node("e")],
            edges: vec![
                edge("a", "b"),
                edge("a", "c"),
                edge("b", "c"),
                edge("c", "a"),
                edge("d", "a"),
            ],
        };
        let table = degree_table(&graph);
        let out: usize = table.values().map(|d| d.outgoing).sum();
        let inc: usize = table.values().map(|d| d.incoming).sum();
        assert_eq!(out, graph.edges.len());
        assert_eq!(inc, graph.edges.len());
        assert_eq!(table["e.md"], Degree::default());
    }

    #[test]
    fn test_most_connected_is_stable_and_capped() {
        let ids = ["a", "b", "c", "d", "e", "f", "g"];
        let mut edges = vec![edge("g", "f"), edge("f", "g"), edge("g", "a")];
        // b, c, d, e each get exactly one edge, tying with a
        edges.push(edge("b", "c"));
        edges.push(edge("d", "e"));
        let graph = GraphData {
            nodes: ids.iter().map(|id| node(id)).collect(),
            edges,
        };

        let stats = get_graph_stats(&graph);
        let ranked: Vec<(&str, usize)> = stats
            .most_connected
            .iter()
            .map(|r| (r.label.as_str(), r.connections))
            .collect();
        assert_eq!(
            ranked,
            vec![("g", 3), ("f", 2), ("a", 1), ("b", 1), ("c", 1)]
        );
    }

    #[test]
    fn test_stats_ignore_builder_counter() {
        let mut a = node("a");
        a.connections = 99;
        let graph = GraphData {
            nodes: vec![a, node("b")],
            edges: vec![],
        };
        let stats = get_graph_stats(&graph);
        assert_eq!(stats.most_connected[0].connections, 0);
        assert_eq!(stats.orphan_count, 2);
    }

    #[test]
    fn test_stats_serialize_camel_case() {
        let stats = get_graph_stats(&GraphData::default());
        let json = serde_json::to_value(&stats).unwrap();
        assert!(json.get("nodeCount").is_some());
        assert!(json.get("mostConnected").is_some());
        assert!(json.get("avgConnections").is_some());
    }
}
