//! Link graph using petgraph for relationship queries over built graph data

use nodex_core::GraphData;
use petgraph::algo::kosaraju_scc;
use petgraph::prelude::*;
use petgraph::unionfind::UnionFind;
use std::collections::{BTreeMap, HashMap};

/// Directed petgraph view of a [`GraphData`].
///
/// Node weights are document paths, edge weights are edge ids.
pub struct LinkGraph {
    graph: DiGraph<String, String>,
    path_index: HashMap<String, NodeIndex>,
}

impl LinkGraph {
    /// Index nodes and edges of built graph data
    pub fn from_graph_data(data: &GraphData) -> Self {
        let mut graph = DiGraph::with_capacity(data.nodes.len(), data.edges.len());
        let mut path_index = HashMap::with_capacity(data.nodes.len());

        for node in &data.nodes {
            let idx = graph.add_node(node.id.clone());
            path_index.insert(node.id.clone(), idx);
        }

        for edge in &data.edges {
            match (path_index.get(&edge.source), path_index.get(&edge.target)) {
                (Some(&s), Some(&t)) => {
                    graph.add_edge(s, t, edge.id.clone());
                }
                _ => log::warn!("Skipping edge {} with unknown endpoint", edge.id),
            }
        }

        Self { graph, path_index }
    }

    /// Paths of documents linking to `path`, in edge order
    pub fn backlinks(&self, path: &str) -> Vec<&str> {
        self.neighbors(path, Incoming)
    }

    /// Paths of documents `path` links to, in edge order
    pub fn forward_links(&self, path: &str) -> Vec<&str> {
        self.neighbors(path, Outgoing)
    }

    fn neighbors(&self, path: &str, direction: Direction) -> Vec<&str> {
        let Some(&idx) = self.path_index.get(path) else {
            return vec![];
        };
        let mut found: Vec<(EdgeIndex, &str)> = self
            .graph
            .edges_directed(idx, direction)
            .map(|edge| {
                let other = match direction {
                    Incoming => edge.source(),
                    Outgoing => edge.target(),
                };
                (edge.id(), self.graph[other].as_str())
            })
            .collect();
        // petgraph walks adjacency lists newest-first
        found.sort_by_key(|(edge, _)| *edge);
        found.into_iter().map(|(_, p)| p).collect()
    }

    /// Weakly connected clusters, ignoring edge direction.
    ///
    /// Each cluster lists paths in node order; clusters are ordered by their
    /// first member. Orphans form singleton clusters.
    pub fn clusters(&self) -> Vec<Vec<&str>> {
        let mut sets = UnionFind::<usize>::new(self.graph.node_count());
        for edge in self.graph.edge_references() {
            sets.union(edge.source().index(), edge.target().index());
        }

        let mut grouped: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
        let mut first_member: HashMap<usize, usize> = HashMap::new();
        for idx in self.graph.node_indices() {
            let root = sets.find(idx.index());
            let key = *first_member.entry(root).or_insert(idx.index());
            grouped.entry(key).or_default().push(self.graph[idx].as_str());
        }
        grouped.into_values().collect()
    }

    /// Groups of documents that link to each other in a cycle
    pub fn cycles(&self) -> Vec<Vec<&str>> {
        kosaraju_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .map(|mut scc| {
                scc.sort();
                scc.iter().map(|&idx| self.graph[idx].as_str()).collect()
            })
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl From<&GraphData> for LinkGraph {
    fn from(data: &GraphData) -> Self {
        Self::from_graph_data(data)
    }
}
