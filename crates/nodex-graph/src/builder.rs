//! Graph construction from a document corpus.

use crate::resolver::LinkResolver;
use nodex_core::{GraphData, GraphEdge, GraphNode};
use nodex_parser::Document;

/// Build renderer-ready graph data from a fully loaded corpus.
///
/// Runs in three passes:
/// 1. index short names and zero a connection counter per document;
/// 2. resolve each document's distinct wikilinks, emitting one edge per
///    distinct resolved non-self target and bumping the counter of both
///    endpoints;
/// 3. emit one node per document, in input order.
///
/// Dangling links and self-links are dropped without error.
///
/// # Example
/// ```
/// use nodex_graph::build_graph_data;
/// use nodex_parser::Document;
///
/// let docs = vec![
///     Document::new("A.md", "[[B]]"),
///     Document::new("B.md", "no links"),
///     Document::new("C.md", "[[Nonexistent]]"),
/// ];
/// let graph = build_graph_data(&docs);
/// assert_eq!(graph.nodes.len(), 3);
/// assert_eq!(graph.edges.len(), 1);
/// assert_eq!(graph.edges[0].id, "A.md->B.md");
/// assert!(graph.node("C.md").unwrap().is_orphan);
/// ```
pub fn build_graph_data(documents: &[Document]) -> GraphData {
    // Pass 1
    let resolver = LinkResolver::new(documents);
    let mut connections = vec![0usize; documents.len()];
    let position: std::collections::HashMap<&str, usize> = documents
        .iter()
        .enumerate()
        .map(|(i, doc)| (doc.path(), i))
        .collect();

    // Pass 2
    let mut edges = Vec::new();
    for (source_idx, doc) in documents.iter().enumerate() {
        // Case variants like [[b]] and [[B]] resolve to one target
        let mut targets = std::collections::HashSet::new();
        for link in doc.wiki_links() {
            let Some(target) = resolver.resolve(&link) else {
                log::trace!("Dropping unresolved link [[{}]] in {}", link, doc.path());
                continue;
            };
            if target == doc.path() {
                log::trace!("Dropping self link [[{}]] in {}", link, doc.path());
                continue;
            }
            let Some(&target_idx) = position.get(target) else {
                continue;
            };
            if !targets.insert(target_idx) {
                continue;
            }

            connections[source_idx] += 1;
            connections[target_idx] += 1;
            edges.push(GraphEdge::new(doc.path(), target));
        }
    }

    // Pass 3
    let nodes: Vec<GraphNode> = documents
        .iter()
        .zip(connections)
        .map(|(doc, connections)| GraphNode {
            id: doc.path().to_string(),
            label: doc.short_name().to_string(),
            connections,
            is_orphan: connections == 0,
        })
        .collect();

    log::debug!(
        "Built graph: {} nodes, {} edges",
        nodes.len(),
        edges.len()
    );

    GraphData { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn corpus(files: &[(&str, &str)]) -> Vec<Document> {
        files.iter().map(|(p, c)| Document::new(*p, *c)).collect()
    }

    #[test]
    fn test_end_to_end_small_corpus() {
        let docs = corpus(&[
            ("A.md", "[[B]]"),
            ("B.md", "no links"),
            ("C.md", "[[Nonexistent]]"),
        ]);
        let graph = build_graph_data(&docs);

        let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["A.md", "B.md", "C.md"]);
        assert_eq!(graph.edges, vec![GraphEdge::new("A.md", "B.md")]);

        let a = graph.node("A.md").unwrap();
        let b = graph.node("B.md").unwrap();
        let c = graph.node("C.md").unwrap();
        assert_eq!((a.connections, a.is_orphan), (1, false));
        assert_eq!((b.connections, b.is_orphan), (1, false));
        assert_eq!((c.connections, c.is_orphan), (0, true));
        assert_eq!(a.label, "A");
    }

    #[test]
    fn test_self_links_are_dropped() {
        let docs = corpus(&[("Self.md", "I am [[Self]] and [[self|me]]"), ("Other.md", "[[Self]]")]);
        let graph = build_graph_data(&docs);

        assert!(graph.edges.iter().all(|e| e.source != e.target));
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.node("Self.md").unwrap().connections, 1);
    }

    #[test]
    fn test_case_variants_collapse_to_one_edge() {
        let docs = corpus(&[("A.md", "[[b]] [[B]] [[B|bee]]"), ("B.md", "")]);
        let graph = build_graph_data(&docs);
        assert_eq!(graph.edges, vec![GraphEdge::new("A.md", "B.md")]);
        assert_eq!(graph.node("A.md").unwrap().connections, 1);
        assert_eq!(graph.node("B.md").unwrap().connections, 1);

        let ids: HashSet<_> = graph.edges.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), graph.edges.len());
    }

    #[test]
    fn test_nested_paths_resolve_by_short_name() {
        let docs = corpus(&[
            ("Projects/Alpha.md", "Owner: [[ada]]"),
            ("People/Ada.md", "Works on [[Alpha|the alpha project]]"),
        ]);
        let graph = build_graph_data(&docs);
        let ids: HashSet<_> = graph.edges.iter().map(|e| e.id.as_str()).collect();
        assert!(ids.contains("Projects/Alpha.md->People/Ada.md"));
        assert!(ids.contains("People/Ada.md->Projects/Alpha.md"));
        assert_eq!(graph.node("People/Ada.md").unwrap().connections, 2);
    }

    #[test]
    fn test_orphan_flag_matches_edge_membership() {
        let docs = corpus(&[
            ("a.md", "[[b]] [[c]]"),
            ("b.md", "[[a]]"),
            ("c.md", ""),
            ("d.md", "[[missing]] [[d]]"),
            ("e.md", "#tag only"),
        ]);
        let graph = build_graph_data(&docs);
        let linked: HashSet<&str> = graph
            .edges
            .iter()
            .flat_map(|e| [e.source.as_str(), e.target.as_str()])
            .collect();

        for node in &graph.nodes {
            assert_eq!(node.is_orphan, !linked.contains(node.id.as_str()), "{}", node.id);
        }
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let docs = corpus(&[("x.md", "[[y]]"), ("y.md", "[[x]]")]);
        assert_eq!(build_graph_data(&docs), build_graph_data(&docs));
    }

    #[test]
    fn test_empty_corpus() {
        let graph = build_graph_data(&[]);
        assert!(graph.nodes.is_empty());
        assert!(graph.edges.is_empty());
    }
}
