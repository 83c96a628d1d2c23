//! View-driven filtering of graph data.

use nodex_core::{GraphData, ViewState};
use std::collections::HashSet;

/// Extension methods on [`GraphData`] for renderer-side filtering
pub trait GraphFilterExt {
    /// Copy of the graph without orphan nodes.
    ///
    /// Edges are kept only when both endpoints survive.
    fn without_orphans(&self) -> GraphData;
}

impl GraphFilterExt for GraphData {
    fn without_orphans(&self) -> GraphData {
        let nodes: Vec<_> = self.nodes.iter().filter(|n| !n.is_orphan).cloned().collect();
        let kept: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        let edges = self
            .edges
            .iter()
            .filter(|e| kept.contains(e.source.as_str()) && kept.contains(e.target.as_str()))
            .cloned()
            .collect();
        GraphData { nodes, edges }
    }
}

/// Graph as it should be rendered under a view's filters.
///
/// With no view, or a view that shows orphans, the graph is returned as-is.
pub fn apply_view_filters(graph: &GraphData, view: Option<&ViewState>) -> GraphData {
    match view {
        Some(state) if state.hide_orphans => graph.without_orphans(),
        _ => graph.clone(),
    }
}
