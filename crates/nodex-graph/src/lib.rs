//! # Link Graph Analysis
//!
//! Knowledge graph construction and analysis for a vault of markdown notes.
//!
//! Provides:
//! - Short-name link resolution ([`LinkResolver`])
//! - Corpus to `{nodes, edges}` construction ([`build_graph_data`])
//! - Degree statistics, orphans and connectivity ranking ([`get_graph_stats`])
//! - View-driven filtering ([`apply_view_filters`])
//! - Backlink, forward link, cluster and cycle queries ([`LinkGraph`])
//!
//! ## Quick Start
//!
//! ```
//! use nodex_graph::{build_graph_data, get_graph_stats};
//! use nodex_parser::Document;
//!
//! let docs = vec![
//!     Document::new("A.md", "[[B]]"),
//!     Document::new("B.md", "no links"),
//!     Document::new("C.md", "[[Nonexistent]]"),
//! ];
//!
//! let graph = build_graph_data(&docs);
//! let stats = get_graph_stats(&graph);
//!
//! assert_eq!(stats.edge_count, 1);
//! assert_eq!(stats.orphans, vec!["C"]);
//! assert_eq!(stats.avg_connections_display(), "0.7");
//! ```
//!
//! ## Core Concepts
//!
//! - **Nodes**: one per document, keyed by vault-relative path
//! - **Edges**: resolved wikilinks, directed from source to target, never
//!   self-loops
//! - **Connections**: the builder's merged in+out counter used for sizing;
//!   analytics recompute degrees from edges independently
//! - **Orphans**: notes with no resolved link in or out
//!
//! ## Performance Characteristics
//!
//! - Resolution index: O(n)
//! - Graph construction: O(n + m) where n = documents, m = links
//! - Statistics: O(n log n + m)
//! - Cluster detection: O(n + m) via union-find

pub mod analytics;
pub mod builder;
pub mod filter;
pub mod graph;
pub mod resolver;

pub use analytics::{
    Degree, GraphStats, MOST_CONNECTED_LIMIT, RankedNode, degree_table, get_graph_stats,
};
pub use builder::build_graph_data;
pub use filter::{GraphFilterExt, apply_view_filters};
pub use graph::LinkGraph;
pub use resolver::LinkResolver;

pub mod prelude {
    pub use crate::analytics::{GraphStats, RankedNode, get_graph_stats};
    pub use crate::builder::build_graph_data;
    pub use crate::filter::{GraphFilterExt, apply_view_filters};
    pub use crate::graph::LinkGraph;
    pub use crate::resolver::LinkResolver;
    pub use nodex_core::prelude::*;
}
