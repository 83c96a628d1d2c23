//! # Nodex Core
//!
//! Core data models, error types, and configuration for the Nodex knowledge
//! vault. This crate defines the canonical types that all other crates depend on.
//!
//! ## Architecture Principles
//!
//! - **Type-Driven Design**: Strong types replace string-based APIs
//! - **Zero Panic in Libraries**: All errors are `Result<T, Error>`
//! - **Builder Pattern for Complex Types**: Configuration structs use builders
//! - **Immutable by Default**: Graph views are never mutated after creation
//!
//! ## Core Modules
//!
//! - [`models`] - Frontmatter, headings, graph nodes/edges and view snapshots
//! - [`error`] - Error type and Result alias
//! - [`config`] - Vault and assistant configuration
//! - [`profiles`] - Configuration profiles for different environments
//!
//! ## Usage Examples
//!
//! ### Error Handling
//!
//! ```
//! use nodex_core::prelude::*;
//!
//! fn load() -> Result<()> {
//!     let _err = Error::parse_error("Invalid markdown content");
//!     Ok(())
//! }
//! ```
//!
//! ### Graph Edges
//!
//! ```
//! use nodex_core::GraphEdge;
//!
//! let edge = GraphEdge::new("Projects/Alpha.md", "People/Ada.md");
//! assert_eq!(edge.id, "Projects/Alpha.md->People/Ada.md");
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod profiles;

pub use config::*;
pub use error::{Error, Result};
pub use models::*;
pub use profiles::ConfigProfile;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{AssistantConfig, NodexConfig, ProviderKind, VIEWS_NAMESPACE};
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        Frontmatter, FrontmatterValue, GraphData, GraphEdge, GraphNode, GraphView, Heading,
        Point, ViewState,
    };
    pub use crate::profiles::ConfigProfile;
}
