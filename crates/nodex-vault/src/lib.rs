//! # Vault Storage
//!
//! Storage access and loading for a vault of markdown notes.
//!
//! This crate provides:
//! - The [`Storage`] trait: list, read, write and create against a
//!   hierarchical store using vault-relative `/` paths
//! - [`FsStorage`], a local filesystem implementation with path traversal
//!   protection and write-to-temp-then-rename writes
//! - Folder tree construction and the indented structure outline
//! - [`Vault`], which snapshots every document and builds the link graph
//!
//! ## Quick Start
//!
//! ```no_run
//! use nodex_vault::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = NodexConfig::builder("/path/to/vault").build()?;
//!     let vault = Vault::open(&config)?;
//!
//!     let graph = vault.build_graph().await?;
//!     println!("{} notes, {} links", graph.nodes.len(), graph.edges.len());
//!
//!     println!("{}", vault.structure_text().await?);
//!     Ok(())
//! }
//! ```
//!
//! ## Loading Model
//!
//! Every document is read before the graph is built; the builder only ever
//! sees a complete `Vec<Document>`.
//!
//! ## Error Handling
//!
//! All operations return [`nodex_core::Result<T>`]:
//! - Missing files or folders
//! - Path traversal attempts
//! - Invalid entry names
//! - I/O failures

pub mod fs;
pub mod storage;
pub mod vault;

pub use fs::FsStorage;
pub use storage::{Entry, EntryKind, Storage, entry_order, join_path, split_path};
pub use vault::{FileTreeNode, Vault, build_file_tree, list_markdown_files, vault_structure_text};

pub mod prelude {
    pub use crate::fs::FsStorage;
    pub use crate::storage::{Entry, EntryKind, Storage};
    pub use crate::vault::{FileTreeNode, Vault};
    pub use nodex_core::prelude::*;
}
