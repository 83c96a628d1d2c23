//! Hierarchical storage abstraction for vault contents.
//!
//! Paths are vault-relative, `/`-separated segments. The empty string names
//! the vault root.

use async_trait::async_trait;
use nodex_core::Result;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Kind of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Folder,
}

/// One child of a folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub name: String,
    /// Vault-relative path
    pub path: String,
    pub kind: EntryKind,
    /// `false` for folders
    pub is_markdown: bool,
}

impl Entry {
    pub fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }
}

/// Listing order: folders before files, then by name ignoring case.
pub fn entry_order(a: &Entry, b: &Entry) -> Ordering {
    match (a.kind, b.kind) {
        (EntryKind::Folder, EntryKind::File) => Ordering::Less,
        (EntryKind::File, EntryKind::Folder) => Ordering::Greater,
        _ => a
            .name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name)),
    }
}

/// Join a folder path and a child name
///
/// # Example
/// ```
/// use nodex_vault::join_path;
///
/// assert_eq!(join_path("", "Inbox.md"), "Inbox.md");
/// assert_eq!(join_path("Projects", "Alpha.md"), "Projects/Alpha.md");
/// ```
pub fn join_path(dir: &str, name: &str) -> String {
    let dir = dir.trim_matches('/');
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

/// Split a path into its parent folder and final name
pub fn split_path(path: &str) -> (&str, &str) {
    let path = path.trim_matches('/');
    match path.rsplit_once('/') {
        Some((dir, name)) => (dir, name),
        None => ("", path),
    }
}

/// Folder and file access against a vault root.
///
/// Entries whose name starts with `.` are never listed.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Children of `dir`, folders first then by name
    async fn list_entries(&self, dir: &str) -> Result<Vec<Entry>>;

    async fn read_text(&self, path: &str) -> Result<String>;

    /// Replace the contents of a file in an existing folder
    async fn write_text(&self, path: &str, text: &str) -> Result<()>;

    /// Create `name` inside `dir`, writing `initial` when non-empty.
    ///
    /// Returns the new file's path.
    async fn create_file(&self, dir: &str, name: &str, initial: &str) -> Result<String>;

    /// Create folder `name` inside `dir`, returning its path.
    async fn create_folder(&self, dir: &str, name: &str) -> Result<String>;
}
