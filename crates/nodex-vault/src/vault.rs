//! Vault loading: traversal, file tree, structure text and document snapshots

use futures::future::BoxFuture;
use nodex_core::prelude::*;
use nodex_graph::{GraphStats, build_graph_data, get_graph_stats};
use nodex_parser::{Document, NoteTemplate, create_note_content};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;

use crate::fs::FsStorage;
use crate::storage::{EntryKind, Storage};

/// A node in the vault's folder tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileTreeNode {
    pub name: String,
    pub path: String,
    pub kind: EntryKind,
    pub is_markdown: bool,
    /// Empty for files
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FileTreeNode>,
}

/// Recursively build the folder tree below `dir`, folders first then by name
pub fn build_file_tree<'a>(
    storage: &'a dyn Storage,
    dir: &'a str,
) -> BoxFuture<'a, Result<Vec<FileTreeNode>>> {
    Box::pin(async move {
        let mut nodes = Vec::new();
        for entry in storage.list_entries(dir).await? {
            let children = match entry.kind {
                EntryKind::Folder => build_file_tree(storage, &entry.path).await?,
                EntryKind::File => Vec::new(),
            };
            nodes.push(FileTreeNode {
                name: entry.name,
                path: entry.path,
                kind: entry.kind,
                is_markdown: entry.is_markdown,
                children,
            });
        }
        Ok(nodes)
    })
}

/// Paths of every markdown file below `dir`, sorted by path
pub async fn list_markdown_files(storage: &dyn Storage, dir: &str) -> Result<Vec<String>> {
    let mut files = Vec::new();
    let mut stack = vec![dir.to_string()];

    while let Some(current) = stack.pop() {
        for entry in storage.list_entries(&current).await? {
            match entry.kind {
                EntryKind::Folder => stack.push(entry.path),
                EntryKind::File if entry.is_markdown => files.push(entry.path),
                EntryKind::File => {}
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Indented outline of folders and markdown files.
///
/// Folders end with `/`; each level indents by two spaces; other files are
/// left out.
///
/// # Example
/// ```
/// use nodex_vault::{EntryKind, FileTreeNode, vault_structure_text};
///
/// let file = |name: &str, path: &str| FileTreeNode {
///     name: name.to_string(),
///     path: path.to_string(),
///     kind: EntryKind::File,
///     is_markdown: name.ends_with(".md"),
///     children: vec![],
/// };
/// let tree = vec![
///     FileTreeNode {
///         name: "Projects".to_string(),
///         path: "Projects".to_string(),
///         kind: EntryKind::Folder,
///         is_markdown: false,
///         children: vec![file("Alpha.md", "Projects/Alpha.md"), file("logo.png", "Projects/logo.png")],
///     },
///     file("Inbox.md", "Inbox.md"),
/// ];
/// assert_eq!(vault_structure_text(&tree), "Projects/\n  Alpha.md\nInbox.md");
/// ```
pub fn vault_structure_text(tree: &[FileTreeNode]) -> String {
    fn walk(nodes: &[FileTreeNode], depth: usize, lines: &mut Vec<String>) {
        let prefix = "  ".repeat(depth);
        for node in nodes {
            match node.kind {
                EntryKind::Folder => {
                    lines.push(format!("{}{}/", prefix, node.name));
                    walk(&node.children, depth + 1, lines);
                }
                EntryKind::File if node.is_markdown => {
                    lines.push(format!("{}{}", prefix, node.name));
                }
                EntryKind::File => {}
            }
        }
    }

    let mut lines = Vec::new();
    walk(tree, 0, &mut lines);
    lines.join("\n")
}

/// An opened vault
#[derive(Clone)]
pub struct Vault {
    storage: Arc<dyn Storage>,
    summary_length: usize,
    markdown_extension: String,
}

impl Vault {
    /// Open the configured vault on the local filesystem
    pub fn open(config: &NodexConfig) -> Result<Self> {
        let storage = FsStorage::from_config(config)?;
        log::info!("Opened vault at {}", storage.root().display());
        Ok(Self {
            storage: Arc::new(storage),
            summary_length: config.summary_length,
            markdown_extension: config.markdown_extension.clone(),
        })
    }

    /// Vault over any storage backend
    pub fn with_storage(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            summary_length: nodex_parser::DEFAULT_SUMMARY_LENGTH,
            markdown_extension: nodex_parser::MARKDOWN_EXTENSION.to_string(),
        }
    }

    /// Extension the storage backend uses to recognise notes
    pub fn with_markdown_extension(mut self, extension: impl Into<String>) -> Self {
        self.markdown_extension = extension.into();
        self
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    pub fn summary_length(&self) -> usize {
        self.summary_length
    }

    pub fn markdown_extension(&self) -> &str {
        &self.markdown_extension
    }

    fn snapshot(&self, path: impl Into<String>, content: String) -> Document {
        Document::new(path, content).with_markdown_extension(self.markdown_extension.as_str())
    }

    #[instrument(skip(self), name = "vault_list_markdown_files")]
    pub async fn list_markdown_files(&self) -> Result<Vec<String>> {
        list_markdown_files(self.storage(), "").await
    }

    #[instrument(skip(self), name = "vault_file_tree")]
    pub async fn file_tree(&self) -> Result<Vec<FileTreeNode>> {
        build_file_tree(self.storage(), "").await
    }

    /// Outline used as assistant context
    pub async fn structure_text(&self) -> Result<String> {
        Ok(vault_structure_text(&self.file_tree().await?))
    }

    /// Read a single note
    pub async fn document(&self, path: &str) -> Result<Document> {
        let content = self.storage.read_text(path).await?;
        Ok(self.snapshot(path, content))
    }

    /// Snapshot of every markdown document, in path order.
    ///
    /// Files that cannot be read are skipped with a warning.
    #[instrument(skip(self), name = "vault_load_documents")]
    pub async fn load_documents(&self) -> Result<Vec<Document>> {
        let paths = self.list_markdown_files().await?;
        log::info!("Found {} markdown files", paths.len());

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            match self.storage.read_text(&path).await {
                Ok(content) => documents.push(self.snapshot(path, content)),
                Err(e) => log::warn!("Failed to read {}: {}", path, e),
            }
        }
        Ok(documents)
    }

    /// Load every document and build the link graph
    #[instrument(skip(self), name = "vault_build_graph")]
    pub async fn build_graph(&self) -> Result<GraphData> {
        let documents = self.load_documents().await?;
        let graph = build_graph_data(&documents);
        log::info!(
            "Graph built: {} notes, {} links",
            graph.nodes.len(),
            graph.edges.len()
        );
        Ok(graph)
    }

    pub async fn stats(&self) -> Result<GraphStats> {
        Ok(get_graph_stats(&self.build_graph().await?))
    }

    /// Create a note named `{title}{extension}` inside `dir` from a template
    #[instrument(skip(self, template), fields(title = %template.title), name = "vault_create_note")]
    pub async fn create_note(&self, dir: &str, template: &NoteTemplate) -> Result<String> {
        let name = format!("{}{}", template.title.trim(), self.markdown_extension);
        self.storage
            .create_file(dir, &name, &create_note_content(template))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &std::path::Path, path: &str, content: &str) {
        let full = root.join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full, content).unwrap();
    }

    fn open(temp_dir: &TempDir) -> Vault {
        let config = NodexConfig::builder(temp_dir.path()).build().unwrap();
        Vault::open(&config).unwrap()
    }

    #[tokio::test]
    async fn test_list_markdown_files_recurses() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "note1.md", "# Note 1");
        write(temp_dir.path(), "folder/note2.md", "# Note 2");
        write(temp_dir.path(), "folder/deeper/note3.md", "# Note 3");
        write(temp_dir.path(), "folder/image.png", "");
        write(temp_dir.path(), ".obsidian/workspace.md", "");

        let files = open(&temp_dir).list_markdown_files().await.unwrap();
        assert_eq!(
            files,
            vec!["folder/deeper/note3.md", "folder/note2.md", "note1.md"]
        );
    }

    #[tokio::test]
    async fn test_file_tree_and_structure_text() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "Zed.md", "");
        write(temp_dir.path(), "Projects/Alpha.md", "");
        write(temp_dir.path(), "Projects/diagram.png", "");
        write(temp_dir.path(), "Archive/Old.md", "");

        let vault = open(&temp_dir);
        let tree = vault.file_tree().await.unwrap();
        let names: Vec<_> = tree.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Archive", "Projects", "Zed.md"]);
        assert_eq!(tree[1].children.len(), 2);

        assert_eq!(
            vault.structure_text().await.unwrap(),
            "Archive/\n  Old.md\nProjects/\n  Alpha.md\nZed.md"
        );
    }

    #[tokio::test]
    async fn test_build_graph_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "A.md", "[[B]]");
        write(temp_dir.path(), "B.md", "no links");
        write(temp_dir.path(), "C.md", "[[Nonexistent]]");

        let vault = open(&temp_dir);
        let graph = vault.build_graph().await.unwrap();
        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.edges, vec![GraphEdge::new("A.md", "B.md")]);

        let stats = vault.stats().await.unwrap();
        assert_eq!(stats.orphans, vec!["C"]);
        assert_eq!(stats.avg_connections_display(), "0.7");
    }

    #[tokio::test]
    async fn test_create_note() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "Ideas/.keep", "");
        let vault = open(&temp_dir);

        let template = NoteTemplate::new("Graph Ideas").with_body("See [[Alpha]]");
        let path = vault.create_note("Ideas", &template).await.unwrap();
        assert_eq!(path, "Ideas/Graph Ideas.md");

        let doc = vault.document(&path).await.unwrap();
        assert_eq!(doc.note_type(), "note");
        assert_eq!(doc.wiki_links(), vec!["Alpha"]);
    }

    #[tokio::test]
    async fn test_custom_markdown_extension() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "A.markdown", "[[B]]");
        write(temp_dir.path(), "B.markdown", "x");
        write(temp_dir.path(), "C.md", "[[A]]");
        let config = NodexConfig::builder(temp_dir.path())
            .markdown_extension(".markdown")
            .build()
            .unwrap();
        let vault = Vault::open(&config).unwrap();

        let graph = vault.build_graph().await.unwrap();
        let labels: Vec<_> = graph.nodes.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B"]);
        assert_eq!(graph.edges, vec![GraphEdge::new("A.markdown", "B.markdown")]);

        let path = vault
            .create_note("", &NoteTemplate::new("Fresh").with_body("[[A]]"))
            .await
            .unwrap();
        assert_eq!(path, "Fresh.markdown");
        assert_eq!(vault.stats().await.unwrap().edge_count, 2);
    }
}
