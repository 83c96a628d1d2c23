//! Local filesystem storage rooted at the vault directory

use async_trait::async_trait;
use nodex_core::prelude::*;
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::instrument;

use crate::storage::{Entry, EntryKind, Storage, entry_order, join_path};

/// [`Storage`] backed by a directory on disk
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
    excluded_names: HashSet<String>,
    markdown_extension: String,
}

impl FsStorage {
    /// Storage over `root` with the default exclusions
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let defaults = NodexConfig::default();
        Self {
            root: root.into(),
            excluded_names: defaults.excluded_names,
            markdown_extension: defaults.markdown_extension,
        }
    }

    /// Storage over the configured vault root
    pub fn from_config(config: &NodexConfig) -> Result<Self> {
        Ok(Self {
            root: config.vault_root()?.to_path_buf(),
            excluded_names: config.excluded_names.clone(),
            markdown_extension: config.markdown_extension.clone(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_excluded(&self, name: &str) -> bool {
        name.starts_with('.') || self.excluded_names.contains(name)
    }

    /// Map a vault-relative path to a location under the root.
    ///
    /// Rejects absolute paths, `.`/`..` segments and anything that escapes the
    /// root through a symlink.
    fn resolve_path(&self, path: &str) -> Result<PathBuf> {
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            return Ok(self.root.clone());
        }

        let relative = Path::new(trimmed);
        for component in relative.components() {
            match component {
                Component::Normal(_) => {}
                Component::ParentDir => return Err(Error::path_traversal(relative)),
                _ => {
                    return Err(Error::invalid_path(format!(
                        "Unsupported path segment in {}",
                        path
                    )));
                }
            }
        }
        if trimmed.split('/').any(|s| s.is_empty() || s == ".") {
            return Err(Error::invalid_path(format!("Empty path segment in {}", path)));
        }

        let full_path = self.root.join(relative);

        // Symlinks may still point outside the vault
        if let Ok(canonical) = full_path.canonicalize() {
            let root = self
                .root
                .canonicalize()
                .unwrap_or_else(|_| self.root.clone());
            if !canonical.starts_with(&root) {
                return Err(Error::path_traversal(full_path));
            }
        }

        Ok(full_path)
    }

    async fn require_dir(&self, dir: &str) -> Result<PathBuf> {
        let full = self.resolve_path(dir)?;
        match fs::metadata(&full).await {
            Ok(meta) if meta.is_dir() => Ok(full),
            Ok(_) => Err(Error::invalid_path(format!("Not a folder: {}", dir))),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::file_not_found(full)),
            Err(e) => Err(Error::io(e)),
        }
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.is_empty() || name == "." || name == ".." || name.contains('/') {
            return Err(Error::invalid_path(format!("Invalid entry name: {:?}", name)));
        }
        Ok(())
    }
}

fn not_found_or_io(e: std::io::Error, path: &Path) -> Error {
    if e.kind() == ErrorKind::NotFound {
        Error::file_not_found(path)
    } else {
        Error::io(e)
    }
}

#[async_trait]
impl Storage for FsStorage {
    #[instrument(skip(self), name = "storage_list_entries")]
    async fn list_entries(&self, dir: &str) -> Result<Vec<Entry>> {
        let full = self.require_dir(dir).await?;
        let mut reader = fs::read_dir(&full).await.map_err(Error::io)?;
        let mut entries = Vec::new();

        while let Some(item) = reader.next_entry().await.map_err(Error::io)? {
            let Some(name) = item.file_name().to_str().map(str::to_string) else {
                log::warn!("Skipping non UTF-8 entry in {}", full.display());
                continue;
            };
            if self.is_excluded(&name) {
                continue;
            }

            let kind = if item.file_type().await.map_err(Error::io)?.is_dir() {
                EntryKind::Folder
            } else {
                EntryKind::File
            };
            entries.push(Entry {
                path: join_path(dir, &name),
                is_markdown: kind == EntryKind::File && name.ends_with(&self.markdown_extension),
                kind,
                name,
            });
        }

        entries.sort_by(entry_order);
        Ok(entries)
    }

    #[instrument(skip(self), name = "storage_read_text")]
    async fn read_text(&self, path: &str) -> Result<String> {
        let full = self.resolve_path(path)?;
        fs::read_to_string(&full)
            .await
            .map_err(|e| not_found_or_io(e, &full))
    }

    #[instrument(skip(self, text), fields(size = text.len()), name = "storage_write_text")]
    async fn write_text(&self, path: &str, text: &str) -> Result<()> {
        let full = self.resolve_path(path)?;
        let (dir, name) = crate::storage::split_path(path);
        self.require_dir(dir).await?;

        // Hidden sibling so no real note is clobbered and listings skip it
        let temp_path = full.with_file_name(format!(".{}.tmp", name));
        fs::write(&temp_path, text).await.map_err(Error::io)?;
        fs::rename(&temp_path, &full).await.map_err(Error::io)?;

        log::debug!("Wrote {} bytes to {}", text.len(), path);
        Ok(())
    }

    #[instrument(skip(self, initial), name = "storage_create_file")]
    async fn create_file(&self, dir: &str, name: &str, initial: &str) -> Result<String> {
        Self::validate_name(name)?;
        let parent = self.require_dir(dir).await?;
        let path = join_path(dir, name);
        let full = parent.join(name);

        if !initial.is_empty() {
            self.write_text(&path, initial).await?;
        } else if fs::metadata(&full).await.is_err() {
            fs::write(&full, "").await.map_err(Error::io)?;
        }

        log::info!("Created file {}", path);
        Ok(path)
    }

    #[instrument(skip(self), name = "storage_create_folder")]
    async fn create_folder(&self, dir: &str, name: &str) -> Result<String> {
        Self::validate_name(name)?;
        let parent = self.require_dir(dir).await?;
        let full = parent.join(name);

        match fs::create_dir(&full).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::AlreadyExists && full.is_dir() => {}
            Err(e) => return Err(Error::io(e)),
        }

        let path = join_path(dir, name);
        log::info!("Created folder {}", path);
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage() -> (TempDir, FsStorage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FsStorage::new(temp_dir.path());
        (temp_dir, storage)
    }

    #[tokio::test]
    async fn test_list_entries_sorted_and_filtered() {
        let (temp_dir, storage) = storage();
        std::fs::write(temp_dir.path().join("b.md"), "").unwrap();
        std::fs::write(temp_dir.path().join("a.txt"), "").unwrap();
        std::fs::write(temp_dir.path().join(".hidden.md"), "").unwrap();
        std::fs::create_dir(temp_dir.path().join("Notes")).unwrap();
        std::fs::create_dir(temp_dir.path().join(".obsidian")).unwrap();
        std::fs::create_dir(temp_dir.path().join("node_modules")).unwrap();

        let entries = storage.list_entries("").await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Notes", "a.txt", "b.md"]);
        assert!(entries[0].is_folder());
        assert!(!entries[1].is_markdown);
        assert!(entries[2].is_markdown);
    }

    #[tokio::test]
    async fn test_nested_paths_are_slash_joined() {
        let (temp_dir, storage) = storage();
        std::fs::create_dir_all(temp_dir.path().join("a/b")).unwrap();
        std::fs::write(temp_dir.path().join("a/b/c.md"), "hi").unwrap();

        let entries = storage.list_entries("a/b").await.unwrap();
        assert_eq!(entries[0].path, "a/b/c.md");
        assert_eq!(storage.read_text("a/b/c.md").await.unwrap(), "hi");
    }

    #[tokio::test]
    async fn test_missing_segments_fail() {
        let (_temp_dir, storage) = storage();
        assert!(matches!(
            storage.list_entries("nope").await,
            Err(Error::FileNotFound { .. })
        ));
        assert!(matches!(
            storage.read_text("nope/x.md").await,
            Err(Error::FileNotFound { .. })
        ));
        assert!(storage.write_text("nope/x.md", "x").await.is_err());
    }

    #[tokio::test]
    async fn test_path_traversal_prevention() {
        let (_temp_dir, storage) = storage();
        let result = storage.read_text("../../../etc/passwd").await;
        assert!(matches!(result, Err(Error::PathTraversalAttempt { .. })));
        assert!(storage.create_file("", "../escape.md", "x").await.is_err());
    }

    #[tokio::test]
    async fn test_write_leaves_no_temp_files() {
        let (temp_dir, storage) = storage();
        storage.write_text("note.md", "first").await.unwrap();
        storage.write_text("note.md", "second").await.unwrap();

        assert_eq!(storage.read_text("note.md").await.unwrap(), "second");
        for entry in std::fs::read_dir(temp_dir.path()).unwrap() {
            let path = entry.unwrap().path();
            assert_ne!(path.extension().and_then(|e| e.to_str()), Some("tmp"));
        }
    }

    #[tokio::test]
    async fn test_write_keeps_same_stem_files() {
        let (temp_dir, storage) = storage();
        std::fs::write(temp_dir.path().join("note.tmp"), "scratch").unwrap();
        std::fs::write(temp_dir.path().join("note.txt"), "plain").unwrap();

        storage.write_text("note.md", "body").await.unwrap();

        assert_eq!(storage.read_text("note.md").await.unwrap(), "body");
        assert_eq!(storage.read_text("note.tmp").await.unwrap(), "scratch");
        assert_eq!(storage.read_text("note.txt").await.unwrap(), "plain");
        let names: Vec<_> = storage
            .list_entries("")
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["note.md", "note.tmp", "note.txt"]);
    }

    #[tokio::test]
    async fn test_create_file_and_folder() {
        let (temp_dir, storage) = storage();
        let folder = storage.create_folder("", "Projects").await.unwrap();
        assert_eq!(folder, "Projects");
        // Creating twice is fine
        storage.create_folder("", "Projects").await.unwrap();

        let path = storage
            .create_file("Projects", "Alpha.md", "# Alpha")
            .await
            .unwrap();
        assert_eq!(path, "Projects/Alpha.md");
        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("Projects/Alpha.md")).unwrap(),
            "# Alpha"
        );

        // Empty initial content keeps an existing file
        storage.create_file("Projects", "Alpha.md", "").await.unwrap();
        assert_eq!(storage.read_text("Projects/Alpha.md").await.unwrap(), "# Alpha");

        storage.create_file("", "Empty.md", "").await.unwrap();
        assert_eq!(storage.read_text("Empty.md").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_from_config_uses_exclusions() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("archive")).unwrap();
        std::fs::write(temp_dir.path().join("keep.md"), "").unwrap();

        let config = NodexConfig::builder(temp_dir.path())
            .exclude("archive")
            .build()
            .unwrap();
        let storage = FsStorage::from_config(&config).unwrap();
        let entries = storage.list_entries("").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "keep.md");
    }
}
