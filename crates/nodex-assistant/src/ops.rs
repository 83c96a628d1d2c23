//! File-operation directives embedded in assistant replies.
//!
//! A directive is a fenced block whose info string is `create:<path>` or
//! `edit:<path>`; the block body is the complete file content.

use nodex_core::{Error, Result};
use nodex_vault::{Storage, split_path};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static CREATE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```create:([^\n]+)\n(.*?)```").unwrap());

static EDIT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```edit:([^\n]+)\n(.*?)```").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileAction {
    Create,
    Edit,
}

/// A requested file creation or replacement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOperation {
    pub action: FileAction,
    /// Vault-relative path, trimmed
    pub path: String,
    pub content: String,
}

/// Extract directives from a reply, all creates before all edits
///
/// # Example
/// ```
/// use nodex_assistant::{FileAction, parse_file_operations};
///
/// let reply = "Sure:\n```edit:Inbox.md\nupdated\n```\n```create: Ideas/New.md \n# New\n```";
/// let ops = parse_file_operations(reply);
/// assert_eq!(ops[0].action, FileAction::Create);
/// assert_eq!(ops[0].path, "Ideas/New.md");
/// assert_eq!(ops[1].content, "updated\n");
/// ```
pub fn parse_file_operations(response: &str) -> Vec<FileOperation> {
    let collect = |pattern: &Regex, action: FileAction| {
        pattern
            .captures_iter(response)
            .map(move |caps| FileOperation {
                action,
                path: caps[1].trim().to_string(),
                content: caps[2].to_string(),
            })
            .collect::<Vec<_>>()
    };

    let mut operations = collect(&*CREATE_BLOCK, FileAction::Create);
    operations.extend(collect(&*EDIT_BLOCK, FileAction::Edit));
    operations
}

/// Make sure every folder along `dir` exists
async fn ensure_folders(storage: &dyn Storage, dir: &str) -> Result<()> {
    let mut current = String::new();
    for segment in dir.split('/').filter(|s| !s.is_empty()) {
        let exists = storage
            .list_entries(&current)
            .await?
            .iter()
            .any(|e| e.is_folder() && e.name == segment);
        current = if exists {
            nodex_vault::join_path(&current, segment)
        } else {
            storage.create_folder(&current, segment).await?
        };
    }
    Ok(())
}

/// Apply directives through a storage backend, in order.
///
/// Creates write into the parent folder, creating missing folders first;
/// edits replace the whole file. Stops at the first failure.
pub async fn apply_file_operations(
    storage: &dyn Storage,
    operations: &[FileOperation],
) -> Result<Vec<String>> {
    let mut applied = Vec::with_capacity(operations.len());
    for op in operations {
        let (dir, name) = split_path(&op.path);
        if name.is_empty() {
            return Err(Error::invalid_path(format!("Empty file name in {:?}", op.path)));
        }
        match op.action {
            FileAction::Create => {
                ensure_folders(storage, dir).await?;
                let path = storage.create_file(dir, name, &op.content).await?;
                log::info!("Created {} from assistant reply", path);
                applied.push(path);
            }
            FileAction::Edit => {
                storage.write_text(&op.path, &op.content).await?;
                log::info!("Updated {} from assistant reply", op.path);
                applied.push(op.path.clone());
            }
        }
    }
    Ok(applied)
}
