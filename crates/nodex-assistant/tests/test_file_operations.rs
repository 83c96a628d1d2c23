//! Assistant replies applied to an on-disk vault

use nodex_assistant::prelude::*;
use nodex_assistant::{FileAction, OpenFile};
use nodex_core::NodexConfig;
use nodex_vault::Vault;
use tempfile::TempDir;

async fn setup_vault() -> (TempDir, Vault) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let vault_path = temp_dir.path();
    tokio::fs::create_dir(vault_path.join("Inbox")).await.unwrap();
    tokio::fs::write(vault_path.join("Inbox/Meeting.md"), "# Meeting\n\nDiscussed Rust.")
        .await
        .unwrap();
    tokio::fs::write(vault_path.join("Rust.md"), "# Rust\n").await.unwrap();

    let config = NodexConfig::builder(vault_path).build().unwrap();
    let vault = Vault::open(&config).unwrap();
    (temp_dir, vault)
}

const REPLY: &str = "I filed the meeting and linked it.

```edit:Inbox/Meeting.md
# Meeting

Discussed [[Rust]] and [[Ownership]].
```

```create:Concepts/Ownership.md
---
type: concept
---
# Ownership

Core idea of [[Rust]].
```
";

#[tokio::test]
async fn test_reply_updates_graph() {
    let (_temp, vault) = setup_vault().await;
    let before = vault.stats().await.unwrap();
    assert_eq!(before.edge_count, 0);
    assert_eq!(before.orphan_count, 2);

    let operations = parse_file_operations(REPLY);
    assert_eq!(operations[0].action, FileAction::Create);
    let applied = apply_file_operations(vault.storage(), &operations).await.unwrap();
    assert_eq!(applied, vec!["Concepts/Ownership.md", "Inbox/Meeting.md"]);

    let after = vault.stats().await.unwrap();
    assert_eq!(after.node_count, 3);
    assert_eq!(after.edge_count, 3);
    assert_eq!(after.orphan_count, 0);
    assert!(after.most_connected.iter().all(|n| n.connections == 2));

    let created = vault.document("Concepts/Ownership.md").await.unwrap();
    assert_eq!(created.note_type(), "concept");
}

#[tokio::test]
async fn test_prompt_reflects_vault_layout() {
    let (_temp, vault) = setup_vault().await;
    let structure = vault.structure_text().await.unwrap();
    assert_eq!(structure, "Inbox/\n  Meeting.md\nRust.md");

    let open = OpenFile {
        path: "Rust.md".to_string(),
        content: vault.storage().read_text("Rust.md").await.unwrap(),
    };
    let prompt = build_system_prompt(&structure, Some(&open), framework("knowledge-linker"));
    assert!(prompt.contains("Inbox/\n  Meeting.md\nRust.md"));
    assert!(prompt.contains("Rust.md"));
}

#[tokio::test]
async fn test_edit_of_missing_file_folder_stops_batch() {
    let (temp, vault) = setup_vault().await;
    let reply = "```edit:Archive/Old.md\ngone\n```";
    let operations = parse_file_operations(reply);
    assert!(apply_file_operations(vault.storage(), &operations).await.is_err());
    assert!(!temp.path().join("Archive").exists());
}
