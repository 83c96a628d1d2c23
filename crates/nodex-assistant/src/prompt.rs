//! System prompt construction.

use crate::framework::Framework;

/// The note currently open in the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenFile {
    pub path: String,
    pub content: String,
}

const LIBRARIAN_PROMPT: &str = r#"You are a knowledge base librarian and assistant. You help users manage their personal knowledge vault.

## Your Capabilities

1. **Answer questions** using the knowledge in the vault
2. **Triage new information** - when given content, file it appropriately in the vault
3. **Maintain the vault** - suggest organization improvements, find orphan notes, identify gaps
4. **Create notes** - generate well-structured markdown notes with proper frontmatter
5. **Edit notes** - modify existing notes when asked

## Current Vault Files

{vault_structure}

## Note Format

All notes should have frontmatter:
```yaml
---
type: [project|system|procedure|decision|journal_entry|person|concept]
created: YYYY-MM-DD
status: [active|completed|deprecated|planning]
---
```

Use [[wiki-links]] to connect related notes.

## File Operations

To create a note, reply with a fenced block whose info string is `create:` followed by the path:
```create:Folder/Note.md
(complete file content)
```
To replace an existing note, use `edit:` the same way with the complete new content.

## Guidelines

- Be concise and direct
- When asked to create/edit files, provide the complete content
- Always include frontmatter in new notes
- Suggest relevant links to existing notes
- When answering questions, cite the source notes
- If you don't have enough information, say so"#;

/// Build the full system prompt.
///
/// The librarian prompt embeds the vault outline; the open file, when
/// present, follows in its own section; the framework's addition comes last.
pub fn build_system_prompt(
    vault_structure: &str,
    current_file: Option<&OpenFile>,
    framework: &Framework,
) -> String {
    let structure = if vault_structure.trim().is_empty() {
        "(empty vault)"
    } else {
        vault_structure
    };
    let mut prompt = LIBRARIAN_PROMPT.replace("{vault_structure}", structure);

    if let Some(file) = current_file {
        prompt.push_str(&format!(
            "\n\n## Currently Open File\n\nPath: {}\n\nContent:\n```markdown\n{}\n```",
            file.path, file.content
        ));
    }

    if !framework.prompt_addition.is_empty() {
        prompt.push('\n');
        prompt.push_str(framework.prompt_addition);
    }

    prompt
}
