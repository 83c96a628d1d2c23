//! # Nodex Parser
//!
//! Document model for vault notes.
//!
//! This crate provides:
//! - Frontmatter splitting for the flat `key: value` / `[a, b]` subset
//! - Wikilink extraction (`[[Note]]`, `[[Note|Display]]`) with per-document dedup
//! - Tag and heading extraction
//! - Plain-text summaries
//! - Rendering of new notes with a frontmatter block
//! - [`Document`], an immutable note with lazily derived facts
//!
//! ## Quick Start
//!
//! ```
//! use nodex_parser::Document;
//!
//! let doc = Document::new(
//!     "Projects/Alpha.md",
//!     "---\ntype: project\ntags: [q3, infra]\n---\n# Alpha\n\nOwned by [[Ada]] #infra",
//! );
//!
//! assert_eq!(doc.short_name(), "Alpha");
//! assert_eq!(doc.note_type(), "project");
//! assert_eq!(doc.wiki_links(), vec!["Ada"]);
//! assert_eq!(doc.summary(200), "Owned by Ada #infra");
//! ```
//!
//! ## Performance
//!
//! Patterns are compiled once (`std::sync::LazyLock` / `lazy_static`) and the
//! frontmatter split is cached per document in a `OnceLock`.

mod document;
mod note;
pub mod parsers;

pub use document::{Document, MARKDOWN_EXTENSION, short_name, short_name_with};
pub use note::{NoteTemplate, create_note_content, create_note_content_on, render_frontmatter};
pub use parsers::{
    DEFAULT_SUMMARY_LENGTH, FrontmatterSplit, WikiLink, extract_headings, extract_tags,
    extract_wiki_links, generate_summary, parse_frontmatter, parse_wiki_links,
};

/// Convenient prelude for common imports.
pub mod prelude {
    pub use nodex_core::{Frontmatter, FrontmatterValue, Heading};

    pub use crate::{
        Document, NoteTemplate, create_note_content, extract_headings, extract_tags,
        extract_wiki_links, generate_summary, parse_frontmatter, short_name,
    };
}
