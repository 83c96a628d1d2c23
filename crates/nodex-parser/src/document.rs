//! A vault note: stable path, raw content and lazily derived facts.

use std::sync::OnceLock;
use nodex_core::{Frontmatter, Heading};

use crate::parsers::{
    extract_headings, extract_tags, extract_wiki_links, generate_summary, parse_frontmatter,
};

/// Default markdown file extension stripped from paths to form short names
pub const MARKDOWN_EXTENSION: &str = ".md";

/// Short name of a vault path: trailing `.md` removed, last `/` segment.
///
/// # Example
/// ```
/// use nodex_parser::short_name;
///
/// assert_eq!(short_name("Projects/Alpha.md"), "Alpha");
/// assert_eq!(short_name("notes.md.bak"), "notes.md.bak");
/// ```
pub fn short_name(path: &str) -> &str {
    short_name_with(path, MARKDOWN_EXTENSION)
}

/// Short name of a vault path with a configured markdown extension
pub fn short_name_with<'a>(path: &'a str, extension: &str) -> &'a str {
    let stem = path.strip_suffix(extension).unwrap_or(path);
    stem.rsplit('/').next().unwrap_or(stem)
}

#[derive(Debug, Clone)]
struct ParsedHeader {
    frontmatter: Option<Frontmatter>,
    body_offset: usize,
}

/// An immutable markdown document.
///
/// Frontmatter and body are split on first access and cached; link, tag,
/// heading and summary facts are computed on demand. A content change means
/// constructing a new `Document`.
#[derive(Debug, Clone)]
pub struct Document {
    path: String,
    raw_content: String,
    markdown_extension: String,
    header: OnceLock<ParsedHeader>,
}

impl Document {
    pub fn new(path: impl Into<String>, raw_content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            raw_content: raw_content.into(),
            markdown_extension: MARKDOWN_EXTENSION.to_string(),
            header: OnceLock::new(),
        }
    }

    /// Use a different markdown extension when deriving the short name
    pub fn with_markdown_extension(mut self, extension: impl Into<String>) -> Self {
        self.markdown_extension = extension.into();
        self
    }

    /// Vault-relative path, also the graph node id
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn raw_content(&self) -> &str {
        &self.raw_content
    }

    /// File name without the markdown extension
    pub fn short_name(&self) -> &str {
        short_name_with(&self.path, &self.markdown_extension)
    }

    fn header(&self) -> &ParsedHeader {
        self.header.get_or_init(|| {
            let split = parse_frontmatter(&self.raw_content);
            ParsedHeader {
                body_offset: self.raw_content.len() - split.body.len(),
                frontmatter: split.frontmatter,
            }
        })
    }

    pub fn frontmatter(&self) -> Option<&Frontmatter> {
        self.header().frontmatter.as_ref()
    }

    /// Content with the frontmatter block removed
    pub fn body(&self) -> &str {
        &self.raw_content[self.header().body_offset..]
    }

    /// Frontmatter `type`, defaulting to `note`
    pub fn note_type(&self) -> &str {
        self.frontmatter()
            .and_then(|fm| fm.get_str("type"))
            .unwrap_or("note")
    }

    /// Distinct wikilink targets across the whole raw content
    pub fn wiki_links(&self) -> Vec<String> {
        extract_wiki_links(&self.raw_content)
    }

    pub fn tags(&self) -> Vec<String> {
        extract_tags(&self.raw_content)
    }

    pub fn headings(&self) -> Vec<Heading> {
        extract_headings(self.body())
    }

    pub fn summary(&self, max_length: usize) -> String {
        generate_summary(&self.raw_content, max_length)
    }
}
