//! Wikilink parser: `[[Note]]`, `[[folder/Note]]`, `[[Note|Display]]`

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Matches `[[target]]` and `[[target|display]]`
pub(crate) static WIKILINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]|]+)(?:\|([^\]]+))?\]\]").unwrap());

/// A single wikilink occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiLink {
    /// Raw target text, as written
    pub target: String,
    pub display: Option<String>,
}

impl WikiLink {
    /// Text shown to readers: the display alias, or the target
    pub fn display_text(&self) -> &str {
        self.display.as_deref().unwrap_or(&self.target)
    }
}

/// Parse every wikilink occurrence in document order, duplicates included.
pub fn parse_wiki_links(content: &str) -> Vec<WikiLink> {
    if !content.contains("[[") {
        return Vec::new();
    }

    WIKILINK_PATTERN
        .captures_iter(content)
        .filter_map(|caps| {
            let target = caps.get(1)?.as_str().to_string();
            let display = caps.get(2).map(|m| m.as_str().to_string());
            Some(WikiLink { target, display })
        })
        .collect()
}

/// Extract the distinct link targets of a document.
///
/// Deduplication is case-sensitive on the raw target; first occurrence
/// order is kept.
///
/// # Example
/// ```
/// use nodex_parser::extract_wiki_links;
///
/// let links = extract_wiki_links("[[A]] [[A]] [[B|x]]");
/// assert_eq!(links, vec!["A", "B"]);
/// ```
pub fn extract_wiki_links(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    parse_wiki_links(content)
        .into_iter()
        .map(|link| link.target)
        .filter(|target| seen.insert(target.clone()))
        .collect()
}
