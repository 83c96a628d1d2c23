//! Tag parser: #tag, #parent/child

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Matches `#` followed by a letter, then letters, digits, `_`, `/` or `-`
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([a-zA-Z][a-zA-Z0-9_/\-]*)").unwrap());

/// Extract the distinct tags of a document, first occurrence first.
///
/// # Example
/// ```
/// use nodex_parser::extract_tags;
///
/// let tags = extract_tags("Has #tag and #nested/tag and #tag again");
/// assert_eq!(tags, vec!["tag", "nested/tag"]);
/// ```
pub fn extract_tags(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    TAG_PATTERN
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}
