//! Plain-text summaries of note bodies.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::frontmatter_parser::parse_frontmatter;
use super::wikilinks::WIKILINK_PATTERN;

/// Default summary length in characters
pub const DEFAULT_SUMMARY_LENGTH: usize = 200;

static HEADING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,6}[ \t]+.+$").unwrap());

static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());

static EMPHASIS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[*_~`]").unwrap());

static NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").unwrap());

/// Produce a plain-text summary of a note.
///
/// Frontmatter is dropped, heading lines removed, links reduced to the text a
/// reader would see and emphasis markers stripped. Longer results are cut at
/// `max_length` characters and end with `...`.
///
/// # Example
/// ```
/// use nodex_parser::generate_summary;
///
/// let summary = generate_summary("---\ntype: note\n---\n# Title\nSee [[Ada|Ada Lovelace]] **now**", 200);
/// assert_eq!(summary, "See Ada Lovelace now");
/// ```
pub fn generate_summary(content: &str, max_length: usize) -> String {
    let body = parse_frontmatter(content).body;

    let plain = HEADING_LINE.replace_all(body, "");
    let plain = WIKILINK_PATTERN.replace_all(&plain, |caps: &Captures| {
        caps.get(2)
            .or_else(|| caps.get(1))
            .map_or(String::new(), |m| m.as_str().to_string())
    });
    let plain = MARKDOWN_LINK.replace_all(&plain, "$1");
    let plain = EMPHASIS.replace_all(&plain, "");
    let plain = NEWLINES.replace_all(&plain, " ");
    let plain = plain.trim();

    if plain.chars().count() <= max_length {
        return plain.to_string();
    }

    let cut = plain
        .char_indices()
        .nth(max_length)
        .map_or(plain.len(), |(idx, _)| idx);
    format!("{}...", plain[..cut].trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_and_formatting_removed() {
        let summary = generate_summary("# Title\n\nSome *bold* and `code` ~~gone~~ text", 200);
        assert_eq!(summary, "Some bold and code gone text");
    }

    #[test]
    fn test_links_reduced_to_text() {
        let summary = generate_summary("Link [[Target]] and [[Other|alias]] and [site](https://x.y)", 200);
        assert_eq!(summary, "Link Target and alias and site");
    }

    #[test]
    fn test_newlines_collapsed() {
        assert_eq!(generate_summary("line one\n\n\nline two\n", 200), "line one line two");
    }

    #[test]
    fn test_truncation_adds_ellipsis() {
        let summary = generate_summary("abcdefghij klmnop", 10);
        assert_eq!(summary, "abcdefghij...");

        let summary = generate_summary("abcd efgh ijkl", 5);
        assert_eq!(summary, "abcd...");
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let summary = generate_summary("héllo wörld ünïcode", 8);
        assert_eq!(summary, "héllo wö...");
    }

    #[test]
    fn test_exact_length_is_not_truncated() {
        assert_eq!(generate_summary("12345", 5), "12345");
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(generate_summary("", DEFAULT_SUMMARY_LENGTH), "");
        assert_eq!(generate_summary("---\na: b\n---\n# Only heading", 10), "");
    }
}
