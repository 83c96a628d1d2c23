//! Frontmatter extraction: `---\nkey: value\n---\nbody`
//!
//! Only the flat subset is understood: one `key: value` per line, with
//! `[a, b, c]` lists and quoted scalars. Anything else is skipped, never an error.

use regex::Regex;
use std::sync::LazyLock;
use nodex_core::{Frontmatter, FrontmatterValue};

/// Matches a leading `---` block. Group 1 is the block, group 2 the body.
static FRONTMATTER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A---\n(?:(.*?)\n)?---\n?(.*)\z").unwrap());

/// Result of splitting a note into metadata and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterSplit<'a> {
    /// `None` when the content does not start with a delimited block
    pub frontmatter: Option<Frontmatter>,
    /// Content after the block, or the whole content
    pub body: &'a str,
}

/// Split content into frontmatter and body.
///
/// # Example
/// ```
/// use nodex_parser::parse_frontmatter;
///
/// let split = parse_frontmatter("---\ntitle: Test\n---\nContent here");
/// let fm = split.frontmatter.unwrap();
/// assert_eq!(fm.get_str("title"), Some("Test"));
/// assert_eq!(split.body, "Content here");
/// ```
pub fn parse_frontmatter(content: &str) -> FrontmatterSplit<'_> {
    let Some(caps) = FRONTMATTER_PATTERN.captures(content) else {
        return FrontmatterSplit {
            frontmatter: None,
            body: content,
        };
    };

    let block = caps.get(1).map_or("", |m| m.as_str());
    let body = caps.get(2).map_or("", |m| m.as_str());

    let mut frontmatter = Frontmatter::new();
    for line in block.split('\n') {
        match line.find(':') {
            Some(idx) if idx > 0 => {
                let key = line[..idx].trim();
                let value = coerce_value(line[idx + 1..].trim());
                frontmatter.insert(key, value);
            }
            _ => {}
        }
    }

    FrontmatterSplit {
        frontmatter: Some(frontmatter),
        body,
    }
}

/// Turn a trimmed raw value into a list, an unquoted string or a plain string
fn coerce_value(value: &str) -> FrontmatterValue {
    if value.len() >= 2 && value.starts_with('[') && value.ends_with(']') {
        let inner = &value[1..value.len() - 1];
        if inner.trim().is_empty() {
            return FrontmatterValue::List(Vec::new());
        }
        return FrontmatterValue::List(inner.split(',').map(|s| s.trim().to_string()).collect());
    }

    let quoted = value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));
    if quoted {
        return FrontmatterValue::Text(value[1..value.len() - 1].to_string());
    }

    FrontmatterValue::Text(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_frontmatter() {
        let content = "---\ntitle: Test\n---\nContent here";
        let split = parse_frontmatter(content);
        assert_eq!(split.frontmatter.unwrap().get_str("title"), Some("Test"));
        assert_eq!(split.body, "Content here");
    }

    #[test]
    fn test_value_coercion() {
        let content = "---\ntags: [rust, parser ,  graph]\nquoted: \"Hello: world\"\nsingle: 'x'\nplain:   spaced   \n---\n";
        let fm = parse_frontmatter(content).frontmatter.unwrap();

        assert_eq!(
            fm.get("tags"),
            Some(&FrontmatterValue::List(vec![
                "rust".to_string(),
                "parser".to_string(),
                "graph".to_string()
            ]))
        );
        assert_eq!(fm.get_str("quoted"), Some("Hello: world"));
        assert_eq!(fm.get_str("single"), Some("x"));
        assert_eq!(fm.get_str("plain"), Some("spaced"));
    }

    #[test]
    fn test_empty_list() {
        let fm = parse_frontmatter("---\naliases: []\n---\n").frontmatter.unwrap();
        assert_eq!(fm.get("aliases"), Some(&FrontmatterValue::List(vec![])));
    }

    #[test]
    fn test_lines_without_key_are_skipped() {
        let content = "---\nno colon here\n: leading colon\nkey: value\n---\nBody";
        let fm = parse_frontmatter(content).frontmatter.unwrap();
        assert_eq!(fm.len(), 1);
        assert_eq!(fm.get_str("key"), Some("value"));
    }

    #[test]
    fn test_empty_block() {
        let split = parse_frontmatter("---\n---\nBody");
        assert!(split.frontmatter.unwrap().is_empty());
        assert_eq!(split.body, "Body");
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "Just content\nNo frontmatter";
        let split = parse_frontmatter(content);
        assert_eq!(split.frontmatter, None);
        assert_eq!(split.body, content);
    }

    #[test]
    fn test_frontmatter_must_start_the_content() {
        let content = "\n---\ntitle: Test\n---\nBody";
        let split = parse_frontmatter(content);
        assert_eq!(split.frontmatter, None);
        assert_eq!(split.body, content);
    }

    #[test]
    fn test_malformed_frontmatter_only_opening() {
        let content = "---\ntitle: Test\nNo closing";
        let split = parse_frontmatter(content);
        assert_eq!(split.frontmatter, None);
        assert_eq!(split.body, content);
    }

    #[test]
    fn test_body_keeps_blank_line_after_block() {
        let split = parse_frontmatter("---\ntype: note\n---\n\n# Title\n");
        assert_eq!(split.body, "\n# Title\n");
    }

    #[test]
    fn test_body_without_frontmatter_round_trips() {
        for body in ["", "plain", "# Heading\n\ntext", "--- not a block", "a\n---\nb"] {
            let split = parse_frontmatter(body);
            assert_eq!(split.body, body);
            assert!(split.frontmatter.is_none());
        }
    }
}
