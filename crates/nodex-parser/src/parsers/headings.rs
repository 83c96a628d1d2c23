//! Heading parser: # H1, ## H2, etc.

use lazy_static::lazy_static;
use regex::Regex;
use nodex_core::Heading;

lazy_static! {
    /// Matches # Heading, ## Heading, etc.
    pub(crate) static ref HEADING_PATTERN: Regex = Regex::new(r"^(#{1,6})\s+(.+)$").unwrap();
}

/// Extract the heading outline in document order, duplicates included.
pub fn extract_headings(content: &str) -> Vec<Heading> {
    content
        .lines()
        .filter_map(|line| {
            let caps = HEADING_PATTERN.captures(line)?;
            let level = caps.get(1)?.as_str().len() as u8;
            let text = caps.get(2)?.as_str().trim();
            Some(Heading {
                level,
                text: text.to_string(),
            })
        })
        .collect()
}
