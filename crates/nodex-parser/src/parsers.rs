//! Regex-based extractors for the flat markdown subset used by vault notes.
//!
//! Every extractor is total: malformed input contributes no entries rather
//! than producing an error.

mod frontmatter_parser;
mod headings;
mod summary;
mod tags;
mod wikilinks;

pub use self::frontmatter_parser::{FrontmatterSplit, parse_frontmatter};
pub use self::headings::extract_headings;
pub use self::summary::{DEFAULT_SUMMARY_LENGTH, generate_summary};
pub use self::tags::extract_tags;
pub use self::wikilinks::{WikiLink, extract_wiki_links, parse_wiki_links};
