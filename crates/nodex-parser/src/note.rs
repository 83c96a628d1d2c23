//! New note rendering: frontmatter block, H1 title and body.

use chrono::{NaiveDate, Utc};
use nodex_core::{Frontmatter, FrontmatterValue};

/// Inputs for a freshly created note
#[derive(Debug, Clone)]
pub struct NoteTemplate {
    pub note_type: String,
    pub title: String,
    pub body: String,
    /// Extra keys, rendered after `type`, `created` and `status`; they may
    /// override those defaults in place
    pub extra_frontmatter: Frontmatter,
}

impl NoteTemplate {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            note_type: "note".to_string(),
            title: title.into(),
            body: String::new(),
            extra_frontmatter: Frontmatter::new(),
        }
    }

    pub fn with_type(mut self, note_type: impl Into<String>) -> Self {
        self.note_type = note_type.into();
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FrontmatterValue>) -> Self {
        self.extra_frontmatter.insert(key, value);
        self
    }
}

/// Render frontmatter as `key: value` lines; lists become `[a, b, c]`.
pub fn render_frontmatter(frontmatter: &Frontmatter) -> String {
    frontmatter
        .iter()
        .map(|(key, value)| match value {
            FrontmatterValue::Text(text) => format!("{}: {}", key, text),
            FrontmatterValue::List(items) => format!("{}: [{}]", key, items.join(", ")),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a note dated today (UTC).
pub fn create_note_content(template: &NoteTemplate) -> String {
    create_note_content_on(template, Utc::now().date_naive())
}

/// Render a note with an explicit creation date.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use nodex_parser::{NoteTemplate, create_note_content_on};
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
/// let note = create_note_content_on(&NoteTemplate::new("Ideas").with_body("Text"), date);
/// assert_eq!(
///     note,
///     "---\ntype: note\ncreated: 2024-03-09\nstatus: active\n---\n\n# Ideas\n\nText\n"
/// );
/// ```
pub fn create_note_content_on(template: &NoteTemplate, created: NaiveDate) -> String {
    let mut frontmatter = Frontmatter::new();
    frontmatter.insert("type", template.note_type.as_str());
    frontmatter.insert("created", created.format("%Y-%m-%d").to_string());
    frontmatter.insert("status", "active");
    for (key, value) in template.extra_frontmatter.iter() {
        frontmatter.insert(key, value.clone());
    }

    format!(
        "---\n{}\n---\n\n# {}\n\n{}\n",
        render_frontmatter(&frontmatter),
        template.title,
        template.body
    )
}
