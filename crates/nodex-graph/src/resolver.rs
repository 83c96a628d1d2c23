//! Short-name link resolution.

use nodex_parser::Document;
use std::collections::HashMap;

/// Maps lower-cased note short names to canonical document paths.
///
/// When two documents share a short name (case-insensitively, e.g. across
/// folders) the one processed last wins.
#[derive(Debug, Clone, Default)]
pub struct LinkResolver {
    index: HashMap<String, String>,
    shadowed: Vec<String>,
}

impl LinkResolver {
    /// Index a document corpus
    pub fn new(documents: &[Document]) -> Self {
        let mut resolver = Self::default();
        for doc in documents {
            resolver.insert(doc.path(), doc.short_name());
        }
        resolver
    }

    fn insert(&mut self, path: &str, short_name: &str) {
        let key = short_name.to_lowercase();
        if let Some(previous) = self.index.insert(key.clone(), path.to_string())
            && previous != path
        {
            log::debug!(
                "Short name '{}' now resolves to {} (was {})",
                key,
                path,
                previous
            );
            self.shadowed.push(previous);
        }
    }

    /// Resolve a raw link target to a document path
    pub fn resolve(&self, target: &str) -> Option<&str> {
        self.index.get(&target.to_lowercase()).map(String::as_str)
    }

    /// Paths that lost their short name to a later document
    pub fn shadowed(&self) -> &[String] {
        &self.shadowed
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
