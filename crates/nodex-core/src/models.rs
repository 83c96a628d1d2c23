//! Core data models representing vault and graph elements.
//!
//! These types are designed to be:
//! - **Serializable**: All types derive Serialize/Deserialize
//! - **Debuggable**: Derive Debug for easy inspection
//! - **Type-Safe**: Enums replace magic strings
//!
//! Graph and view types serialize with camelCase keys so that persisted view
//! snapshots and graph exports can be consumed by a JavaScript renderer as-is.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A frontmatter value: either a scalar string or a flat list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrontmatterValue {
    /// `key: value`, `key: "value"`, `key: 'value'`
    Text(String),
    /// `key: [a, b, c]`
    List(Vec<String>),
}

impl FrontmatterValue {
    /// Scalar view of the value, `None` for lists
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::List(_) => None,
        }
    }

    /// List view of the value, `None` for scalars
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Text(_) => None,
            Self::List(items) => Some(items),
        }
    }
}

impl From<&str> for FrontmatterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FrontmatterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for FrontmatterValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

/// Flat key/value metadata block at the top of a note.
///
/// Keys keep their first-insertion order; re-inserting a key replaces the
/// value in place. Serializes as a JSON/YAML map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    entries: Vec<(String, FrontmatterValue)>,
}

impl Frontmatter {
    /// Create an empty frontmatter block
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FrontmatterValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a value by key
    pub fn get(&self, key: &str) -> Option<&FrontmatterValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Look up a scalar value by key
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FrontmatterValue::as_str)
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrontmatterValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Frontmatter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// A heading in note content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub level: u8, // 1-6
    pub text: String,
}

/// A vault note rendered as a graph node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    /// Vault-relative document path
    pub id: String,
    /// File name without the markdown extension
    pub label: String,
    /// Merged in+out counter used for display sizing
    pub connections: usize,
    pub is_orphan: bool,
}

/// A resolved wiki-link between two notes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    /// `"{source}->{target}"`
    pub id: String,
    pub source: String,
    pub target: String,
}

impl GraphEdge {
    /// Create an edge with its deterministic composite id
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: format!("{}->{}", source, target),
            source,
            target,
        }
    }
}

/// Nodes and edges handed to a renderer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphData {
    /// Look up a node by id
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// A 2D coordinate or offset
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Captured visual and filter state of the graph view.
///
/// Positions are kept in a `BTreeMap` so a serialized state is byte-stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    #[serde(default)]
    pub positions: BTreeMap<String, Point>,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    #[serde(default)]
    pub pan: Point,
    #[serde(default)]
    pub hide_orphans: bool,
}

fn default_zoom() -> f64 {
    1.0
}

impl ViewState {
    /// Create a state, falling back to zoom 1.0 when `zoom` is not a
    /// positive finite number
    pub fn new(positions: BTreeMap<String, Point>, zoom: f64, pan: Point, hide_orphans: bool) -> Self {
        Self {
            positions,
            zoom: if zoom.is_finite() && zoom > 0.0 {
                zoom
            } else {
                default_zoom()
            },
            pan,
            hide_orphans,
        }
    }

    /// Saved layout position of a node, if captured
    pub fn position_of(&self, node_id: &str) -> Option<Point> {
        self.positions.get(node_id).copied()
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            positions: BTreeMap::new(),
            zoom: default_zoom(),
            pan: Point::default(),
            hide_orphans: false,
        }
    }
}

/// An immutable, named snapshot of graph view state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphView {
    pub id: String,
    pub name: String,
    /// RFC 3339 creation timestamp
    pub created_at: String,
    pub state: ViewState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frontmatter_insert_keeps_order() {
        let mut fm = Frontmatter::new();
        fm.insert("type", "note");
        fm.insert("tags", vec!["a".to_string(), "b".to_string()]);
        fm.insert("type", "project");

        let keys: Vec<_> = fm.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["type", "tags"]);
        assert_eq!(fm.get_str("type"), Some("project"));
        assert_eq!(
            fm.get("tags").and_then(FrontmatterValue::as_list),
            Some(&["a".to_string(), "b".to_string()][..])
        );
    }

    #[test]
    fn test_frontmatter_serializes_as_map() {
        let mut fm = Frontmatter::new();
        fm.insert("status", "active");
        fm.insert("tags", vec!["x".to_string()]);
        let json = serde_json::to_string(&fm).unwrap();
        assert_eq!(json, r#"{"status":"active","tags":["x"]}"#);
    }

    #[test]
    fn test_edge_id_is_deterministic() {
        let edge = GraphEdge::new("a.md", "b.md");
        assert_eq!(edge.id, "a.md->b.md");
        assert_eq!(edge, GraphEdge::new("a.md", "b.md"));
    }

    #[test]
    fn test_view_state_rejects_non_positive_zoom() {
        let state = ViewState::new(BTreeMap::new(), 0.0, Point::default(), false);
        assert_eq!(state.zoom, 1.0);
        let state = ViewState::new(BTreeMap::new(), f64::NAN, Point::default(), false);
        assert_eq!(state.zoom, 1.0);
        let state = ViewState::new(BTreeMap::new(), 2.5, Point::default(), true);
        assert_eq!(state.zoom, 2.5);
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let view = GraphView {
            id: "view-1".to_string(),
            name: "Focus".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            state: ViewState {
                hide_orphans: true,
                ..ViewState::default()
            },
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00Z");
        assert_eq!(json["state"]["hideOrphans"], true);
        assert_eq!(json["state"]["zoom"], 1.0);
    }

    #[test]
    fn test_view_state_defaults_on_missing_fields() {
        let state: ViewState = serde_json::from_str("{}").unwrap();
        assert_eq!(state, ViewState::default());
    }
}
