//! # Graph View Snapshots
//!
//! Named, immutable captures of graph layout and filter state.
//!
//! A view records node positions, zoom, pan and whether orphans are hidden.
//! Views are created and deleted, never edited. The store tracks one
//! selected view and one active view and persists the view list through a
//! [`KeyValueStore`].
//!
//! ## Quick Start
//!
//! ```
//! use nodex_core::ViewState;
//! use nodex_views::{MemoryStore, ViewStore};
//!
//! let kv = MemoryStore::new();
//! let mut store = ViewStore::load(&kv).unwrap();
//!
//! let id = store.create("Overview", ViewState::default());
//! store.apply(&id).unwrap();
//! store.save(&kv).unwrap();
//!
//! store.delete(&id);
//! assert_eq!(store.active(), None);
//! ```

pub mod kv;
pub mod store;

pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};
pub use store::{SharedViewStore, ViewStore};

pub mod prelude {
    pub use crate::kv::{JsonFileStore, KeyValueStore, MemoryStore};
    pub use crate::store::{SharedViewStore, ViewStore};
    pub use nodex_core::{GraphView, Point, ViewState};
}
