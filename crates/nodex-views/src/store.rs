//! The view snapshot store.

use chrono::{DateTime, Utc};
use nodex_core::{Error, GraphView, Result, VIEWS_NAMESPACE, ViewState};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::kv::KeyValueStore;

/// Persisted shape: `{ "views": [...] }`
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedViews {
    #[serde(default)]
    views: Vec<GraphView>,
}

/// Ordered collection of immutable graph view snapshots.
///
/// Tracks at most one selected and one active view by id. Views cannot be
/// updated or renamed; capture a new one instead.
#[derive(Debug, Default, Clone)]
pub struct ViewStore {
    views: Vec<GraphView>,
    selected: Option<String>,
    active: Option<String>,
}

impl ViewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load views saved under the views namespace.
    ///
    /// Missing data yields an empty store. Stored text that is not JSON, or
    /// JSON without the expected shape, is discarded with a warning. Zoom
    /// values are normalized the same way as on capture. Selection and
    /// active references are never persisted.
    pub fn load(kv: &dyn KeyValueStore) -> Result<Self> {
        let value = match kv.get(VIEWS_NAMESPACE) {
            Ok(Some(value)) => value,
            Ok(None) => return Ok(Self::new()),
            Err(Error::Serialization { reason }) => {
                log::warn!("Ignoring unreadable stored graph views: {}", reason);
                return Ok(Self::new());
            }
            Err(e) => return Err(e),
        };
        match serde_json::from_value::<PersistedViews>(value) {
            Ok(persisted) => {
                log::debug!("Loaded {} graph views", persisted.views.len());
                let views = persisted
                    .views
                    .into_iter()
                    .map(|mut view| {
                        let state = view.state;
                        view.state =
                            ViewState::new(state.positions, state.zoom, state.pan, state.hide_orphans);
                        view
                    })
                    .collect();
                Ok(Self {
                    views,
                    ..Self::default()
                })
            }
            Err(e) => {
                log::warn!("Ignoring invalid stored graph views: {}", e);
                Ok(Self::new())
            }
        }
    }

    /// Write all views under the views namespace
    pub fn save(&self, kv: &dyn KeyValueStore) -> Result<()> {
        let value = serde_json::to_value(PersistedViews {
            views: self.views.clone(),
        })?;
        kv.set(VIEWS_NAMESPACE, value)
    }

    /// Capture a new view and return its id
    pub fn create(&mut self, name: impl Into<String>, state: ViewState) -> String {
        self.create_at(name, state, Utc::now())
    }

    /// Capture a new view with an explicit creation time.
    ///
    /// Ids are `view-<unix millis>`; when that id is taken the millisecond
    /// value is bumped until it is unique.
    pub fn create_at(
        &mut self,
        name: impl Into<String>,
        state: ViewState,
        now: DateTime<Utc>,
    ) -> String {
        let mut millis = now.timestamp_millis();
        let mut id = format!("view-{}", millis);
        while self.get(&id).is_some() {
            millis += 1;
            id = format!("view-{}", millis);
        }

        let state = ViewState::new(state.positions, state.zoom, state.pan, state.hide_orphans);
        let view = GraphView {
            id: id.clone(),
            name: name.into(),
            created_at: now.to_rfc3339(),
            state,
        };
        log::info!("Created graph view '{}' ({})", view.name, view.id);
        self.views.push(view);
        id
    }

    /// Remove a view; unknown ids are ignored.
    ///
    /// Clears the selected and active references when they point at it.
    pub fn delete(&mut self, id: &str) {
        let before = self.views.len();
        self.views.retain(|v| v.id != id);
        if self.views.len() != before {
            log::info!("Deleted graph view {}", id);
        }

        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        if self.active.as_deref() == Some(id) {
            self.active = None;
        }
    }

    pub fn get(&self, id: &str) -> Option<&GraphView> {
        self.views.iter().find(|v| v.id == id)
    }

    /// Mark a view as selected without applying it
    pub fn select(&mut self, id: &str) -> Result<()> {
        self.ensure_exists(id)?;
        self.selected = Some(id.to_string());
        Ok(())
    }

    /// Make a view the active one
    pub fn apply(&mut self, id: &str) -> Result<()> {
        self.ensure_exists(id)?;
        self.active = Some(id.to_string());
        Ok(())
    }

    /// Reset both selection and active view
    pub fn clear(&mut self) {
        self.selected = None;
        self.active = None;
    }

    /// Views in creation order
    pub fn views(&self) -> &[GraphView] {
        &self.views
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// The active view, if any
    pub fn active_view(&self) -> Option<&GraphView> {
        self.active.as_deref().and_then(|id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    fn ensure_exists(&self, id: &str) -> Result<()> {
        if self.get(id).is_some() {
            Ok(())
        } else {
            Err(Error::not_found(format!("graph view {}", id)))
        }
    }
}

/// A [`ViewStore`] shared across threads.
///
/// One mutex guards the whole store, so each operation, including the
/// reference cleanup in `delete`, is atomic.
#[derive(Debug, Clone, Default)]
pub struct SharedViewStore {
    inner: Arc<Mutex<ViewStore>>,
}

impl SharedViewStore {
    pub fn new(store: ViewStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    pub fn create(&self, name: impl Into<String>, state: ViewState) -> String {
        self.inner.lock().create(name, state)
    }

    pub fn delete(&self, id: &str) {
        self.inner.lock().delete(id)
    }

    /// Cloned snapshot of a view
    pub fn get(&self, id: &str) -> Option<GraphView> {
        self.inner.lock().get(id).cloned()
    }

    pub fn select(&self, id: &str) -> Result<()> {
        self.inner.lock().select(id)
    }

    pub fn apply(&self, id: &str) -> Result<()> {
        self.inner.lock().apply(id)
    }

    pub fn clear(&self) {
        self.inner.lock().clear()
    }

    pub fn views(&self) -> Vec<GraphView> {
        self.inner.lock().views().to_vec()
    }

    pub fn selected(&self) -> Option<String> {
        self.inner.lock().selected().map(str::to_string)
    }

    pub fn active(&self) -> Option<String> {
        self.inner.lock().active().map(str::to_string)
    }

    pub fn save(&self, kv: &dyn KeyValueStore) -> Result<()> {
        self.inner.lock().save(kv)
    }

    /// Run a closure with exclusive access to the store
    pub fn with<R>(&self, f: impl FnOnce(&mut ViewStore) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
