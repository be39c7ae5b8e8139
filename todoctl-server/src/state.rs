//! Application state shared across handlers

use std::sync::Arc;

use crate::store::TodoStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Box<dyn TodoStore>,
}

impl AppState {
    pub fn new(store: impl TodoStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store: Box::new(store),
            }),
        }
    }

    pub fn store(&self) -> &dyn TodoStore {
        self.inner.store.as_ref()
    }
}
