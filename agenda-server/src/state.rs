use std::sync::Arc;

use crate::store::EventStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    store: Arc<EventStore>,
}

impl AppState {
    pub fn new(store: EventStore) -> Self {
        AppState {
            store: Arc::new(store),
        }
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }
}
