use std::sync::Arc;
use std::time::Instant;

use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    store: Arc<Store>,
    started_at: Instant,
}

impl AppState {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            store,
            started_at: Instant::now(),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
