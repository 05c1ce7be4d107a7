use std::sync::Arc;

use crate::config::AppConfig;
use crate::store::Datastore;

/// Shared application state: the injected datastore handle plus the runtime
/// configuration. Handlers receive this through axum's `State` extractor
/// instead of reaching for globals, so tests can substitute the store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Datastore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn Datastore>, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
