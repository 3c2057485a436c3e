//! Shared application state threaded through every handler.

use std::sync::Arc;

use zagfer_core::Result;
use zagfer_service::{ToolCatalog, TransactionProcessor, UserAdmin};
use zagfer_storage::store::SqliteStore;

/// Everything the handlers need, cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub store: SqliteStore,
    pub processor: Arc<TransactionProcessor<SqliteStore>>,
    pub roster: Arc<UserAdmin<SqliteStore>>,
    pub catalog: Arc<ToolCatalog<SqliteStore>>,
}

impl AppState {
    /// Wire the services over one store. Fails if the store cannot apply
    /// loan mutations atomically.
    pub fn new(store: SqliteStore) -> Result<Self> {
        let processor = Arc::new(TransactionProcessor::new(store.clone())?);
        let roster = Arc::new(UserAdmin::new(store.clone()));
        let catalog = Arc::new(ToolCatalog::new(store.clone()));
        Ok(Self {
            store,
            processor,
            roster,
            catalog,
        })
    }
}
