//! Shared handler state.

use std::sync::Arc;

use botica_core::Catalog;
use botica_db::Database;

/// Everything a handler may touch. Cloned per request; both fields are
/// cheap reference-counted handles.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub catalog: Arc<Catalog>,
}

impl AppState {
    pub fn new(db: Database, catalog: Catalog) -> Self {
        AppState {
            db,
            catalog: Arc::new(catalog),
        }
    }
}
