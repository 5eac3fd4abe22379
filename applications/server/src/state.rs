/// Shared application state
use crate::services::{AuthService, CatalogService, Links};
use dottify_storage::Database;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub auth_service: Arc<AuthService>,
    pub catalog: CatalogService,
    pub links: Arc<Links>,
}

impl AppState {
    pub fn new(db: Arc<Database>, auth_service: Arc<AuthService>, links: Arc<Links>) -> Self {
        let catalog = CatalogService::new(db.clone());
        Self {
            db,
            auth_service,
            catalog,
            links,
        }
    }
}
