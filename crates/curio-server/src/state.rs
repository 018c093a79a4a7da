//! Shared application state.

use std::sync::Arc;

use curio_db::repository::SurrealResourcesRepository;
use surrealdb::{Connection, Surreal};

use crate::config::ServerConfig;

/// State shared by every request handler.
///
/// Cloning is cheap: the repository clones the store handle, not the
/// connection itself.
pub struct AppState<C: Connection> {
    pub resources: SurrealResourcesRepository<C>,
    pub config: Arc<ServerConfig>,
}

impl<C: Connection> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            resources: self.resources.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<C: Connection> AppState<C> {
    pub fn new(db: Surreal<C>, config: ServerConfig) -> Self {
        Self {
            resources: SurrealResourcesRepository::new(db),
            config: Arc::new(config),
        }
    }
}
