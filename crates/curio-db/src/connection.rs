//! SurrealDB connection management.

use surrealdb::Surreal;
use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use tracing::{error, info};

use crate::error::DbError;
use crate::schema::run_migrations;

/// Configuration for connecting to SurrealDB.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// WebSocket URL (e.g., `127.0.0.1:8000`).
    pub url: String,
    /// SurrealDB namespace.
    pub namespace: String,
    /// SurrealDB database name.
    pub database: String,
    /// Root username for authentication.
    pub username: String,
    /// Root password for authentication.
    pub password: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "127.0.0.1:8000".into(),
            namespace: "curio".into(),
            database: "main".into(),
            username: "root".into(),
            password: "root".into(),
        }
    }
}

/// Manages the process-wide connection to SurrealDB.
///
/// The handle is created unconnected and shared by cloning; every clone
/// points at the same underlying client, so the connection is established
/// once and reused across requests rather than re-acquired.
#[derive(Clone)]
pub struct DbManager {
    db: Surreal<Client>,
}

impl DbManager {
    /// Create an unconnected handle.
    pub fn init() -> Self {
        Self {
            db: Surreal::init(),
        }
    }

    /// Connect the handle using the provided configuration.
    ///
    /// Authenticates as root, selects the configured namespace and
    /// database, and runs pending schema migrations.
    pub async fn connect(&self, config: &DbConfig) -> Result<(), DbError> {
        info!(
            url = %config.url,
            namespace = %config.namespace,
            database = %config.database,
            "Connecting to SurrealDB"
        );

        self.db.connect::<Ws>(&config.url).await?;

        self.db
            .signin(Root {
                username: config.username.clone(),
                password: config.password.clone(),
            })
            .await?;

        self.db
            .use_ns(&config.namespace)
            .use_db(&config.database)
            .await?;

        run_migrations(&self.db).await?;

        info!("Successfully connected to SurrealDB");

        Ok(())
    }

    /// Connect, logging and swallowing any failure.
    ///
    /// The returned handle is usable either way: queries issued before a
    /// connection exists fail per-request instead of taking the process
    /// down.
    pub async fn bootstrap(config: &DbConfig) -> Self {
        let manager = Self::init();
        if let Err(err) = manager.connect(config).await {
            error!(
                error = %err,
                "Failed to connect to SurrealDB; continuing without a store connection"
            );
        }
        manager
    }

    /// Returns a reference to the underlying SurrealDB client.
    pub fn client(&self) -> &Surreal<Client> {
        &self.db
    }
}
