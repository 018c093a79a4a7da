//! Server configuration.

use curio_db::DbConfig;

/// Configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: String,
    /// Origin allowed to issue update requests.
    pub client_domain: String,
    /// Document store connection settings.
    pub db: DbConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".into(),
            client_domain: "http://localhost:4200".into(),
            db: DbConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Build the configuration from `CURIO_*` environment variables,
    /// falling back to the defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: env_or("CURIO_BIND_ADDR", defaults.bind_addr),
            client_domain: env_or("CURIO_CLIENT_DOMAIN", defaults.client_domain),
            db: DbConfig {
                url: env_or("CURIO_DB_URL", defaults.db.url),
                namespace: env_or("CURIO_DB_NAMESPACE", defaults.db.namespace),
                database: env_or("CURIO_DB_DATABASE", defaults.db.database),
                username: env_or("CURIO_DB_USERNAME", defaults.db.username),
                password: env_or("CURIO_DB_PASSWORD", defaults.db.password),
            },
        }
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}
