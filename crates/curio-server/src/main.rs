//! Curio server — application entry point.

use curio_db::DbManager;
use curio_server::config::ServerConfig;
use curio_server::routes;
use curio_server::state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("curio_server=info".parse().unwrap())
                .add_directive("curio_db=info".parse().unwrap()),
        )
        .json()
        .init();

    tracing::info!("Starting Curio server...");

    let config = ServerConfig::from_env();

    // Connection failures are logged and swallowed: the server keeps
    // serving and store calls fail per-request until the store comes up.
    let db = DbManager::bootstrap(&config.db).await;

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(db.client().clone(), config);
    let app = routes::router(state);

    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(error = %err, addr = %bind_addr, "Failed to bind HTTP listener");
            return;
        }
    };

    tracing::info!(addr = %bind_addr, "Curio server listening");

    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!(error = %err, "Server error");
    }

    tracing::info!("Curio server stopped.");
}
