use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

mod app;
mod http;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "salescope=info,salescope_gateway=info,tower_http=debug".into()),
        )
        .init();

    // load config: explicit path via SALESCOPE_CONFIG > ./salescope.toml
    let config_path = std::env::var("SALESCOPE_CONFIG").ok();
    let config = salescope_core::config::SalescopeConfig::load(config_path.as_deref())
        .unwrap_or_else(|e| {
            tracing::warn!("Config load failed ({}), using defaults", e);
            salescope_core::config::SalescopeConfig::default()
        });

    let bind = config.gateway.bind.clone();
    let port = config.gateway.port;

    let db_path = &config.database.path;
    ensure_parent_dir(db_path);
    info!(path = %db_path, "opening SQLite database");

    let conn = rusqlite::Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    salescope_store::db::init_db(&conn)?;
    info!("database schema ready");

    let store = Arc::new(salescope_store::SalesStore::new(conn));

    // scheduler: management handle for AppState + engine for the background loop
    let scheduler = salescope_scheduler::SchedulerHandle::new();
    let engine = scheduler.engine();
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move { engine.run(shutdown_rx).await });

    let state = Arc::new(app::AppState::new(config, store, scheduler));
    let router = app::build_router(state);

    let addr: SocketAddr = format!("{}:{}", bind, port).parse()?;
    info!("salescope gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    // signal the engine to stop
    let _ = shutdown_tx.send(true);
    Ok(())
}

/// Ensure the parent directory for a file path exists.
fn ensure_parent_dir(path: &str) {
    if let Some(parent) = std::path::Path::new(path).parent() {
        let _ = std::fs::create_dir_all(parent);
    }
}
