//! Memeboard HTTP server entry point.
//!
//! # Responsibility
//! - Read environment configuration.
//! - Initialize logging, open/migrate the database, serve the router.
//!
//! Environment:
//! - `MEMEBOARD_DB`        database file path (default `memeboard.sqlite3`)
//! - `MEMEBOARD_ADDR`      bind address (default `127.0.0.1:8080`)
//! - `MEMEBOARD_LOG_LEVEL` trace|debug|info|warn|error
//! - `MEMEBOARD_LOG_DIR`   absolute log directory (default `<cwd>/logs`)

use log::info;
use memeboard_core::db::open_db;
use memeboard_core::{default_log_level, init_logging};
use memeboard_server::{build_router, AppState};
use std::env;
use std::error::Error;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("memeboard_server: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let db_path = env::var("MEMEBOARD_DB").unwrap_or_else(|_| "memeboard.sqlite3".to_string());
    let addr = env::var("MEMEBOARD_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let log_level =
        env::var("MEMEBOARD_LOG_LEVEL").unwrap_or_else(|_| default_log_level().to_string());
    let log_dir = match env::var("MEMEBOARD_LOG_DIR") {
        Ok(dir) => dir,
        Err(_) => env::current_dir()?.join("logs").display().to_string(),
    };

    // A broken logging setup should be visible but must not stop the server.
    if let Err(err) = init_logging(&log_level, &log_dir) {
        eprintln!("memeboard_server: logging disabled: {err}");
    }

    let conn = open_db(&db_path)?;
    let app = build_router(AppState::new(conn));

    let listener = TcpListener::bind(&addr).await?;
    info!("event=server_start module=http status=ok addr={addr} db={db_path}");
    println!("memeboard_server listening on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
