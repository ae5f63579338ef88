//! HTTP surface for the memeboard service.
//!
//! # Responsibility
//! - Bind the core coin service to the wire contract.
//! - Own shared connection state for concurrent request handling.
//!
//! # Invariants
//! - The store connection is injected state, never a process-global.
//! - Handlers go through the core service; a service is built per request
//!   from a ready connection.

use axum::routing::{get, post};
use axum::Router;
use memeboard_core::{CoinService, RepoResult, SqliteCoinRepository};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

pub mod error;
pub mod handlers;

use error::ApiError;

/// Shared application state: one SQLite connection behind a mutex.
///
/// Request handlers serialize on the lock; statement-level atomicity inside
/// SQLite carries the per-id counter guarantee even when several
/// connections target the same database file.
#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Wraps a migrated connection for router-wide sharing.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs one use-case operation against the shared connection.
    ///
    /// Handlers never touch the repository directly; every request goes
    /// through the core service.
    pub fn with_service<T>(
        &self,
        op: impl FnOnce(&CoinService<SqliteCoinRepository<'_>>) -> RepoResult<T>,
    ) -> Result<T, ApiError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| ApiError::internal("connection lock poisoned"))?;
        let service = CoinService::new(SqliteCoinRepository::try_new(&conn)?);
        Ok(op(&service)?)
    }
}

/// Builds the full memeboard route table.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/memecoins", post(handlers::create_coin))
        .route(
            "/memecoins/:id",
            get(handlers::get_coin)
                .patch(handlers::update_coin)
                .delete(handlers::delete_coin),
        )
        .route("/memecoins/:id/poke", post(handlers::poke_coin))
        .route("/health", get(handlers::health))
        .with_state(state)
}
