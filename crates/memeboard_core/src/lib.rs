//! Core domain logic for memeboard.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::coin::{normalize_coin_name, CoinId, CoinValidationError, Memecoin};
pub use repo::coin_repo::{CoinRepository, RepoError, RepoResult, SqliteCoinRepository};
pub use service::coin_service::{CoinService, CreateCoinRequest};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
