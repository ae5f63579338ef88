//! Domain model for the memecoin store.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Every record is identified by a stable store-assigned `CoinId`.
//! - Deletion is represented by soft-delete tombstones, not hard delete.

pub mod coin;
