//! Coin use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD + poke entry points for core callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::coin::{CoinId, Memecoin};
use crate::repo::coin_repo::{CoinRepository, RepoResult};

/// Request model for creating a memecoin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCoinRequest {
    /// Display name. Trimmed and validated by the store.
    pub name: String,
    /// Optional free-form description.
    pub description: String,
}

/// Use-case service wrapper for memecoin operations.
pub struct CoinService<R: CoinRepository> {
    repo: R,
}

impl<R: CoinRepository> CoinService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a new coin and returns the persisted record.
    ///
    /// # Contract
    /// - Name is trimmed; empty names fail with a validation error.
    /// - A live coin with the same name fails with a duplicate-name error.
    pub fn create_coin(&self, request: &CreateCoinRequest) -> RepoResult<Memecoin> {
        self.repo
            .create_coin(request.name.as_str(), request.description.as_str())
    }

    /// Gets one coin by id with optional tombstone visibility.
    pub fn get_coin(&self, id: CoinId, include_deleted: bool) -> RepoResult<Option<Memecoin>> {
        self.repo.get_coin(id, include_deleted)
    }

    /// Replaces the description of a live coin.
    ///
    /// Returns repository-level not-found errors unchanged.
    pub fn update_description(&self, id: CoinId, description: &str) -> RepoResult<()> {
        self.repo.update_description(id, description)
    }

    /// Soft-deletes a coin by id.
    pub fn soft_delete_coin(&self, id: CoinId) -> RepoResult<()> {
        self.repo.soft_delete_coin(id)
    }

    /// Atomically increments a live coin's popularity and returns the new
    /// score.
    pub fn poke_coin(&self, id: CoinId) -> RepoResult<i64> {
        self.repo.poke_coin(id)
    }
}
