//! Memecoin domain model.
//!
//! # Responsibility
//! - Define the canonical record persisted by the coin store.
//! - Own name validation and soft-delete lifecycle helpers.
//!
//! # Invariants
//! - `id` is assigned by the store, never changes and is never reused.
//! - `popularity_score` starts at 0 and only ever increases via poke.
//! - `deleted_at` is the source of truth for tombstone state: `None` means
//!   live, `Some(ts)` means soft-deleted.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned identifier for a memecoin row.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type CoinId = i64;

/// Canonical memecoin record.
///
/// Timestamps are unix epoch milliseconds, matching the storage schema.
/// `deleted_at` is omitted from the wire when the record is live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memecoin {
    /// Store-assigned row id.
    pub id: CoinId,
    /// Display name, stored in trimmed form. Unique among live records.
    pub name: String,
    /// Free-form text, mutable only through the update operation.
    pub description: String,
    /// Creation time in epoch milliseconds. Set once, immutable.
    pub created_at: i64,
    /// Poke counter. Non-negative, monotonically increasing.
    pub popularity_score: i64,
    /// Soft-delete tombstone in epoch milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub deleted_at: Option<i64>,
}

impl Memecoin {
    /// Returns whether this record should be visible to read/update/poke.
    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// Validation failure for caller-supplied coin fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoinValidationError {
    /// Name is empty or whitespace-only after trimming.
    EmptyName,
}

impl Display for CoinValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name is required and cannot be empty"),
        }
    }
}

impl Error for CoinValidationError {}

/// Validates and normalizes a caller-supplied coin name.
///
/// # Contract
/// - Trims surrounding whitespace and returns the trimmed form.
/// - Rejects names that are empty after trimming.
pub fn normalize_coin_name(name: &str) -> Result<String, CoinValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoinValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}
