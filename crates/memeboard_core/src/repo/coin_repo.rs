//! Coin repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD + poke APIs over the `memecoins` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Every read/update/delete/poke statement carries the liveness filter
//!   (`deleted_at IS NULL`); a tombstoned row is indistinguishable from a
//!   missing row in every result.
//! - The poke increment is a single conditional statement evaluated by
//!   SQLite as one atomic step. No read-modify-write pair exists on this
//!   path.
//! - Live-name uniqueness is enforced by the partial unique index created in
//!   the initial migration, not by a pre-check.

use crate::db::DbError;
use crate::model::coin::{normalize_coin_name, CoinId, CoinValidationError, Memecoin};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

const COIN_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    created_at,
    popularity_score,
    deleted_at
FROM memecoins";

const REQUIRED_COLUMNS: &[&str] = &[
    "id",
    "name",
    "description",
    "created_at",
    "popularity_score",
    "deleted_at",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for coin persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(CoinValidationError),
    DuplicateName(String),
    NotFound(CoinId),
    Db(DbError),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateName(name) => {
                write!(f, "a live memecoin named `{name}` already exists")
            }
            Self::NotFound(id) => write!(f, "memecoin not found: {id}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted coin data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CoinValidationError> for RepoError {
    fn from(value: CoinValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for memecoin operations.
pub trait CoinRepository {
    /// Creates one coin and returns the persisted record with its assigned id.
    fn create_coin(&self, name: &str, description: &str) -> RepoResult<Memecoin>;
    /// Gets one coin by id with optional tombstone visibility.
    fn get_coin(&self, id: CoinId, include_deleted: bool) -> RepoResult<Option<Memecoin>>;
    /// Replaces the description of a live coin. Touches no other column.
    fn update_description(&self, id: CoinId, description: &str) -> RepoResult<()>;
    /// Tombstones a live coin by setting `deleted_at`.
    fn soft_delete_coin(&self, id: CoinId) -> RepoResult<()>;
    /// Atomically increments the popularity counter of a live coin and
    /// returns the new score.
    fn poke_coin(&self, id: CoinId) -> RepoResult<i64>;
}

/// SQLite-backed memecoin repository.
pub struct SqliteCoinRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCoinRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema
    ///   does not carry the shape this repository queries.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CoinRepository for SqliteCoinRepository<'_> {
    fn create_coin(&self, name: &str, description: &str) -> RepoResult<Memecoin> {
        let name = normalize_coin_name(name)?;
        let created_at = now_epoch_ms();

        let inserted = self.conn.execute(
            "INSERT INTO memecoins (name, description, created_at, popularity_score)
             VALUES (?1, ?2, ?3, 0);",
            params![name.as_str(), description, created_at],
        );
        if let Err(err) = inserted {
            if is_live_name_conflict(&err) {
                return Err(RepoError::DuplicateName(name));
            }
            return Err(err.into());
        }

        Ok(Memecoin {
            id: self.conn.last_insert_rowid(),
            name,
            description: description.to_string(),
            created_at,
            popularity_score: 0,
            deleted_at: None,
        })
    }

    fn get_coin(&self, id: CoinId, include_deleted: bool) -> RepoResult<Option<Memecoin>> {
        let mut stmt = self.conn.prepare(&format!(
            "{COIN_SELECT_SQL}
             WHERE id = ?1
               AND (?2 = 1 OR deleted_at IS NULL);"
        ))?;

        let mut rows = stmt.query(params![id, bool_to_int(include_deleted)])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_coin_row(row)?));
        }

        Ok(None)
    }

    fn update_description(&self, id: CoinId, description: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE memecoins
             SET description = ?1
             WHERE id = ?2 AND deleted_at IS NULL;",
            params![description, id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn soft_delete_coin(&self, id: CoinId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE memecoins
             SET deleted_at = ?1
             WHERE id = ?2 AND deleted_at IS NULL;",
            params![now_epoch_ms(), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn poke_coin(&self, id: CoinId) -> RepoResult<i64> {
        // Increment and liveness check execute as one statement, so N
        // concurrent pokes on a live id always advance the counter by N.
        let mut stmt = self.conn.prepare(
            "UPDATE memecoins
             SET popularity_score = popularity_score + 1
             WHERE id = ?1 AND deleted_at IS NULL
             RETURNING popularity_score;",
        )?;

        match stmt.query_row(params![id], |row| row.get::<_, i64>(0)) {
            Ok(score) => Ok(score),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(RepoError::NotFound(id)),
            Err(err) => Err(err.into()),
        }
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = crate::db::migrations::latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'memecoins'
        );",
        [],
        |row| row.get(0),
    )?;
    if table_exists == 0 {
        return Err(RepoError::MissingRequiredTable("memecoins"));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('memecoins');")?;
    let mut rows = stmt.query([])?;
    let mut present = Vec::new();
    while let Some(row) = rows.next()? {
        present.push(row.get::<_, String>(0)?);
    }
    for &column in REQUIRED_COLUMNS {
        if !present.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: "memecoins",
                column,
            });
        }
    }

    Ok(())
}

fn parse_coin_row(row: &Row<'_>) -> RepoResult<Memecoin> {
    let popularity_score: i64 = row.get("popularity_score")?;
    if popularity_score < 0 {
        return Err(RepoError::InvalidData(format!(
            "negative popularity_score `{popularity_score}` in memecoins.popularity_score"
        )));
    }

    Ok(Memecoin {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        created_at: row.get("created_at")?,
        popularity_score,
        deleted_at: row.get("deleted_at")?,
    })
}

fn is_live_name_conflict(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(info, Some(message))
            if info.code == rusqlite::ErrorCode::ConstraintViolation
                && message.contains("memecoins.name")
    )
}

fn now_epoch_ms() -> i64 {
    // A clock before the unix epoch collapses to 0 rather than failing writes.
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
