//! SQLite storage bootstrap for the university schema.
//!
//! # Responsibility
//! - Open and configure SQLite connections.
//! - Register the SQL helper functions repositories rely on.
//! - Create the `lectors`, `departments` and `departments_lectors` tables.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Repositories only receive connections whose bootstrap succeeded; on any
//!   other connection their queries fail and fall back to empty results.

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// SQL function returning its text argument in Unicode lowercase.
pub const CASEFOLD_FN: &str = "casefold";

/// Failure while preparing a connection for the university schema.
#[derive(Debug)]
pub enum DbError {
    /// The database file or in-memory handle could not be opened.
    Open(rusqlite::Error),
    /// Pragmas or SQL function registration failed.
    Configure(rusqlite::Error),
    /// Applying schema migration `version` failed; nothing was committed.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(err) => write!(f, "failed to open university database: {err}"),
            Self::Configure(err) => write!(f, "failed to configure university database: {err}"),
            Self::Migration { version, source } => {
                write!(f, "university schema migration {version} failed: {source}")
            }
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "university schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open(err) | Self::Configure(err) => Some(err),
            Self::Migration { source, .. } => Some(source),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

/// Registers `casefold(text)` on `conn`.
///
/// SQLite's own `lower()` and `LIKE` only fold ASCII letters.
pub fn register_functions(conn: &Connection) -> DbResult<()> {
    conn.create_scalar_function(
        CASEFOLD_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|value| value.to_lowercase()))
        },
    )
    .map_err(DbError::Configure)
}
