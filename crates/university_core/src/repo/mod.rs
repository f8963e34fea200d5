//! Persistence gateway for lecturers and departments.
//!
//! # Responsibility
//! - Issue one parameterized statement per operation against SQLite.
//! - Map rows to domain records. No business rules live here.
//!
//! # Invariants
//! - Public repository methods never return store errors. Failures are logged
//!   and mapped to an empty, absent or zero result, so callers cannot tell
//!   "absent" from "store unreachable".
//! - Every operation is a single round-trip; nothing spans a transaction.
//! - Substring search folds case with the `casefold()` SQL function registered
//!   by [`crate::db`], so matching is Unicode-aware and wildcard-free.

use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod department_repo;
pub mod lecturer_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Failure of a single store round-trip.
#[derive(Debug)]
pub enum RepoError {
    Sqlite(rusqlite::Error),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "store query failed: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Collapses a store failure into the type's default value.
fn or_default_logged<T: Default>(event: &str, result: RepoResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            error!("event={event} module=repo status=error error_code=store_failure error={err}");
            T::default()
        }
    }
}

fn count_from_db(value: i64, column: &str) -> RepoResult<u64> {
    u64::try_from(value)
        .map_err(|_| RepoError::InvalidData(format!("negative count `{value}` in {column}")))
}
