//! Lecturer domain model.
//!
//! # Responsibility
//! - Define the canonical lecturer record.
//!
//! # Invariants
//! - `id` is assigned by storage on first save and never changes afterwards.
//! - `salary` must be non-negative before any write; services enforce this.

use super::UNASSIGNED_ID;
use serde::{Deserialize, Serialize};

/// Store-assigned lecturer identity.
pub type LecturerId = i64;

/// One member of teaching staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lecturer {
    /// `UNASSIGNED_ID` until the record is saved.
    pub id: LecturerId,
    pub name: String,
    pub surname: String,
    /// Free-text academic rank label, e.g. `professor`.
    pub degree: String,
    pub salary: i64,
}

impl Lecturer {
    /// Creates an unsaved lecturer.
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        degree: impl Into<String>,
        salary: i64,
    ) -> Self {
        Self::with_id(UNASSIGNED_ID, name, surname, degree, salary)
    }

    /// Creates a lecturer with a known id, e.g. when mapping a stored row.
    pub fn with_id(
        id: LecturerId,
        name: impl Into<String>,
        surname: impl Into<String>,
        degree: impl Into<String>,
        salary: i64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            surname: surname.into(),
            degree: degree.into(),
            salary,
        }
    }

    /// Returns whether storage has assigned an id to this lecturer.
    pub fn is_persisted(&self) -> bool {
        self.id > UNASSIGNED_ID
    }

    /// Returns `name surname` for display.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}
