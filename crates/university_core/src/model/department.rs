//! Department domain model.
//!
//! # Invariants
//! - `name` is unique among stored departments (exact, case-sensitive).
//! - `head` references an existing lecturer whenever the department is written.

use super::lecturer::LecturerId;
use super::UNASSIGNED_ID;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Store-assigned department identity.
pub type DepartmentId = i64;

/// Degree label -> number of roster lecturers holding it.
///
/// Ordered by label so repeated reads render identically.
pub type DegreeStatistic = BTreeMap<String, u64>;

/// Academic department led by one head lecturer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// `UNASSIGNED_ID` until the record is saved.
    pub id: DepartmentId,
    pub name: String,
    /// Id of the lecturer heading this department.
    pub head: LecturerId,
}

impl Department {
    /// Creates an unsaved department.
    pub fn new(name: impl Into<String>, head: LecturerId) -> Self {
        Self::with_id(UNASSIGNED_ID, name, head)
    }

    /// Creates a department with a known id.
    pub fn with_id(id: DepartmentId, name: impl Into<String>, head: LecturerId) -> Self {
        Self {
            id,
            name: name.into(),
            head,
        }
    }

    /// Returns whether storage has assigned an id to this department.
    pub fn is_persisted(&self) -> bool {
        self.id > UNASSIGNED_ID
    }
}
