//! Validation and orchestration over the persistence gateway.
//!
//! # Responsibility
//! - Enforce write-time rules: non-negative salary, unique department names,
//!   existing head lecturer, existing target records.
//! - Report rule violations as [`ServiceError`] values.
//!
//! # Invariants
//! - `DepartmentService` depends on `LecturerService`, never the reverse.
//! - Checks run before the write they guard. They are not atomic against
//!   concurrent writers.

use crate::model::department::DepartmentId;
use crate::model::lecturer::LecturerId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod department_service;
pub mod lecturer_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Record that a service operation required but could not find.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingEntity {
    Lecturer(LecturerId),
    Department(DepartmentId),
    DepartmentNamed(String),
}

impl Display for MissingEntity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lecturer(id) => write!(f, "lecturer with id {id}"),
            Self::Department(id) => write!(f, "department with id {id}"),
            Self::DepartmentNamed(name) => write!(f, "department with name `{name}`"),
        }
    }
}

/// Validation failure raised by lecturer and department services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// A referenced record does not exist.
    NotFound(MissingEntity),
    /// Another department already uses this name.
    DuplicateName(String),
    /// Salary below zero.
    NegativeSalary(i64),
    /// Head lookup for a department name that resolves to nothing.
    DepartmentNotFound(String),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(entity) => write!(f, "{entity} is not present"),
            Self::DuplicateName(name) => write!(f, "department with name `{name}` already exists"),
            Self::NegativeSalary(salary) => write!(f, "salary can not be negative: {salary}"),
            Self::DepartmentNotFound(name) => {
                write!(f, "department with name `{name}` does not exist")
            }
        }
    }
}

impl Error for ServiceError {}

#[cfg(test)]
mod tests {
    use super::{MissingEntity, ServiceError};

    #[test]
    fn display_names_the_missing_record() {
        let err = ServiceError::NotFound(MissingEntity::Department(0));
        assert_eq!(err.to_string(), "department with id 0 is not present");

        let err = ServiceError::NotFound(MissingEntity::DepartmentNamed("Biology".to_string()));
        assert_eq!(err.to_string(), "department with name `Biology` is not present");
    }

    #[test]
    fn display_duplicate_name() {
        let err = ServiceError::DuplicateName("Biology".to_string());
        assert_eq!(err.to_string(), "department with name `Biology` already exists");
    }
}
