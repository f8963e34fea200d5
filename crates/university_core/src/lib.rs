//! Core logic for university department and lecturer records.
//! Services here are the single source of truth for write-time rules.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::department::{DegreeStatistic, Department, DepartmentId};
pub use model::lecturer::{Lecturer, LecturerId};
pub use model::UNASSIGNED_ID;
pub use repo::department_repo::{DepartmentRepository, SqliteDepartmentRepository};
pub use repo::lecturer_repo::{LecturerRepository, SqliteLecturerRepository};
pub use repo::{RepoError, RepoResult};
pub use service::department_service::DepartmentService;
pub use service::lecturer_service::LecturerService;
pub use service::{MissingEntity, ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
