//! Lecturer use-case service.
//!
//! # Responsibility
//! - Guard lecturer writes with the salary and existence rules.
//! - Pass reads and deletes straight through to the repository.
//!
//! # Invariants
//! - No lecturer with a negative salary reaches the repository.
//! - Updates only target lecturers that already exist.

use super::{MissingEntity, ServiceError, ServiceResult};
use crate::model::lecturer::{Lecturer, LecturerId};
use crate::repo::lecturer_repo::LecturerRepository;
use log::{info, warn};

/// Use-case service for lecturer records.
pub struct LecturerService<R: LecturerRepository> {
    repo: R,
}

impl<R: LecturerRepository> LecturerService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn get_by_id(&self, id: LecturerId) -> Option<Lecturer> {
        self.repo.get_lecturer(id)
    }

    pub fn get_all(&self) -> Vec<Lecturer> {
        self.repo.list_lecturers()
    }

    /// Saves a new lecturer and assigns its generated id.
    ///
    /// # Errors
    /// - `NegativeSalary` when `lecturer.salary < 0`; nothing is written.
    pub fn save(&self, lecturer: &mut Lecturer) -> ServiceResult<()> {
        ensure_salary_not_negative(lecturer.salary)?;
        self.repo.save_lecturer(lecturer);
        if lecturer.is_persisted() {
            info!(
                "event=lecturer_save module=service status=ok id={}",
                lecturer.id
            );
        } else {
            warn!("event=lecturer_save module=service status=error error_code=not_persisted");
        }
        Ok(())
    }

    /// Replaces all fields of an existing lecturer.
    ///
    /// # Errors
    /// - `NegativeSalary` when `lecturer.salary < 0`.
    /// - `NotFound` when no lecturer has `lecturer.id`.
    pub fn update(&self, lecturer: &Lecturer) -> ServiceResult<()> {
        ensure_salary_not_negative(lecturer.salary)?;
        self.ensure_present(lecturer.id)?;
        self.repo.update_lecturer(lecturer);
        info!(
            "event=lecturer_update module=service status=ok id={}",
            lecturer.id
        );
        Ok(())
    }

    pub fn delete(&self, id: LecturerId) {
        self.repo.delete_lecturer(id);
    }

    /// Returns the head of the department named `department_name`.
    ///
    /// # Errors
    /// - `DepartmentNotFound` when no department with a head matches the name.
    pub fn get_head_of_department(&self, department_name: &str) -> ServiceResult<Lecturer> {
        self.repo.head_of_department(department_name).ok_or_else(|| {
            warn!("event=head_of_department module=service status=error error_code=department_not_found");
            ServiceError::DepartmentNotFound(department_name.to_string())
        })
    }

    pub fn search_if_name_contains(&self, fragment: &str) -> Vec<Lecturer> {
        self.repo.search_lecturers(fragment)
    }

    fn ensure_present(&self, id: LecturerId) -> ServiceResult<()> {
        if self.repo.get_lecturer(id).is_none() {
            warn!("event=lecturer_lookup module=service status=error error_code=not_found id={id}");
            return Err(ServiceError::NotFound(MissingEntity::Lecturer(id)));
        }
        Ok(())
    }
}

fn ensure_salary_not_negative(salary: i64) -> ServiceResult<()> {
    if salary < 0 {
        warn!("event=lecturer_validate module=service status=error error_code=negative_salary");
        return Err(ServiceError::NegativeSalary(salary));
    }
    Ok(())
}
