//! Department use-case service.
//!
//! # Responsibility
//! - Guard department writes with name uniqueness and head existence.
//! - Gate roster aggregates behind a department-exists check.
//!
//! # Invariants
//! - `save` rejects any stored department with the same name.
//! - A department keeps its own name across updates without a duplicate error;
//!   on update, clashes are detected by comparing ids.
//! - The head check resolves `department.head` through `LecturerService`.

use super::lecturer_service::LecturerService;
use super::{MissingEntity, ServiceError, ServiceResult};
use crate::model::department::{DegreeStatistic, Department, DepartmentId};
use crate::model::lecturer::LecturerId;
use crate::repo::department_repo::DepartmentRepository;
use crate::repo::lecturer_repo::LecturerRepository;
use log::{info, warn};

/// Use-case service for department records.
pub struct DepartmentService<D: DepartmentRepository, L: LecturerRepository> {
    repo: D,
    lecturers: LecturerService<L>,
}

impl<D: DepartmentRepository, L: LecturerRepository> DepartmentService<D, L> {
    /// Creates a service that validates heads through `lecturers`.
    pub fn new(repo: D, lecturers: LecturerService<L>) -> Self {
        Self { repo, lecturers }
    }

    /// Lecturer service used for head validation.
    pub fn lecturers(&self) -> &LecturerService<L> {
        &self.lecturers
    }

    pub fn get_by_id(&self, id: DepartmentId) -> Option<Department> {
        self.repo.get_department(id)
    }

    pub fn get_all(&self) -> Vec<Department> {
        self.repo.list_departments()
    }

    /// Saves a new department and assigns its generated id.
    ///
    /// # Errors
    /// - `DuplicateName` when any stored department already has this name,
    ///   whatever `department.id` says.
    /// - `NotFound` when `department.head` is not an existing lecturer.
    pub fn save(&self, department: &mut Department) -> ServiceResult<()> {
        self.ensure_name_unique(&department.name, None)?;
        self.ensure_head_present(department.head)?;
        self.repo.save_department(department);
        if department.is_persisted() {
            info!(
                "event=department_save module=service status=ok id={}",
                department.id
            );
        } else {
            warn!("event=department_save module=service status=error error_code=not_persisted");
        }
        Ok(())
    }

    /// Replaces name and head of an existing department.
    ///
    /// # Errors
    /// - `DuplicateName` when a different department already has this name.
    /// - `NotFound` when `department.id` or `department.head` does not exist.
    pub fn update(&self, department: &Department) -> ServiceResult<()> {
        self.ensure_name_unique(&department.name, Some(department.id))?;
        self.ensure_present_by_id(department.id)?;
        self.ensure_head_present(department.head)?;
        self.repo.update_department(department);
        info!(
            "event=department_update module=service status=ok id={}",
            department.id
        );
        Ok(())
    }

    pub fn delete(&self, id: DepartmentId) {
        self.repo.delete_department(id);
    }

    /// Counts roster members of the named department.
    pub fn get_quantity_of_employee_by_name(&self, name: &str) -> ServiceResult<u64> {
        self.ensure_present_by_name(name)?;
        Ok(self.repo.employee_count_by_name(name))
    }

    /// Mean salary of the named department's roster, `0.0` when it is empty.
    pub fn get_average_salary_by_name(&self, name: &str) -> ServiceResult<f64> {
        self.ensure_present_by_name(name)?;
        Ok(self.repo.average_salary_by_name(name))
    }

    /// Degree label -> lecturer count for the named department's roster.
    pub fn get_degree_statistic_by_name(&self, name: &str) -> ServiceResult<DegreeStatistic> {
        self.ensure_present_by_name(name)?;
        Ok(self.repo.degree_statistic_by_name(name))
    }

    pub fn search_if_name_contains(&self, fragment: &str) -> Vec<Department> {
        self.repo.search_departments(fragment)
    }

    /// Fails when `name` is taken by a department other than `updating`.
    fn ensure_name_unique(
        &self,
        name: &str,
        updating: Option<DepartmentId>,
    ) -> ServiceResult<()> {
        match self.repo.get_department_by_name(name) {
            Some(existing) if Some(existing.id) != updating => {
                warn!(
                    "event=department_validate module=service status=error error_code=duplicate_name existing_id={}",
                    existing.id
                );
                Err(ServiceError::DuplicateName(name.to_string()))
            }
            _ => Ok(()),
        }
    }

    fn ensure_present_by_id(&self, id: DepartmentId) -> ServiceResult<()> {
        if self.repo.get_department(id).is_none() {
            warn!("event=department_lookup module=service status=error error_code=not_found id={id}");
            return Err(ServiceError::NotFound(MissingEntity::Department(id)));
        }
        Ok(())
    }

    fn ensure_present_by_name(&self, name: &str) -> ServiceResult<()> {
        if self.repo.get_department_by_name(name).is_none() {
            warn!("event=department_lookup module=service status=error error_code=not_found by=name");
            return Err(ServiceError::NotFound(MissingEntity::DepartmentNamed(
                name.to_string(),
            )));
        }
        Ok(())
    }

    fn ensure_head_present(&self, head: LecturerId) -> ServiceResult<()> {
        if self.lecturers.get_by_id(head).is_none() {
            warn!("event=department_validate module=service status=error error_code=head_not_found head={head}");
            return Err(ServiceError::NotFound(MissingEntity::Lecturer(head)));
        }
        Ok(())
    }
}
