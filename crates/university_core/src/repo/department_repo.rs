//! Department repository contract and SQLite implementation.
//!
//! # Responsibility
//! - CRUD over the `departments` table.
//! - Roster aggregates (average salary, headcount, degree distribution)
//!   joined through `departments_lectors`.
//!
//! # Invariants
//! - Roster membership is read-only here.
//! - Aggregates over an empty or unknown roster are zero or empty.

use super::{count_from_db, or_default_logged, RepoResult};
use crate::model::department::{DegreeStatistic, Department, DepartmentId};
use log::debug;
use rusqlite::{params, Connection, Params, Row};

const DEPARTMENT_SELECT_SQL: &str = "SELECT id, name, head FROM departments";

const ROSTER_JOIN_SQL: &str = "FROM lectors
    JOIN departments_lectors ON departments_lectors.lector_id = lectors.id
    JOIN departments ON departments.id = departments_lectors.department_id
    WHERE departments.name = ?1";

/// Persistence gateway for department records and roster aggregates.
///
/// Methods are infallible by contract; see the module docs of [`crate::repo`].
pub trait DepartmentRepository {
    fn get_department(&self, id: DepartmentId) -> Option<Department>;
    /// Exact, case-sensitive name match.
    fn get_department_by_name(&self, name: &str) -> Option<Department>;
    /// Lists all departments in storage order.
    fn list_departments(&self) -> Vec<Department>;
    /// Inserts the department and writes the generated id into `department.id`.
    ///
    /// On store failure the department is left unchanged.
    fn save_department(&self, department: &mut Department);
    fn update_department(&self, department: &Department);
    /// Deleting an unknown id is a no-op.
    fn delete_department(&self, id: DepartmentId);
    /// Mean roster salary, `0.0` for an empty roster.
    fn average_salary_by_name(&self, name: &str) -> f64;
    fn employee_count_by_name(&self, name: &str) -> u64;
    fn degree_statistic_by_name(&self, name: &str) -> DegreeStatistic;
    /// Case-insensitive substring match on department name.
    fn search_departments(&self, fragment: &str) -> Vec<Department>;
}

/// SQLite-backed department repository.
#[derive(Clone, Copy)]
pub struct SqliteDepartmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDepartmentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_departments<P: Params>(&self, sql: &str, params: P) -> RepoResult<Vec<Department>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut departments = Vec::new();
        while let Some(row) = rows.next()? {
            departments.push(parse_department_row(row)?);
        }
        Ok(departments)
    }

    fn query_first<P: Params>(&self, sql: &str, params: P) -> RepoResult<Option<Department>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_department_row(row)?)),
            None => Ok(None),
        }
    }

    fn insert(&self, department: &Department) -> RepoResult<DepartmentId> {
        self.conn.execute(
            "INSERT INTO departments (name, head) VALUES (?1, ?2);",
            params![department.name.as_str(), department.head],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn try_update(&self, department: &Department) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE departments SET name = ?1, head = ?2 WHERE id = ?3;",
            params![department.name.as_str(), department.head, department.id],
        )?;
        debug!("event=department_update module=repo status=ok changed={changed}");
        Ok(())
    }

    fn try_delete(&self, id: DepartmentId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM departments WHERE id = ?1;", [id])?;
        debug!("event=department_delete module=repo status=ok changed={changed}");
        Ok(())
    }

    fn try_average_salary(&self, name: &str) -> RepoResult<f64> {
        let average: Option<f64> = self.conn.query_row(
            &format!("SELECT AVG(lectors.salary) {ROSTER_JOIN_SQL};"),
            [name],
            |row| row.get(0),
        )?;
        Ok(average.unwrap_or(0.0))
    }

    fn try_employee_count(&self, name: &str) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) {ROSTER_JOIN_SQL};"),
            [name],
            |row| row.get(0),
        )?;
        count_from_db(count, "employee count")
    }

    fn try_degree_statistic(&self, name: &str) -> RepoResult<DegreeStatistic> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT lectors.degree, COUNT(*) {ROSTER_JOIN_SQL} GROUP BY lectors.degree;"
        ))?;
        let mut rows = stmt.query([name])?;
        let mut statistic = DegreeStatistic::new();
        while let Some(row) = rows.next()? {
            let degree: String = row.get(0)?;
            let count = count_from_db(row.get(1)?, "degree count")?;
            statistic.insert(degree, count);
        }
        Ok(statistic)
    }
}

impl DepartmentRepository for SqliteDepartmentRepository<'_> {
    fn get_department(&self, id: DepartmentId) -> Option<Department> {
        or_default_logged(
            "department_get",
            self.query_first(&format!("{DEPARTMENT_SELECT_SQL} WHERE id = ?1;"), [id]),
        )
    }

    fn get_department_by_name(&self, name: &str) -> Option<Department> {
        or_default_logged(
            "department_get_by_name",
            self.query_first(
                &format!("{DEPARTMENT_SELECT_SQL} WHERE name = ?1 ORDER BY id ASC LIMIT 1;"),
                [name],
            ),
        )
    }

    fn list_departments(&self) -> Vec<Department> {
        or_default_logged(
            "department_list",
            self.query_departments(&format!("{DEPARTMENT_SELECT_SQL} ORDER BY id ASC;"), []),
        )
    }

    fn save_department(&self, department: &mut Department) {
        if let Some(id) = or_default_logged("department_save", self.insert(department).map(Some))
        {
            department.id = id;
        }
    }

    fn update_department(&self, department: &Department) {
        or_default_logged("department_update", self.try_update(department));
    }

    fn delete_department(&self, id: DepartmentId) {
        or_default_logged("department_delete", self.try_delete(id));
    }

    fn average_salary_by_name(&self, name: &str) -> f64 {
        or_default_logged("department_average_salary", self.try_average_salary(name))
    }

    fn employee_count_by_name(&self, name: &str) -> u64 {
        or_default_logged("department_employee_count", self.try_employee_count(name))
    }

    fn degree_statistic_by_name(&self, name: &str) -> DegreeStatistic {
        or_default_logged("department_degree_statistic", self.try_degree_statistic(name))
    }

    fn search_departments(&self, fragment: &str) -> Vec<Department> {
        or_default_logged(
            "department_search",
            self.query_departments(
                &format!(
                    "{DEPARTMENT_SELECT_SQL}
                     WHERE instr(casefold(name), casefold(?1)) > 0
                     ORDER BY id ASC;"
                ),
                [fragment],
            ),
        )
    }
}

fn parse_department_row(row: &Row<'_>) -> RepoResult<Department> {
    Ok(Department {
        id: row.get("id")?,
        name: row.get("name")?,
        head: row.get("head")?,
    })
}
