//! Lecturer repository contract and SQLite implementation.
//!
//! # Responsibility
//! - CRUD over the `lectors` table.
//! - Head-of-department lookup and name/surname substring search.

use super::{or_default_logged, RepoResult};
use crate::model::lecturer::{Lecturer, LecturerId};
use log::debug;
use rusqlite::{params, Connection, Params, Row};

const LECTURER_SELECT_SQL: &str = "SELECT
    lectors.id AS id,
    lectors.name AS name,
    lectors.surname AS surname,
    lectors.degree AS degree,
    lectors.salary AS salary
FROM lectors";

/// Persistence gateway for lecturer records.
///
/// Methods are infallible by contract; see the module docs of [`crate::repo`].
pub trait LecturerRepository {
    fn get_lecturer(&self, id: LecturerId) -> Option<Lecturer>;
    /// Lists all lecturers in storage order.
    fn list_lecturers(&self) -> Vec<Lecturer>;
    /// Inserts the lecturer and writes the generated id into `lecturer.id`.
    ///
    /// On store failure the lecturer is left unchanged.
    fn save_lecturer(&self, lecturer: &mut Lecturer);
    fn update_lecturer(&self, lecturer: &Lecturer);
    /// Deleting an unknown id is a no-op.
    fn delete_lecturer(&self, id: LecturerId);
    /// Returns the lecturer heading the department with this exact name.
    fn head_of_department(&self, department_name: &str) -> Option<Lecturer>;
    /// Case-insensitive substring match on name or surname.
    fn search_lecturers(&self, fragment: &str) -> Vec<Lecturer>;
}

/// SQLite-backed lecturer repository.
#[derive(Clone, Copy)]
pub struct SqliteLecturerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLecturerRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_lecturers<P: Params>(&self, sql: &str, params: P) -> RepoResult<Vec<Lecturer>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut lecturers = Vec::new();
        while let Some(row) = rows.next()? {
            lecturers.push(parse_lecturer_row(row)?);
        }
        Ok(lecturers)
    }

    fn query_first<P: Params>(&self, sql: &str, params: P) -> RepoResult<Option<Lecturer>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_lecturer_row(row)?)),
            None => Ok(None),
        }
    }

    fn insert(&self, lecturer: &Lecturer) -> RepoResult<LecturerId> {
        self.conn.execute(
            "INSERT INTO lectors (name, surname, degree, salary) VALUES (?1, ?2, ?3, ?4);",
            params![
                lecturer.name.as_str(),
                lecturer.surname.as_str(),
                lecturer.degree.as_str(),
                lecturer.salary,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn try_update(&self, lecturer: &Lecturer) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE lectors
             SET name = ?1, surname = ?2, degree = ?3, salary = ?4
             WHERE id = ?5;",
            params![
                lecturer.name.as_str(),
                lecturer.surname.as_str(),
                lecturer.degree.as_str(),
                lecturer.salary,
                lecturer.id,
            ],
        )?;
        debug!("event=lecturer_update module=repo status=ok changed={changed}");
        Ok(())
    }

    fn try_delete(&self, id: LecturerId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM lectors WHERE id = ?1;", [id])?;
        debug!("event=lecturer_delete module=repo status=ok changed={changed}");
        Ok(())
    }
}

impl LecturerRepository for SqliteLecturerRepository<'_> {
    fn get_lecturer(&self, id: LecturerId) -> Option<Lecturer> {
        or_default_logged(
            "lecturer_get",
            self.query_first(&format!("{LECTURER_SELECT_SQL} WHERE id = ?1;"), [id]),
        )
    }

    fn list_lecturers(&self) -> Vec<Lecturer> {
        or_default_logged(
            "lecturer_list",
            self.query_lecturers(&format!("{LECTURER_SELECT_SQL} ORDER BY id ASC;"), []),
        )
    }

    fn save_lecturer(&self, lecturer: &mut Lecturer) {
        if let Some(id) = or_default_logged("lecturer_save", self.insert(lecturer).map(Some)) {
            lecturer.id = id;
        }
    }

    fn update_lecturer(&self, lecturer: &Lecturer) {
        or_default_logged("lecturer_update", self.try_update(lecturer));
    }

    fn delete_lecturer(&self, id: LecturerId) {
        or_default_logged("lecturer_delete", self.try_delete(id));
    }

    fn head_of_department(&self, department_name: &str) -> Option<Lecturer> {
        or_default_logged(
            "lecturer_head_of_department",
            self.query_first(
                &format!(
                    "{LECTURER_SELECT_SQL}
                     JOIN departments ON departments.head = lectors.id
                     WHERE departments.name = ?1
                     ORDER BY departments.id ASC
                     LIMIT 1;"
                ),
                [department_name],
            ),
        )
    }

    fn search_lecturers(&self, fragment: &str) -> Vec<Lecturer> {
        or_default_logged(
            "lecturer_search",
            self.query_lecturers(
                &format!(
                    "{LECTURER_SELECT_SQL}
                     WHERE instr(casefold(name), casefold(?1)) > 0
                        OR instr(casefold(surname), casefold(?1)) > 0
                     ORDER BY id ASC;"
                ),
                [fragment],
            ),
        )
    }
}

fn parse_lecturer_row(row: &Row<'_>) -> RepoResult<Lecturer> {
    Ok(Lecturer {
        id: row.get("id")?,
        name: row.get("name")?,
        surname: row.get("surname")?,
        degree: row.get("degree")?,
        salary: row.get("salary")?,
    })
}
