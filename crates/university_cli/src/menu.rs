//! Interactive department menu.
//!
//! # Responsibility
//! - Read actions and arguments line by line and render service results.
//! - Print service errors and keep going; no action ends the session.

use std::io::{self, BufRead, Write};
use university_core::{DepartmentRepository, DepartmentService, LecturerRepository};

const MENU_TEXT: &str = "a. Get head of department
b. Get department statistic
c. Get average salary by department
d. Get number of employees in the department
e. Global search
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    HeadOfDepartment,
    DegreeStatistic,
    AverageSalary,
    EmployeeCount,
    GlobalSearch,
}

impl MenuAction {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "a" => Some(Self::HeadOfDepartment),
            "b" => Some(Self::DegreeStatistic),
            "c" => Some(Self::AverageSalary),
            "d" => Some(Self::EmployeeCount),
            "e" => Some(Self::GlobalSearch),
            _ => None,
        }
    }
}

pub struct Menu<'svc, D, L, R, W>
where
    D: DepartmentRepository,
    L: LecturerRepository,
{
    departments: &'svc DepartmentService<D, L>,
    input: R,
    output: W,
}

impl<'svc, D, L, R, W> Menu<'svc, D, L, R, W>
where
    D: DepartmentRepository,
    L: LecturerRepository,
    R: BufRead,
    W: Write,
{
    pub fn new(departments: &'svc DepartmentService<D, L>, input: R, output: W) -> Self {
        Self {
            departments,
            input,
            output,
        }
    }

    /// Runs actions until the user types `exit` or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            write!(self.output, "{MENU_TEXT}\nCHOOSE ACTION: ")?;
            self.output.flush()?;
            let Some(choice) = self.read_line()? else {
                return Ok(());
            };

            match MenuAction::parse(&choice) {
                Some(action) => {
                    if !self.run_action(action)? {
                        return Ok(());
                    }
                }
                None => writeln!(self.output, "Unknown action `{choice}`")?,
            }

            writeln!(self.output, "Enter exit to exit or whatever to continue")?;
            match self.read_line()? {
                Some(answer) if answer != "exit" => {}
                _ => return Ok(()),
            }
        }
    }

    /// Returns `false` when input ended while reading the action argument.
    fn run_action(&mut self, action: MenuAction) -> io::Result<bool> {
        let prompt = match action {
            MenuAction::GlobalSearch => "Enter template: ",
            _ => "Enter department name: ",
        };
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let Some(argument) = self.read_line()? else {
            return Ok(false);
        };

        match action {
            MenuAction::HeadOfDepartment => self.print_head(&argument)?,
            MenuAction::DegreeStatistic => self.print_statistic(&argument)?,
            MenuAction::AverageSalary => self.print_average_salary(&argument)?,
            MenuAction::EmployeeCount => self.print_employee_count(&argument)?,
            MenuAction::GlobalSearch => self.print_search(&argument)?,
        }
        Ok(true)
    }

    fn print_head(&mut self, name: &str) -> io::Result<()> {
        match self.departments.lecturers().get_head_of_department(name) {
            Ok(head) => writeln!(self.output, "Head of department is {}", head.full_name()),
            Err(err) => writeln!(self.output, "Error: {err}"),
        }
    }

    fn print_statistic(&mut self, name: &str) -> io::Result<()> {
        match self.departments.get_degree_statistic_by_name(name) {
            Ok(statistic) if statistic.is_empty() => {
                writeln!(self.output, "There are no employees in the department")
            }
            Ok(statistic) => {
                for (degree, count) in &statistic {
                    writeln!(self.output, "{degree}: {count}")?;
                }
                Ok(())
            }
            Err(err) => writeln!(self.output, "Error: {err}"),
        }
    }

    fn print_average_salary(&mut self, name: &str) -> io::Result<()> {
        match self.departments.get_average_salary_by_name(name) {
            Ok(average) => writeln!(
                self.output,
                "Average salary in the department is {average:.2}"
            ),
            Err(err) => writeln!(self.output, "Error: {err}"),
        }
    }

    fn print_employee_count(&mut self, name: &str) -> io::Result<()> {
        match self.departments.get_quantity_of_employee_by_name(name) {
            Ok(count) => writeln!(
                self.output,
                "Number of employees in the department is {count}"
            ),
            Err(err) => writeln!(self.output, "Error: {err}"),
        }
    }

    fn print_search(&mut self, template: &str) -> io::Result<()> {
        let lecturers = self.departments.lecturers().search_if_name_contains(template);
        let departments = self.departments.search_if_name_contains(template);
        if lecturers.is_empty() && departments.is_empty() {
            return writeln!(self.output, "Nothing found");
        }
        for lecturer in &lecturers {
            writeln!(self.output, "{}", lecturer.full_name())?;
        }
        for department in &departments {
            writeln!(self.output, "{}", department.name)?;
        }
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{Menu, MenuAction};
    use rusqlite::Connection;
    use university_core::db::open_db_in_memory;
    use university_core::{
        Department, DepartmentService, Lecturer, LecturerService, SqliteDepartmentRepository,
        SqliteLecturerRepository,
    };

    fn seeded() -> Connection {
        let conn = open_db_in_memory().unwrap();
        let service = DepartmentService::new(
            SqliteDepartmentRepository::new(&conn),
            LecturerService::new(SqliteLecturerRepository::new(&conn)),
        );
        let mut head = Lecturer::new("Ada", "Lovelace", "professor", 3000);
        service.lecturers().save(&mut head).unwrap();
        let mut assistant = Lecturer::new("Charles", "Babbage", "assistant", 1001);
        service.lecturers().save(&mut assistant).unwrap();
        let mut department = Department::new("Applied math", head.id);
        service.save(&mut department).unwrap();
        conn.execute(
            "INSERT INTO departments_lectors (department_id, lector_id) VALUES (?1, ?2), (?1, ?3);",
            [department.id, head.id, assistant.id],
        )
        .unwrap();
        conn
    }

    fn run_session(conn: &Connection, input: &str) -> String {
        let service = DepartmentService::new(
            SqliteDepartmentRepository::new(conn),
            LecturerService::new(SqliteLecturerRepository::new(conn)),
        );
        let mut output = Vec::new();
        Menu::new(&service, input.as_bytes(), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn parse_accepts_menu_letters_only() {
        assert_eq!(MenuAction::parse(" A "), Some(MenuAction::HeadOfDepartment));
        assert_eq!(MenuAction::parse("e"), Some(MenuAction::GlobalSearch));
        assert_eq!(MenuAction::parse("f"), None);
    }

    #[test]
    fn head_and_employee_count_are_printed() {
        let conn = seeded();
        let output = run_session(&conn, "a\nApplied math\nmore\nd\nApplied math\nexit\n");

        assert!(output.contains("Head of department is Ada Lovelace"));
        assert!(output.contains("Number of employees in the department is 2"));
    }

    #[test]
    fn average_salary_is_rounded_to_two_decimals() {
        let conn = seeded();
        let output = run_session(&conn, "c\nApplied math\nexit\n");

        assert!(output.contains("Average salary in the department is 2000.50"));
    }

    #[test]
    fn statistic_lists_degrees_in_label_order() {
        let conn = seeded();
        let output = run_session(&conn, "b\nApplied math\nexit\n");

        let assistant = output.find("assistant: 1").unwrap();
        let professor = output.find("professor: 1").unwrap();
        assert!(assistant < professor);
    }

    #[test]
    fn global_search_prints_lecturers_then_departments() {
        let conn = seeded();
        let output = run_session(&conn, "e\nA\nexit\n");

        let lecturer = output.find("Ada Lovelace").unwrap();
        let department = output.find("\nApplied math\n").unwrap();
        assert!(lecturer < department);
    }

    #[test]
    fn errors_are_reported_and_session_continues() {
        let conn = seeded();
        let output = run_session(&conn, "b\nBiology\nagain\nz\nexit\n");

        assert!(output.contains("Error: department with name `Biology` is not present"));
        assert!(output.contains("Unknown action `z`"));
    }

    #[test]
    fn end_of_input_ends_session() {
        let conn = seeded();
        let output = run_session(&conn, "a\n");

        assert!(output.ends_with("Enter department name: "));
    }
}
