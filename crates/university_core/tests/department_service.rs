use rusqlite::Connection;
use university_core::db::open_db_in_memory;
use university_core::{
    Department, DepartmentService, Lecturer, LecturerService, MissingEntity, ServiceError,
    SqliteDepartmentRepository, SqliteLecturerRepository,
};

type SqliteDepartmentService<'conn> =
    DepartmentService<SqliteDepartmentRepository<'conn>, SqliteLecturerRepository<'conn>>;

fn service(conn: &Connection) -> SqliteDepartmentService<'_> {
    DepartmentService::new(
        SqliteDepartmentRepository::new(conn),
        LecturerService::new(SqliteLecturerRepository::new(conn)),
    )
}

fn hire(service: &SqliteDepartmentService<'_>, degree: &str, salary: i64) -> Lecturer {
    let mut lecturer = Lecturer::new("Ada", "Lovelace", degree, salary);
    service.lecturers().save(&mut lecturer).unwrap();
    lecturer
}

fn enroll(conn: &Connection, department: &Department, lecturer: &Lecturer) {
    conn.execute(
        "INSERT INTO departments_lectors (department_id, lector_id) VALUES (?1, ?2);",
        [department.id, lecturer.id],
    )
    .unwrap();
}

#[test]
fn save_assigns_id() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let head = hire(&service, "professor", 3000);

    let mut department = Department::new("Applied math", head.id);
    service.save(&mut department).unwrap();

    assert!(department.id > 0);
    assert_eq!(service.get_by_id(department.id).unwrap(), department);
    assert_eq!(service.get_all(), vec![department]);
}

#[test]
fn save_duplicate_name_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let head = hire(&service, "professor", 3000);
    service.save(&mut Department::new("Biology", head.id)).unwrap();

    let mut duplicate = Department::new("Biology", head.id);
    assert_eq!(
        service.save(&mut duplicate).unwrap_err(),
        ServiceError::DuplicateName("Biology".to_string())
    );
    assert_eq!(duplicate.id, 0);
    assert_eq!(service.get_all().len(), 1);
}

#[test]
fn save_copy_of_stored_department_is_duplicate() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let head = hire(&service, "professor", 3000);
    let mut stored = Department::new("Biology", head.id);
    service.save(&mut stored).unwrap();

    let mut copy = stored.clone();
    assert_eq!(
        service.save(&mut copy).unwrap_err(),
        ServiceError::DuplicateName("Biology".to_string())
    );
    assert_eq!(service.get_all(), vec![stored]);
}

#[test]
fn name_uniqueness_is_case_sensitive() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let head = hire(&service, "professor", 3000);
    service.save(&mut Department::new("Biology", head.id)).unwrap();

    service.save(&mut Department::new("biology", head.id)).unwrap();
    assert_eq!(service.get_all().len(), 2);
}

#[test]
fn save_with_unknown_head_is_not_found_and_store_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let mut department = Department::new("Biology", 7);
    assert_eq!(
        service.save(&mut department).unwrap_err(),
        ServiceError::NotFound(MissingEntity::Lecturer(7))
    );
    assert!(service.get_all().is_empty());
}

#[test]
fn save_validates_head_not_department_id() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let head = hire(&service, "professor", 3000);

    let mut department = Department::with_id(0, "Biology", head.id);
    service.save(&mut department).unwrap();

    let mut stale_id = Department::with_id(head.id, "Physics", head.id + 50);
    assert_eq!(
        service.save(&mut stale_id).unwrap_err(),
        ServiceError::NotFound(MissingEntity::Lecturer(head.id + 50))
    );
}

#[test]
fn update_keeping_own_name_succeeds() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let head = hire(&service, "professor", 3000);
    let next_head = hire(&service, "professor", 3500);
    let mut department = Department::new("Biology", head.id);
    service.save(&mut department).unwrap();

    department.head = next_head.id;
    service.update(&department).unwrap();

    assert_eq!(service.get_by_id(department.id).unwrap().head, next_head.id);
}

#[test]
fn update_to_other_departments_name_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let head = hire(&service, "professor", 3000);
    service.save(&mut Department::new("Biology", head.id)).unwrap();
    let mut physics = Department::new("Physics", head.id);
    service.save(&mut physics).unwrap();

    physics.name = "Biology".to_string();
    assert_eq!(
        service.update(&physics).unwrap_err(),
        ServiceError::DuplicateName("Biology".to_string())
    );
    assert_eq!(service.get_by_id(physics.id).unwrap().name, "Physics");
}

#[test]
fn update_unknown_department_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let head = hire(&service, "professor", 3000);

    assert_eq!(
        service.update(&Department::new("Biology", head.id)).unwrap_err(),
        ServiceError::NotFound(MissingEntity::Department(0))
    );
}

#[test]
fn update_with_unknown_head_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let head = hire(&service, "professor", 3000);
    let mut department = Department::new("Biology", head.id);
    service.save(&mut department).unwrap();

    department.head = head.id + 1;
    assert_eq!(
        service.update(&department).unwrap_err(),
        ServiceError::NotFound(MissingEntity::Lecturer(head.id + 1))
    );
    assert_eq!(service.get_by_id(department.id).unwrap().head, head.id);
}

#[test]
fn delete_unknown_id_is_noop() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let head = hire(&service, "professor", 3000);
    let mut department = Department::new("Biology", head.id);
    service.save(&mut department).unwrap();

    service.delete(department.id + 1);
    assert_eq!(service.get_all().len(), 1);
}

#[test]
fn aggregates_require_existing_department() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let missing = ServiceError::NotFound(MissingEntity::DepartmentNamed("Biology".to_string()));

    assert_eq!(
        service.get_average_salary_by_name("Biology").unwrap_err(),
        missing
    );
    assert_eq!(
        service.get_quantity_of_employee_by_name("Biology").unwrap_err(),
        missing
    );
    assert_eq!(
        service.get_degree_statistic_by_name("Biology").unwrap_err(),
        missing
    );
}

#[test]
fn aggregates_over_roster() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let head = hire(&service, "professor", 3000);
    let mut biology = Department::new("Biology", head.id);
    service.save(&mut biology).unwrap();

    assert_eq!(service.get_average_salary_by_name("Biology").unwrap(), 0.0);
    assert_eq!(service.get_quantity_of_employee_by_name("Biology").unwrap(), 0);
    assert!(service
        .get_degree_statistic_by_name("Biology")
        .unwrap()
        .is_empty());

    enroll(&conn, &biology, &head);
    assert_eq!(service.get_average_salary_by_name("Biology").unwrap(), 3000.0);
    assert_eq!(service.get_quantity_of_employee_by_name("Biology").unwrap(), 1);
    let statistic = service.get_degree_statistic_by_name("Biology").unwrap();
    assert_eq!(statistic.len(), 1);
    assert_eq!(statistic.get("professor"), Some(&1));
}

#[test]
fn head_of_department_comes_from_lecturer_service() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let head = hire(&service, "professor", 3000);
    service.save(&mut Department::new("Biology", head.id)).unwrap();

    assert_eq!(
        service.lecturers().get_head_of_department("Biology").unwrap(),
        head
    );
}

#[test]
fn search_folds_non_ascii_case() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let head = hire(&service, "professor", 3000);
    service
        .save(&mut Department::new("Économie", head.id))
        .unwrap();
    service.save(&mut Department::new("Physics", head.id)).unwrap();

    let hits = service.search_if_name_contains("écon");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Économie");
}

#[test]
fn search_returns_only_matching_departments() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let head = hire(&service, "professor", 3000);
    for name in ["Applied math", "Physics", "Biology"] {
        service.save(&mut Department::new(name, head.id)).unwrap();
    }

    let hits = service.search_if_name_contains("olo");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Biology");
}
