use hr_core::db::{open_db, open_db_in_memory};
use hr_core::{
    Employee, EmployeeRepository, HrService, Position, PositionRepository, RepoError,
    RequestContext, ServiceError, SqliteHrRepository,
};
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

fn ctx() -> RequestContext {
    RequestContext::correlated()
}

#[test]
fn salary_scale_survives_storage() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHrRepository::new(&conn);

    let position = Position::with_id(
        Uuid::new_v4(),
        "analyst",
        Decimal::from_str("1234.50").unwrap(),
    );
    repo.add_position(&position).unwrap();

    let loaded = repo.position(position.id).unwrap().unwrap();
    assert_eq!(loaded, position);
    assert_eq!(loaded.salary.to_string(), "1234.50");
}

#[test]
fn snapshots_follow_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHrRepository::new(&conn);

    let names = ["zeta", "alpha", "mid"];
    for name in names {
        repo.add_position(&Position::with_id(Uuid::new_v4(), name, Decimal::ONE))
            .unwrap();
    }

    let listed = repo
        .positions()
        .unwrap()
        .into_iter()
        .map(|position| position.name)
        .collect::<Vec<_>>();
    assert_eq!(listed, names);
}

#[test]
fn update_and_delete_unknown_rows_are_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHrRepository::new(&conn);

    let ghost = Employee::with_id(Uuid::new_v4(), "No", "Body", Uuid::new_v4());
    assert!(matches!(
        repo.update_employee(&ghost),
        Err(RepoError::NotFound(id)) if id == ghost.id.to_string()
    ));
    assert!(matches!(
        repo.delete_employee("9"),
        Err(RepoError::NotFound(id)) if id == "9"
    ));
    assert!(repo.employee(ghost.id).unwrap().is_none());
}

#[test]
fn corrupt_rows_surface_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO positions (id, name, salary) VALUES (?1, 'worker', 'lots');",
        [Uuid::new_v4().to_string()],
    )
    .unwrap();

    let repo = SqliteHrRepository::new(&conn);
    assert!(matches!(repo.positions(), Err(RepoError::InvalidData(_))));

    let service = HrService::new(repo);
    let err = service.list_positions(&ctx(), 1, 1).unwrap_err();
    assert!(matches!(err, ServiceError::Repository(RepoError::InvalidData(_))));
    assert_eq!(err.code(), "storage_error");
}

#[test]
fn service_flow_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hr.sqlite3");

    let (position_id, employee_id) = {
        let conn = open_db(&path).unwrap();
        let service = HrService::new(SqliteHrRepository::new(&conn));
        let position_id = service
            .create_position(&ctx(), &Position::new("worker", Decimal::new(500, 0)))
            .unwrap();
        let employee_id = service
            .create_employee(
                &ctx(),
                &Employee::new("Nick", "Bobs", Uuid::parse_str(&position_id).unwrap()),
            )
            .unwrap();
        (position_id, employee_id)
    };

    let conn = open_db(&path).unwrap();
    let service = HrService::new(SqliteHrRepository::new(&conn));

    let position = service.get_position(&ctx(), &position_id).unwrap();
    assert_eq!(position.salary, Decimal::from_str("500.00").unwrap());

    let employee = service.get_employee(&ctx(), &employee_id).unwrap();
    assert_eq!(employee.position_id, position.id);

    assert!(matches!(
        service.create_position(
            &ctx(),
            &Position::new("worker", Decimal::from_str("500.0").unwrap())
        ),
        Err(ServiceError::PositionAlreadyExists { .. })
    ));
    assert!(matches!(
        service.create_employee(&ctx(), &Employee::new("Nick", "Bobs", position.id)),
        Err(ServiceError::EmployeeAlreadyExists { .. })
    ));
}

#[test]
fn sqlite_pagination_matches_memory_semantics() {
    let conn = open_db_in_memory().unwrap();
    let service = HrService::new(SqliteHrRepository::new(&conn));

    assert!(service.list_employees(&ctx(), 1, 1).unwrap().is_empty());

    let first = service
        .create_position(&ctx(), &Position::new("worker", Decimal::new(500, 0)))
        .unwrap();
    let second = service
        .create_position(&ctx(), &Position::new("lead", Decimal::new(2000, 0)))
        .unwrap();

    let page = service.list_positions(&ctx(), 2, 1).unwrap();
    let ids = page.iter().map(|p| p.id.to_string()).collect::<Vec<_>>();
    assert_eq!(ids, vec![first, second]);
    assert!(matches!(
        service.list_positions(&ctx(), 1, 13),
        Err(ServiceError::NotFound(_))
    ));
}
