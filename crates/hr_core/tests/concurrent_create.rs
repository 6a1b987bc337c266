use hr_core::{
    Employee, EmployeeRepository, HrService, InMemoryHrRepository, Position, PositionId,
    PositionRepository, RequestContext, ServiceError,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::thread;

const WRITERS: usize = 16;

#[test]
fn concurrent_position_creates_with_same_identity_insert_once() {
    let service = Arc::new(HrService::new(InMemoryHrRepository::new()));

    let handles = (0..WRITERS)
        .map(|_| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                service.create_position(
                    &RequestContext::correlated(),
                    &Position::new("worker", Decimal::new(500, 0)),
                )
            })
        })
        .collect::<Vec<_>>();

    let results = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect::<Vec<_>>();

    assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
    assert!(results.iter().filter(|result| result.is_err()).all(|result| matches!(
        result,
        Err(ServiceError::PositionAlreadyExists { .. })
    )));
    assert_eq!(service.repository().positions().unwrap().len(), 1);
}

#[test]
fn concurrent_employee_creates_with_same_name_insert_once() {
    let service = Arc::new(HrService::new(InMemoryHrRepository::new()));
    let position_id: PositionId = service
        .create_position(
            &RequestContext::correlated(),
            &Position::new("worker", Decimal::new(500, 0)),
        )
        .unwrap()
        .parse()
        .unwrap();

    let handles = (0..WRITERS)
        .map(|_| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                service.create_employee(
                    &RequestContext::correlated(),
                    &Employee::new("Nick", "Bobs", position_id),
                )
            })
        })
        .collect::<Vec<_>>();

    let successes = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(|result| result.is_ok())
        .count();

    assert_eq!(successes, 1);
    assert_eq!(service.repository().employees().unwrap().len(), 1);
}
