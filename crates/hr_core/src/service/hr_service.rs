//! Position and employee use-case service.
//!
//! # Responsibility
//! - Gate every call on the request correlation id.
//! - Enforce uniqueness on create and position existence on employee create.
//! - Page over repository snapshots.
//!
//! # Invariants
//! - No repository call happens before the correlation gate passes.
//! - Creates always assign a fresh UUIDv4, ignoring the caller's id.
//! - Check-then-insert runs under a per-kind write gate, so two concurrent
//!   creates with the same identity cannot both succeed.
//! - Position delete does not cascade; employees may keep a dangling
//!   `position_id`.
//! - Errors are returned, never logged here.

use crate::context::{CorrelationObserver, LogCorrelationObserver, RequestContext};
use crate::model::employee::{Employee, EmployeeId};
use crate::model::position::Position;
use crate::repo::hr_repo::HrRepository;
use crate::service::error::{ServiceError, ServiceResult};
use crate::service::pagination::{check_page_size, paginate};
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// Service facade over one [`HrRepository`].
pub struct HrService<R: HrRepository> {
    repo: R,
    observer: Box<dyn CorrelationObserver>,
    position_writes: Mutex<()>,
    employee_writes: Mutex<()>,
}

impl<R: HrRepository> HrService<R> {
    /// Creates a service that logs correlated calls through `log`.
    pub fn new(repo: R) -> Self {
        Self::with_observer(repo, LogCorrelationObserver)
    }

    /// Creates a service reporting correlated calls to `observer`.
    pub fn with_observer(repo: R, observer: impl CorrelationObserver + 'static) -> Self {
        Self {
            repo,
            observer: Box::new(observer),
            position_writes: Mutex::new(()),
            employee_writes: Mutex::new(()),
        }
    }

    /// Underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Creates a position unless one with the same name and salary exists.
    ///
    /// Returns the new identifier as text.
    pub fn create_position(
        &self,
        ctx: &RequestContext,
        position: &Position,
    ) -> ServiceResult<String> {
        self.require_correlation(ctx, "position_create")?;

        let _gate = lock(&self.position_writes);
        if self
            .repo
            .positions()?
            .iter()
            .any(|existing| existing.same_identity(position))
        {
            return Err(ServiceError::PositionAlreadyExists {
                name: position.name.clone(),
                salary: position.salary,
            });
        }

        let created = Position {
            id: Uuid::new_v4(),
            ..position.clone()
        };
        self.repo.add_position(&created)?;
        Ok(created.id.to_string())
    }

    /// Gets one position; malformed ids are `BadRequest`.
    pub fn get_position(&self, ctx: &RequestContext, id: &str) -> ServiceResult<Position> {
        self.require_correlation(ctx, "position_get")?;

        let parsed = Uuid::parse_str(id)
            .map_err(|_| ServiceError::BadRequest(format!("malformed position id `{id}`")))?;
        self.repo
            .position(parsed)?
            .ok_or_else(|| ServiceError::NotFound(format!("position {parsed}")))
    }

    /// Replaces a stored position; the nil id is `BadRequest`.
    pub fn update_position(&self, ctx: &RequestContext, position: &Position) -> ServiceResult<()> {
        self.require_correlation(ctx, "position_update")?;

        if position.id.is_nil() {
            return Err(ServiceError::BadRequest(
                "position id must not be nil".to_string(),
            ));
        }
        self.repo.update_position(position)?;
        Ok(())
    }

    /// Deletes a position by id text, without checking dependent employees.
    pub fn delete_position(&self, ctx: &RequestContext, id: &str) -> ServiceResult<()> {
        self.require_correlation(ctx, "position_delete")?;
        self.repo.delete_position(id)?;
        Ok(())
    }

    /// Lists page `offset` (1-based) of at most `limit` positions.
    pub fn list_positions(
        &self,
        ctx: &RequestContext,
        limit: i64,
        offset: i64,
    ) -> ServiceResult<Vec<Position>> {
        check_page_size(limit)?;
        self.require_correlation(ctx, "position_list")?;
        paginate(self.repo.positions()?, limit, offset)
    }

    /// Creates an employee for an existing position.
    ///
    /// Position existence is checked before name uniqueness.
    pub fn create_employee(
        &self,
        ctx: &RequestContext,
        employee: &Employee,
    ) -> ServiceResult<String> {
        self.require_correlation(ctx, "employee_create")?;

        let _gate = lock(&self.employee_writes);
        if self.repo.position(employee.position_id)?.is_none() {
            return Err(ServiceError::PositionDoesNotExist(employee.position_id));
        }
        if self
            .repo
            .employees()?
            .iter()
            .any(|existing| existing.same_identity(employee))
        {
            return Err(ServiceError::EmployeeAlreadyExists {
                first_name: employee.first_name.clone(),
                last_name: employee.last_name.clone(),
            });
        }

        let created = Employee {
            id: Uuid::new_v4(),
            ..employee.clone()
        };
        self.repo.add_employee(&created)?;
        Ok(created.id.to_string())
    }

    /// Gets one employee; malformed ids are `ParseError`.
    pub fn get_employee(&self, ctx: &RequestContext, id: &str) -> ServiceResult<Employee> {
        self.require_correlation(ctx, "employee_get")?;

        let parsed: EmployeeId =
            Uuid::parse_str(id).map_err(|_| ServiceError::ParseError(id.to_string()))?;
        self.repo
            .employee(parsed)?
            .ok_or_else(|| ServiceError::NotFound(format!("employee {parsed}")))
    }

    /// Replaces a stored employee; the nil id is `BadRequest`.
    ///
    /// `position_id` is not re-validated.
    pub fn update_employee(&self, ctx: &RequestContext, employee: &Employee) -> ServiceResult<()> {
        self.require_correlation(ctx, "employee_update")?;

        if employee.id.is_nil() {
            return Err(ServiceError::BadRequest(
                "employee id must not be nil".to_string(),
            ));
        }
        self.repo.update_employee(employee)?;
        Ok(())
    }

    pub fn delete_employee(&self, ctx: &RequestContext, id: &str) -> ServiceResult<()> {
        self.require_correlation(ctx, "employee_delete")?;
        self.repo.delete_employee(id)?;
        Ok(())
    }

    /// Lists page `offset` (1-based) of at most `limit` employees.
    pub fn list_employees(
        &self,
        ctx: &RequestContext,
        limit: i64,
        offset: i64,
    ) -> ServiceResult<Vec<Employee>> {
        check_page_size(limit)?;
        self.require_correlation(ctx, "employee_list")?;
        paginate(self.repo.employees()?, limit, offset)
    }

    fn require_correlation(
        &self,
        ctx: &RequestContext,
        operation: &'static str,
    ) -> ServiceResult<()> {
        let correlation_id = ctx.correlation_id().ok_or(ServiceError::LogError)?;
        self.observer.correlated(operation, correlation_id);
        Ok(())
    }
}

fn lock(gate: &Mutex<()>) -> MutexGuard<'_, ()> {
    gate.lock().unwrap_or_else(PoisonError::into_inner)
}
