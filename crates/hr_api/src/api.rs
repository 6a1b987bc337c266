//! Request-level API for positions and employees.
//!
//! # Responsibility
//! - Attach a correlation id to every request, minting one when absent.
//! - Parse raw text inputs (ids, salaries) before calling the service.
//! - Map every failure to a stable code and an HTTP-style status.
//! - Emit one access event per request with its duration.
//!
//! # Invariants
//! - Every response echoes the correlation id used for the call.
//! - Methods never panic; every outcome is an `ApiResponse`.

use hr_core::{
    Employee, HrRepository, HrService, Position, RequestContext, ServiceError, ServiceResult,
};
use log::{info, warn};
use rust_decimal::Decimal;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::Instant;
use uuid::Uuid;

pub const STATUS_OK: u16 = 200;
pub const STATUS_CREATED: u16 = 201;
pub const STATUS_NO_CONTENT: u16 = 204;

/// Failure half of an [`ApiResponse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Stable code, see [`ServiceError::code`].
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "bad_request",
            message: message.into(),
        }
    }

    /// HTTP-style status for this error code.
    pub fn status(&self) -> u16 {
        match self.code {
            "bad_request" | "parse_error" => 400,
            "not_found" => 404,
            "position_already_exists" | "employee_already_exists" => 409,
            "position_does_not_exist" => 422,
            _ => 500,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
        }
    }
}

/// Response envelope returned by every [`HrApi`] method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub correlation_id: String,
    pub body: Result<T, ApiError>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.body.is_ok()
    }
}

/// Inbound position fields; the salary is decimal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionPayload {
    pub name: String,
    pub salary: String,
}

/// Inbound employee fields; the position id is UUID text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeePayload {
    pub first_name: String,
    pub last_name: String,
    pub position_id: String,
}

/// Outbound position with identifiers and amounts as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionView {
    pub id: String,
    pub name: String,
    pub salary: String,
}

impl From<Position> for PositionView {
    fn from(value: Position) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            salary: value.salary.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeView {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub position_id: String,
}

impl From<Employee> for EmployeeView {
    fn from(value: Employee) -> Self {
        Self {
            id: value.id.to_string(),
            first_name: value.first_name,
            last_name: value.last_name,
            position_id: value.position_id.to_string(),
        }
    }
}

/// Adapter owning one [`HrService`].
pub struct HrApi<R: HrRepository> {
    service: HrService<R>,
}

impl<R: HrRepository> HrApi<R> {
    pub fn new(service: HrService<R>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &HrService<R> {
        &self.service
    }

    pub fn create_position(
        &self,
        correlation_id: Option<&str>,
        payload: &PositionPayload,
    ) -> ApiResponse<String> {
        self.handle("position_create", correlation_id, STATUS_CREATED, |ctx| {
            let position = Position::new(payload.name.as_str(), parse_salary(&payload.salary)?);
            Ok(self.service.create_position(ctx, &position)?)
        })
    }

    pub fn get_position(
        &self,
        correlation_id: Option<&str>,
        id: &str,
    ) -> ApiResponse<PositionView> {
        self.handle("position_get", correlation_id, STATUS_OK, |ctx| {
            Ok(self.service.get_position(ctx, id)?.into())
        })
    }

    /// Replaces the position at `id` with `payload`.
    pub fn update_position(
        &self,
        correlation_id: Option<&str>,
        id: &str,
        payload: &PositionPayload,
    ) -> ApiResponse<()> {
        self.handle("position_update", correlation_id, STATUS_NO_CONTENT, |ctx| {
            let position = Position::with_id(
                parse_id("position id", id)?,
                payload.name.as_str(),
                parse_salary(&payload.salary)?,
            );
            Ok(self.service.update_position(ctx, &position)?)
        })
    }

    pub fn delete_position(&self, correlation_id: Option<&str>, id: &str) -> ApiResponse<()> {
        self.handle("position_delete", correlation_id, STATUS_NO_CONTENT, |ctx| {
            Ok(self.service.delete_position(ctx, id)?)
        })
    }

    pub fn list_positions(
        &self,
        correlation_id: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> ApiResponse<Vec<PositionView>> {
        self.handle("position_list", correlation_id, STATUS_OK, |ctx| {
            into_views(self.service.list_positions(ctx, limit, offset))
        })
    }

    pub fn create_employee(
        &self,
        correlation_id: Option<&str>,
        payload: &EmployeePayload,
    ) -> ApiResponse<String> {
        self.handle("employee_create", correlation_id, STATUS_CREATED, |ctx| {
            let employee = Employee::new(
                payload.first_name.as_str(),
                payload.last_name.as_str(),
                parse_id("position id", &payload.position_id)?,
            );
            Ok(self.service.create_employee(ctx, &employee)?)
        })
    }

    pub fn get_employee(
        &self,
        correlation_id: Option<&str>,
        id: &str,
    ) -> ApiResponse<EmployeeView> {
        self.handle("employee_get", correlation_id, STATUS_OK, |ctx| {
            Ok(self.service.get_employee(ctx, id)?.into())
        })
    }

    pub fn update_employee(
        &self,
        correlation_id: Option<&str>,
        id: &str,
        payload: &EmployeePayload,
    ) -> ApiResponse<()> {
        self.handle("employee_update", correlation_id, STATUS_NO_CONTENT, |ctx| {
            let employee = Employee::with_id(
                parse_id("employee id", id)?,
                payload.first_name.as_str(),
                payload.last_name.as_str(),
                parse_id("position id", &payload.position_id)?,
            );
            Ok(self.service.update_employee(ctx, &employee)?)
        })
    }

    pub fn delete_employee(&self, correlation_id: Option<&str>, id: &str) -> ApiResponse<()> {
        self.handle("employee_delete", correlation_id, STATUS_NO_CONTENT, |ctx| {
            Ok(self.service.delete_employee(ctx, id)?)
        })
    }

    pub fn list_employees(
        &self,
        correlation_id: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> ApiResponse<Vec<EmployeeView>> {
        self.handle("employee_list", correlation_id, STATUS_OK, |ctx| {
            into_views(self.service.list_employees(ctx, limit, offset))
        })
    }

    fn handle<T>(
        &self,
        operation: &'static str,
        correlation_id: Option<&str>,
        success_status: u16,
        run: impl FnOnce(&RequestContext) -> Result<T, ApiError>,
    ) -> ApiResponse<T> {
        let started_at = Instant::now();
        let correlation_id = resolve_correlation_id(correlation_id);
        let ctx = RequestContext::with_correlation_id(correlation_id.as_str());

        let body = run(&ctx);
        let status = match &body {
            Ok(_) => success_status,
            Err(err) => err.status(),
        };
        let duration_ms = started_at.elapsed().as_millis();
        match &body {
            Err(err) if status >= 500 => warn!(
                "event=request_done module=api operation={operation} status={status} code={} \
                 duration_ms={duration_ms} correlation_id={correlation_id}",
                err.code
            ),
            Err(err) => info!(
                "event=request_done module=api operation={operation} status={status} code={} \
                 duration_ms={duration_ms} correlation_id={correlation_id}",
                err.code
            ),
            Ok(_) => info!(
                "event=request_done module=api operation={operation} status={status} \
                 duration_ms={duration_ms} correlation_id={correlation_id}"
            ),
        }

        ApiResponse {
            status,
            correlation_id,
            body,
        }
    }
}

fn resolve_correlation_id(inbound: Option<&str>) -> String {
    inbound
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

fn parse_id(field: &str, raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| ApiError::bad_request(format!("malformed {field} `{raw}`")))
}

fn parse_salary(raw: &str) -> Result<Decimal, ApiError> {
    Decimal::from_str(raw.trim())
        .map_err(|_| ApiError::bad_request(format!("malformed salary `{raw}`")))
}

fn into_views<T, V: From<T>>(result: ServiceResult<Vec<T>>) -> Result<Vec<V>, ApiError> {
    Ok(result?.into_iter().map(V::from).collect())
}

#[cfg(test)]
mod tests {
    use super::{EmployeePayload, HrApi, PositionPayload};
    use hr_core::{HrService, InMemoryHrRepository, SilentCorrelationObserver};

    fn api() -> HrApi<InMemoryHrRepository> {
        HrApi::new(HrService::with_observer(
            InMemoryHrRepository::new(),
            SilentCorrelationObserver,
        ))
    }

    fn worker() -> PositionPayload {
        PositionPayload {
            name: "worker".to_string(),
            salary: "500".to_string(),
        }
    }

    #[test]
    fn blank_or_missing_correlation_id_is_minted() {
        let api = api();
        let minted = api.list_positions(None, 1, 1);
        assert!(uuid::Uuid::parse_str(&minted.correlation_id).is_ok());

        let blank = api.list_positions(Some("  "), 1, 1);
        assert!(uuid::Uuid::parse_str(&blank.correlation_id).is_ok());
        assert_ne!(minted.correlation_id, blank.correlation_id);
    }

    #[test]
    fn inbound_correlation_id_is_echoed() {
        let response = api().list_positions(Some("req-42"), 1, 1);
        assert_eq!(response.correlation_id, "req-42");
        assert_eq!(response.status, 200);
    }

    #[test]
    fn create_then_get_position() {
        let api = api();
        let created = api.create_position(None, &worker());
        assert_eq!(created.status, 201);
        let id = created.body.unwrap();

        let fetched = api.get_position(None, &id);
        assert_eq!(fetched.status, 200);
        let view = fetched.body.unwrap();
        assert_eq!(view.id, id);
        assert_eq!(view.name, "worker");
        assert_eq!(view.salary, "500");
    }

    #[test]
    fn malformed_salary_is_bad_request_before_service() {
        let response = api().create_position(
            None,
            &PositionPayload {
                name: "worker".to_string(),
                salary: "five hundred".to_string(),
            },
        );
        assert_eq!(response.status, 400);
        assert_eq!(response.body.unwrap_err().code, "bad_request");
    }

    #[test]
    fn duplicate_position_is_conflict() {
        let api = api();
        assert!(api.create_position(None, &worker()).is_success());

        let again = api.create_position(
            None,
            &PositionPayload {
                name: "worker".to_string(),
                salary: "500.00".to_string(),
            },
        );
        assert_eq!(again.status, 409);
        assert_eq!(again.body.unwrap_err().code, "position_already_exists");
    }

    #[test]
    fn employee_for_unknown_position_is_unprocessable() {
        let response = api().create_employee(
            None,
            &EmployeePayload {
                first_name: "Big".to_string(),
                last_name: "Jo".to_string(),
                position_id: uuid::Uuid::new_v4().to_string(),
            },
        );
        assert_eq!(response.status, 422);
        assert_eq!(response.body.unwrap_err().code, "position_does_not_exist");
    }

    #[test]
    fn malformed_get_ids_keep_distinct_codes() {
        let api = api();
        let position = api.get_position(None, "9");
        assert_eq!(position.status, 400);
        assert_eq!(position.body.unwrap_err().code, "bad_request");

        let employee = api.get_employee(None, "9");
        assert_eq!(employee.status, 400);
        assert_eq!(employee.body.unwrap_err().code, "parse_error");
    }

    #[test]
    fn list_errors_map_to_statuses() {
        let api = api();
        assert_eq!(api.list_employees(None, 120, 1).status, 400);
        assert_eq!(api.list_employees(None, 1, 13).status, 404);
    }
}
