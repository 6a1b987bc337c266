//! Closed failure taxonomy returned by [`super::hr_service::HrService`].

use crate::model::position::PositionId;
use crate::repo::hr_repo::RepoError;
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// Request context carries no string correlation id.
    LogError,
    /// Malformed position id, oversized page, or nil id on update.
    BadRequest(String),
    /// Unknown identifier, or page beyond the available range.
    NotFound(String),
    /// Malformed employee id.
    ParseError(String),
    PositionAlreadyExists { name: String, salary: Decimal },
    PositionDoesNotExist(PositionId),
    EmployeeAlreadyExists { first_name: String, last_name: String },
    /// Storage failure other than a missing record.
    Repository(RepoError),
}

impl ServiceError {
    /// Stable machine-readable code for transport adapters.
    pub fn code(&self) -> &'static str {
        match self {
            Self::LogError => "log_error",
            Self::BadRequest(_) => "bad_request",
            Self::NotFound(_) => "not_found",
            Self::ParseError(_) => "parse_error",
            Self::PositionAlreadyExists { .. } => "position_already_exists",
            Self::PositionDoesNotExist(_) => "position_does_not_exist",
            Self::EmployeeAlreadyExists { .. } => "employee_already_exists",
            Self::Repository(_) => "storage_error",
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LogError => write!(f, "correlation id missing from request context"),
            Self::BadRequest(reason) => write!(f, "bad request: {reason}"),
            Self::NotFound(what) => write!(f, "not found: {what}"),
            Self::ParseError(input) => write!(f, "cannot parse identifier `{input}`"),
            Self::PositionAlreadyExists { name, salary } => {
                write!(f, "position `{name}` with salary {salary} already exists")
            }
            Self::PositionDoesNotExist(id) => write!(f, "position does not exist: {id}"),
            Self::EmployeeAlreadyExists {
                first_name,
                last_name,
            } => write!(f, "employee `{first_name} {last_name}` already exists"),
            Self::Repository(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repository(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ServiceError;
    use crate::repo::hr_repo::RepoError;

    #[test]
    fn repo_not_found_keeps_not_found_kind() {
        let err = ServiceError::from(RepoError::NotFound("abc".to_string()));
        assert!(matches!(err, ServiceError::NotFound(ref id) if id == "abc"));
        assert_eq!(err.code(), "not_found");
    }

    #[test]
    fn other_repo_errors_are_storage_errors() {
        let err = ServiceError::from(RepoError::InvalidData("bad row".to_string()));
        assert_eq!(err.code(), "storage_error");
        assert!(std::error::Error::source(&err).is_some());
    }
}
