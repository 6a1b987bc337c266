//! Keyed CRUD contracts for positions and employees.
//!
//! # Invariants
//! - `positions()` / `employees()` return a point-in-time snapshot in the
//!   store's own iteration order.
//! - `update_*` and `delete_*` report an unknown key as `RepoError::NotFound`.
//! - `delete_*` takes the raw identifier text and never parses it. Keys are
//!   stored in canonical lower-case hyphenated form, so a non-canonical
//!   spelling that `position()` / `employee()` would resolve after parsing
//!   still deletes nothing and reports `NotFound`.

use crate::db::DbError;
use crate::model::employee::{Employee, EmployeeId};
use crate::model::position::{Position, PositionId};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    /// No record is stored under the given identifier text.
    NotFound(String),
    Db(DbError),
    /// A stored row could not be decoded into a record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid stored record: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Position storage primitives.
pub trait PositionRepository {
    fn add_position(&self, position: &Position) -> RepoResult<()>;
    fn positions(&self) -> RepoResult<Vec<Position>>;
    fn position(&self, id: PositionId) -> RepoResult<Option<Position>>;
    fn update_position(&self, position: &Position) -> RepoResult<()>;
    /// Removes the row whose stored key equals `id` exactly.
    fn delete_position(&self, id: &str) -> RepoResult<()>;
}

/// Employee storage primitives.
pub trait EmployeeRepository {
    fn add_employee(&self, employee: &Employee) -> RepoResult<()>;
    fn employees(&self) -> RepoResult<Vec<Employee>>;
    fn employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    fn update_employee(&self, employee: &Employee) -> RepoResult<()>;
    /// Removes the row whose stored key equals `id` exactly.
    fn delete_employee(&self, id: &str) -> RepoResult<()>;
}

/// Both record kinds behind one store, as the service needs them.
pub trait HrRepository: PositionRepository + EmployeeRepository {}

impl<T: PositionRepository + EmployeeRepository> HrRepository for T {}

impl<R: PositionRepository + ?Sized> PositionRepository for &R {
    fn add_position(&self, position: &Position) -> RepoResult<()> {
        (**self).add_position(position)
    }

    fn positions(&self) -> RepoResult<Vec<Position>> {
        (**self).positions()
    }

    fn position(&self, id: PositionId) -> RepoResult<Option<Position>> {
        (**self).position(id)
    }

    fn update_position(&self, position: &Position) -> RepoResult<()> {
        (**self).update_position(position)
    }

    fn delete_position(&self, id: &str) -> RepoResult<()> {
        (**self).delete_position(id)
    }
}

impl<R: EmployeeRepository + ?Sized> EmployeeRepository for &R {
    fn add_employee(&self, employee: &Employee) -> RepoResult<()> {
        (**self).add_employee(employee)
    }

    fn employees(&self) -> RepoResult<Vec<Employee>> {
        (**self).employees()
    }

    fn employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        (**self).employee(id)
    }

    fn update_employee(&self, employee: &Employee) -> RepoResult<()> {
        (**self).update_employee(employee)
    }

    fn delete_employee(&self, id: &str) -> RepoResult<()> {
        (**self).delete_employee(id)
    }
}
