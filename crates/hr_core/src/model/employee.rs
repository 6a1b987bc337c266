//! Employee record.
//!
//! # Invariants
//! - Uniqueness identity is the `(first_name, last_name)` pair, regardless of
//!   position.
//! - `position_id` is checked against existing positions only on create.

use super::position::PositionId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of an employee.
pub type EmployeeId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub position_id: PositionId,
}

impl Employee {
    /// Creates an unsaved employee carrying the nil identifier.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        position_id: PositionId,
    ) -> Self {
        Self::with_id(Uuid::nil(), first_name, last_name, position_id)
    }

    pub fn with_id(
        id: EmployeeId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        position_id: PositionId,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            position_id,
        }
    }

    /// Returns whether `other` has the same full name.
    pub fn same_identity(&self, other: &Employee) -> bool {
        self.first_name == other.first_name && self.last_name == other.last_name
    }
}

#[cfg(test)]
mod tests {
    use super::Employee;
    use uuid::Uuid;

    #[test]
    fn identity_ignores_position() {
        let first = Employee::new("Nick", "Bobs", Uuid::new_v4());
        let second = Employee::new("Nick", "Bobs", Uuid::new_v4());
        assert!(first.same_identity(&second));

        let other = Employee::new("Nick", "Daddy", first.position_id);
        assert!(!first.same_identity(&other));
    }
}
