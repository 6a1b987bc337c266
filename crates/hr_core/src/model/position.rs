//! Position record.
//!
//! # Invariants
//! - Uniqueness identity is the `(name, salary)` pair.
//! - `salary` compares by exact decimal value, so `500` equals `500.00`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a position.
pub type PositionId = Uuid;

/// Job position with an exact salary amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub id: PositionId,
    pub name: String,
    /// Serialized as a decimal string to keep the exact scale on the wire.
    pub salary: Decimal,
}

impl Position {
    /// Creates an unsaved position carrying the nil identifier.
    ///
    /// The service assigns the real identifier on create.
    pub fn new(name: impl Into<String>, salary: Decimal) -> Self {
        Self::with_id(Uuid::nil(), name, salary)
    }

    /// Creates a position with a caller-provided identifier.
    pub fn with_id(id: PositionId, name: impl Into<String>, salary: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            salary,
        }
    }

    /// Returns whether `other` collides with this position's uniqueness key.
    pub fn same_identity(&self, other: &Position) -> bool {
        self.name == other.name && self.salary == other.salary
    }
}

#[cfg(test)]
mod tests {
    use super::Position;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn new_position_carries_nil_id() {
        let position = Position::new("worker", Decimal::new(500, 0));
        assert!(position.id.is_nil());
    }

    #[test]
    fn identity_ignores_decimal_scale() {
        let whole = Position::new("worker", Decimal::new(500, 0));
        let scaled = Position::new("worker", Decimal::from_str("500.00").unwrap());
        assert!(whole.same_identity(&scaled));

        let other_name = Position::new("lead", Decimal::new(500, 0));
        assert!(!whole.same_identity(&other_name));
    }

    #[test]
    fn salary_serializes_as_string() {
        let position = Position::new("worker", Decimal::from_str("1250.50").unwrap());
        let json = serde_json::to_value(&position).unwrap();
        assert_eq!(json["salary"], "1250.50");
        assert_eq!(json["name"], "worker");
    }
}
