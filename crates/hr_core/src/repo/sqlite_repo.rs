//! SQLite-backed HR store.
//!
//! # Invariants
//! - Salaries are stored as decimal text and parsed back exactly.
//! - Snapshots iterate in insertion (`rowid`) order.
//! - Rows that fail to decode surface as `RepoError::InvalidData`.

use crate::model::employee::{Employee, EmployeeId};
use crate::model::position::{Position, PositionId};
use crate::repo::hr_repo::{EmployeeRepository, PositionRepository, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

const POSITION_SELECT_SQL: &str = "SELECT id, name, salary FROM positions";
const EMPLOYEE_SELECT_SQL: &str =
    "SELECT id, first_name, last_name, position_id FROM employees";

/// Store over a migrated connection from [`crate::db::open_db`].
pub struct SqliteHrRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteHrRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn ensure_changed(changed: usize, id: &str) -> RepoResult<()> {
        if changed == 0 {
            return Err(RepoError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

impl PositionRepository for SqliteHrRepository<'_> {
    fn add_position(&self, position: &Position) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO positions (id, name, salary) VALUES (?1, ?2, ?3);",
            params![
                position.id.to_string(),
                position.name.as_str(),
                position.salary.to_string(),
            ],
        )?;
        Ok(())
    }

    fn positions(&self) -> RepoResult<Vec<Position>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{POSITION_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut positions = Vec::new();
        while let Some(row) = rows.next()? {
            positions.push(parse_position_row(row)?);
        }
        Ok(positions)
    }

    fn position(&self, id: PositionId) -> RepoResult<Option<Position>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{POSITION_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_position_row(row)?)),
            None => Ok(None),
        }
    }

    fn update_position(&self, position: &Position) -> RepoResult<()> {
        let id = position.id.to_string();
        let changed = self.conn.execute(
            "UPDATE positions SET name = ?1, salary = ?2 WHERE id = ?3;",
            params![position.name.as_str(), position.salary.to_string(), id],
        )?;
        Self::ensure_changed(changed, &id)
    }

    fn delete_position(&self, id: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM positions WHERE id = ?1;", [id])?;
        Self::ensure_changed(changed, id)
    }
}

impl EmployeeRepository for SqliteHrRepository<'_> {
    fn add_employee(&self, employee: &Employee) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO employees (id, first_name, last_name, position_id)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                employee.id.to_string(),
                employee.first_name.as_str(),
                employee.last_name.as_str(),
                employee.position_id.to_string(),
            ],
        )?;
        Ok(())
    }

    fn employees(&self) -> RepoResult<Vec<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut employees = Vec::new();
        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }
        Ok(employees)
    }

    fn employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        self.conn
            .query_row(
                &format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1;"),
                [id.to_string()],
                |row| Ok(parse_employee_row(row)),
            )
            .optional()?
            .transpose()
    }

    fn update_employee(&self, employee: &Employee) -> RepoResult<()> {
        let id = employee.id.to_string();
        let changed = self.conn.execute(
            "UPDATE employees
             SET first_name = ?1, last_name = ?2, position_id = ?3
             WHERE id = ?4;",
            params![
                employee.first_name.as_str(),
                employee.last_name.as_str(),
                employee.position_id.to_string(),
                id,
            ],
        )?;
        Self::ensure_changed(changed, &id)
    }

    fn delete_employee(&self, id: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM employees WHERE id = ?1;", [id])?;
        Self::ensure_changed(changed, id)
    }
}

fn parse_position_row(row: &Row<'_>) -> RepoResult<Position> {
    let salary_text: String = row.get("salary")?;
    let salary = Decimal::from_str(&salary_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid salary `{salary_text}` in positions.salary"))
    })?;

    Ok(Position {
        id: parse_uuid_column(row, "positions", "id")?,
        name: row.get("name")?,
        salary,
    })
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    Ok(Employee {
        id: parse_uuid_column(row, "employees", "id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        position_id: parse_uuid_column(row, "employees", "position_id")?,
    })
}

fn parse_uuid_column(row: &Row<'_>, table: &str, column: &str) -> RepoResult<Uuid> {
    let text: String = row.get(column)?;
    Uuid::parse_str(&text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{text}` in {table}.{column}"))
    })
}
