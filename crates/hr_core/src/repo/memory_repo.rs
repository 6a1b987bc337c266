//! In-memory HR store.
//!
//! # Responsibility
//! - Keep positions and employees in process memory, keyed by id text.
//! - Serve concurrent callers behind one `RwLock` per record kind.
//!
//! # Invariants
//! - Iteration order is insertion order; updates keep a record's slot.
//! - Snapshots are copy-on-read.

use crate::model::employee::{Employee, EmployeeId};
use crate::model::position::{Position, PositionId};
use crate::repo::hr_repo::{EmployeeRepository, PositionRepository, RepoError, RepoResult};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug)]
struct Table<T> {
    order: Vec<String>,
    rows: HashMap<String, T>,
}

impl<T: Clone> Table<T> {
    fn upsert(&mut self, key: String, value: T) {
        if !self.rows.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.rows.insert(key, value);
    }

    fn replace(&mut self, key: &str, value: T) -> RepoResult<()> {
        match self.rows.get_mut(key) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(RepoError::NotFound(key.to_string())),
        }
    }

    fn remove(&mut self, key: &str) -> RepoResult<()> {
        if self.rows.remove(key).is_none() {
            return Err(RepoError::NotFound(key.to_string()));
        }
        self.order.retain(|existing| existing != key);
        Ok(())
    }

    fn get(&self, key: &str) -> Option<T> {
        self.rows.get(key).cloned()
    }

    fn snapshot(&self) -> Vec<T> {
        self.order
            .iter()
            .filter_map(|key| self.rows.get(key).cloned())
            .collect()
    }
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            rows: HashMap::new(),
        }
    }
}

/// Process-local store for both record kinds.
#[derive(Debug, Default)]
pub struct InMemoryHrRepository {
    positions: RwLock<Table<Position>>,
    employees: RwLock<Table<Employee>>,
}

impl InMemoryHrRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

// Tables hold plain maps that are never left half-written, so a poisoned
// lock is still safe to reuse.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl PositionRepository for InMemoryHrRepository {
    fn add_position(&self, position: &Position) -> RepoResult<()> {
        write(&self.positions).upsert(position.id.to_string(), position.clone());
        Ok(())
    }

    fn positions(&self) -> RepoResult<Vec<Position>> {
        Ok(read(&self.positions).snapshot())
    }

    fn position(&self, id: PositionId) -> RepoResult<Option<Position>> {
        Ok(read(&self.positions).get(&id.to_string()))
    }

    fn update_position(&self, position: &Position) -> RepoResult<()> {
        write(&self.positions).replace(&position.id.to_string(), position.clone())
    }

    fn delete_position(&self, id: &str) -> RepoResult<()> {
        write(&self.positions).remove(id)
    }
}

impl EmployeeRepository for InMemoryHrRepository {
    fn add_employee(&self, employee: &Employee) -> RepoResult<()> {
        write(&self.employees).upsert(employee.id.to_string(), employee.clone());
        Ok(())
    }

    fn employees(&self) -> RepoResult<Vec<Employee>> {
        Ok(read(&self.employees).snapshot())
    }

    fn employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        Ok(read(&self.employees).get(&id.to_string()))
    }

    fn update_employee(&self, employee: &Employee) -> RepoResult<()> {
        write(&self.employees).replace(&employee.id.to_string(), employee.clone())
    }

    fn delete_employee(&self, id: &str) -> RepoResult<()> {
        write(&self.employees).remove(id)
    }
}
