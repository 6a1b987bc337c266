//! HR domain records.
//!
//! # Responsibility
//! - Define the value records shared by repository and service layers.
//!
//! # Invariants
//! - Records carry no behaviour beyond construction helpers.
//! - `Uuid::nil()` is reserved to mean "identifier not assigned yet".

pub mod employee;
pub mod position;
