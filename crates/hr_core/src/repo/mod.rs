//! Repository contracts and storage implementations.
//!
//! # Responsibility
//! - Define the keyed CRUD primitives the service consumes.
//! - Provide an in-memory store and a SQLite-backed store.
//!
//! # Invariants
//! - Each primitive is atomic on its own; multi-step sequences are the
//!   caller's concern.
//! - Snapshots are copies; later writes never show through them.

pub mod hr_repo;
pub mod memory_repo;
pub mod sqlite_repo;
