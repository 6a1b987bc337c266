//! HR use-case services.
//!
//! # Responsibility
//! - Validate requests and enforce business invariants over repositories.
//! - Keep transport adapters decoupled from storage details.

pub mod error;
pub mod hr_service;
pub mod pagination;
