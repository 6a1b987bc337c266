//! Core business rules for the HR record service.
//! This crate owns every position/employee invariant; adapters only translate.

pub mod config;
pub mod context;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, CoreConfig};
pub use context::{
    CorrelationObserver, LogCorrelationObserver, RecordingCorrelationObserver, RequestContext,
    SilentCorrelationObserver, CORRELATION_ID_KEY,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::employee::{Employee, EmployeeId};
pub use model::position::{Position, PositionId};
pub use repo::hr_repo::{
    EmployeeRepository, HrRepository, PositionRepository, RepoError, RepoResult,
};
pub use repo::memory_repo::InMemoryHrRepository;
pub use repo::sqlite_repo::SqliteHrRepository;
pub use service::error::{ServiceError, ServiceResult};
pub use service::hr_service::HrService;
pub use service::pagination::MAX_PAGE_SIZE;

/// Minimal health-check API for adapter wiring.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
