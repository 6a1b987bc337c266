//! Caller-facing adapter over `hr_core`.
//!
//! Translates raw request inputs into service calls and service results into
//! status-coded envelopes. Holds no business rules.

pub mod api;

pub use api::{
    ApiError, ApiResponse, EmployeePayload, EmployeeView, HrApi, PositionPayload, PositionView,
};
