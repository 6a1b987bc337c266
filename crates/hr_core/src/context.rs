//! Request context and correlation gate.
//!
//! # Responsibility
//! - Carry string-keyed request values from transport into the service.
//! - Decide whether a call is correlated (pure precondition).
//! - Report successful correlation through an injected observer hook.
//!
//! # Invariants
//! - A `String` or `&'static str` stored under [`CORRELATION_ID_KEY`] counts
//!   as a correlation id; any other type under that key is treated as absent.
//! - The gate never mutates the context.

use log::info;
use std::any::Any;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::sync::Mutex;
use uuid::Uuid;

/// Well-known context key holding the request correlation id.
pub const CORRELATION_ID_KEY: &str = "correlation_id";

/// String-keyed value store attached to every service call.
#[derive(Default)]
pub struct RequestContext {
    values: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl RequestContext {
    /// Empty context, without any correlation id.
    pub fn new() -> Self {
        Self::default()
    }

    /// Context carrying the given correlation id.
    pub fn with_correlation_id(correlation_id: impl Into<String>) -> Self {
        Self::new().with_value(CORRELATION_ID_KEY, correlation_id.into())
    }

    /// Context carrying a freshly minted UUIDv4 correlation id.
    pub fn correlated() -> Self {
        Self::with_correlation_id(Uuid::new_v4().to_string())
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn with_value<T: Any + Send + Sync>(mut self, key: impl Into<String>, value: T) -> Self {
        self.values.insert(key.into(), Box::new(value));
        self
    }

    /// Looks up `key` and downcasts it to `T`.
    ///
    /// Returns `None` when the key is missing or holds another type.
    pub fn value<T: Any>(&self, key: &str) -> Option<&T> {
        self.values.get(key).and_then(|value| value.downcast_ref::<T>())
    }

    /// Returns the correlation id when present and string-typed.
    pub fn correlation_id(&self) -> Option<&str> {
        self.value::<String>(CORRELATION_ID_KEY)
            .map(String::as_str)
            .or_else(|| self.value::<&'static str>(CORRELATION_ID_KEY).copied())
    }
}

impl Debug for RequestContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut keys = self.values.keys().collect::<Vec<_>>();
        keys.sort();
        f.debug_struct("RequestContext")
            .field("keys", &keys)
            .field("correlation_id", &self.correlation_id())
            .finish()
    }
}

/// Observability hook invoked after a call passes the correlation gate.
pub trait CorrelationObserver: Send + Sync {
    fn correlated(&self, operation: &'static str, correlation_id: &str);
}

/// Default observer: one structured `log` event per correlated call.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogCorrelationObserver;

impl CorrelationObserver for LogCorrelationObserver {
    fn correlated(&self, operation: &'static str, correlation_id: &str) {
        info!(
            "event=request_correlated module=service operation={} correlation_id={}",
            operation, correlation_id
        );
    }
}

/// Observer that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentCorrelationObserver;

impl CorrelationObserver for SilentCorrelationObserver {
    fn correlated(&self, _operation: &'static str, _correlation_id: &str) {}
}

/// Observer that keeps `(operation, correlation_id)` pairs in memory.
///
/// Used by callers that need to assert on correlation traffic.
#[derive(Debug, Default)]
pub struct RecordingCorrelationObserver {
    events: Mutex<Vec<(&'static str, String)>>,
}

impl RecordingCorrelationObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded events in arrival order.
    pub fn events(&self) -> Vec<(&'static str, String)> {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl CorrelationObserver for RecordingCorrelationObserver {
    fn correlated(&self, operation: &'static str, correlation_id: &str) {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push((operation, correlation_id.to_string()));
    }
}

impl<T: CorrelationObserver + ?Sized> CorrelationObserver for std::sync::Arc<T> {
    fn correlated(&self, operation: &'static str, correlation_id: &str) {
        (**self).correlated(operation, correlation_id);
    }
}
