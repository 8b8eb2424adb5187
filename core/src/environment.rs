//! Injected dependencies: time and the string-keyed storage collaborator.
//!
//! External dependencies are abstracted behind traits so the reducer and
//! runtime can be exercised with deterministic test implementations.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use thiserror::Error;

/// Clock trait - abstracts time operations for testability.
pub trait Clock: Send + Sync {
    /// Get the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Error reported by a storage backend when a write fails.
///
/// The runtime swallows these at the collaborator boundary: a failed write
/// is logged, resolves to a no-op message, and is never retried or surfaced
/// to the model.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backend could not complete the write.
    #[error("storage write failed: {0}")]
    WriteFailed(String),
}

/// A generic string-keyed store.
///
/// Reads that find nothing, or a backend that is unavailable, yield `None`.
/// The futures are boxed so the trait stays dyn compatible and backends can
/// be swapped behind `Arc<dyn Storage>`.
pub trait Storage: Send + Sync {
    /// Reads the value stored under `key`.
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Option<String>>;

    /// Stores `value` under `key`.
    fn set<'a>(&'a self, key: &'a str, value: String)
    -> BoxFuture<'a, Result<(), StorageError>>;
}

/// Storage backend that stores nothing.
///
/// Reads always miss and writes always succeed. Useful where an environment
/// is required but persistence is irrelevant.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStorage;

impl Storage for NullStorage {
    fn get<'a>(&'a self, _key: &'a str) -> BoxFuture<'a, Option<String>> {
        Box::pin(async { None })
    }

    fn set<'a>(
        &'a self,
        _key: &'a str,
        _value: String,
    ) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async { Ok(()) })
    }
}

/// Convenience constructor for a shared [`NullStorage`].
#[must_use]
pub fn null_storage() -> Arc<dyn Storage> {
    Arc::new(NullStorage)
}
