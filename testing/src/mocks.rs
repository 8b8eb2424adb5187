//! Mock implementations of the environment traits.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use todos_core::environment::{Clock, Storage, StorageError};

/// Fixed clock for deterministic tests.
///
/// Always returns the same time, making tests reproducible. Because todo
/// identifiers are minted from the clock, a fixed clock also makes ids
/// predictable.
///
/// # Example
///
/// ```
/// use todos_testing::FixedClock;
/// use todos_core::environment::Clock;
/// use chrono::Utc;
///
/// let clock = FixedClock::new(Utc::now());
/// assert_eq!(clock.now(), clock.now());
/// ```
#[derive(Debug, Clone)]
pub struct FixedClock {
    time: DateTime<Utc>,
}

impl FixedClock {
    /// Create a new fixed clock with the given time.
    #[must_use]
    pub const fn new(time: DateTime<Utc>) -> Self {
        Self { time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.time
    }
}

/// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC).
///
/// # Panics
///
/// Panics if the hardcoded timestamp fails to parse, which should never
/// happen in practice.
#[must_use]
#[allow(clippy::expect_used)]
pub fn test_clock() -> FixedClock {
    FixedClock::new(
        DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .expect("hardcoded timestamp should always parse")
            .with_timezone(&Utc),
    )
}

/// In-memory string-keyed storage for tests.
///
/// Cloning shares the underlying map, so a clone handed to an environment
/// observes the same writes as the original held by the test.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload a value, as if a previous session had persisted it.
    ///
    /// # Panics
    ///
    /// Panics if the inner mutex is poisoned, which only happens after a
    /// panic in another test thread.
    #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable
    pub fn preload(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.lock().unwrap().insert(key.into(), value.into());
    }

    /// The value currently stored under `key`, if any.
    ///
    /// # Panics
    ///
    /// Panics if the inner mutex is poisoned.
    #[must_use]
    #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable
    pub fn stored(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }
}

impl Storage for MemoryStorage {
    #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Option<String>> {
        Box::pin(async move { self.entries.lock().unwrap().get(key).cloned() })
    }

    #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable
    fn set<'a>(
        &'a self,
        key: &'a str,
        value: String,
    ) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            self.entries.lock().unwrap().insert(key.to_string(), value);
            Ok(())
        })
    }
}

/// Storage backend that is permanently unavailable.
///
/// Reads miss and writes fail, for exercising the swallow-write-failures
/// policy at the runtime boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingStorage;

impl Storage for FailingStorage {
    fn get<'a>(&'a self, _key: &'a str) -> BoxFuture<'a, Option<String>> {
        Box::pin(async { None })
    }

    fn set<'a>(
        &'a self,
        _key: &'a str,
        _value: String,
    ) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async { Err(StorageError::WriteFailed("storage offline".to_string())) })
    }
}
