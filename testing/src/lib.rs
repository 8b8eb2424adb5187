//! # Todos Testing
//!
//! Testing utilities and helpers for the Todos application.
//!
//! This crate provides:
//! - Mock implementations of the environment traits (`FixedClock`,
//!   `MemoryStorage`, `FailingStorage`)
//! - The [`ReducerTest`] Given-When-Then harness for reducer unit tests
//! - Assertion helpers for effect descriptions
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use todos_core::{Model, Msg, Route, TodoEnvironment, TodoReducer};
//! use todos_testing::{ReducerTest, assertions, test_clock, MemoryStorage};
//!
//! let env = TodoEnvironment::new(Arc::new(test_clock()), Arc::new(MemoryStorage::new()));
//!
//! ReducerTest::new(TodoReducer::new())
//!     .with_env(env)
//!     .given_state(Model::new(Route::All))
//!     .when_action(Msg::EnterTodo("buy milk".into()))
//!     .then_state(|state| assert_eq!(state.adding, "buy milk"))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```

pub mod mocks;
pub mod reducer_test;

// Re-export commonly used items
pub use mocks::{FailingStorage, FixedClock, MemoryStorage, test_clock};
pub use reducer_test::{ReducerTest, assertions};
