//! # Todos Core
//!
//! The Model/Message/Update state machine at the heart of the Todos
//! application.
//!
//! This crate contains everything that makes decisions: the pure reducer
//! that takes the current model and an incoming message and produces the
//! next model plus a declarative side-effect description, the route parser
//! that maps a location path to a view filter, the persistence codec, and
//! the view projection.
//!
//! ## Core Concepts
//!
//! - **Model**: the complete, immutable application state at a point in time
//! - **Message**: a closed-variant description of an event that may
//!   transition the model
//! - **Reducer**: pure function `(Model, Msg, Environment) → Effects`
//! - **Effect**: a side-effect description (persist the todo list, or
//!   nothing) — a value, never executed here
//! - **Environment**: injected dependencies (clock, storage) via traits
//!
//! The runtime that executes effects and feeds resulting messages back into
//! the loop lives in `todos-runtime`; this crate never performs I/O.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use todos_core::{
//!     Model, Msg, Reducer, Route, SystemClock, TodoEnvironment, TodoReducer,
//! };
//! use todos_core::environment::null_storage;
//!
//! let env = TodoEnvironment::new(Arc::new(SystemClock), null_storage());
//! let reducer = TodoReducer::new();
//! let mut model = Model::new(Route::All);
//!
//! let effects = reducer.reduce(&mut model, Msg::EnterTodo("buy milk".into()), &env);
//! assert_eq!(model.adding, "buy milk");
//! assert!(effects.is_empty());
//!
//! let effects = reducer.reduce(&mut model, Msg::AddTodo, &env);
//! assert_eq!(model.todos.len(), 1);
//! assert_eq!(model.adding, "");
//! assert_eq!(effects.len(), 1);
//! ```

pub mod codec;
pub mod effect;
pub mod environment;
pub mod reducer;
pub mod routing;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use smallvec::{SmallVec, smallvec};

pub use effect::Effect;
pub use environment::{Clock, Storage, StorageError, SystemClock};
pub use reducer::{Reducer, TodoEnvironment, TodoReducer};
pub use routing::Route;
pub use types::{Model, Msg, Todo, TodoId};
pub use view::{Filter, TodoList, View, view};
