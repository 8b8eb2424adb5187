//! Domain types: identifiers, todo items, the model, and messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::routing::Route;

/// Unique identifier for a todo item.
///
/// A newtype over [`String`], so an identifier cannot be confused with
/// free-form text at the type level while still serializing transparently
/// as the wrapped string. Two identifiers are equal iff their wrapped
/// strings are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TodoId(String);

impl TodoId {
    /// Wraps a string as an identifier.
    ///
    /// No validation: any string is a valid wrapped value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates an identifier from a timestamp: the millisecond epoch,
    /// stringified.
    ///
    /// Two todos created within the same millisecond collide. This is a
    /// known latent gap inherited from the design, accepted and documented
    /// rather than guarded against.
    #[must_use]
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        Self(at.timestamp_millis().to_string())
    }

    /// Returns the wrapped string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwraps the identifier into its string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique within the owning list's lifetime.
    pub id: TodoId,
    /// Display text.
    pub text: String,
    /// Whether the todo is completed.
    pub completed: bool,
}

impl Todo {
    /// Creates a new, not-yet-completed todo.
    #[must_use]
    pub const fn new(id: TodoId, text: String) -> Self {
        Self {
            id,
            text,
            completed: false,
        }
    }
}

/// The complete application state at a point in time.
///
/// Constructed once at startup via [`Model::new`]; every subsequent model is
/// derived from the previous one by the reducer. Messages are the only
/// mutation path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Model {
    /// The currently active view filter, including "not found".
    pub route: Route,
    /// The full, unfiltered list. Insertion order is display order; todos
    /// are appended on add and there is no reordering operation.
    pub todos: Vec<Todo>,
    /// Live text of the new-todo input field. Cleared after a successful
    /// add.
    pub adding: String,
    /// Todo currently in edit mode, if any. At most one at a time.
    pub editing: Option<TodoId>,
}

impl Model {
    /// Creates the startup model: empty todos, empty input, nothing in edit
    /// mode, and the route derived from the initial location.
    #[must_use]
    pub const fn new(route: Route) -> Self {
        Self {
            route,
            todos: Vec::new(),
            adding: String::new(),
            editing: None,
        }
    }
}

/// A discrete description of an event that may transition the model.
///
/// The set is closed: these twelve variants are the only way to request a
/// model transition, and each carries exactly the data its transition
/// needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    /// Identity transition. Also the feedback message the runtime emits
    /// when a persistence write completes or fails.
    NoOp,
    /// The new-todo input field changed.
    EnterTodo(String),
    /// Finalize the new-todo input into a todo item.
    AddTodo,
    /// Remove the todo with the given id.
    RemoveTodo(TodoId),
    /// Flip completion on the todo with the given id.
    ToggleTodo(TodoId),
    /// The location changed.
    Navigate(Route),
    /// Replace the todo list wholesale. Issued once at startup after the
    /// storage read resolves.
    LoadTodos(Vec<Todo>),
    /// Put the todo with the given id into edit mode.
    EditTodo(TodoId),
    /// Set the text of the todo with the given id.
    UpdateTodo(TodoId, String),
    /// Leave edit mode.
    Cancel,
    /// Set completion on every todo.
    ToggleAll(bool),
    /// Remove every completed todo.
    ClearCompleted,
}
