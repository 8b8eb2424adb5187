//! Pure projection from the model to a renderable description.
//!
//! The rendering layer itself is an external collaborator; this module only
//! computes what it should paint. The projection is recomputed fully from
//! the model on every call, emits no messages, and never mutates the model.

use crate::routing::Route;
use crate::types::{Model, Todo};

/// The active view filter, derived from the route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Filter {
    /// Every todo is visible.
    All,
    /// Only incomplete todos are visible.
    Active,
    /// Only completed todos are visible.
    Completed,
}

impl Filter {
    /// The filter for a route. [`Route::NotFound`] has no filter and
    /// signals the distinct not-found projection instead.
    #[must_use]
    pub const fn from_route(route: Route) -> Option<Self> {
        match route {
            Route::All => Some(Self::All),
            Route::Active => Some(Self::Active),
            Route::Completed => Some(Self::Completed),
            Route::NotFound => None,
        }
    }

    /// Whether a todo is visible under this filter.
    #[must_use]
    pub const fn accepts(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Active => !todo.completed,
            Self::Completed => todo.completed,
        }
    }
}

/// Renderable description of the todo list page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoList {
    /// The selected filter.
    pub filter: Filter,
    /// Todos visible under the filter, in display order.
    pub todos: Vec<Todo>,
    /// Count of active (incomplete) todos, regardless of filter.
    pub active_count: usize,
    /// Whether every todo is completed (vacuously true for an empty list).
    pub all_completed: bool,
    /// Whether a "clear completed" action should be offered — only when at
    /// least one todo is completed.
    pub can_clear_completed: bool,
}

/// What the rendering collaborator should paint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View {
    /// The todo list under the active filter.
    List(TodoList),
    /// The route did not resolve; render the not-found page.
    NotFound,
}

/// Projects the model into a renderable description.
#[must_use]
pub fn view(model: &Model) -> View {
    let Some(filter) = Filter::from_route(model.route) else {
        return View::NotFound;
    };

    let todos: Vec<Todo> = model
        .todos
        .iter()
        .filter(|todo| filter.accepts(todo))
        .cloned()
        .collect();

    View::List(TodoList {
        filter,
        todos,
        active_count: model.todos.iter().filter(|todo| !todo.completed).count(),
        all_completed: model.todos.iter().all(|todo| todo.completed),
        can_clear_completed: model.todos.iter().any(|todo| todo.completed),
    })
}
