//! The Model/Message/Update state machine.

use std::sync::Arc;

use smallvec::{SmallVec, smallvec};

use crate::effect::Effect;
use crate::environment::{Clock, Storage};
use crate::types::{Model, Msg, Todo, TodoId};

/// The Reducer trait — core abstraction for the update loop.
///
/// A reducer is a pure transition function: it validates nothing up front,
/// updates state in place, and returns effect descriptions for the runtime
/// to execute. Every input maps to a defined, total transition with no
/// failure mode.
pub trait Reducer {
    /// The state type this reducer operates on.
    type State;

    /// The action type this reducer processes.
    type Action;

    /// The environment type with injected dependencies.
    type Environment;

    /// Reduce an action into state changes and effect descriptions.
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect; 4]>;
}

/// Dependencies injected into the todo reducer and its effect executor.
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Clock used to mint todo identifiers.
    pub clock: Arc<dyn Clock>,
    /// Storage backend the runtime writes persist effects to.
    pub storage: Arc<dyn Storage>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, storage: Arc<dyn Storage>) -> Self {
        Self { clock, storage }
    }
}

/// Reducer for the todo list model.
///
/// Owns all business rules: add/remove/toggle/edit todos, bulk toggle-all,
/// clear-completed, edit-mode tracking, and route tracking. A persist
/// effect is emitted only by transitions that mutate the todo list itself;
/// pure UI-state changes (`adding`, `editing`, `route`) never touch
/// storage, so writes are bounded to actions that change durable data.
///
/// Lookups on an id that no longer exists degrade to no-ops rather than
/// erroring — the transition still completes and still persists.
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Persist effect carrying a snapshot of the post-transition list.
fn persist(todos: &[Todo]) -> SmallVec<[Effect; 4]> {
    smallvec![Effect::Persist(todos.to_vec())]
}

impl Reducer for TodoReducer {
    type State = Model;
    type Action = Msg;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect; 4]> {
        match action {
            Msg::NoOp => SmallVec::new(),

            Msg::EnterTodo(text) => {
                state.adding = text;
                SmallVec::new()
            }

            Msg::AddTodo => {
                // No validation: an empty input still creates a blank todo.
                let todo = Todo::new(
                    TodoId::from_timestamp(env.clock.now()),
                    std::mem::take(&mut state.adding),
                );
                state.todos.push(todo);
                persist(&state.todos)
            }

            Msg::RemoveTodo(id) => {
                state.todos.retain(|todo| todo.id != id);
                persist(&state.todos)
            }

            Msg::ToggleTodo(id) => {
                if let Some(todo) = state.todos.iter_mut().find(|todo| todo.id == id) {
                    todo.completed = !todo.completed;
                }
                persist(&state.todos)
            }

            Msg::Navigate(route) => {
                state.route = route;
                SmallVec::new()
            }

            Msg::LoadTodos(todos) => {
                state.todos = todos;
                SmallVec::new()
            }

            Msg::EditTodo(id) => {
                state.editing = Some(id);
                SmallVec::new()
            }

            Msg::UpdateTodo(id, text) => {
                // Edit mode stays active; only Cancel leaves it.
                if let Some(todo) = state.todos.iter_mut().find(|todo| todo.id == id) {
                    todo.text = text;
                }
                persist(&state.todos)
            }

            Msg::Cancel => {
                state.editing = None;
                SmallVec::new()
            }

            Msg::ToggleAll(value) => {
                for todo in &mut state.todos {
                    todo.completed = value;
                }
                persist(&state.todos)
            }

            Msg::ClearCompleted => {
                state.todos.retain(|todo| !todo.completed);
                persist(&state.todos)
            }
        }
    }
}
