//! Todos demo binary
//!
//! Wires the full loop together: reducer, store runtime, and a file-backed
//! storage adapter. Runs a short scripted session and prints the view
//! projection after each step, the way a rendering collaborator would
//! consume it.
//!
//! State persists across runs in `.todos-data/`; delete the directory to
//! start fresh.

mod storage;

use std::sync::Arc;
use std::time::Duration;

use todos_core::view::{View, view};
use todos_core::{Model, Msg, Route, SystemClock, TodoEnvironment, TodoReducer};
use todos_runtime::Store;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::storage::FileStorage;

fn print_view(model: &Model) {
    match view(model) {
        View::NotFound => println!("  -- not found --"),
        View::List(list) => {
            for todo in &list.todos {
                let mark = if todo.completed { "x" } else { " " };
                println!("  [{mark}] {} ({})", todo.text, todo.id);
            }
            println!(
                "  {} items left | filter: {:?} | clear completed offered: {}",
                list.active_count, list.filter, list.can_clear_completed
            );
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todos=info,todos_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Todos: Elm-architecture todo list ===\n");

    let env = TodoEnvironment::new(
        Arc::new(SystemClock),
        Arc::new(FileStorage::new(".todos-data")),
    );
    let store = Store::from_location("", TodoReducer::new(), env);

    // Resolve the deferred startup read before anything else.
    let mut handle = store.load_persisted().await?;
    handle.wait_with_timeout(Duration::from_secs(5)).await?;
    let count = store.state(|m| m.todos.len()).await;
    tracing::info!(count, "Startup load resolved");

    println!("Loaded state:");
    store.state(|m| print_view(m)).await;

    println!("\n>>> Adding \"buy milk\"");
    store.send(Msg::EnterTodo("buy milk".to_string())).await?;
    let mut handle = store.send(Msg::AddTodo).await?;
    handle.wait_with_timeout(Duration::from_secs(5)).await?;
    store.state(|m| print_view(m)).await;

    let first_id = store.state(|m| m.todos.first().map(|t| t.id.clone())).await;
    if let Some(id) = first_id {
        println!("\n>>> Toggling {id}");
        let mut handle = store.send(Msg::ToggleTodo(id)).await?;
        handle.wait_with_timeout(Duration::from_secs(5)).await?;
        store.state(|m| print_view(m)).await;
    }

    println!("\n>>> Navigating to /completed");
    store.send(Msg::Navigate(Route::Completed)).await?;
    store.state(|m| print_view(m)).await;

    println!("\n>>> Clearing completed");
    let mut handle = store.send(Msg::ClearCompleted).await?;
    handle.wait_with_timeout(Duration::from_secs(5)).await?;
    store.send(Msg::Navigate(Route::All)).await?;
    store.state(|m| print_view(m)).await;

    store.shutdown(Duration::from_secs(5)).await?;
    println!("\n=== Done ===");
    Ok(())
}
