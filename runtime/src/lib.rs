//! # Todos Runtime
//!
//! The Store runtime that coordinates reducer execution and effect
//! handling for the Todos application.
//!
//! ## Core Components
//!
//! - **Store**: owns the model, serializes reducer execution, and executes
//!   effect descriptions
//! - **Effect Executor**: turns [`Effect::Persist`] into an actual storage
//!   write and feeds the completion back into the loop as [`Msg::NoOp`]
//! - **Bootstrapping**: [`Store::load_persisted`] resolves the deferred
//!   startup read into a [`Msg::LoadTodos`], and [`location_to_msg`] maps
//!   navigation events into [`Msg::Navigate`]
//!
//! ## Concurrency Model
//!
//! Single conceptual loop: messages are processed one at a time in delivery
//! order (concurrent `send` calls serialize at the state write lock), and
//! the reducer itself never suspends. Persistence writes run in spawned
//! tasks, fire-and-forget.
//!
//! ## Known Hazard: Unordered Persistence Writes
//!
//! Each persist effect is spawned independently with no ordering guarantee
//! relative to subsequent writes. A later write that completes before an
//! earlier one is not reconciled, so last-write-wins is NOT guaranteed.
//! This mirrors the persistence contract of the design and is deliberately
//! left as-is rather than silently fixed.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use todos_core::{Msg, SystemClock, TodoEnvironment, TodoReducer};
//! use todos_core::environment::null_storage;
//! use todos_runtime::Store;
//!
//! # async fn example() -> Result<(), todos_runtime::error::StoreError> {
//! let env = TodoEnvironment::new(Arc::new(SystemClock), null_storage());
//! let store = Store::from_location("", TodoReducer::new(), env);
//!
//! store.load_persisted().await?;
//! store.send(Msg::EnterTodo("buy milk".into())).await?;
//! let mut handle = store.send(Msg::AddTodo).await?;
//! handle.wait().await;
//!
//! let count = store.state(|m| m.todos.len()).await;
//! assert_eq!(count, 1);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use todos_core::codec;
use todos_core::effect::Effect;
use todos_core::reducer::{Reducer, TodoEnvironment};
use todos_core::routing::Route;
use todos_core::types::{Model, Msg};
use tokio::sync::{RwLock, watch};

use crate::error::StoreError;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new messages
        #[error("store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete
        ///
        /// Some persistence writes were still running when the timeout
        /// elapsed.
        #[error("shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),

        /// Timeout waiting for spawned effects to complete
        #[error("timed out waiting for effects")]
        Timeout,
    }
}

/// Maps a location path into the message that tracks it.
///
/// The location collaborator supplies a path string on startup and on every
/// subsequent navigation event; each one becomes a [`Msg::Navigate`]
/// carrying the parsed route.
#[must_use]
pub fn location_to_msg(path: &str) -> Msg {
    Msg::Navigate(Route::parse(path))
}

/// Handle for tracking effect completion
///
/// Returned by [`Store::send()`] to allow waiting for the persistence
/// writes spawned by a message to finish. Waiting is only ever needed by
/// tests and graceful shutdown; production callers may drop the handle.
#[derive(Clone)]
pub struct EffectHandle {
    pending: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    fn new() -> (Self, EffectTracking) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = watch::channel(());

        let handle = Self {
            pending: Arc::clone(&counter),
            completion: rx,
        };

        let tracking = EffectTracking {
            counter,
            notifier: tx,
        };

        (handle, tracking)
    }

    /// Create a handle that's already complete
    ///
    /// Useful for initialization in loops where you need a `last_handle`.
    #[must_use]
    pub fn completed() -> Self {
        let (tx, rx) = watch::channel(());
        let _ = tx.send(());

        Self {
            pending: Arc::new(AtomicUsize::new(0)),
            completion: rx,
        }
    }

    /// Wait for all effects spawned by the originating `send` to complete
    pub async fn wait(&mut self) {
        while self.pending.load(Ordering::SeqCst) > 0 {
            if self.completion.changed().await.is_err() {
                // Sender dropped; re-check the counter and bail out.
                if self.pending.load(Ordering::SeqCst) == 0 {
                    break;
                }
            }
        }
    }

    /// Wait for all effects to complete with a timeout
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the timeout expires before all
    /// effects complete.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending_effects", &self.pending.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Internal: effect tracking context passed through effect execution
#[derive(Clone)]
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: watch::Sender<()>,
}

impl EffectTracking {
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    fn decrement(&self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            // Counter reached zero, notify waiters
            let _ = self.notifier.send(());
        }
    }
}

/// Internal: RAII guard that decrements the effect counter on drop
///
/// Ensures the counter is always decremented, even if the effect panics.
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

/// Guard that decrements an atomic counter on drop (for shutdown tracking)
struct AtomicCounterGuard(Arc<AtomicUsize>);

impl Drop for AtomicCounterGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// The Store runtime
///
/// The Store manages:
/// 1. The model (behind `RwLock` for concurrent access)
/// 2. The reducer (business logic)
/// 3. The environment (injected clock and storage)
/// 4. Effect execution (with `NoOp` feedback into the loop)
///
/// The reducer executes synchronously while holding the state write lock,
/// so messages serialize in delivery order and each transition observes the
/// model left by the previous one. Persistence writes execute in spawned
/// tasks and may complete in any order (see the crate-level hazard note).
pub struct Store<R>
where
    R: Reducer<State = Model, Action = Msg, Environment = TodoEnvironment>,
{
    state: Arc<RwLock<Model>>,
    reducer: R,
    environment: TodoEnvironment,
    shutdown: Arc<AtomicBool>,
    pending_effects: Arc<AtomicUsize>,
}

impl<R> Store<R>
where
    R: Reducer<State = Model, Action = Msg, Environment = TodoEnvironment>
        + Clone
        + Send
        + Sync
        + 'static,
{
    /// Create a new store with an initial model, reducer, and environment
    #[must_use]
    pub fn new(initial_model: Model, reducer: R, environment: TodoEnvironment) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial_model)),
            reducer,
            environment,
            shutdown: Arc::new(AtomicBool::new(false)),
            pending_effects: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a store whose initial model derives its route from the
    /// startup location
    ///
    /// The model starts with no todos; call [`Store::load_persisted`] to
    /// resolve the deferred storage read. Messages arriving before it
    /// resolves are processed against the empty initial list.
    #[must_use]
    pub fn from_location(path: &str, reducer: R, environment: TodoEnvironment) -> Self {
        Self::new(Model::new(Route::parse(path)), reducer, environment)
    }

    /// Send a message to the store
    ///
    /// This is the primary way to interact with the store:
    /// 1. Acquires the write lock on the model
    /// 2. Calls the reducer with (model, message, environment)
    /// 3. Executes returned effect descriptions asynchronously
    ///
    /// `send()` returns after *starting* effect execution, not completion.
    /// Use the returned [`EffectHandle`] to wait for the persistence writes
    /// it spawned.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting
    /// down.
    #[tracing::instrument(skip(self, msg), name = "store_send")]
    pub async fn send(&self, msg: Msg) -> Result<EffectHandle, StoreError> {
        if self.shutdown.load(Ordering::Acquire) {
            tracing::warn!("Rejected message: store is shutting down");
            metrics::counter!("store.shutdown.rejected_messages").increment(1);
            return Err(StoreError::ShutdownInProgress);
        }

        tracing::debug!("Processing message");
        metrics::counter!("store.messages.total").increment(1);

        let (handle, tracking) = EffectHandle::new();

        let effects = {
            let mut state = self.state.write().await;
            tracing::trace!("Acquired write lock on model");

            let start = std::time::Instant::now();
            let effects = self.reducer.reduce(&mut state, msg, &self.environment);
            metrics::histogram!("store.reducer.duration_seconds")
                .record(start.elapsed().as_secs_f64());

            tracing::trace!("Reducer completed, returned {} effects", effects.len());
            effects
        };

        for effect in effects {
            self.execute_effect(effect, tracking.clone());
        }

        Ok(handle)
    }

    /// Read the current model via a closure
    ///
    /// Access the model through a closure so the read lock is released
    /// promptly:
    ///
    /// ```ignore
    /// let active = store.state(|m| m.todos.iter().filter(|t| !t.completed).count()).await;
    /// ```
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&Model) -> T,
    {
        let state = self.state.read().await;
        f(&state)
    }

    /// Resolve the deferred startup read into a [`Msg::LoadTodos`]
    ///
    /// Reads the namespace key from storage and decodes it. Malformed or
    /// missing data silently falls back to an empty list; no error reaches
    /// the model. Issued once at startup by the bootstrapping code.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting
    /// down.
    pub async fn load_persisted(&self) -> Result<EffectHandle, StoreError> {
        let stored = self.environment.storage.get(codec::NAMESPACE).await;
        let todos = stored
            .as_deref()
            .and_then(codec::deserialize)
            .unwrap_or_default();

        tracing::debug!(count = todos.len(), "Loaded persisted todos");
        self.send(Msg::LoadTodos(todos)).await
    }

    /// Initiate graceful shutdown of the store
    ///
    /// Sets the shutdown flag (rejecting new messages), then waits for
    /// pending persistence writes to finish.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if the timeout expires
    /// before all pending writes complete.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        tracing::info!("Initiating graceful shutdown");
        metrics::counter!("store.shutdown.initiated").increment(1);

        self.shutdown.store(true, Ordering::Release);

        let start = std::time::Instant::now();
        let poll_interval = Duration::from_millis(100);

        loop {
            let pending = self.pending_effects.load(Ordering::Acquire);

            if pending == 0 {
                tracing::info!("All effects completed, shutdown successful");
                return Ok(());
            }

            if start.elapsed() >= timeout {
                tracing::error!(pending_effects = pending, "Shutdown timed out");
                return Err(StoreError::ShutdownTimeout(pending));
            }

            tokio::time::sleep(poll_interval).await;
        }
    }

    /// Execute one effect description
    ///
    /// `Persist` spawns a task that serializes the snapshot and writes it
    /// under the namespace key. Success and failure both resolve to a
    /// [`Msg::NoOp`] fed back into the loop: write failures are logged and
    /// counted at this boundary, never retried, never surfaced to the
    /// model. Writes carry no ordering guarantee relative to one another.
    #[allow(clippy::needless_pass_by_value)] // tracking is cloned per effect
    fn execute_effect(&self, effect: Effect, tracking: EffectTracking) {
        match effect {
            Effect::None => {
                tracing::trace!("Executing Effect::None (no-op)");
                metrics::counter!("store.effects.executed", "type" => "none").increment(1);
            }
            Effect::Persist(todos) => {
                tracing::trace!(count = todos.len(), "Executing Effect::Persist");
                metrics::counter!("store.effects.executed", "type" => "persist").increment(1);
                tracking.increment();

                // Track global pending effects for shutdown
                self.pending_effects.fetch_add(1, Ordering::SeqCst);
                let pending_guard = AtomicCounterGuard(Arc::clone(&self.pending_effects));

                let store = self.clone();
                tokio::spawn(async move {
                    let _guard = DecrementGuard(tracking);
                    let _pending_guard = pending_guard; // Decrement on drop

                    let payload = codec::serialize(&todos);
                    match store
                        .environment
                        .storage
                        .set(codec::NAMESPACE, payload)
                        .await
                    {
                        Ok(()) => {
                            tracing::trace!("Persist write completed");
                            metrics::counter!("store.persist.completed").increment(1);
                        }
                        Err(error) => {
                            tracing::warn!(error = %error, "Persist write failed");
                            metrics::counter!("store.persist.failed").increment(1);
                        }
                    }

                    // Either way the loop sees a no-op.
                    let _ = store.send(Msg::NoOp).await;
                });
            }
        }
    }
}

impl<R> Clone for Store<R>
where
    R: Reducer<State = Model, Action = Msg, Environment = TodoEnvironment> + Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            reducer: self.reducer.clone(),
            environment: self.environment.clone(),
            shutdown: Arc::clone(&self.shutdown),
            pending_effects: Arc::clone(&self.pending_effects),
        }
    }
}
