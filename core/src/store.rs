//! Client-side todo state kept in step with the remote store.
//!
//! # Design
//! `TodoStore` owns the only local copy of the todo list. Every operation
//! issues exactly one request through the `Transport`, awaits it, and only
//! then touches local state:
//!
//! - Nothing is mutated before the server confirms. A failed call leaves
//!   the collection exactly as it was, so there is never anything to revert.
//! - The collection lives behind a `parking_lot::Mutex` that is locked only
//!   after the response has arrived and is never held across an `.await`.
//!   Each mutation is therefore atomic with respect to every other
//!   operation, even on a multi-threaded runtime.
//! - Operations on the same id are not ordered. Whichever response arrives
//!   last is applied last (last-response-wins).
//! - `add` alone refuses re-entry while a create request is in flight.
//! - Failures are logged, remembered in `last_error`, and returned as
//!   `Outcome::Failed`. No operation returns `Err` and none retries.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::client::TodoClient;
use crate::error::{ApiError, Operation, RemoteCallFailure};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{ApiMessage, CreateTodo, Todo, TodoId, TodoStats, UpdateTodo};

/// What a store operation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The server confirmed and the local collection was reconciled.
    Applied,
    /// The server confirmed, but no local entry had the id.
    Unmatched,
    /// No remote call was issued.
    Skipped(SkipReason),
    /// The remote call failed; the local collection is untouched.
    Failed(RemoteCallFailure),
}

impl Outcome {
    pub fn failure(&self) -> Option<&RemoteCallFailure> {
        match self {
            Outcome::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The title was empty or whitespace only.
    BlankTitle,
    /// Another `add` has not resolved yet.
    AddInFlight,
    /// `initialize` already ran.
    AlreadyInitialized,
}

#[derive(Debug, Default)]
struct State {
    todos: Vec<Todo>,
    draft: String,
    last_error: Option<RemoteCallFailure>,
}

/// Owner of the local todo collection.
pub struct TodoStore<T> {
    client: TodoClient,
    transport: T,
    state: Mutex<State>,
    adding: AtomicBool,
    initialized: AtomicBool,
}

impl<T: Transport> TodoStore<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self {
            client,
            transport,
            state: Mutex::new(State::default()),
            adding: AtomicBool::new(false),
            initialized: AtomicBool::new(false),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Startup entry point: loads the collection the first time it is called.
    pub async fn initialize(&self) -> Outcome {
        if self.initialized.swap(true, Ordering::AcqRel) {
            tracing::debug!("store already initialized");
            return Outcome::Skipped(SkipReason::AlreadyInitialized);
        }
        self.load().await
    }

    /// Replace the local collection with the server's list.
    pub async fn load(&self) -> Outcome {
        let result = self
            .round_trip(Ok(self.client.build_list_todos()), TodoClient::parse_list_todos)
            .await
            .and_then(|todos| {
                ensure_unique(&todos)?;
                Ok(todos)
            });

        match result {
            Ok(todos) => {
                tracing::info!(count = todos.len(), "loaded todos");
                let mut state = self.state.lock();
                state.todos = todos;
                state.last_error = None;
                Outcome::Applied
            }
            Err(cause) => self.fail(Operation::Load, cause),
        }
    }

    /// Create a todo and append the server's copy once it is confirmed.
    ///
    /// Blank titles are rejected locally. While a create is in flight further
    /// calls are skipped rather than queued. The draft is cleared only when
    /// the server confirmed the create. If the new id is already held, that
    /// entry is replaced instead of appending a second copy.
    pub async fn add(&self, title: &str) -> Outcome {
        if title.trim().is_empty() {
            return Outcome::Skipped(SkipReason::BlankTitle);
        }
        let Some(_in_flight) = InFlight::acquire(&self.adding) else {
            tracing::debug!("add ignored, another add is in flight");
            return Outcome::Skipped(SkipReason::AddInFlight);
        };

        let input = CreateTodo {
            title: title.to_string(),
        };
        let result = self
            .round_trip(self.client.build_create_todo(&input), TodoClient::parse_create_todo)
            .await;

        match result {
            Ok(todo) => {
                let mut state = self.state.lock();
                // A load answered after the server stored the todo already holds it.
                match state.todos.iter_mut().find(|t| t.id == todo.id) {
                    Some(entry) => {
                        tracing::debug!(id = %todo.id, "created todo already loaded");
                        *entry = todo;
                    }
                    None => {
                        tracing::info!(id = %todo.id, "added todo");
                        state.todos.push(todo);
                    }
                }
                state.draft.clear();
                state.last_error = None;
                Outcome::Applied
            }
            Err(cause) => self.fail(Operation::Add, cause),
        }
    }

    /// Submit the current draft as a new todo.
    pub async fn submit(&self) -> Outcome {
        let title = self.draft();
        self.add(&title).await
    }

    /// Ask the server to change one todo's completion flag.
    ///
    /// The request is sent even if `id` is not in the local collection. On
    /// success the local entry is replaced by the server's full object.
    pub async fn set_completed(&self, id: &TodoId, completed: bool) -> Outcome {
        let result = self
            .round_trip(
                self.client.build_update_todo(id, &UpdateTodo::completed(completed)),
                TodoClient::parse_update_todo,
            )
            .await
            .and_then(|todo| {
                if todo.id != *id {
                    return Err(ApiError::Contract(format!("update for {id} returned {}", todo.id)));
                }
                Ok(todo)
            });

        match result {
            Ok(todo) => {
                let mut state = self.state.lock();
                state.last_error = None;
                match state.todos.iter_mut().find(|t| t.id == *id) {
                    Some(entry) => {
                        tracing::info!(%id, completed = todo.completed, "updated todo");
                        *entry = todo;
                        Outcome::Applied
                    }
                    None => {
                        tracing::debug!(%id, "update confirmed for todo no longer held locally");
                        Outcome::Unmatched
                    }
                }
            }
            Err(cause) => self.fail(Operation::SetCompleted, cause),
        }
    }

    /// Delete one todo, dropping it locally only after the server confirms.
    pub async fn remove(&self, id: &TodoId) -> Outcome {
        let result = self
            .round_trip(Ok(self.client.build_delete_todo(id)), TodoClient::parse_delete_todo)
            .await;

        match result {
            Ok(()) => {
                let mut state = self.state.lock();
                state.last_error = None;
                let before = state.todos.len();
                state.todos.retain(|t| t.id != *id);
                if state.todos.len() < before {
                    tracing::info!(%id, "removed todo");
                    Outcome::Applied
                } else {
                    Outcome::Unmatched
                }
            }
            Err(cause) => self.fail(Operation::Remove, cause),
        }
    }

    /// Fetch the API root greeting. Diagnostic only; local state is untouched.
    pub async fn greet(&self) -> Result<ApiMessage, RemoteCallFailure> {
        match self.round_trip(Ok(self.client.build_root()), TodoClient::parse_root).await {
            Ok(message) => {
                tracing::info!(message = %message.message, "api reachable");
                Ok(message)
            }
            Err(cause) => {
                tracing::warn!(error = %cause, "api root request failed");
                Err(RemoteCallFailure::new(Operation::Greet, cause))
            }
        }
    }

    /// Snapshot of the collection.
    pub fn todos(&self) -> Vec<Todo> {
        self.state.lock().todos.clone()
    }

    pub fn stats(&self) -> TodoStats {
        TodoStats::from_todos(&self.state.lock().todos)
    }

    pub fn draft(&self) -> String {
        self.state.lock().draft.clone()
    }

    pub fn set_draft(&self, text: impl Into<String>) {
        self.state.lock().draft = text.into();
    }

    pub fn is_adding(&self) -> bool {
        self.adding.load(Ordering::Acquire)
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_adding() && !self.state.lock().draft.trim().is_empty()
    }

    /// The most recent failure, cleared by the next confirmed operation.
    pub fn last_error(&self) -> Option<RemoteCallFailure> {
        self.state.lock().last_error.clone()
    }

    async fn round_trip<R>(
        &self,
        request: Result<HttpRequest, ApiError>,
        parse: fn(&TodoClient, HttpResponse) -> Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        let request = request?;
        tracing::debug!(method = request.method.as_str(), path = %request.path, "sending request");
        let response = self.transport.execute(request).await?;
        parse(&self.client, response)
    }

    fn fail(&self, operation: Operation, cause: ApiError) -> Outcome {
        tracing::error!(%operation, error = %cause, "remote call failed");
        let failure = RemoteCallFailure::new(operation, cause);
        self.state.lock().last_error = Some(failure.clone());
        Outcome::Failed(failure)
    }
}

fn ensure_unique(todos: &[Todo]) -> Result<(), ApiError> {
    let mut seen = HashSet::with_capacity(todos.len());
    for todo in todos {
        if !seen.insert(&todo.id) {
            return Err(ApiError::Contract(format!("duplicate id {}", todo.id)));
        }
    }
    Ok(())
}

/// Holds the `add` busy flag; releases it on every exit path.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
