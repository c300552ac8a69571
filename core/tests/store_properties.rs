//! Property tests for TodoStore over random operation sequences.
//!
//! An in-memory remote implements the API contract and can be told to fail
//! its next request. After every step the local collection must hold unique
//! ids, mirror the remote exactly, and be unchanged if the step failed.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use proptest::prelude::*;
use todo_core::{
    ApiError, CreateTodo, HttpMethod, HttpRequest, HttpResponse, Outcome, SkipReason, Todo,
    TodoClient, TodoId, TodoStore, Transport, UpdateTodo,
};

const BASE_URL: &str = "http://fake/api";

#[derive(Default)]
struct FakeRemote {
    todos: Mutex<Vec<Todo>>,
    next_id: AtomicU64,
    fail_next: AtomicBool,
    calls: AtomicU64,
}

impl FakeRemote {
    fn handle(&self, req: HttpRequest) -> HttpResponse {
        let path = req.path.strip_prefix(BASE_URL).unwrap_or(&req.path);
        let mut todos = self.todos.lock();
        match (req.method, path.strip_prefix("/todos")) {
            (HttpMethod::Get, Some("")) => {
                HttpResponse::new(200, serde_json::to_string(&*todos).unwrap())
            }
            (HttpMethod::Post, Some("")) => {
                let input: CreateTodo = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                let todo = Todo {
                    id: TodoId::new(format!("t{id}")),
                    title: input.title,
                    completed: false,
                };
                todos.push(todo.clone());
                HttpResponse::new(200, serde_json::to_string(&todo).unwrap())
            }
            (HttpMethod::Put, Some(rest)) => {
                let id = rest.trim_start_matches('/');
                let input: UpdateTodo = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
                match todos.iter_mut().find(|t| t.id.as_str() == id) {
                    Some(todo) => {
                        todo.completed = input.completed;
                        HttpResponse::new(200, serde_json::to_string(todo).unwrap())
                    }
                    None => HttpResponse::new(404, r#"{"detail":"Todo not found"}"#),
                }
            }
            (HttpMethod::Delete, Some(rest)) => {
                let id = rest.trim_start_matches('/');
                match todos.iter().position(|t| t.id.as_str() == id) {
                    Some(index) => {
                        todos.remove(index);
                        HttpResponse::new(200, r#"{"message":"Todo deleted successfully"}"#)
                    }
                    None => HttpResponse::new(404, r#"{"detail":"Todo not found"}"#),
                }
            }
            _ => HttpResponse::new(405, ""),
        }
    }
}

#[async_trait]
impl Transport for FakeRemote {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Ok(HttpResponse::new(500, "injected failure"));
        }
        Ok(self.handle(request))
    }
}

#[derive(Debug, Clone)]
enum Step {
    Load,
    Add(String),
    Toggle(usize, bool),
    Remove(usize),
    RemoveUnknown,
    FailNext,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Load),
        "[a-z ]{0,8}".prop_map(Step::Add),
        (any::<usize>(), any::<bool>()).prop_map(|(i, c)| Step::Toggle(i, c)),
        any::<usize>().prop_map(Step::Remove),
        Just(Step::RemoveUnknown),
        Just(Step::FailNext),
    ]
}

fn pick(todos: &[Todo], index: usize) -> TodoId {
    if todos.is_empty() {
        TodoId::new("missing")
    } else {
        todos[index % todos.len()].id.clone()
    }
}

fn has_unique_ids(todos: &[Todo]) -> bool {
    let mut ids: Vec<&str> = todos.iter().map(|t| t.id.as_str()).collect();
    ids.sort_unstable();
    ids.windows(2).all(|w| w[0] != w[1])
}

proptest! {
    #[test]
    fn local_collection_tracks_remote(steps in prop::collection::vec(step(), 1..40)) {
        let store = TodoStore::new(TodoClient::new(BASE_URL), FakeRemote::default());

        for step in steps {
            if let Step::FailNext = step {
                store.transport().fail_next.store(true, Ordering::SeqCst);
                continue;
            }

            let before = store.todos();
            let calls_before = calls(&store);
            let outcome = tokio_test::block_on(async {
                match &step {
                    Step::Load => store.load().await,
                    Step::Add(title) => store.add(title).await,
                    Step::Toggle(i, completed) => store.set_completed(&pick(&before, *i), *completed).await,
                    Step::Remove(i) => store.remove(&pick(&before, *i)).await,
                    Step::RemoveUnknown => store.remove(&TodoId::new("missing")).await,
                    Step::FailNext => unreachable!(),
                }
            });

            let after = store.todos();
            prop_assert!(has_unique_ids(&after), "duplicate ids after {:?}", step);

            match &outcome {
                Outcome::Failed(_) => prop_assert_eq!(&after, &before),
                Outcome::Skipped(SkipReason::BlankTitle) => {
                    prop_assert_eq!(&after, &before);
                    prop_assert_eq!(calls(&store), calls_before);
                }
                Outcome::Applied => match &step {
                    Step::Add(_) => prop_assert_eq!(after.len(), before.len() + 1),
                    Step::Remove(_) => prop_assert_eq!(after.len() + 1, before.len()),
                    _ => {}
                },
                _ => {}
            }

            let remote = store.transport().todos.lock().clone();
            prop_assert_eq!(&after, &remote);
        }
    }
}

fn calls(store: &TodoStore<FakeRemote>) -> u64 {
    store.transport().calls.load(Ordering::SeqCst)
}
