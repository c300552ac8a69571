//! Client core for the todo service.
//!
//! # Overview
//! `TodoStore` keeps a local todo list consistent with a remote HTTP store.
//! Requests are built and responses parsed by the stateless `TodoClient`
//! (host-does-IO pattern); the network round-trip itself goes through a
//! `Transport` the host provides, so this crate never opens a socket.
//!
//! # Design
//! - `TodoClient` is stateless, it holds only `base_url`.
//! - Each remote operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `TodoStore` mutates local state only after the server confirms and
//!   reports failures as `Outcome::Failed` instead of returning `Err`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod store;
pub mod transport;
pub mod types;

pub use client::TodoClient;
pub use config::ApiConfig;
pub use error::{ApiError, Operation, RemoteCallFailure};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use store::{Outcome, SkipReason, TodoStore};
pub use transport::Transport;
pub use types::{ApiMessage, CreateTodo, Todo, TodoId, TodoStats, UpdateTodo};
