//! Error types for the todo API client.
//!
//! # Design
//! `ApiError` describes why a single remote call went wrong. `NotFound` gets
//! a dedicated variant because callers frequently distinguish "the resource
//! does not exist" from "the server returned an unexpected status." All other
//! non-2xx responses land in `Http` with the raw status code and body.
//!
//! `RemoteCallFailure` is what the store reports: the cause plus which store
//! operation it interrupted. It is returned as data inside an `Outcome`,
//! never propagated as an `Err` out of the store.

use std::fmt;

/// Errors produced while building, executing, or parsing a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404, the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response (connection refused, reset, ...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response decoded but breaks the API contract (a list with
    /// duplicate ids, an update answered for a different id).
    #[error("contract violated: {0}")]
    Contract(String),
}

/// The store operation a remote call belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Add,
    SetCompleted,
    Remove,
    Greet,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Load => "load",
            Operation::Add => "add",
            Operation::SetCompleted => "set_completed",
            Operation::Remove => "remove",
            Operation::Greet => "greet",
        };
        f.write_str(name)
    }
}

/// A failed remote call, tagged with the operation that issued it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{operation} failed: {cause}")]
pub struct RemoteCallFailure {
    pub operation: Operation,
    #[source]
    pub cause: ApiError,
}

impl RemoteCallFailure {
    pub fn new(operation: Operation, cause: ApiError) -> Self {
        Self { operation, cause }
    }
}
