//! The I/O seam between `TodoStore` and the network.
//!
//! # Design
//! The core never opens a socket. A host supplies a `Transport` that turns
//! an `HttpRequest` into an `HttpResponse`. Non-2xx statuses are returned as
//! responses; only failures that produce no response at all become
//! `ApiError::Transport`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one HTTP round-trip.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request).await
    }
}
