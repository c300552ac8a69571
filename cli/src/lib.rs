//! Command-line host for `todo-core`.
//!
//! Supplies the network (`ReqwestTransport`), parses arguments, and prints
//! the store's snapshot after each command.

pub mod app;
pub mod cli;
pub mod transport;

pub use cli::{Cli, Command};
pub use transport::ReqwestTransport;
