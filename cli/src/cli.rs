//! Command-line surface.

use clap::{Parser, Subcommand};
use todo_core::config::API_URL_ENV;

#[derive(Debug, Parser)]
#[command(name = "todo", version, about = "Keep a todo list in sync with a remote store")]
pub struct Cli {
    /// API root, without the `/api` suffix
    #[arg(long, global = true, env = API_URL_ENV)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show every todo
    List,
    /// Create a todo
    Add {
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },
    /// Mark a todo completed
    Done { id: String },
    /// Mark a todo not completed
    Undo { id: String },
    /// Delete a todo
    Rm { id: String },
    /// Check that the API answers
    Ping,
}
