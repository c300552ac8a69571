use std::io;

use anyhow::Result;
use clap::Parser;
use todo_cli::{app, Cli, ReqwestTransport};
use todo_core::{ApiConfig, TodoClient, TodoStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ApiConfig::from_override(cli.api_url);
    tracing::debug!(base_url = %config.base_url(), "using api");

    let store = TodoStore::new(TodoClient::new(&config.base_url()), ReqwestTransport::new());
    app::run(&store, cli.command, &mut io::stdout(), &mut io::stderr()).await
}
