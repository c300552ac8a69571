//! Runs one command against a `TodoStore` and renders the result.
//!
//! Remote failures are reported on the error stream and never turn into a
//! non-zero exit; only local I/O errors propagate.

use std::io::Write;

use anyhow::Result;
use todo_core::{Outcome, SkipReason, Todo, TodoId, TodoStats, TodoStore, Transport};

use crate::cli::Command;

pub async fn run<T, O, E>(store: &TodoStore<T>, command: Command, out: &mut O, err: &mut E) -> Result<()>
where
    T: Transport,
    O: Write,
    E: Write,
{
    if command == Command::Ping {
        match store.greet().await {
            Ok(message) => writeln!(out, "{}", message.message)?,
            Err(failure) => writeln!(err, "error: {failure}")?,
        }
        return Ok(());
    }

    report(err, store.initialize().await, None)?;

    match command {
        Command::List | Command::Ping => {}
        Command::Add { title } => {
            store.set_draft(title.join(" "));
            report(err, store.submit().await, None)?;
        }
        Command::Done { id } => {
            let id = TodoId::new(id);
            report(err, store.set_completed(&id, true).await, Some(&id))?;
        }
        Command::Undo { id } => {
            let id = TodoId::new(id);
            report(err, store.set_completed(&id, false).await, Some(&id))?;
        }
        Command::Rm { id } => {
            let id = TodoId::new(id);
            report(err, store.remove(&id).await, Some(&id))?;
        }
    }

    render(out, &store.todos(), store.stats())?;
    Ok(())
}

fn report<E: Write>(err: &mut E, outcome: Outcome, id: Option<&TodoId>) -> Result<()> {
    match outcome {
        Outcome::Applied | Outcome::Skipped(SkipReason::AlreadyInitialized) => {}
        Outcome::Unmatched => {
            if let Some(id) = id {
                writeln!(err, "note: {id} is not in the local list")?;
            }
        }
        Outcome::Skipped(SkipReason::BlankTitle) => writeln!(err, "error: title must not be blank")?,
        Outcome::Skipped(SkipReason::AddInFlight) => writeln!(err, "error: another add is in progress")?,
        Outcome::Failed(failure) => writeln!(err, "error: {failure}")?,
    }
    Ok(())
}

pub fn render<O: Write>(out: &mut O, todos: &[Todo], stats: TodoStats) -> Result<()> {
    if todos.is_empty() {
        writeln!(out, "No todos yet.")?;
    }
    for todo in todos {
        let mark = if todo.completed { 'x' } else { ' ' };
        writeln!(out, "[{mark}] {}  {}", todo.id, todo.title)?;
    }
    writeln!(
        out,
        "Total: {}  Completed: {}  Remaining: {}",
        stats.total, stats.completed, stats.remaining
    )?;
    Ok(())
}
