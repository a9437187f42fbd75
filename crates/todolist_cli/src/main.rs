//! Terminal client for the todo list API.
//!
//! # Responsibility
//! - Map one subcommand to one `TodoBoard` action against the live service.
//! - Print the resulting list and the status line, like the board would show.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use todolist_client::{Draft, TodoApiClient, TodoBoard, DEFAULT_API_URL};
use todolist_core::{default_log_level, init_logging, parse_todo_id};

const CONFIRM_DELETE_PROMPT: &str = "Are you sure you want to delete?";

#[derive(Debug, Parser)]
#[command(name = "todolist", version, about = "Manage todos through the todo list API")]
struct Cli {
    /// Base URL of the API service
    #[arg(long, env = "TODOLIST_API_URL", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,

    /// Write rolling logs to this absolute directory
    #[arg(long, env = "TODOLIST_LOG_DIR", global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show every todo
    List,

    /// Add a todo
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
    },

    /// Edit a todo; omitted fields keep their current value
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a todo after confirmation
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        init_logging("cli", default_log_level(), &log_dir.to_string_lossy())
            .map_err(anyhow::Error::msg)?;
    }

    let api = TodoApiClient::new(&cli.api_url)
        .with_context(|| format!("invalid --api-url `{}`", cli.api_url))?;
    let mut board = TodoBoard::new();

    let ok = board.load(&api).await && run(&mut board, &api, cli.command).await?;

    let stdout = io::stdout();
    render(&board, &mut stdout.lock())?;
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

async fn run(board: &mut TodoBoard, api: &TodoApiClient, command: Command) -> Result<bool> {
    let ok = match command {
        Command::List => true,
        Command::Add { title, description } => {
            board.draft = Draft::new(title, description);
            board.add(api).await
        }
        Command::Edit {
            id,
            title,
            description,
        } => {
            let id = parse_todo_id(&id)?;
            if !board.begin_edit(id) {
                eprintln!("Todo not found");
                return Ok(false);
            }
            if let Some(draft) = board.edit_draft_mut() {
                if let Some(title) = title {
                    draft.title = title;
                }
                if let Some(description) = description {
                    draft.description = description;
                }
            }
            board.save_edit(api).await
        }
        Command::Delete { id, yes } => {
            let id = parse_todo_id(&id)?;
            if !board.todos().iter().any(|todo| todo.id == id) {
                eprintln!("Todo not found");
                return Ok(false);
            }
            board
                .delete(api, id, |_| yes || prompt_confirm())
                .await
        }
    };
    info!("event=cli_command module=cli status={}", if ok { "ok" } else { "error" });
    Ok(ok)
}

fn prompt_confirm() -> bool {
    confirm_delete(&mut io::stdin().lock(), &mut io::stdout())
}

fn confirm_delete(input: &mut impl BufRead, out: &mut impl Write) -> bool {
    if write!(out, "{CONFIRM_DELETE_PROMPT} [y/N] ")
        .and_then(|()| out.flush())
        .is_err()
    {
        return false;
    }
    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(_) => is_affirmative(&answer),
        Err(_) => false,
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn render(board: &TodoBoard, out: &mut impl Write) -> io::Result<()> {
    if board.todos().is_empty() {
        writeln!(out, "(no todos)")?;
    }
    for todo in board.todos() {
        writeln!(out, "{}  {}", todo.id, todo.title)?;
        if !todo.description.is_empty() {
            writeln!(out, "    {}", todo.description)?;
        }
    }
    if let Some(message) = board.message() {
        writeln!(out, "{message}")?;
    }
    if let Some(error) = board.error() {
        writeln!(out, "error: {error}")?;
    }
    Ok(())
}
