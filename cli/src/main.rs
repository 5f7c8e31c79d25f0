//! Terminal front end for the todo service: register, login, and the
//! four sync operations, with the session token persisted to a file
//! between invocations.

mod render;
mod token_store;
mod transport;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use todo_sync::{ApiClient, Credentials, Session, SyncClient, Transport};
use tracing_subscriber::EnvFilter;

use transport::UreqTransport;

#[derive(Parser)]
#[command(name = "todo", about = "Todo list client", version)]
struct Cli {
    /// Base URL of the todo service.
    #[arg(long, env = "TODO_SYNC_SERVER", default_value = "http://localhost:8080")]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an account.
    Register { email: String, password: String },
    /// Log in and store the session token.
    Login { email: String, password: String },
    /// Show the todo list.
    List,
    /// Add a new todo.
    Add { title: Vec<String> },
    /// Mark a todo as completed.
    Done { id: u64 },
    /// Mark a todo as not completed.
    Undone { id: u64 },
    /// Delete a todo.
    Rm { id: u64 },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let transport = UreqTransport::new();

    match cli.command {
        Command::Register { email, password } => {
            let api = ApiClient::new(&cli.server);
            let req = api.build_register(&Credentials { email, password })?;
            api.parse_register(transport.execute(req)?)?;
            println!("Register successfully");
        }
        Command::Login { email, password } => {
            let api = ApiClient::new(&cli.server);
            let req = api.build_login(&Credentials { email, password })?;
            let token = api.parse_login(transport.execute(req)?)?;
            let path = token_store::save(&token.token)?;
            tracing::debug!(path = %path.display(), "stored session token");
            println!("Login successfully");
        }
        command => {
            let session = token_store::load()?
                .context("Please login first (no session token found)")?;
            run_sync(&cli.server, session, transport, command)?;
        }
    }
    Ok(())
}

/// Run one collection operation and print the resynchronized list.
fn run_sync(
    server: &str,
    session: Session,
    transport: UreqTransport,
    command: Command,
) -> Result<()> {
    let api = ApiClient::with_session(server, session);
    let mut sync = SyncClient::new(api.clone(), transport.clone());

    let notices = match command {
        Command::List => sync.load(),
        Command::Add { title } => sync.create(&title.join(" ")),
        Command::Done { id } => sync.set_completed(&fetch_todo(&api, &transport, id)?, true),
        Command::Undone { id } => sync.set_completed(&fetch_todo(&api, &transport, id)?, false),
        Command::Rm { id } => sync.delete(id),
        Command::Register { .. } | Command::Login { .. } => unreachable!("handled in main"),
    };

    let failed = render::print_notices(&notices);
    render::print_view(sync.view());
    if failed {
        bail!("operation failed");
    }
    Ok(())
}

/// The update endpoint wants the full todo, so resolve the id against the
/// current collection first (the browser kept the record in the card's
/// closure; the CLI has to re-fetch it).
fn fetch_todo(api: &ApiClient, transport: &UreqTransport, id: u64) -> Result<todo_sync::Todo> {
    let req = api.build_list_todos()?;
    let todos = api.parse_list_todos(transport.execute(req)?)?;
    todos
        .into_iter()
        .find(|t| t.id == id)
        .with_context(|| format!("no todo with id {id}"))
}
