//! quicknote command-line front end.
//!
//! # Responsibility
//! - Stand in for the notes page: one list, two input fields, delete
//!   controls and alerts.
//! - Wire `quicknote_core::NotesClient` to a terminal view and stderr
//!   notices.

mod terminal;

use clap::{Parser, Subcommand, ValueEnum};
use log::warn;
use quicknote_core::{
    default_log_level, flush_logging, init_logging, ClientConfig, HttpTransport, NoteDraft,
    NoteId, NoteListView, NotesClient, Notifier, Outcome, StatusPolicy,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use terminal::{StderrNotifier, TerminalView};

#[derive(Debug, Parser)]
#[command(
    name = "quicknote",
    version,
    about = "List, add and delete notes on a remote notes API"
)]
struct Cli {
    /// Notes API collection address, e.g. https://host/api/notes
    #[arg(long, env = "QUICKNOTE_API_URL", global = true)]
    base_url: Option<String>,

    /// How non-2xx answers to add/delete are treated
    #[arg(
        long,
        value_enum,
        env = "QUICKNOTE_STATUS_POLICY",
        default_value_t = PolicyArg::Strict,
        global = true
    )]
    status_policy: PolicyArg,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Also print warnings and errors from the log to stderr
    #[arg(long, global = true)]
    log_stderr: bool,

    /// Disable bold titles
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show all notes
    List,
    /// Create a note, then show all notes
    Add {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        content: String,
    },
    /// Delete a note by id, then show all notes
    Delete { id: String },
    /// Print the core library version
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    Strict,
    Lenient,
}

impl From<PolicyArg> for StatusPolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::Strict => StatusPolicy::Strict,
            PolicyArg::Lenient => StatusPolicy::Lenient,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let code = run(cli).await;
    // The logger is buffered and held in a static that is never dropped.
    flush_logging();
    code
}

async fn run(cli: Cli) -> ExitCode {
    if let Command::Version = cli.command {
        println!("quicknote_core version={}", quicknote_core::core_version());
        return ExitCode::SUCCESS;
    }

    let log_dir = cli
        .log_dir
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("quicknote-logs"));
    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    if let Err(err) = init_logging(&log_level, &log_dir, cli.log_stderr) {
        eprintln!("warning: logging disabled: {err}");
    }

    let config = match cli
        .base_url
        .as_deref()
        .map(ClientConfig::new)
        .unwrap_or_else(ClientConfig::from_env)
    {
        Ok(config) => config.with_status_policy(cli.status_policy.into()),
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    let client = NotesClient::new(
        config,
        HttpTransport::new(),
        Arc::new(StderrNotifier) as Arc<dyn Notifier>,
        Arc::new(TerminalView::new(!cli.no_color)) as Arc<dyn NoteListView>,
    );

    let outcome = match cli.command {
        Command::List => client.load_notes().await,
        Command::Add { title, content } => {
            let mut draft = NoteDraft::new(title, content);
            client.save_note(&mut draft).await
        }
        Command::Delete { id } => client.delete_note(&NoteId::from(id)).await,
        Command::Version => Outcome::Completed,
    };

    match outcome {
        Outcome::Completed => ExitCode::SUCCESS,
        Outcome::Rejected => {
            warn!("event=cli_exit module=cli status=rejected");
            ExitCode::from(2)
        }
        Outcome::Failed => {
            warn!("event=cli_exit module=cli status=failed");
            ExitCode::FAILURE
        }
    }
}
