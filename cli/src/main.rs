//! Ranker - rank a list of items by voting on one pair at a time.
//!
//! Sessions are stored as JSON files under the data directory and can be
//! resumed at any point; every vote is saved as soon as it is cast.

mod commands;
mod config;
mod error;
mod items;
mod output;
mod prompt;
mod slug;
mod store;

use crate::commands::{results, session, vote, Context};
use crate::config::Config;
use crate::error::Result;
use clap::{Parser, Subcommand};
use ranker_engine::ComparisonMode;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "ranker", version, about = "Rank items through pairwise votes")]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding session data (overrides RANKER_DATA_DIR).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Seed for pair order and shuffling (overrides RANKER_SEED).
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage ranking sessions
    #[command(subcommand)]
    Session(SessionCommand),

    /// Vote on pairs until the ranking is complete
    Vote {
        /// Session id
        id: String,
    },

    /// Show the current ranking of a session
    Results {
        /// Session id
        id: String,

        /// Output JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
enum SessionCommand {
    /// Create a session from a file of items
    Create {
        /// Display name; the session id is derived from it
        #[arg(short, long)]
        name: String,

        /// File with one item per line, or a JSON array of strings
        #[arg(short, long)]
        file: PathBuf,

        /// "full" to judge every pair, "assuming" to assume transitivity
        #[arg(short = 't', long, alias = "type")]
        mode: ComparisonMode,
    },

    /// List all sessions
    List,

    /// Delete one session
    Delete {
        /// Session id
        id: String,
    },

    /// Delete every session
    DeleteAll {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("ranker=debug,ranker_engine=debug")
    } else {
        EnvFilter::try_from_env("RANKER_LOG")
            .unwrap_or_else(|_| EnvFilter::new("ranker=warn,ranker_engine=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env()?.with_overrides(cli.data_dir, cli.seed);
    tracing::debug!(data_dir = %config.data_dir.display(), seed = ?config.seed, "loaded config");
    let ctx = Context::new(config);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Session(command) => match command {
            SessionCommand::Create { name, file, mode } => {
                session::create(&ctx, &name, &file, mode, &mut out).map(|_| ())
            }
            SessionCommand::List => session::list(&ctx, &mut out),
            SessionCommand::Delete { id } => session::delete(&ctx, &id, &mut out),
            SessionCommand::DeleteAll { yes } => session::delete_all(&ctx, yes, &mut input, &mut out),
        },
        Commands::Vote { id } => vote::run(&ctx, &id, &mut input, &mut out),
        Commands::Results { id, json } => results::run(&ctx, &id, json, &mut out),
    }?;

    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
