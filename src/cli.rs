//! CLI interface for orgchart.
//!
//! Every invocation bootstraps an organization from a seed, runs the
//! requested operations against it, and prints the result. Nothing is kept
//! between invocations: `session` is the way to work on one organization
//! across many operations.

mod format;
mod session;

use std::{
    io,
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand, ValueEnum};
use orgchart::{OrgApp, Seed};
use tracing::debug;

use crate::config::Config;

use format::render_tree;
use session::Op;

/// orgchart: reorganize a company, with undo.
#[derive(Debug, Parser)]
#[command(name = "orgchart", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    /// Seed file (TOML) to bootstrap from.
    /// Defaults to the configured seed, then the built-in demo organization.
    #[arg(long, global = true)]
    seed: Option<PathBuf>,

    /// How trees are printed.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r"Workflow: trying out a reorganization
  1. orgchart show
     → prints the organization with employee ids
  2. orgchart apply move:8:5 undo redo
     → moves #8 under #5, undoes and redoes it, prints the result
  3. orgchart --seed company.toml session
     → reads `move 8 5`, `undo`, `redo`, `show`, `history`, `find <name>` from stdin

A move takes the employee out of their chain: their direct reports move up
to the employee's former supervisor.";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the organization as bootstrapped.
    Show,

    /// Apply operations in order, then print the resulting organization.
    ///
    /// Operations: `move:<employee>:<supervisor>`, `undo`, `redo`.
    /// Stops at the first operation that fails.
    Apply {
        #[arg(required = true)]
        ops: Vec<Op>,
    },

    /// Read operations from stdin, one per line, printing results as they go.
    ///
    /// A failing line is reported and the session continues.
    Session,
}

/// Tree output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented `name (#id)` lines.
    Text,
    /// Nested JSON objects.
    Json,
}

/// Run the CLI, returning an error message on failure.
pub fn run(config: &Config) -> Result<(), String> {
    let cli = Cli::parse();

    let seed = load_seed(cli.seed.as_deref().or(config.seed.as_deref()))?;
    let mut app =
        OrgApp::from_seed(&seed).map_err(|e| format!("failed to bootstrap organization: {e}"))?;

    match cli.command {
        Command::Show => {
            println!("{}", render_tree(&app.current_tree(), cli.format)?);
        }
        Command::Apply { ops } => {
            for op in &ops {
                let message = session::apply(&mut app, *op)?;
                eprintln!("{message}");
            }
            println!("{}", render_tree(&app.current_tree(), cli.format)?);
        }
        Command::Session => {
            session::run(&mut app, cli.format, io::stdin().lock(), io::stdout().lock())?;
        }
    }

    Ok(())
}

/// Load the seed at `path`, or the demo organization when none is given.
fn load_seed(path: Option<&Path>) -> Result<Seed, String> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading seed");
            Seed::load(path).map_err(|e| e.to_string())
        }
        None => Ok(Seed::demo()),
    }
}
