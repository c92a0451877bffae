//! CLI argument parsing via clap.

use clap::{Parser, Subcommand};
use eml_repl::build_info::LONG_VERSION;

/// A read-eval-print loop for Embedded ML. Type a command, get a response.
#[derive(Debug, Parser)]
#[command(name = "eml-repl", version, long_version = LONG_VERSION)]
pub struct Args {
    /// Command to evaluate. If provided, runs once, prints the exchange and exits.
    pub input: Option<String>,

    /// Path to config file (default: ./eml-repl.toml or ~/.config/eml-repl/eml-repl.toml).
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Evaluate through an external program (`program args...`) fed one request per run.
    #[arg(long = "eval-cmd", value_name = "CMD")]
    pub eval_cmd: Option<String>,

    /// Disable color output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Print each exchange as one JSON object per line instead of text.
    #[arg(long = "json")]
    pub json: bool,

    /// Override the log filter (e.g. `debug` or `eml_repl=trace`).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write the default config to ~/.config/eml-repl/eml-repl.toml.
    Init {
        /// Overwrite an existing config after writing a backup.
        #[arg(long)]
        force: bool,
    },
}
