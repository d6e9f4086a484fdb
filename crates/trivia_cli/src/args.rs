//! CLI argument definitions using clap
//!
//! Commands:
//! - trivia serve [--host <host>] [--port <port>]
//! - trivia seed
//! - trivia ping

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Trivia question service
#[derive(Parser, Debug)]
#[command(name = "trivia")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// SQLite database file, overrides TRIVIA_DB_PATH
    #[arg(long, global = true)]
    pub db_path: Option<PathBuf>,

    /// trace | debug | info | warn | error
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API
    Serve {
        /// Host to bind, overrides TRIVIA_HOST
        #[arg(long)]
        host: Option<String>,

        /// Port to bind, overrides TRIVIA_PORT
        #[arg(long)]
        port: Option<u16>,

        /// Insert the default categories before serving
        #[arg(long)]
        seed: bool,
    },

    /// Create the schema and insert the default categories
    Seed,

    /// Print core linkage and version, then exit
    Ping,
}
