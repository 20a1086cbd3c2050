use crate::fetcher::DEFAULT_USER_AGENT;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;

#[derive(Debug, Parser)]
#[command(name = "kino-program")]
#[command(about = "Normalized daily programs of Prague cinemas")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// User-Agent sent to cinema websites
    #[arg(long, global = true, env = "KINO_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    #[arg(long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    /// Log JSON lines instead of compact text
    #[arg(long, global = true, env = "KINO_JSON_LOGS")]
    pub json_logs: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the HTTP API
    Serve {
        #[arg(long, env = "KINO_BIND", default_value = "0.0.0.0:3000")]
        bind: SocketAddr,
    },
    /// Print one cinema's program as JSON
    Program {
        #[arg(long)]
        cinema: String,
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// List supported cinema identifiers
    Cinemas,
}
