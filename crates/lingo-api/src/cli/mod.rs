//! CLI command definitions and dispatch for the `lingo` binary.
//!
//! Uses clap derive macros for argument parsing. Besides `serve`, the
//! commands are operator tools for local use: creating users, opening and
//! closing sessions, and reading a session's history.

pub mod history;
pub mod session;
pub mod user;

use clap::{Parser, Subcommand};
use uuid::Uuid;

/// Language-tutor chat backend.
#[derive(Parser)]
#[command(name = "lingo", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true, env = "LINGO_OTEL")]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Manage users.
    User {
        #[command(subcommand)]
        action: user::UserCommand,
    },

    /// Open and close sessions.
    Session {
        #[command(subcommand)]
        action: session::SessionCommand,
    },

    /// Print a session's chat history, oldest first.
    History {
        /// Owning user id.
        #[arg(long)]
        user: Uuid,

        /// Session token.
        #[arg(long)]
        token: String,
    },
}

/// Map verbosity flags to a default tracing directive.
///
/// `RUST_LOG` still takes precedence when set.
pub fn log_directive(verbose: u8, quiet: bool) -> &'static str {
    match verbose {
        0 if quiet => "error",
        0 => "warn",
        1 => "info,lingo_api=debug,lingo_core=debug,lingo_infra=debug",
        _ => "trace",
    }
}
