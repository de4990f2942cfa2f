//! CLI module for Kilde.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Kilde - learning resource discovery
///
/// Finds learning resources for a topic, checks that every link answers, repairs broken
/// tutorial links where it can and ranks what is left.
/// The name "Kilde" is the Norwegian word for "source."
#[derive(Parser, Debug)]
#[command(name = "kilde")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "KILDE_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find, validate and rank learning resources for a topic
    Discover {
        /// Subject to study
        topic: String,

        /// Learner level (beginner, intermediate, advanced)
        #[arg(short, long)]
        level: Option<String>,

        /// Print the resource set as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether a link is reachable, optionally trying platform repair
    Probe {
        /// URL to check
        url: String,

        /// Platform name used for repair (e.g. GeeksforGeeks, W3Schools)
        #[arg(short, long, requires = "topic")]
        platform: Option<String>,

        /// Topic used to build repair candidates
        #[arg(short, long)]
        topic: Option<String>,
    },

    /// Start HTTP API server for integration with other systems
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8000")]
        port: u16,
    },

    /// Start MCP server for AI assistant integration
    Mcp,

    /// Check provider credentials, configuration and connectivity
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
