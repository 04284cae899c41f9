//! CLI module for ytscribe.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// ytscribe - YouTube transcripts for AI assistants
///
/// Serves time-windowed YouTube transcripts over MCP, or fetches them directly
/// from the command line.
#[derive(Parser, Debug)]
#[command(name = "ytscribe")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "YTSCRIBE_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start MCP server for AI assistant integration (Claude, etc.)
    Mcp,

    /// Fetch the transcript of a video between two timestamps
    Fetch {
        /// YouTube URL or video ID
        video: String,

        /// Start time in seconds
        #[arg(short, long, default_value = "0")]
        start: f64,

        /// End time in seconds (default: end of video)
        #[arg(short, long)]
        end: Option<f64>,

        /// Preferred language codes, in order (repeatable)
        #[arg(short, long = "lang", default_value = "en")]
        languages: Vec<String>,
    },

    /// Show the transcripts available for a video
    Info {
        /// YouTube URL or video ID
        video: String,
    },

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

    /// Show configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
