//! CLI module for Referat.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Referat - Minutes of Meeting pipeline
///
/// A CLI tool that turns recorded meetings into structured, shareable
/// minutes. The name "Referat" is the Norwegian word for meeting minutes.
#[derive(Parser, Debug)]
#[command(name = "referat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize Referat and verify configuration
    Init,

    /// Check configuration and connectivity requirements
    Doctor,

    /// Transcribe a meeting recording with speaker diarization
    Transcribe {
        /// Local audio/video file path
        input: String,

        /// Write the speaker-labeled transcript to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Generate structured minutes from a transcript
    Generate {
        /// Path to a transcript file (speaker-labeled or plain text)
        transcript: String,

        /// Write the editable minutes JSON to this file
        #[arg(short, long)]
        output: Option<String>,

        /// Also write a Markdown preview to this file
        #[arg(short, long)]
        markdown: Option<String>,
    },

    /// Render edited minutes as Markdown or PDF
    Preview {
        /// Path to the (edited) minutes JSON file
        minutes: String,

        /// Render the redacted external variant
        #[arg(long)]
        redacted: bool,

        /// Output format (markdown, pdf)
        #[arg(long, default_value = "markdown")]
        format: String,

        /// Output file (stdout for markdown if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Mail finalized minutes and persist the meeting record
    Share {
        /// Path to the (edited) minutes JSON file
        minutes: String,

        /// Internal recipient (repeatable); receives the full minutes
        #[arg(long = "to")]
        internal: Vec<String>,

        /// External recipient (repeatable); receives the redacted minutes
        #[arg(long = "external")]
        external: Vec<String>,

        /// Path to a summary text file to persist alongside the minutes
        #[arg(long)]
        summary: Option<String>,

        /// Path to the transcript file to persist alongside the minutes
        #[arg(long)]
        transcript: Option<String>,
    },

    /// List meetings stored in the remote meeting store
    Meetings,

    /// Start HTTP API server for integration with other systems
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
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

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
