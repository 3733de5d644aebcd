//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use activityboard_core::{OutputFormat, TracingConfig, TracingOutputFormat};

/// activityboard - Browse and join extracurricular activities
#[derive(Debug, Parser)]
#[command(name = "activityboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "ACTIVITYBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Format of diagnostic logs on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, env = "ACTIVITYBOARD_LOG_FORMAT")]
    pub log_format: LogFormat,

    // --- Output format flags ---
    /// Output the board as an HTML fragment
    #[arg(long, group = "output_format")]
    pub html: bool,

    /// Output in JSON format
    #[arg(long, group = "output_format")]
    pub json: bool,

    // --- Display options ---
    /// Maximum description length (truncated with ellipsis)
    #[arg(long)]
    pub max_description_length: Option<usize>,

    // --- Connection flags ---
    /// Base URL of the activities API
    #[arg(long, env = "ACTIVITYBOARD_URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Returns the output format selected by flags, if any.
    pub fn output_format(&self) -> Option<OutputFormat> {
        if self.html {
            Some(OutputFormat::Html)
        } else if self.json {
            Some(OutputFormat::Json)
        } else {
            None
        }
    }
}

/// Format of diagnostic logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Single-line logs
    Compact,
    /// Multi-line human-readable logs
    Pretty,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    /// Builds the tracing setup for this format.
    pub fn tracing_config(self, debug: bool) -> TracingConfig {
        let base = if debug {
            TracingConfig::cli_debug()
        } else {
            TracingConfig::cli()
        };
        match self {
            Self::Compact => base,
            Self::Pretty => base.with_format(TracingOutputFormat::Pretty),
            Self::Json => TracingConfig::structured().with_level(base.default_level),
        }
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load and print the board (default)
    List,

    /// Print a single activity
    Show {
        /// Activity name
        name: String,
    },

    /// Sign up for an activity
    Signup {
        /// Activity name
        #[arg(long, short)]
        activity: String,

        /// Email address to register
        #[arg(long, short)]
        email: String,
    },

    /// Remove a participant from an activity
    Remove {
        /// Activity name
        #[arg(long, short)]
        activity: String,

        /// Email address to remove
        #[arg(long, short)]
        email: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
