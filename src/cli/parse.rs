//! CLI parse: clap types for intake. No behavior; definitions only.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// intake - flatten file drops, resolve name collisions, normalize paths
#[derive(Parser)]
#[command(name = "intake")]
#[command(about = "Flatten file drops, resolve name collisions and normalize relative paths")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (where .intake/config.toml is looked up)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan dropped files and folders into a flat, sorted, type-filtered list
    Scan {
        /// Files and directories to scan, as if dropped together
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Accepted types, e.g. "image/*,application/json,.png" (default: config)
        #[arg(long)]
        accept: Option<String>,
        /// Keep dot-files and dot-directories
        #[arg(long)]
        include_hidden: bool,
        /// Directory levels to descend
        #[arg(long)]
        max_depth: Option<usize>,
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Resolve a file name against existing names
    Name {
        /// Candidate name
        name: String,
        /// Existing names, comma-separated
        #[arg(long, value_delimiter = ',')]
        existing: Vec<String>,
        /// Take existing names from the entries of this directory
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Resolve `.` and `..` segments in a relative path
    Path {
        path: String,
        /// Prefix to build a storage key with
        #[arg(long)]
        prefix: Option<String>,
    },
    /// Print a file's content as text, a data URL, or base64
    Encode {
        file: PathBuf,
        #[arg(long = "as", value_enum, default_value = "base64")]
        encoding: Encoding,
    },
    /// Print a byte count as a human-readable size
    Size { bytes: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Encoding {
    Text,
    DataUrl,
    Base64,
}
