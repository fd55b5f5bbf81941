// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `contentdag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "contentdag",
    version,
    about = "Generate FAQ, product and comparison pages for a product through a DAG of steps.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `ContentDag.toml` in the current working directory, if it
    /// exists; built-in defaults otherwise.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// JSON file with the raw product to generate pages for.
    ///
    /// Default: the built-in sample product.
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Directory the documents are written to. Overrides `[output].dir`.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CONTENTDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Run each ready generation of units concurrently.
    #[arg(long)]
    pub concurrent: bool,

    /// Validate, print the unit graph and resolved config, but make no model calls.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
