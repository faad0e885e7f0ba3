//! Command-line arguments.

use clap::Parser;

use crate::output::OutputFormat;

/// Launcher — plugin-driven quick launcher
#[derive(Debug, Parser)]
#[command(name = "launcher", version, about, long_about = None)]
pub struct Cli {
    /// Base configuration file (extension optional)
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Environment overlay loaded from `config/<env>`
    #[arg(short, long, env = "LAUNCHER_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Queries to run; reads one query per line from stdin when omitted
    pub queries: Vec<String>,
}
