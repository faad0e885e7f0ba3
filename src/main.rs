//! Launcher — command-line host for the plugin runtime.
//!
//! Loads configuration, initializes logging, loads and initializes the
//! builtin plugins, then answers queries from the command line or stdin.

mod api;
mod cli;
mod output;

use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, fmt};

use launcher_core::config::AppConfig;
use launcher_core::error::AppError;
use launcher_plugin::{PluginManager, StaticPluginLoader};
use plugin_calculator::CalculatorPlugin;
use plugin_websearch::WebSearchPlugin;

use crate::api::ConsoleApi;
use crate::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load_from(&cli.config, &cli.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(cli, config).await {
        tracing::error!("Launcher error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging. Logs go to stderr so stdout stays machine-readable.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

/// Builds the loader for the plugins compiled into this binary.
fn builtin_loader(config: &AppConfig) -> StaticPluginLoader {
    let websearch = WebSearchPlugin::default();

    StaticPluginLoader::new()
        .with_settings(config.plugins.settings.clone())
        .with_plugin(CalculatorPlugin::metadata(), Arc::new(CalculatorPlugin::new()))
        .with_plugin(websearch.metadata(), Arc::new(websearch))
}

async fn run(cli: Cli, config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting launcher v{}", env!("CARGO_PKG_VERSION"));

    let manager = PluginManager::new(&config.plugins);
    let report = manager
        .load_plugins(&builtin_loader(&config), Arc::new(ConsoleApi))
        .await?;

    for fault in &report.failed {
        output::print_warning(&format!("{}", fault));
    }
    for plugin in manager.plugins().await {
        if let Some(init) = plugin.init_duration() {
            tracing::info!(plugin_id = %plugin.id(), ?init, "Plugin {} ready", plugin.metadata().name);
        }
    }

    if !cli.queries.is_empty() {
        for raw in &cli.queries {
            let response = manager.query(raw).await;
            output::print_response(&response, cli.format)?;
        }
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let response = manager.query(&line).await;
        output::print_response(&response, cli.format)?;
    }

    Ok(())
}
