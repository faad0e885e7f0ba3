//! Table and JSON output of query results.

use tabled::{Table, Tabled};

use launcher_core::AppResult;
use launcher_plugin::QueryResponse;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "Plugin")]
    plugin: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Subtitle")]
    sub_title: String,
}

/// Print the results of one query in the selected format
pub fn print_response(response: &QueryResponse, format: OutputFormat) -> AppResult<()> {
    let rows = response.rows();
    match format {
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("No results for '{}'.", response.query);
            } else {
                let table = Table::new(rows.into_iter().map(|r| Row {
                    plugin: r.plugin_name,
                    title: r.result.title,
                    sub_title: r.result.sub_title,
                }))
                .to_string();
                println!("{}", table);
            }
        }
        OutputFormat::Json => {
            let body = serde_json::json!({
                "query": &*response.query,
                "results": rows,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }
    Ok(())
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    eprintln!("⚠ {}", msg);
}
