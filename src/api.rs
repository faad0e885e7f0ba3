//! Host API handed to plugins by the command-line shell.

use async_trait::async_trait;
use tracing::info;

use launcher_plugin::PublicApi;

/// Headless host: window requests are logged, messages go to stderr.
#[derive(Debug, Default)]
pub struct ConsoleApi;

#[async_trait]
impl PublicApi for ConsoleApi {
    async fn change_query(&self, query: &str) {
        info!(query = %query, "Plugin requested query change");
    }

    async fn show_app(&self) {
        info!("Plugin requested show");
    }

    async fn hide_app(&self) {
        info!("Plugin requested hide");
    }

    async fn show_msg(&self, title: &str, sub_title: &str, _icon_path: Option<&str>) {
        eprintln!("[{title}] {sub_title}");
    }
}
