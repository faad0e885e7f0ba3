//! Initializer — runs every plugin's `init` in parallel with independent fault domains.
//!
//! Each `init` runs on its own task behind the shared fault boundary. A
//! failing, panicking, or hanging plugin is logged and unloaded, so siblings
//! are neither aborted nor delayed. The pass as a whole never fails.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use tracing::{debug, error, info};

use crate::api::context::{PluginInitContext, PublicApi};
use crate::error::{FaultStage, PluginFault};
use crate::instance::PluginInstance;
use crate::isolation;
use crate::registry::PluginRegistry;
use crate::unload::UnloadPolicy;

/// Reason recorded when a plugin is unloaded after a failed `init`.
pub const INIT_FAILURE_REASON: &str = "failed to init";

/// Outcome of one initialization pass.
#[derive(Debug, Default)]
pub struct InitReport {
    /// IDs of plugins that initialized successfully.
    pub initialized: Vec<String>,
    /// Faults of plugins that were unloaded.
    pub failed: Vec<PluginFault>,
}

impl InitReport {
    /// Whether every plugin initialized.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of plugins attempted.
    pub fn total(&self) -> usize {
        self.initialized.len() + self.failed.len()
    }
}

/// Drives concurrent, fault-isolated initialization of the registry.
#[derive(Debug, Clone)]
pub struct PluginInitializer {
    registry: Arc<PluginRegistry>,
    unload: UnloadPolicy,
    timeout: Option<Duration>,
}

impl PluginInitializer {
    /// Creates an initializer. `timeout` bounds each plugin's `init`; `None` is unbounded.
    pub fn new(unload: UnloadPolicy, timeout: Option<Duration>) -> Self {
        Self {
            registry: unload.registry().clone(),
            unload,
            timeout,
        }
    }

    /// Initializes every registered instance and waits for all of them.
    pub async fn init_all(&self, api: Arc<dyn PublicApi>) -> InitReport {
        let instances = self.registry.all().await;
        info!(count = instances.len(), "Initializing plugins");

        let tasks = instances.into_iter().map(|instance| {
            let context = PluginInitContext::new(api.clone(), instance.metadata().clone());
            init_one(instance, context, &self.unload, self.timeout)
        });

        let mut report = InitReport::default();
        for outcome in join_all(tasks).await {
            match outcome {
                Ok(plugin_id) => report.initialized.push(plugin_id),
                Err(fault) => report.failed.push(fault),
            }
        }

        info!(
            initialized = report.initialized.len(),
            failed = report.failed.len(),
            "Plugin initialization complete"
        );

        report
    }
}

async fn init_one(
    instance: Arc<PluginInstance>,
    context: PluginInitContext,
    unload: &UnloadPolicy,
    timeout: Option<Duration>,
) -> Result<String, PluginFault> {
    let metadata = instance.metadata().clone();
    debug!(plugin_id = %metadata.id, "Start to init plugin {}", metadata.name);

    let plugin = instance.plugin().clone();
    let started = Instant::now();
    match isolation::guard(async move { plugin.init(context).await }, timeout).await {
        Ok(()) => {
            let elapsed = started.elapsed();
            instance.mark_ready(elapsed);
            info!(
                plugin_id = %metadata.id,
                elapsed_ms = instance.init_duration_ms(),
                "Init plugin {} success",
                metadata.name
            );
            Ok(metadata.id.clone())
        }
        Err(cause) => {
            let fault = PluginFault::new(&instance, FaultStage::Init, cause);
            error!(
                plugin_id = %fault.plugin_id,
                name = %fault.plugin_name,
                website = %fault.website,
                error = %fault.cause,
                "Fail to init plugin: {}",
                fault.plugin_name
            );
            unload.unload(&instance, INIT_FAILURE_REASON).await;
            Err(fault)
        }
    }
}
