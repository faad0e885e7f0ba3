//! Plugin-side errors and the structured fault descriptor recorded by the runtime.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::instance::PluginInstance;

/// Error returned by a plugin's own `init` or `query` implementation.
#[derive(Debug, Error)]
pub enum PluginError {
    /// Generic failure with a message supplied by the plugin.
    #[error("{0}")]
    Failed(String),
    /// I/O failure inside the plugin.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON (de)serialization failure inside the plugin.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PluginError {
    /// Create a generic plugin failure.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Lifecycle stage at which a plugin fault was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultStage {
    /// One-time setup.
    Init,
    /// Per-query lookup.
    Query,
}

impl fmt::Display for FaultStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => write!(f, "init"),
            Self::Query => write!(f, "query"),
        }
    }
}

/// What went wrong inside a single plugin call.
#[derive(Debug, Error)]
pub enum FaultCause {
    /// The plugin returned an error.
    #[error(transparent)]
    Error(#[from] PluginError),
    /// The plugin panicked; carries the panic message.
    #[error("panicked: {0}")]
    Panic(String),
    /// The call exceeded its time bound.
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    /// The task driving the call was aborted before completion.
    #[error("task aborted: {0}")]
    Aborted(String),
}

/// Structured descriptor of a contained plugin fault.
#[derive(Debug, Error)]
#[error("plugin '{plugin_name}' ({plugin_id}) failed during {stage}: {cause}")]
pub struct PluginFault {
    /// Plugin identifier.
    pub plugin_id: String,
    /// Plugin display name.
    pub plugin_name: String,
    /// Plugin website/contact.
    pub website: String,
    /// Stage at which the fault happened.
    pub stage: FaultStage,
    /// Underlying cause.
    #[source]
    pub cause: FaultCause,
}

impl PluginFault {
    /// Builds a fault descriptor from the instance that raised it.
    pub fn new(instance: &PluginInstance, stage: FaultStage, cause: FaultCause) -> Self {
        let metadata = instance.metadata();
        Self {
            plugin_id: metadata.id.clone(),
            plugin_name: metadata.name.clone(),
            website: metadata.website.clone(),
            stage,
            cause,
        }
    }

    /// Returns `true` if the plugin panicked.
    pub fn is_panic(&self) -> bool {
        matches!(self.cause, FaultCause::Panic(_))
    }

    /// Returns `true` if the call timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self.cause, FaultCause::Timeout(_))
    }
}
