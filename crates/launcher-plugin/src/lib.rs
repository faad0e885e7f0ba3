//! # launcher-plugin
//!
//! Plugin runtime for the launcher. Provides:
//!
//! - The plugin contract (`init`, `query`) and its metadata/settings types
//! - An injectable plugin registry with snapshot reads
//! - A parallel, fault-isolated initializer
//! - A keyword-filtered query dispatcher with per-plugin isolation
//! - The unload policy that ends a failed plugin's lifetime

pub mod api;
pub mod dispatcher;
pub mod error;
pub mod initializer;
pub mod instance;
mod isolation;
pub mod loader;
pub mod manager;
pub mod metadata;
pub mod prelude;
pub mod query;
pub mod registry;
pub mod traits;
pub mod unload;

pub use api::context::{PluginInitContext, PublicApi};
pub use dispatcher::{Eligibility, QueryDispatcher};
pub use error::{FaultCause, FaultStage, PluginError, PluginFault};
pub use initializer::{InitReport, PluginInitializer};
pub use instance::PluginInstance;
pub use loader::{PluginLoader, StaticPluginLoader};
pub use manager::{PluginManager, QueryResponse, ResultRow};
pub use metadata::{PluginMetadata, PluginSettings, SettingsHandle};
pub use query::{PluginQueryResult, Query, QueryResult};
pub use registry::PluginRegistry;
pub use traits::Plugin;
pub use unload::{UnloadPolicy, UnloadRecord};
