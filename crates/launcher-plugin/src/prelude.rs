//! Prelude for convenient imports by plugin authors and hosts.

pub use async_trait::async_trait;

pub use crate::api::context::{NoopPublicApi, PluginInitContext, PublicApi};
pub use crate::error::{PluginError, PluginFault};
pub use crate::metadata::{GLOBAL_TRIGGER_KEYWORD, PluginMetadata, PluginSettings};
pub use crate::query::{Query, QueryResult};
pub use crate::traits::Plugin;
