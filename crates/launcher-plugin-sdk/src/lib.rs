//! # launcher-plugin-sdk
//!
//! SDK for developing launcher plugins.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use launcher_plugin_sdk::prelude::*;
//!
//! #[derive(Debug)]
//! struct Echo;
//!
//! #[async_trait]
//! impl Plugin for Echo {
//!     async fn init(&self, _context: PluginInitContext) -> Result<(), PluginError> {
//!         Ok(())
//!     }
//!
//!     async fn query(&self, query: &Query) -> Result<Vec<QueryResult>, PluginError> {
//!         Ok(vec![QueryResult::new(query.search.clone())])
//!     }
//! }
//!
//! let metadata = plugin_metadata!(
//!     id: "echo",
//!     name: "Echo",
//!     version: "1.0.0",
//!     keywords: ["echo"]
//! );
//! ```

pub mod macros;

/// Prelude for convenient imports.
pub mod prelude {
    pub use async_trait::async_trait;
    pub use launcher_plugin::prelude::*;

    pub use crate::plugin_metadata;
}
