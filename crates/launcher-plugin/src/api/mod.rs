//! Plugin API — the host capability surface handed to plugins.

pub mod context;

pub use context::{NoopPublicApi, PluginInitContext, PublicApi};
