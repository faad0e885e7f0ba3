//! Web search plugin for the launcher.
//!
//! Each search source owns a trigger keyword; `g rust traits` opens a Google
//! search for "rust traits".

pub mod plugin;
pub mod source;

pub use plugin::WebSearchPlugin;
pub use source::SearchSource;
