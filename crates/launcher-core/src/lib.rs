//! # launcher-core
//!
//! Core crate for the launcher. Contains configuration schemas and the
//! unified error system shared by the plugin runtime and the host binary.
//!
//! This crate has **no** internal dependencies on other launcher crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
