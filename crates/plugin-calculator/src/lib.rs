//! Calculator plugin for the launcher.
//!
//! Answers global queries that look like arithmetic, e.g. `(1 + 2) * 3`.

pub mod eval;
pub mod plugin;

pub use plugin::CalculatorPlugin;
