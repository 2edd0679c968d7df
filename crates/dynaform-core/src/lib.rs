//! # dynaform-core
//!
//! Core types, settings, and error types for the dynaform engine.
//! This crate has no engine dependencies and provides the foundation for the other crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Rendering and logging configuration
//! - [`settings_loader`] - Loading settings from TOML/JSON files and the environment
//! - [`checks`] - Diagnostic messages produced by configuration checks
//! - [`logging`] - Tracing-based logging integration

pub mod checks;
pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{DynaformError, DynaformResult, SchemaError};
pub use settings::Settings;
