//! # dynaform
//!
//! A schema-driven form engine.
//!
//! This is the meta-crate that re-exports the sub-crates. Depend on
//! `dynaform` to get everything, or on the individual crates for finer
//! control.

/// Settings, error types, logging setup, and settings checks.
pub use dynaform_core as core;

/// Schemas, validation, form state, reordering, and HTML rendering.
#[cfg(feature = "forms")]
pub use dynaform_forms as forms;

/// The `dynaform` management utility.
#[cfg(feature = "cli")]
pub use dynaform_cli as cli;

pub use serde;
pub use serde_json;
pub use tracing;

/// Common imports for hosts embedding a form.
#[cfg(feature = "forms")]
pub mod prelude {
    pub use dynaform_core::{DynaformError, DynaformResult, Settings};
    pub use dynaform_forms::{
        ContainerPath, DynamicForm, FieldDescriptor, FieldKind, FieldValue, FormEvent, FormValues,
        Schema, SubmitOutcome,
    };
}
