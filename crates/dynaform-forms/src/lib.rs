//! # dynaform-forms
//!
//! The form engine. A declarative tree of [`FieldDescriptor`]s is loaded into a
//! [`Schema`], mounted into a [`FormState`], rendered to HTML controls, edited
//! through events, reordered by drag-and-drop, and finally submitted.
//!
//! ## Modules
//!
//! - [`schema`] - Field descriptors, field kinds, the validated schema tree, container paths
//! - [`value`] - Field values and the value/error maps
//! - [`validation`] - The per-field validator and the recursive submit pass
//! - [`state`] - The form state store (values, errors, ordering)
//! - [`reorder`] - Sibling reordering (array-move semantics)
//! - [`dnd`] - Drop-target detection by closest center
//! - [`widgets`] - HTML controls for each leaf kind
//! - [`bound_field`] - A leaf field paired with its value and error
//! - [`render`] - The recursive renderer and its customization hooks
//! - [`form`] - The mounted form: event dispatch and the host submit callback
//! - [`checks`] - Schema checks that surface silent capability gaps
//!
//! ## Quick Start
//!
//! ```
//! use dynaform_forms::{DynamicForm, FieldDescriptor, FieldKind, FieldValue, Schema};
//!
//! let schema = Schema::new(vec![
//!     FieldDescriptor::new("city", FieldKind::Text).label("City").required(true),
//! ])
//! .unwrap();
//!
//! let mut submitted = Vec::new();
//! {
//!     let mut form = DynamicForm::new("address", schema, |values| submitted.push(values));
//!     assert!(!form.submit().is_submitted());
//!     form.set_value("city", FieldValue::text("Boston"));
//!     assert!(form.submit().is_submitted());
//! }
//! assert_eq!(submitted.len(), 1);
//! ```

pub mod bound_field;
pub mod checks;
pub mod dnd;
pub mod form;
pub mod render;
pub mod reorder;
pub mod schema;
pub mod state;
pub mod validation;
pub mod value;
pub mod widgets;

pub use form::{DynamicForm, EventOutcome, FormEvent};
pub use render::{RenderHooks, Renderer};
pub use reorder::{Direction, ReorderOutcome};
pub use schema::{ChoiceOption, ContainerPath, FieldDescriptor, FieldKind, FormSchema, Schema, ValidationRule};
pub use state::{FormState, SubmitOutcome};
pub use value::{FieldValue, FormErrors, FormValues};
