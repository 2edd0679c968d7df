//! The form state store.
//!
//! [`FormState`] owns the three pieces of mutable state of a mounted form:
//! the schema (whose sibling lists may be reordered), the current values, and
//! the current errors. Every mutation goes through `&mut self`, so events are
//! applied one at a time and each one's effects are visible to the next.

use tracing::{debug, trace, warn};

use crate::reorder::{self, Direction, ReorderOutcome};
use crate::schema::{ContainerPath, Schema};
use crate::validation;
use crate::value::{FieldValue, FormErrors, FormValues};

/// The result of a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Every leaf passed; the host callback received the values.
    Submitted,
    /// At least one leaf failed; the callback was not called.
    Blocked {
        /// Number of fields with an error.
        error_count: usize,
    },
}

impl SubmitOutcome {
    /// Returns `true` if the host callback was called.
    pub const fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted)
    }
}

/// Values, errors, and field ordering of one mounted form.
#[derive(Debug, Clone)]
pub struct FormState {
    schema: Schema,
    values: FormValues,
    errors: FormErrors,
}

impl FormState {
    /// Mounts a schema. Values start from the field defaults; errors start empty.
    pub fn new(schema: Schema) -> Self {
        let values = schema.defaults();
        Self {
            schema,
            values,
            errors: FormErrors::new(),
        }
    }

    /// Returns the schema in its current order.
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the current values.
    pub const fn values(&self) -> &FormValues {
        &self.values
    }

    /// Returns the current errors.
    pub const fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// Returns the current value of a field.
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Returns the current error of a field.
    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    /// Stores a value and re-validates that one field.
    ///
    /// The field is looked up by name anywhere in the tree. A name that no
    /// leaf carries is still stored but never gets an error entry.
    ///
    /// Returns the field's error after the update.
    pub fn set_value(&mut self, name: &str, value: FieldValue) -> Option<&str> {
        let error = match self.schema.find_by_name(name) {
            Some(field) => validation::validate(field, Some(&value)),
            None => {
                warn!(field = name, "value set for a field that is not in the schema");
                None
            }
        };
        trace!(field = name, value = %value, error = ?error, "value changed");

        self.values.insert(name.to_string(), value);
        match error {
            Some(message) => {
                self.errors.insert(name.to_string(), message);
            }
            None => {
                self.errors.remove(name);
            }
        }
        self.error(name)
    }

    /// Validates every leaf against the current values without touching state.
    pub fn validate_all(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        validation::validate_tree(self.schema.fields(), &self.values, &mut errors);
        errors
    }

    /// Runs a full validation pass and, if it is clean, hands a snapshot of
    /// the values to `on_submit`.
    ///
    /// On failure the error map is replaced with the complete set of errors
    /// and `on_submit` is not called. On success the error map is cleared and
    /// `on_submit` is called exactly once.
    pub fn submit<F>(&mut self, on_submit: F) -> SubmitOutcome
    where
        F: FnOnce(FormValues),
    {
        let errors = self.validate_all();
        if errors.is_empty() {
            self.errors.clear();
            debug!(fields = self.values.len(), "form submitted");
            on_submit(self.values.clone());
            SubmitOutcome::Submitted
        } else {
            let error_count = errors.len();
            debug!(error_count, "submission blocked by validation errors");
            self.errors = errors;
            SubmitOutcome::Blocked { error_count }
        }
    }

    /// Moves `source_id` to the position of `destination_id` within one container.
    ///
    /// Values and errors are untouched.
    pub fn reorder(
        &mut self,
        container: &ContainerPath,
        source_id: &str,
        destination_id: &str,
    ) -> ReorderOutcome {
        let outcome = reorder::reorder(&mut self.schema, container, source_id, destination_id);
        log_reorder(container, source_id, &outcome);
        outcome
    }

    /// Moves a field one slot up or down within its container.
    pub fn nudge(&mut self, container: &ContainerPath, id: &str, direction: Direction) -> ReorderOutcome {
        let outcome = reorder::nudge(&mut self.schema, container, id, direction);
        log_reorder(container, id, &outcome);
        outcome
    }
}

fn log_reorder(container: &ContainerPath, id: &str, outcome: &ReorderOutcome) {
    if outcome.is_moved() {
        debug!(container = %container, field = id, %outcome, "field reordered");
    } else {
        debug!(container = %container, field = id, reason = %outcome, "reorder ignored");
    }
}
