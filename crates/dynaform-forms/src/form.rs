//! The mounted form: state store, host callback, settings, and render hooks.
//!
//! [`DynamicForm`] is what a host page holds. It receives UI events, applies
//! them to its [`FormState`] one at a time, and renders the current state.
//! Each event is handled inside the form's tracing span.

use std::fmt;

use dynaform_core::logging::form_span;
use dynaform_core::{DynaformError, DynaformResult, Settings};
use serde::{Deserialize, Serialize};
use tracing::{debug, Span};

use crate::dnd::{closest_center, DropZone, Rect};
use crate::render::{RenderHooks, Renderer};
use crate::reorder::{Direction, ReorderOutcome};
use crate::schema::{ContainerPath, FieldDescriptor, Schema};
use crate::state::{FormState, SubmitOutcome};
use crate::value::{FieldValue, FormValues};
use crate::widgets::create_widget;

/// A user-interaction event delivered by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FormEvent {
    /// A control reported a decoded value.
    Change {
        /// Field name.
        name: String,
        /// New value.
        value: FieldValue,
    },
    /// A control reported a raw browser string.
    Input {
        /// Field name.
        name: String,
        /// Raw string, `None` when the control reported nothing.
        raw: Option<String>,
    },
    /// A drag ended.
    DragEnd {
        /// The container the dragged field lives in.
        container: ContainerPath,
        /// Id of the dragged field.
        active: String,
        /// Id of the field it was dropped onto, if any.
        over: Option<String>,
    },
    /// The user pressed submit.
    Submit,
}

/// What handling an event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// A value was stored; carries the field's error after the update.
    ValueChanged {
        /// Field name.
        name: String,
        /// The error now shown for the field.
        error: Option<String>,
    },
    /// A drag ended.
    Reordered(ReorderOutcome),
    /// Submit was attempted.
    Submitted(SubmitOutcome),
}

/// A mounted schema-driven form.
///
/// # Examples
///
/// ```
/// use dynaform_forms::schema::{FieldDescriptor, FieldKind};
/// use dynaform_forms::{DynamicForm, FieldValue, Schema};
///
/// let schema = Schema::new(vec![FieldDescriptor::new("name", FieldKind::Text).required(true)]).unwrap();
/// let mut count = 0;
/// let mut form = DynamicForm::new("profile", schema, |_| count += 1);
///
/// assert!(!form.submit().is_submitted());
/// form.set_value("name", FieldValue::text("Ada"));
/// assert!(form.submit().is_submitted());
/// drop(form);
/// assert_eq!(count, 1);
/// ```
pub struct DynamicForm<'a> {
    id: String,
    state: FormState,
    settings: Settings,
    on_submit: Box<dyn FnMut(FormValues) + 'a>,
    hooks: RenderHooks<'a>,
    span: Span,
}

impl<'a> DynamicForm<'a> {
    /// Mounts `schema` with default settings; `on_submit` receives each valid submission.
    pub fn new(id: impl Into<String>, schema: Schema, on_submit: impl FnMut(FormValues) + 'a) -> Self {
        let id = id.into();
        let span = form_span(&id);
        Self {
            id,
            state: FormState::new(schema),
            settings: Settings::default(),
            on_submit: Box::new(on_submit),
            hooks: RenderHooks::default(),
            span,
        }
    }

    /// Uses the given settings.
    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Overrides how sections are wrapped.
    #[must_use]
    pub fn with_section_hook(
        mut self,
        hook: impl Fn(&FieldDescriptor, &str) -> String + 'a,
    ) -> Self {
        self.hooks.section = Some(Box::new(hook));
        self
    }

    /// Overrides the submit control.
    #[must_use]
    pub fn with_submit_hook(mut self, hook: impl Fn(&str) -> String + 'a) -> Self {
        self.hooks.submit = Some(Box::new(hook));
        self
    }

    /// Returns the form id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the state store.
    pub const fn state(&self) -> &FormState {
        &self.state
    }

    /// Returns the settings.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Stores a value and re-validates that field. Returns its error.
    pub fn set_value(&mut self, name: &str, value: FieldValue) -> Option<&str> {
        let _enter = self.span.enter();
        self.state.set_value(name, value)
    }

    /// Decodes a raw browser string with the field's widget, then stores it.
    ///
    /// # Errors
    ///
    /// Returns [`DynaformError::UnknownField`] when no renderable leaf has this name.
    pub fn input(&mut self, name: &str, raw: Option<&str>) -> DynaformResult<Option<&str>> {
        let value = {
            let field = self
                .state
                .schema()
                .find_by_name(name)
                .ok_or_else(|| DynaformError::UnknownField(name.to_string()))?;
            let widget = create_widget(field, &self.settings)
                .ok_or_else(|| DynaformError::UnknownField(name.to_string()))?;
            widget.value_from_input(raw)
        };
        Ok(self.set_value(name, value))
    }

    /// Validates the whole tree and, if clean, calls the submit callback.
    pub fn submit(&mut self) -> SubmitOutcome {
        let _enter = self.span.enter();
        let on_submit = &mut self.on_submit;
        self.state.submit(|values| on_submit(values))
    }

    /// Moves `source_id` onto the position of `destination_id` in one container.
    pub fn reorder(
        &mut self,
        container: &ContainerPath,
        source_id: &str,
        destination_id: &str,
    ) -> ReorderOutcome {
        let _enter = self.span.enter();
        self.state.reorder(container, source_id, destination_id)
    }

    /// Handles the end of a drag. Dropping outside any zone changes nothing.
    pub fn drag_end(
        &mut self,
        container: &ContainerPath,
        active: &str,
        over: Option<&str>,
    ) -> ReorderOutcome {
        match over {
            Some(over) => self.reorder(container, active, over),
            None => {
                let _enter = self.span.enter();
                debug!(container = %container, field = active, "drag ended outside any drop zone");
                ReorderOutcome::NoTarget
            }
        }
    }

    /// Resolves the drop target from geometry, then handles the drag end.
    ///
    /// `zones` are the dragged field's siblings in `container`.
    pub fn drop_at(
        &mut self,
        container: &ContainerPath,
        active: &str,
        dragged: &Rect,
        zones: &[DropZone],
    ) -> ReorderOutcome {
        let over = closest_center(dragged, zones).map(String::from);
        self.drag_end(container, active, over.as_deref())
    }

    /// Moves a field one slot up or down within its container.
    pub fn nudge(&mut self, container: &ContainerPath, id: &str, direction: Direction) -> ReorderOutcome {
        let _enter = self.span.enter();
        self.state.nudge(container, id, direction)
    }

    /// Applies one event.
    ///
    /// # Errors
    ///
    /// Only [`FormEvent::Input`] can fail, for a name no renderable leaf carries.
    pub fn dispatch(&mut self, event: FormEvent) -> DynaformResult<EventOutcome> {
        let outcome = match event {
            FormEvent::Change { name, value } => {
                let error = self.set_value(&name, value).map(String::from);
                EventOutcome::ValueChanged { name, error }
            }
            FormEvent::Input { name, raw } => {
                let error = self.input(&name, raw.as_deref())?.map(String::from);
                EventOutcome::ValueChanged { name, error }
            }
            FormEvent::DragEnd {
                container,
                active,
                over,
            } => EventOutcome::Reordered(self.drag_end(&container, &active, over.as_deref())),
            FormEvent::Submit => EventOutcome::Submitted(self.submit()),
        };
        Ok(outcome)
    }

    /// Renders the current state as an HTML form.
    pub fn render(&self) -> String {
        let _enter = self.span.enter();
        Renderer::new(&self.settings)
            .with_hooks(&self.hooks)
            .render_form(&self.id, &self.state)
    }
}

impl fmt::Debug for DynamicForm<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicForm")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("settings", &self.settings)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}
