//! HTML rendering of a form.
//!
//! The [`Renderer`] walks the schema tree recursively and produces one
//! sortable item per sibling. Leaves become bound controls; sections become a
//! fieldset whose body is another sortable list, so children are only ever
//! reordered within their own section. Fields of an unknown kind produce
//! nothing.
//!
//! Output shape:
//!
//! ```html
//! <form id="signup" novalidate>
//!   <div class="sortable-list" data-container="/">
//!     <div class="sortable-item" data-sortable-id="email" data-container="/">
//!       <span class="drag-handle" aria-hidden="true">&#8942;&#8942;</span>
//!       <div class="field field-email">...</div>
//!     </div>
//!   </div>
//!   <button type="submit">Submit</button>
//! </form>
//! ```

use std::fmt;

use dynaform_core::Settings;
use tracing::debug;

use crate::bound_field::BoundField;
use crate::schema::{ContainerPath, FieldDescriptor, FieldKind};
use crate::state::FormState;
use crate::widgets::escape_html;

/// Wraps a section. Receives the section and its rendered children list.
pub type SectionHook<'h> = Box<dyn Fn(&FieldDescriptor, &str) -> String + 'h>;

/// Wraps or replaces the submit control. Receives the default control markup.
pub type SubmitHook<'h> = Box<dyn Fn(&str) -> String + 'h>;

/// Optional host overrides for parts of the rendered form.
#[derive(Default)]
pub struct RenderHooks<'h> {
    /// Replaces the default section fieldset.
    pub section: Option<SectionHook<'h>>,
    /// Replaces the default submit button.
    pub submit: Option<SubmitHook<'h>>,
}

impl fmt::Debug for RenderHooks<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderHooks")
            .field("section", &self.section.is_some())
            .field("submit", &self.submit.is_some())
            .finish()
    }
}

/// Renders a [`FormState`] as HTML.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'r> {
    settings: &'r Settings,
    hooks: Option<&'r RenderHooks<'r>>,
}

impl<'r> Renderer<'r> {
    /// Creates a renderer with no hooks.
    pub const fn new(settings: &'r Settings) -> Self {
        Self {
            settings,
            hooks: None,
        }
    }

    /// Uses the given host overrides.
    #[must_use]
    pub fn with_hooks(mut self, hooks: &'r RenderHooks<'r>) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Renders the whole `<form>` element.
    pub fn render_form(&self, form_id: &str, state: &FormState) -> String {
        let schema = state.schema();
        let mut html = format!(r#"<form id="{}""#, escape_html(form_id));
        if let Some(class) = &self.settings.form_class {
            html.push_str(&format!(r#" class="{}""#, escape_html(class)));
        }
        html.push_str(" novalidate>");

        if let Some(title) = schema.title() {
            html.push_str(&format!(r#"<h2 class="form-title">{}</h2>"#, escape_html(title)));
        }
        if let Some(description) = schema.description() {
            html.push_str(&format!(
                r#"<p class="form-description">{}</p>"#,
                escape_html(description)
            ));
        }

        html.push_str(&self.render_list(schema.fields(), &ContainerPath::root(), state));
        html.push_str(&self.render_submit());
        html.push_str("</form>");
        html
    }

    /// Renders one sibling list as a sortable container.
    pub fn render_list(
        &self,
        fields: &[FieldDescriptor],
        container: &ContainerPath,
        state: &FormState,
    ) -> String {
        let path = escape_html(&container.to_string());
        let mut html = format!(r#"<div class="sortable-list" data-container="{path}">"#);
        for field in fields {
            if let Some(body) = self.render_node(field, container, state) {
                html.push_str(&format!(
                    r#"<div class="sortable-item" data-sortable-id="{}" data-container="{path}"><span class="drag-handle" aria-hidden="true">&#8942;&#8942;</span>{body}</div>"#,
                    escape_html(&field.id)
                ));
            }
        }
        html.push_str("</div>");
        html
    }

    /// Renders one node, or `None` when its kind has no rendering.
    pub fn render_node(
        &self,
        field: &FieldDescriptor,
        container: &ContainerPath,
        state: &FormState,
    ) -> Option<String> {
        match field.kind {
            FieldKind::Section => Some(self.render_section(field, container, state)),
            FieldKind::Text
            | FieldKind::Email
            | FieldKind::Tel
            | FieldKind::Date
            | FieldKind::Number
            | FieldKind::Select
            | FieldKind::Checkbox
            | FieldKind::Radio
            | FieldKind::Textarea => BoundField::new(
                field,
                state.value(&field.name),
                state.error(&field.name),
                self.settings,
            )
            .map(|bound| bound.render()),
            FieldKind::Unknown => {
                debug!(field = %field.id, "skipping field of unknown kind");
                None
            }
        }
    }

    fn render_section(
        &self,
        field: &FieldDescriptor,
        container: &ContainerPath,
        state: &FormState,
    ) -> String {
        let children = self.render_list(&field.children, &container.child(field.id.clone()), state);

        if let Some(hook) = self.hooks.and_then(|h| h.section.as_ref()) {
            return hook(field, &children);
        }

        let mut html = format!(
            r#"<fieldset class="section" id="section-{}"><legend>{}</legend>"#,
            escape_html(&field.id),
            escape_html(&field.label)
        );
        if let Some(description) = &field.description {
            html.push_str(&format!(
                r#"<p class="section-description">{}</p>"#,
                escape_html(description)
            ));
        }
        html.push_str(&children);
        html.push_str("</fieldset>");
        html
    }

    fn render_submit(&self) -> String {
        let default = format!(
            r#"<button type="submit">{}</button>"#,
            escape_html(&self.settings.submit_label)
        );
        match self.hooks.and_then(|h| h.submit.as_ref()) {
            Some(hook) => hook(&default),
            None => default,
        }
    }
}
