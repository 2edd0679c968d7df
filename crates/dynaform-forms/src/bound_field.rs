//! Bound fields: a leaf descriptor paired with its current value and error.
//!
//! The renderer builds a [`BoundField`] for each leaf it visits and asks it
//! for the label, the control, and the inline error.

use std::collections::HashMap;

use dynaform_core::Settings;

use crate::schema::{FieldDescriptor, FieldKind};
use crate::value::FieldValue;
use crate::widgets::{self, escape_html, Widget};

/// A leaf field bound to the form's current state.
#[derive(Debug)]
pub struct BoundField<'a> {
    /// The field definition.
    pub field: &'a FieldDescriptor,
    /// The current value, if the field has one.
    pub value: Option<&'a FieldValue>,
    /// The current error, if any.
    pub error: Option<&'a str>,
    widget: Box<dyn Widget>,
    settings: &'a Settings,
}

impl<'a> BoundField<'a> {
    /// Binds a leaf field. Returns `None` for sections and unknown kinds.
    pub fn new(
        field: &'a FieldDescriptor,
        value: Option<&'a FieldValue>,
        error: Option<&'a str>,
        settings: &'a Settings,
    ) -> Option<Self> {
        let widget = widgets::create_widget(field, settings)?;
        Some(Self {
            field,
            value,
            error,
            widget,
            settings,
        })
    }

    /// Returns the widget used for this field.
    pub fn widget(&self) -> &dyn Widget {
        self.widget.as_ref()
    }

    /// Returns the HTML `id` of the control.
    pub fn auto_id(&self) -> String {
        format!("id_{}", self.field.name)
    }

    /// Returns `true` if the field currently has an error.
    pub const fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Renders the `<label>`, with the required marker when applicable.
    pub fn label_tag(&self) -> String {
        let label_id = self.widget.id_for_label(&self.auto_id());
        let marker = if self.field.required {
            format!(
                r#" <span class="required">{}</span>"#,
                escape_html(&self.settings.required_marker)
            )
        } else {
            String::new()
        };
        format!(
            r#"<label for="{}">{}{marker}</label>"#,
            escape_html(&label_id),
            escape_html(&self.field.label)
        )
    }

    /// Renders the control.
    pub fn render_widget(&self) -> String {
        let mut attrs = HashMap::new();
        attrs.insert("id".to_string(), self.auto_id());
        if self.field.required {
            attrs.insert("required".to_string(), String::new());
        }
        if let Some(placeholder) = &self.field.placeholder {
            if !self.field.kind.is_choice() && self.field.kind != FieldKind::Checkbox {
                attrs.insert("placeholder".to_string(), placeholder.clone());
            }
        }
        if self.has_error() {
            attrs.insert("aria-invalid".to_string(), "true".to_string());
        }
        self.widget.render(&self.field.name, self.value, &attrs)
    }

    /// Renders the inline error paragraph, or an empty string.
    pub fn error_html(&self) -> String {
        self.error.map_or_else(String::new, |message| {
            format!(r#"<p class="field-error">{}</p>"#, escape_html(message))
        })
    }

    /// Renders the help text paragraph, or an empty string.
    pub fn help_html(&self) -> String {
        self.field
            .description
            .as_deref()
            .map_or_else(String::new, |text| {
                format!(r#"<p class="field-help">{}</p>"#, escape_html(text))
            })
    }

    /// Renders the whole field: label, control, help text, and error.
    ///
    /// Checkboxes put the label beside the box; every other kind puts it above.
    pub fn render(&self) -> String {
        let body = if self.field.kind == FieldKind::Checkbox {
            format!(
                r#"<div class="checkbox-row">{} {}</div>"#,
                self.render_widget(),
                self.label_tag()
            )
        } else {
            format!("{}{}", self.label_tag(), self.render_widget())
        };
        format!(
            r#"<div class="field field-{}">{body}{}{}</div>"#,
            self.field.kind,
            self.error_html(),
            self.help_html()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bind<'a>(
        field: &'a FieldDescriptor,
        value: Option<&'a FieldValue>,
        error: Option<&'a str>,
        settings: &'a Settings,
    ) -> BoundField<'a> {
        BoundField::new(field, value, error, settings).unwrap()
    }

    #[test]
    fn test_auto_id_and_render() {
        let settings = Settings::default();
        let field = FieldDescriptor::new("city", FieldKind::Text).label("City");
        let value = FieldValue::text("Boston");
        let bf = bind(&field, Some(&value), None, &settings);
        assert_eq!(bf.auto_id(), "id_city");
        let html = bf.render_widget();
        assert!(html.contains(r#"name="city""#));
        assert!(html.contains(r#"value="Boston""#));
        assert!(html.contains(r#"id="id_city""#));
    }

    #[test]
    fn test_label_tag_required_marker() {
        let settings = Settings::default();
        let field = FieldDescriptor::new("first", FieldKind::Text)
            .label("First Name")
            .required(true);
        let bf = bind(&field, None, None, &settings);
        assert_eq!(
            bf.label_tag(),
            r#"<label for="id_first">First Name <span class="required">*</span></label>"#
        );
        assert!(bf.render_widget().contains(" required"));
    }

    #[test]
    fn test_label_tag_optional() {
        let settings = Settings::default();
        let field = FieldDescriptor::new("middle", FieldKind::Text).label("Middle");
        let bf = bind(&field, None, None, &settings);
        assert_eq!(bf.label_tag(), r#"<label for="id_middle">Middle</label>"#);
    }

    #[test]
    fn test_label_targets_first_radio() {
        let settings = Settings::default();
        let field = FieldDescriptor::new("size", FieldKind::Radio).option("s", "Small");
        let bf = bind(&field, None, None, &settings);
        assert!(bf.label_tag().contains(r#"for="id_size_0""#));
    }

    #[test]
    fn test_placeholder_only_on_text_like() {
        let settings = Settings::default();
        let text = FieldDescriptor::new("q", FieldKind::Text).placeholder("Search");
        assert!(bind(&text, None, None, &settings)
            .render_widget()
            .contains(r#"placeholder="Search""#));

        let select = FieldDescriptor::new("s", FieldKind::Select)
            .placeholder("Pick one")
            .option("a", "A");
        let html = bind(&select, None, None, &settings).render_widget();
        assert!(!html.contains("placeholder="));
        assert!(html.contains(r#"<option value="">Pick one</option>"#));
    }

    #[test]
    fn test_error_html() {
        let settings = Settings::default();
        let field = FieldDescriptor::new("email", FieldKind::Email);
        let bf = bind(&field, None, Some("Invalid email"), &settings);
        assert!(bf.has_error());
        assert_eq!(bf.error_html(), r#"<p class="field-error">Invalid email</p>"#);
        assert!(bf.render_widget().contains(r#"aria-invalid="true""#));

        let bf = bind(&field, None, None, &settings);
        assert_eq!(bf.error_html(), "");
    }

    #[test]
    fn test_checkbox_label_beside_box() {
        let settings = Settings::default();
        let field = FieldDescriptor::new("agree", FieldKind::Checkbox).label("I agree");
        let html = bind(&field, None, None, &settings).render();
        let input = html.find("<input").unwrap();
        let label = html.find("<label").unwrap();
        assert!(input < label);
    }

    #[test]
    fn test_render_includes_help_text() {
        let settings = Settings::default();
        let field = FieldDescriptor::new("zip", FieldKind::Text).description("Five digits");
        let html = bind(&field, None, None, &settings).render();
        assert!(html.contains(r#"<p class="field-help">Five digits</p>"#));
        assert!(html.starts_with(r#"<div class="field field-text">"#));
    }

    #[test]
    fn test_no_binding_for_sections() {
        let settings = Settings::default();
        let section = FieldDescriptor::section("s", "S", vec![]);
        assert!(BoundField::new(&section, None, None, &settings).is_none());
    }
}
