//! Widgets: the HTML controls that leaf fields render as.
//!
//! A widget renders a control for a field name and current value, decodes
//! the raw string a browser would report back for that control, and says
//! which element id a `<label>` should point at.
//!
//! [`create_widget`] picks the widget for a descriptor's kind. Sections and
//! unknown kinds have no widget.

use std::collections::HashMap;
use std::fmt;

use dynaform_core::Settings;

use crate::schema::{ChoiceOption, FieldDescriptor, FieldKind};
use crate::value::FieldValue;

/// Enumerates the built-in widget types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetType {
    /// `<input type="text">`.
    TextInput,
    /// `<input type="email">`.
    EmailInput,
    /// `<input type="tel">`.
    TelInput,
    /// `<input type="date">`.
    DateInput,
    /// `<input type="number">`.
    NumberInput,
    /// `<textarea>`.
    Textarea,
    /// `<input type="checkbox">`.
    CheckboxInput,
    /// `<select>` with a leading empty option.
    Select,
    /// A group of `<input type="radio">` elements.
    RadioSelect,
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TextInput => "TextInput",
            Self::EmailInput => "EmailInput",
            Self::TelInput => "TelInput",
            Self::DateInput => "DateInput",
            Self::NumberInput => "NumberInput",
            Self::Textarea => "Textarea",
            Self::CheckboxInput => "CheckboxInput",
            Self::Select => "Select",
            Self::RadioSelect => "RadioSelect",
        };
        write!(f, "{name}")
    }
}

/// An HTML form control.
pub trait Widget: fmt::Debug {
    /// Returns the widget type.
    fn widget_type(&self) -> WidgetType;

    /// Renders the control.
    ///
    /// - `name` - the HTML `name` attribute
    /// - `value` - the field's current value, if any
    /// - `attrs` - extra attributes (`id`, `placeholder`, `required`, ...)
    fn render(&self, name: &str, value: Option<&FieldValue>, attrs: &HashMap<String, String>)
        -> String;

    /// Decodes the raw string a browser reports for this control.
    ///
    /// `None` means the control reported nothing.
    fn value_from_input(&self, raw: Option<&str>) -> FieldValue {
        FieldValue::text(raw.unwrap_or_default())
    }

    /// Returns the element id a `<label>` should target.
    fn id_for_label(&self, id: &str) -> String {
        id.to_string()
    }
}

/// Escapes text for use in HTML content and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Formats attributes as ` key="value"`, sorted by key.
///
/// An empty value renders as a bare boolean attribute (` required`).
pub(crate) fn render_attrs(attrs: &HashMap<String, String>) -> String {
    let mut keys: Vec<&String> = attrs.keys().collect();
    keys.sort();
    keys.into_iter()
        .map(|k| {
            let v = &attrs[k];
            if v.is_empty() {
                format!(" {k}")
            } else {
                format!(r#" {k}="{}""#, escape_html(v))
            }
        })
        .collect()
}

fn text_of(value: Option<&FieldValue>) -> String {
    value.map(|v| escape_html(&v.as_text())).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Built-in widgets
// ---------------------------------------------------------------------------

/// A single-line `<input>` of a given `type`.
#[derive(Debug, Clone)]
pub struct Input {
    input_type: &'static str,
}

impl Input {
    /// Creates an input for a text-like kind.
    pub const fn new(input_type: &'static str) -> Self {
        Self { input_type }
    }
}

impl Widget for Input {
    fn widget_type(&self) -> WidgetType {
        match self.input_type {
            "email" => WidgetType::EmailInput,
            "tel" => WidgetType::TelInput,
            "date" => WidgetType::DateInput,
            "number" => WidgetType::NumberInput,
            _ => WidgetType::TextInput,
        }
    }

    fn render(
        &self,
        name: &str,
        value: Option<&FieldValue>,
        attrs: &HashMap<String, String>,
    ) -> String {
        format!(
            r#"<input type="{}" name="{}" value="{}"{} />"#,
            self.input_type,
            escape_html(name),
            text_of(value),
            render_attrs(attrs)
        )
    }
}

/// A `<textarea>`.
#[derive(Debug, Clone)]
pub struct Textarea {
    /// Visible rows.
    pub rows: u32,
}

impl Widget for Textarea {
    fn widget_type(&self) -> WidgetType {
        WidgetType::Textarea
    }

    fn render(
        &self,
        name: &str,
        value: Option<&FieldValue>,
        attrs: &HashMap<String, String>,
    ) -> String {
        format!(
            r#"<textarea name="{}" rows="{}"{}>{}</textarea>"#,
            escape_html(name),
            self.rows,
            render_attrs(attrs),
            text_of(value)
        )
    }
}

/// An `<input type="checkbox">` holding a boolean.
#[derive(Debug, Clone)]
pub struct CheckboxInput;

impl Widget for CheckboxInput {
    fn widget_type(&self) -> WidgetType {
        WidgetType::CheckboxInput
    }

    fn render(
        &self,
        name: &str,
        value: Option<&FieldValue>,
        attrs: &HashMap<String, String>,
    ) -> String {
        let checked = value.is_some_and(FieldValue::is_truthy);
        let checked_attr = if checked { " checked" } else { "" };
        format!(
            r#"<input type="checkbox" name="{}"{checked_attr}{} />"#,
            escape_html(name),
            render_attrs(attrs)
        )
    }

    fn value_from_input(&self, raw: Option<&str>) -> FieldValue {
        // A checkbox reports "on" when checked and nothing otherwise.
        FieldValue::Bool(matches!(raw, Some("on" | "true" | "1")))
    }
}

/// A `<select>` with a leading empty option.
#[derive(Debug, Clone)]
pub struct Select {
    /// The available choices.
    pub choices: Vec<ChoiceOption>,
    /// Text of the leading empty option.
    pub placeholder: String,
}

impl Select {
    /// Creates a select over `choices`.
    pub fn new(choices: Vec<ChoiceOption>, placeholder: impl Into<String>) -> Self {
        Self {
            choices,
            placeholder: placeholder.into(),
        }
    }
}

impl Widget for Select {
    fn widget_type(&self) -> WidgetType {
        WidgetType::Select
    }

    fn render(
        &self,
        name: &str,
        value: Option<&FieldValue>,
        attrs: &HashMap<String, String>,
    ) -> String {
        let current = value.map(|v| v.as_text().into_owned()).unwrap_or_default();
        let mut options = format!(r#"<option value="">{}</option>"#, escape_html(&self.placeholder));
        for choice in &self.choices {
            let selected = if choice.value == current { " selected" } else { "" };
            options.push_str(&format!(
                r#"<option value="{}"{selected}>{}</option>"#,
                escape_html(&choice.value),
                escape_html(&choice.label)
            ));
        }
        format!(
            r#"<select name="{}"{}>{options}</select>"#,
            escape_html(name),
            render_attrs(attrs)
        )
    }
}

/// A group of `<input type="radio">` elements, one per choice.
#[derive(Debug, Clone)]
pub struct RadioSelect {
    /// The available choices.
    pub choices: Vec<ChoiceOption>,
}

impl RadioSelect {
    /// Creates a radio group over `choices`.
    pub const fn new(choices: Vec<ChoiceOption>) -> Self {
        Self { choices }
    }
}

impl Widget for RadioSelect {
    fn widget_type(&self) -> WidgetType {
        WidgetType::RadioSelect
    }

    fn render(
        &self,
        name: &str,
        value: Option<&FieldValue>,
        attrs: &HashMap<String, String>,
    ) -> String {
        let current = value.map(|v| v.as_text().into_owned()).unwrap_or_default();
        let id_base = attrs.get("id").map_or(name, String::as_str);
        let mut item_attrs = attrs.clone();
        item_attrs.remove("id");

        let mut html = String::from(r#"<div class="radio-group">"#);
        for (i, choice) in self.choices.iter().enumerate() {
            let checked = if choice.value == current { " checked" } else { "" };
            let option_id = escape_html(&format!("{id_base}_{i}"));
            html.push_str(&format!(
                r#"<div><input type="radio" name="{}" value="{}" id="{option_id}"{checked}{} />"#,
                escape_html(name),
                escape_html(&choice.value),
                render_attrs(&item_attrs)
            ));
            html.push_str(&format!(
                r#" <label for="{option_id}">{}</label></div>"#,
                escape_html(&choice.label)
            ));
        }
        html.push_str("</div>");
        html
    }

    fn id_for_label(&self, id: &str) -> String {
        format!("{id}_0")
    }
}

/// Creates the widget for a field, or `None` for sections and unknown kinds.
pub fn create_widget(field: &FieldDescriptor, settings: &Settings) -> Option<Box<dyn Widget>> {
    let widget: Box<dyn Widget> = match field.kind {
        FieldKind::Text => Box::new(Input::new("text")),
        FieldKind::Email => Box::new(Input::new("email")),
        FieldKind::Tel => Box::new(Input::new("tel")),
        FieldKind::Date => Box::new(Input::new("date")),
        FieldKind::Number => Box::new(Input::new("number")),
        FieldKind::Textarea => Box::new(Textarea {
            rows: field.rows.unwrap_or(settings.textarea_rows),
        }),
        FieldKind::Checkbox => Box::new(CheckboxInput),
        FieldKind::Select => Box::new(Select::new(
            field.options.clone(),
            field
                .placeholder
                .clone()
                .unwrap_or_else(|| settings.select_placeholder.clone()),
        )),
        FieldKind::Radio => Box::new(RadioSelect::new(field.options.clone())),
        FieldKind::Section | FieldKind::Unknown => return None,
    };
    Some(widget)
}
