//! The schema model: a tree of field descriptors.
//!
//! A [`FieldDescriptor`] is either a leaf (an input of some [`FieldKind`]) or a
//! section whose `children` are further descriptors. Trees are usually two
//! levels deep, but nothing here assumes so; every walk is recursive.
//!
//! [`Schema`] is the validated form of a field list. Constructing one:
//!
//! - fills in a missing `id` from the field's `name`,
//! - rejects leaves without a name, duplicate leaf names, and duplicate ids.
//!
//! Validation patterns are compiled when a [`ValidationRule`] is created, so
//! a schema that contains a malformed pattern never loads.
//!
//! The JSON shape matches what host pages supply:
//!
//! ```json
//! {
//!   "title": "Personal Information Form",
//!   "fields": [
//!     { "id": "address", "name": "address", "type": "section", "label": "Address",
//!       "fields": [
//!         { "id": "zip", "name": "zip", "type": "text", "required": true,
//!           "validation": { "pattern": "^[0-9]{5}$", "message": "Five digits" } }
//!       ] }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use dynaform_core::{DynaformError, SchemaError};
use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};

use crate::value::{FieldValue, FormValues};

/// The kind of a field, selecting its control and validation rules.
///
/// Kinds the engine does not know deserialize to [`FieldKind::Unknown`]; such
/// fields render nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Single-line text.
    Text,
    /// Single-line text that must look like an email address.
    Email,
    /// Telephone number.
    Tel,
    /// Calendar date.
    Date,
    /// Numeric input.
    Number,
    /// Single choice from a dropdown.
    Select,
    /// Boolean toggle.
    Checkbox,
    /// Single choice from a set of exclusive options.
    Radio,
    /// Multi-line text.
    Textarea,
    /// A labeled container of child fields.
    Section,
    /// Any kind this engine does not render.
    #[serde(other)]
    Unknown,
}

impl FieldKind {
    /// Returns the kind's name as it appears in a schema.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Tel => "tel",
            Self::Date => "date",
            Self::Number => "number",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Textarea => "textarea",
            Self::Section => "section",
            Self::Unknown => "unknown",
        }
    }

    /// Returns `true` for the section kind.
    pub const fn is_section(self) -> bool {
        matches!(self, Self::Section)
    }

    /// Returns `true` for kinds whose answer is one of `options`.
    pub const fn is_choice(self) -> bool {
        matches!(self, Self::Select | Self::Radio)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `(value, label)` pair of a select or radio field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// The stored value.
    pub value: String,
    /// The displayed label.
    pub label: String,
}

impl ChoiceOption {
    /// Creates a new option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A compiled regular expression, compared and serialized by its source.
#[derive(Clone)]
pub struct Pattern(Regex);

impl Pattern {
    /// Compiles a pattern.
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source).map(Self)
    }

    /// Returns the pattern source.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns `true` if the pattern matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.as_str()).finish()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Pattern {}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A custom format rule: a pattern the value must match and the message shown when it doesn't.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationRule {
    /// The compiled pattern.
    pub pattern: Pattern,
    /// The error message; "Invalid format" when absent or empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationRule {
    /// Compiles `pattern` into a rule.
    pub fn new(pattern: &str, message: Option<&str>) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Pattern::new(pattern)?,
            message: message.map(String::from),
        })
    }

    /// Returns the message to show when the pattern does not match.
    pub fn error_message(&self) -> &str {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(crate::validation::INVALID_FORMAT)
    }
}

/// A node of the schema tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawField", rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Stable identity used as the drag-and-drop key.
    pub id: String,
    /// Key under which the value is stored. Unique among leaves.
    pub name: String,
    /// The field kind.
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Display label.
    pub label: String,
    /// Placeholder text for inputs, or the empty option of a select.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Help text below the field, or the blurb under a section heading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether a value must be supplied.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    /// Options of a select or radio field.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ChoiceOption>,
    /// Child fields of a section.
    #[serde(rename = "fields", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FieldDescriptor>,
    /// Optional custom format rule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRule>,
    /// Visible rows of a textarea.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    /// Value seeded into the form when it is mounted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<FieldValue>,
}

impl FieldDescriptor {
    /// Creates a descriptor whose id and label default to `name`.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            label: name.clone(),
            name,
            kind,
            placeholder: None,
            description: None,
            required: false,
            options: Vec::new(),
            children: Vec::new(),
            validation: None,
            rows: None,
            default: None,
        }
    }

    /// Creates a section with the given children.
    pub fn section(
        id: impl Into<String>,
        label: impl Into<String>,
        children: Vec<Self>,
    ) -> Self {
        Self::new(id, FieldKind::Section).label(label).children(children)
    }

    /// Sets the id.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the placeholder.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets whether this field is required.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Appends an option.
    #[must_use]
    pub fn option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push(ChoiceOption::new(value, label));
        self
    }

    /// Replaces the children.
    #[must_use]
    pub fn children(mut self, children: Vec<Self>) -> Self {
        self.children = children;
        self
    }

    /// Sets the custom format rule.
    #[must_use]
    pub fn validation(mut self, rule: ValidationRule) -> Self {
        self.validation = Some(rule);
        self
    }

    /// Sets the textarea rows.
    #[must_use]
    pub fn rows(mut self, rows: u32) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Returns `true` for sections.
    pub const fn is_section(&self) -> bool {
        self.kind.is_section()
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawValidation {
    #[serde(default)]
    pattern: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawField {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: FieldKind,
    #[serde(default)]
    label: String,
    #[serde(default)]
    placeholder: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    options: Vec<ChoiceOption>,
    #[serde(default)]
    fields: Vec<RawField>,
    #[serde(default)]
    validation: Option<RawValidation>,
    #[serde(default)]
    rows: Option<u32>,
    #[serde(default)]
    default: Option<FieldValue>,
}

impl TryFrom<RawField> for FieldDescriptor {
    type Error = SchemaError;

    fn try_from(raw: RawField) -> Result<Self, Self::Error> {
        let children = raw
            .fields
            .into_iter()
            .map(Self::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let validation = match raw.validation {
            Some(RawValidation {
                pattern: Some(pattern),
                message,
            }) => Some(ValidationRule::new(&pattern, message.as_deref()).map_err(|e| {
                SchemaError::InvalidPattern {
                    field: raw.name.clone(),
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                }
            })?),
            _ => None,
        };

        Ok(Self {
            id: raw.id,
            name: raw.name,
            kind: raw.kind,
            label: raw.label,
            placeholder: raw.placeholder,
            description: raw.description,
            required: raw.required,
            options: raw.options,
            children,
            validation,
            rows: raw.rows,
            default: raw.default,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    fields: Vec<RawField>,
}

/// The schema document a host supplies: an optional title and the field list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    /// Form title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Top-level fields in display order.
    pub fields: Vec<FieldDescriptor>,
}

// ---------------------------------------------------------------------------
// Container paths
// ---------------------------------------------------------------------------

/// Addresses one sibling list: the top level, or a section's children.
///
/// A path is the chain of section ids from the top level down. The empty
/// path is the top level. Displayed as `/` or `/personalInfo/contact`.
/// Section ids never contain `/` or surrounding whitespace (schema loading
/// rejects them), so every displayed path parses back to itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerPath(Vec<String>);

impl ContainerPath {
    /// The top-level sibling list.
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// The children of a top-level section.
    pub fn section(id: impl Into<String>) -> Self {
        Self(vec![id.into()])
    }

    /// The children of section `id` nested inside this container.
    #[must_use]
    pub fn child(&self, id: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(id.into());
        Self(segments)
    }

    /// Returns `true` for the top-level list.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the section ids along the path.
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for ContainerPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.0 {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for ContainerPath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(
            s.split('/')
                .map(str::trim)
                .filter(|seg| !seg.is_empty())
                .map(String::from)
                .collect(),
        ))
    }
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// A validated field tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    title: Option<String>,
    description: Option<String>,
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Validates a field list into a schema.
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self, SchemaError> {
        Self::from_document(FormSchema {
            title: None,
            description: None,
            fields,
        })
    }

    /// Validates a schema document.
    pub fn from_document(document: FormSchema) -> Result<Self, SchemaError> {
        let mut fields = document.fields;
        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        normalize(&mut fields, &mut ids, &mut names)?;
        Ok(Self {
            title: document.title,
            description: document.description,
            fields,
        })
    }

    /// Parses and validates a schema from JSON.
    ///
    /// Accepts either a document object (`{"title": ..., "fields": [...]}`) or
    /// a bare array of fields.
    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| SchemaError::Malformed(e.to_string()))?;

        let (title, description, raw_fields) = match value {
            serde_json::Value::Array(_) => {
                let fields: Vec<RawField> = serde_json::from_value(value)
                    .map_err(|e| SchemaError::Malformed(e.to_string()))?;
                (None, None, fields)
            }
            serde_json::Value::Object(_) => {
                let doc: RawDocument = serde_json::from_value(value)
                    .map_err(|e| SchemaError::Malformed(e.to_string()))?;
                (doc.title, doc.description, doc.fields)
            }
            _ => {
                return Err(SchemaError::Malformed(
                    "expected an array of fields or an object with a `fields` array".to_string(),
                ))
            }
        };

        let fields = raw_fields
            .into_iter()
            .map(FieldDescriptor::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_document(FormSchema {
            title,
            description,
            fields,
        })
    }

    /// Reads, parses, and validates a schema file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DynaformError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(Self::from_json_str(&content)?)
    }

    /// Returns the form title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the form description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the top-level fields in their current order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Converts back into a serializable document.
    pub fn to_document(&self) -> FormSchema {
        FormSchema {
            title: self.title.clone(),
            description: self.description.clone(),
            fields: self.fields.clone(),
        }
    }

    /// Finds a leaf field by `name`, anywhere in the tree.
    pub fn find_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        find(&self.fields, &|f| !f.is_section() && f.name == name)
    }

    /// Finds a field or section by `id`, anywhere in the tree.
    pub fn find_by_id(&self, id: &str) -> Option<&FieldDescriptor> {
        find(&self.fields, &|f| f.id == id)
    }

    /// Returns every leaf field in depth-first display order.
    pub fn leaves(&self) -> Vec<&FieldDescriptor> {
        let mut out = Vec::new();
        collect_leaves(&self.fields, &mut out);
        out
    }

    /// Returns the sibling list addressed by `path`.
    pub fn siblings(&self, path: &ContainerPath) -> Option<&[FieldDescriptor]> {
        let mut current = self.fields.as_slice();
        for segment in path.segments() {
            let section = current
                .iter()
                .find(|f| f.is_section() && &f.id == segment)?;
            current = &section.children;
        }
        Some(current)
    }

    pub(crate) fn siblings_mut(&mut self, path: &ContainerPath) -> Option<&mut Vec<FieldDescriptor>> {
        resolve_mut(&mut self.fields, path.segments())
    }

    /// Returns the ids of the sibling list addressed by `path`, in order.
    pub fn order(&self, path: &ContainerPath) -> Option<Vec<&str>> {
        self.siblings(path)
            .map(|fields| fields.iter().map(|f| f.id.as_str()).collect())
    }

    /// Returns the path of the container that holds the field with `id`.
    pub fn container_of(&self, id: &str) -> Option<ContainerPath> {
        locate(&self.fields, id, &ContainerPath::root())
    }

    /// Returns the values seeded by field defaults.
    pub fn defaults(&self) -> FormValues {
        self.leaves()
            .into_iter()
            .filter_map(|f| f.default.clone().map(|v| (f.name.clone(), v)))
            .collect()
    }
}

fn normalize(
    fields: &mut [FieldDescriptor],
    ids: &mut HashSet<String>,
    names: &mut HashSet<String>,
) -> Result<(), SchemaError> {
    for field in fields {
        if field.id.is_empty() {
            field.id.clone_from(&field.name);
        }
        if field.id.is_empty() {
            return Err(SchemaError::Malformed(format!(
                "a {} field has neither an id nor a name",
                field.kind
            )));
        }
        if !ids.insert(field.id.clone()) {
            return Err(SchemaError::DuplicateId(field.id.clone()));
        }

        if field.is_section() {
            if field.id.contains('/') || field.id.trim() != field.id {
                return Err(SchemaError::Malformed(format!(
                    "section id '{}' cannot be used in a container path",
                    field.id
                )));
            }
            normalize(&mut field.children, ids, names)?;
        } else {
            if field.name.is_empty() {
                return Err(SchemaError::Malformed(format!(
                    "field '{}' has no name",
                    field.id
                )));
            }
            if !names.insert(field.name.clone()) {
                return Err(SchemaError::DuplicateName(field.name.clone()));
            }
        }
    }
    Ok(())
}

fn find<'a>(
    fields: &'a [FieldDescriptor],
    pred: &dyn Fn(&FieldDescriptor) -> bool,
) -> Option<&'a FieldDescriptor> {
    for field in fields {
        if pred(field) {
            return Some(field);
        }
        if !field.is_section() {
            continue;
        }
        if let Some(found) = find(&field.children, pred) {
            return Some(found);
        }
    }
    None
}

fn collect_leaves<'a>(fields: &'a [FieldDescriptor], out: &mut Vec<&'a FieldDescriptor>) {
    for field in fields {
        if field.is_section() {
            collect_leaves(&field.children, out);
        } else {
            out.push(field);
        }
    }
}

fn resolve_mut<'a>(
    fields: &'a mut Vec<FieldDescriptor>,
    segments: &[String],
) -> Option<&'a mut Vec<FieldDescriptor>> {
    match segments.split_first() {
        None => Some(fields),
        Some((head, rest)) => {
            let section = fields
                .iter_mut()
                .find(|f| f.is_section() && &f.id == head)?;
            resolve_mut(&mut section.children, rest)
        }
    }
}

fn locate(fields: &[FieldDescriptor], id: &str, here: &ContainerPath) -> Option<ContainerPath> {
    for field in fields {
        if field.id == id {
            return Some(here.clone());
        }
        if field.is_section() {
            if let Some(found) = locate(&field.children, id, &here.child(field.id.clone())) {
                return Some(found);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Schema {
        Schema::new(vec![
            FieldDescriptor::section(
                "personal",
                "Personal",
                vec![
                    FieldDescriptor::new("first", FieldKind::Text).required(true),
                    FieldDescriptor::new("email", FieldKind::Email),
                ],
            ),
            FieldDescriptor::new("notes", FieldKind::Textarea),
        ])
        .unwrap()
    }

    #[test]
    fn test_kind_deserialize_known_and_unknown() {
        let k: FieldKind = serde_json::from_str("\"textarea\"").unwrap();
        assert_eq!(k, FieldKind::Textarea);
        let k: FieldKind = serde_json::from_str("\"color\"").unwrap();
        assert_eq!(k, FieldKind::Unknown);
    }

    #[test]
    fn test_kind_predicates() {
        assert!(FieldKind::Section.is_section());
        assert!(FieldKind::Select.is_choice());
        assert!(FieldKind::Radio.is_choice());
        assert!(!FieldKind::Checkbox.is_choice());
        assert_eq!(FieldKind::Tel.to_string(), "tel");
    }

    #[test]
    fn test_validation_rule_invalid_pattern() {
        assert!(ValidationRule::new("[0-9", None).is_err());
    }

    #[test]
    fn test_validation_rule_message_fallback() {
        let rule = ValidationRule::new("^a", None).unwrap();
        assert_eq!(rule.error_message(), "Invalid format");
        let rule = ValidationRule::new("^a", Some("")).unwrap();
        assert_eq!(rule.error_message(), "Invalid format");
        let rule = ValidationRule::new("^a", Some("Starts with a")).unwrap();
        assert_eq!(rule.error_message(), "Starts with a");
    }

    #[test]
    fn test_new_fills_missing_id_from_name() {
        let schema = Schema::new(vec![FieldDescriptor::new("city", FieldKind::Text).id("")]).unwrap();
        assert_eq!(schema.fields()[0].id, "city");
    }

    #[test]
    fn test_new_rejects_duplicate_names_across_sections() {
        let result = Schema::new(vec![
            FieldDescriptor::section("a", "A", vec![FieldDescriptor::new("x", FieldKind::Text)]),
            FieldDescriptor::section(
                "b",
                "B",
                vec![FieldDescriptor::new("x", FieldKind::Text).id("x2")],
            ),
        ]);
        assert_eq!(result.unwrap_err(), SchemaError::DuplicateName("x".into()));
    }

    #[test]
    fn test_new_rejects_duplicate_ids() {
        let result = Schema::new(vec![
            FieldDescriptor::new("a", FieldKind::Text).id("same"),
            FieldDescriptor::new("b", FieldKind::Text).id("same"),
        ]);
        assert_eq!(result.unwrap_err(), SchemaError::DuplicateId("same".into()));
    }

    #[test]
    fn test_new_rejects_nameless_leaf() {
        let result = Schema::new(vec![FieldDescriptor::new("", FieldKind::Text).id("orphan")]);
        assert!(matches!(result, Err(SchemaError::Malformed(_))));
    }

    #[test]
    fn test_section_name_not_counted_as_leaf_name() {
        let schema = Schema::new(vec![
            FieldDescriptor::section("city", "City", vec![]).id("city-section"),
            FieldDescriptor::new("city", FieldKind::Text),
        ]);
        assert!(schema.is_ok());
    }

    #[test]
    fn test_find_by_name_nested() {
        let schema = sample();
        assert_eq!(schema.find_by_name("email").unwrap().kind, FieldKind::Email);
        assert!(schema.find_by_name("personal").is_none());
        assert!(schema.find_by_id("personal").is_some());
    }

    #[test]
    fn test_find_ignores_children_of_leaves() {
        let schema = Schema::new(vec![FieldDescriptor::new("host", FieldKind::Text)
            .children(vec![FieldDescriptor::new("stray", FieldKind::Text).required(true)])])
        .unwrap();
        assert!(schema.find_by_name("stray").is_none());
        assert!(schema.find_by_id("stray").is_none());
        assert!(schema.find_by_name("host").is_some());
    }

    #[test]
    fn test_leaves_in_display_order() {
        let schema = sample();
        let names: Vec<&str> = schema.leaves().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["first", "email", "notes"]);
    }

    #[test]
    fn test_siblings_and_order() {
        let schema = sample();
        assert_eq!(
            schema.order(&ContainerPath::root()).unwrap(),
            vec!["personal", "notes"]
        );
        assert_eq!(
            schema.order(&ContainerPath::section("personal")).unwrap(),
            vec!["first", "email"]
        );
        assert!(schema.siblings(&ContainerPath::section("notes")).is_none());
        assert!(schema.siblings(&ContainerPath::section("missing")).is_none());
    }

    #[test]
    fn test_container_of() {
        let schema = sample();
        assert_eq!(schema.container_of("email"), Some(ContainerPath::section("personal")));
        assert_eq!(schema.container_of("notes"), Some(ContainerPath::root()));
        assert_eq!(schema.container_of("nope"), None);
    }

    #[test]
    fn test_container_path_display_and_parse() {
        let path = ContainerPath::section("a").child("b");
        assert_eq!(path.to_string(), "/a/b");
        assert_eq!(ContainerPath::root().to_string(), "/");
        assert_eq!("/a/b".parse::<ContainerPath>().unwrap(), path);
        assert_eq!("a/b/".parse::<ContainerPath>().unwrap(), path);
        assert!("/".parse::<ContainerPath>().unwrap().is_root());
        assert!("".parse::<ContainerPath>().unwrap().is_root());
    }

    #[test]
    fn test_rejects_section_ids_that_break_paths() {
        for id in ["a/b", " a", "a "] {
            let result = Schema::new(vec![FieldDescriptor::section(
                "s",
                "S",
                vec![FieldDescriptor::new("x", FieldKind::Text)],
            )
            .id(id)]);
            assert!(matches!(result, Err(SchemaError::Malformed(_))), "id {id:?}");
        }

        let json = r#"[{"id": "a/b", "type": "section", "fields": [
            {"id": "x", "name": "x", "type": "text"}
        ]}]"#;
        assert!(matches!(Schema::from_json_str(json), Err(SchemaError::Malformed(_))));
    }

    #[test]
    fn test_leaf_ids_may_contain_slash() {
        let schema = Schema::new(vec![FieldDescriptor::new("dob", FieldKind::Date).id("dates/birth")]);
        assert!(schema.is_ok());
    }

    #[test]
    fn test_every_container_path_round_trips() {
        let schema = Schema::new(vec![FieldDescriptor::section(
            "outer",
            "Outer",
            vec![
                FieldDescriptor::section(
                    "inner",
                    "Inner",
                    vec![FieldDescriptor::new("deep", FieldKind::Text)],
                )
                .id("inner.v2"),
                FieldDescriptor::new("shallow", FieldKind::Text),
            ],
        )
        .id("outer-1")])
        .unwrap();

        for id in ["deep", "shallow", "inner.v2", "outer-1"] {
            let path = schema.container_of(id).unwrap();
            let parsed: ContainerPath = path.to_string().parse().unwrap();
            assert_eq!(parsed, path);
            assert!(schema.order(&parsed).unwrap().contains(&id));
        }
    }

    #[test]
    fn test_from_json_str_document() {
        let json = r#"{
            "title": "Signup",
            "fields": [
                { "id": "s", "name": "s", "type": "section", "label": "S", "fields": [
                    { "id": "zip", "name": "zip", "type": "text", "required": true,
                      "validation": { "pattern": "^[0-9]{5}$", "message": "Five digits" } }
                ] },
                { "name": "agree", "type": "checkbox", "label": "I agree", "default": false }
            ]
        }"#;
        let schema = Schema::from_json_str(json).unwrap();
        assert_eq!(schema.title(), Some("Signup"));
        let zip = schema.find_by_name("zip").unwrap();
        assert!(zip.required);
        assert_eq!(zip.validation.as_ref().unwrap().pattern.as_str(), "^[0-9]{5}$");
        assert_eq!(schema.find_by_name("agree").unwrap().id, "agree");
        assert_eq!(schema.defaults().get("agree"), Some(&FieldValue::Bool(false)));
    }

    #[test]
    fn test_from_json_str_bare_array() {
        let schema = Schema::from_json_str(r#"[{"name": "a", "type": "text"}]"#).unwrap();
        assert_eq!(schema.fields().len(), 1);
        assert!(schema.title().is_none());
    }

    #[test]
    fn test_from_json_str_invalid_pattern_names_field() {
        let json = r#"[{"name": "zip", "type": "text", "validation": {"pattern": "[0-9"}}]"#;
        match Schema::from_json_str(json) {
            Err(SchemaError::InvalidPattern { field, pattern, .. }) => {
                assert_eq!(field, "zip");
                assert_eq!(pattern, "[0-9");
            }
            other => panic!("expected InvalidPattern, got {other:?}"),
        }
    }

    #[test]
    fn test_from_json_str_validation_without_pattern() {
        let json = r#"[{"name": "a", "type": "text", "validation": {"message": "x"}}]"#;
        let schema = Schema::from_json_str(json).unwrap();
        assert!(schema.fields()[0].validation.is_none());
    }

    #[test]
    fn test_from_json_str_malformed() {
        assert!(matches!(Schema::from_json_str("42"), Err(SchemaError::Malformed(_))));
        assert!(matches!(Schema::from_json_str("{"), Err(SchemaError::Malformed(_))));
        assert!(matches!(
            Schema::from_json_str(r#"{"title": "no fields"}"#),
            Err(SchemaError::Malformed(_))
        ));
    }

    #[test]
    fn test_serialize_uses_wire_names() {
        let schema = sample();
        let json = serde_json::to_value(schema.to_document()).unwrap();
        let section = &json["fields"][0];
        assert_eq!(section["type"], "section");
        assert_eq!(section["fields"][0]["name"], "first");
        assert_eq!(section["fields"][0]["required"], true);
        assert!(section["fields"][1].get("required").is_none());
    }

    #[test]
    fn test_descriptor_deserialize_via_serde() {
        let field: FieldDescriptor = serde_json::from_str(
            r#"{"id": "st", "name": "state", "type": "select",
                "options": [{"value": "NY", "label": "New York"}]}"#,
        )
        .unwrap();
        assert_eq!(field.options, vec![ChoiceOption::new("NY", "New York")]);
    }
}
