//! Schema checks.
//!
//! A schema can load cleanly and still contain things the engine quietly
//! ignores: a field of an unknown kind renders nothing, `options` on a text
//! field are never shown, `required` on a section is never enforced. The
//! checks here make those gaps visible.
//!
//! | Id            | Level   | Condition                                   |
//! |---------------|---------|---------------------------------------------|
//! | `schema.W001` | Warning | unknown kind, field is not rendered         |
//! | `schema.W002` | Warning | `options` on a kind that is not select/radio |
//! | `schema.W003` | Warning | select/radio with no options                |
//! | `schema.W004` | Warning | child fields on a kind that is not section  |
//! | `schema.W005` | Warning | `required` on a section                     |
//! | `schema.W006` | Warning | required checkbox (unchecked still passes)  |
//! | `schema.I001` | Info    | section with no children                    |

use dynaform_core::checks::CheckMessage;

use crate::schema::{FieldDescriptor, FieldKind, Schema};

/// A check run against every node of the schema tree.
pub type SchemaCheckFn = fn(&FieldDescriptor) -> Vec<CheckMessage>;

struct RegisteredCheck {
    func: SchemaCheckFn,
    tags: Vec<String>,
}

/// Registry of per-node schema checks, filterable by tag.
pub struct SchemaCheckRegistry {
    checks: Vec<RegisteredCheck>,
}

impl SchemaCheckRegistry {
    /// Creates an empty registry.
    pub const fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Creates a registry with the built-in checks.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(check_unknown_kind, &["kinds"]);
        registry.register(check_stray_options, &["choices"]);
        registry.register(check_missing_options, &["choices"]);
        registry.register(check_stray_children, &["sections"]);
        registry.register(check_required_section, &["sections", "validation"]);
        registry.register(check_required_checkbox, &["validation"]);
        registry.register(check_empty_section, &["sections"]);
        registry
    }

    /// Registers a check under the given tags.
    pub fn register(&mut self, func: SchemaCheckFn, tags: &[&str]) {
        self.checks.push(RegisteredCheck {
            func,
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
        });
    }

    /// Runs the registered checks (all of them, or those matching `tags`)
    /// over every node of `schema`, depth first.
    pub fn run_checks(&self, tags: Option<&[&str]>, schema: &Schema) -> Vec<CheckMessage> {
        let selected: Vec<&RegisteredCheck> = self
            .checks
            .iter()
            .filter(|check| {
                tags.map_or(true, |filter_tags| {
                    filter_tags.iter().any(|t| check.tags.iter().any(|own| own == t))
                })
            })
            .collect();

        let mut messages = Vec::new();
        visit(schema.fields(), &mut |field: &FieldDescriptor| {
            for check in &selected {
                messages.extend((check.func)(field));
            }
        });
        messages
    }

    /// Returns the number of registered checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Returns `true` if no checks are registered.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl Default for SchemaCheckRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs every built-in check over `schema`.
pub fn check_schema(schema: &Schema) -> Vec<CheckMessage> {
    SchemaCheckRegistry::with_builtins().run_checks(None, schema)
}

fn visit(fields: &[FieldDescriptor], f: &mut dyn FnMut(&FieldDescriptor)) {
    for field in fields {
        f(field);
        visit(&field.children, f);
    }
}

// ============================================================
// Built-in checks
// ============================================================

fn check_unknown_kind(field: &FieldDescriptor) -> Vec<CheckMessage> {
    if field.kind != FieldKind::Unknown {
        return Vec::new();
    }
    vec![CheckMessage::warning(
        format!("Field '{}' has a kind this engine does not render; it will not appear in the form.", field.id),
        Some("Use one of: text, email, tel, date, number, select, checkbox, radio, textarea, section."),
        Some(&field.id),
        "schema.W001",
    )]
}

fn check_stray_options(field: &FieldDescriptor) -> Vec<CheckMessage> {
    if field.kind.is_choice() || field.options.is_empty() {
        return Vec::new();
    }
    vec![CheckMessage::warning(
        format!("Field '{}' of kind '{}' has options that are never shown.", field.id, field.kind),
        Some("Options only apply to select and radio fields."),
        Some(&field.id),
        "schema.W002",
    )]
}

fn check_missing_options(field: &FieldDescriptor) -> Vec<CheckMessage> {
    if !field.kind.is_choice() || !field.options.is_empty() {
        return Vec::new();
    }
    vec![CheckMessage::warning(
        format!("Field '{}' of kind '{}' has no options to choose from.", field.id, field.kind),
        None,
        Some(&field.id),
        "schema.W003",
    )]
}

fn check_stray_children(field: &FieldDescriptor) -> Vec<CheckMessage> {
    if field.is_section() || field.children.is_empty() {
        return Vec::new();
    }
    vec![CheckMessage::warning(
        format!(
            "Field '{}' of kind '{}' has child fields that are never rendered or validated.",
            field.id, field.kind
        ),
        Some("Only section fields may contain child fields."),
        Some(&field.id),
        "schema.W004",
    )]
}

fn check_required_section(field: &FieldDescriptor) -> Vec<CheckMessage> {
    if !field.is_section() || !field.required {
        return Vec::new();
    }
    vec![CheckMessage::warning(
        format!("Section '{}' is marked required; sections are never validated.", field.id),
        Some("Mark the section's child fields as required instead."),
        Some(&field.id),
        "schema.W005",
    )]
}

fn check_required_checkbox(field: &FieldDescriptor) -> Vec<CheckMessage> {
    if field.kind != FieldKind::Checkbox || !field.required {
        return Vec::new();
    }
    vec![CheckMessage::warning(
        format!(
            "Checkbox '{}' is required, but an explicit unchecked value (false) satisfies required.",
            field.id
        ),
        Some("If the box must be checked, enforce it in the submit callback."),
        Some(&field.id),
        "schema.W006",
    )]
}

fn check_empty_section(field: &FieldDescriptor) -> Vec<CheckMessage> {
    if !field.is_section() || !field.children.is_empty() {
        return Vec::new();
    }
    vec![CheckMessage::info(
        format!("Section '{}' has no child fields.", field.id),
        None,
        Some(&field.id),
        "schema.I001",
    )]
}
