//! Field validation.
//!
//! [`validate`] checks one field against its current value. Rules run in
//! order and the first failure wins:
//!
//! 1. Required and unanswered: "This field is required".
//! 2. Email kind, non-empty, not shaped like `local@domain.tld`: "Invalid email".
//! 3. Custom pattern present, non-empty, not matching: the rule's message or
//!    "Invalid format".
//!
//! [`validate_tree`] runs the validator over every leaf of a field tree,
//! recursing into sections. Errors accumulate rather than short-circuiting,
//! so every failing leaf gets its own entry.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::{FieldDescriptor, FieldKind};
use crate::value::{FieldValue, FormErrors, FormValues};

/// Message for a required field with no answer.
pub const REQUIRED: &str = "This field is required";
/// Message for a malformed email address.
pub const INVALID_EMAIL: &str = "Invalid email";
/// Message for a pattern mismatch when the rule has no message of its own.
pub const INVALID_FORMAT: &str = "Invalid format";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

/// Validates a single field against its current value.
///
/// `None` for `value` means the field was never touched. Sections are never
/// validated themselves and always return `None`.
///
/// An explicit `false` counts as an answer: a required checkbox that is
/// present but unchecked passes the required rule.
///
/// # Examples
///
/// ```
/// use dynaform_forms::schema::{FieldDescriptor, FieldKind};
/// use dynaform_forms::validation::validate;
/// use dynaform_forms::FieldValue;
///
/// let email = FieldDescriptor::new("email", FieldKind::Email).required(true);
/// assert_eq!(validate(&email, None).as_deref(), Some("This field is required"));
/// assert_eq!(validate(&email, Some(&FieldValue::text("nope"))).as_deref(), Some("Invalid email"));
/// assert_eq!(validate(&email, Some(&FieldValue::text("a@b.com"))), None);
/// ```
pub fn validate(field: &FieldDescriptor, value: Option<&FieldValue>) -> Option<String> {
    if field.is_section() {
        return None;
    }

    if field.required && value.map_or(true, FieldValue::is_blank) {
        return Some(REQUIRED.to_string());
    }

    let text = match value {
        Some(v) if v.is_truthy() => v.as_text(),
        _ => return None,
    };

    if field.kind == FieldKind::Email && !EMAIL_RE.is_match(&text) {
        return Some(INVALID_EMAIL.to_string());
    }

    if let Some(rule) = &field.validation {
        if !rule.pattern.is_match(&text) {
            return Some(rule.error_message().to_string());
        }
    }

    None
}

/// Validates every leaf in `fields`, recursing into sections.
///
/// Each failing leaf gets an entry under its own `name` in `errors`; a
/// section never produces an aggregate entry.
pub fn validate_tree(fields: &[FieldDescriptor], values: &FormValues, errors: &mut FormErrors) {
    for field in fields {
        if field.is_section() {
            validate_tree(&field.children, values, errors);
            continue;
        }

        if let Some(message) = validate(field, values.get(&field.name)) {
            errors.insert(field.name.clone(), message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ValidationRule;

    fn text(s: &str) -> FieldValue {
        FieldValue::text(s)
    }

    fn kinds() -> [FieldKind; 9] {
        [
            FieldKind::Text,
            FieldKind::Email,
            FieldKind::Tel,
            FieldKind::Date,
            FieldKind::Number,
            FieldKind::Select,
            FieldKind::Checkbox,
            FieldKind::Radio,
            FieldKind::Textarea,
        ]
    }

    #[test]
    fn test_required_empty_and_absent() {
        for kind in kinds() {
            let field = FieldDescriptor::new("f", kind).required(true);
            assert_eq!(validate(&field, Some(&text(""))).as_deref(), Some(REQUIRED));
            assert_eq!(validate(&field, None).as_deref(), Some(REQUIRED));
        }
    }

    #[test]
    fn test_required_false_is_an_answer() {
        // An explicit `false` satisfies `required`, even for a checkbox that a
        // maintainer might expect to force "checked" (e.g. accepting terms).
        // This matches the documented rule; schema check W006 flags the case.
        for kind in kinds() {
            let field = FieldDescriptor::new("f", kind).required(true);
            assert_eq!(validate(&field, Some(&FieldValue::Bool(false))), None);
        }
    }

    #[test]
    fn test_optional_empty_passes() {
        let field = FieldDescriptor::new("f", FieldKind::Email);
        assert_eq!(validate(&field, None), None);
        assert_eq!(validate(&field, Some(&text(""))), None);
    }

    #[test]
    fn test_email_shapes() {
        let field = FieldDescriptor::new("email", FieldKind::Email);
        assert_eq!(validate(&field, Some(&text("a@b.com"))), None);
        assert_eq!(validate(&field, Some(&text("first.last@sub.example.org"))), None);
        for bad in ["not-an-email", "a@b", "@b.com", "a b@c.com", "a@b.c om"] {
            assert_eq!(
                validate(&field, Some(&text(bad))).as_deref(),
                Some(INVALID_EMAIL),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_email_rule_only_for_email_kind() {
        let field = FieldDescriptor::new("handle", FieldKind::Text);
        assert_eq!(validate(&field, Some(&text("not-an-email"))), None);
    }

    #[test]
    fn test_pattern_custom_message() {
        let field = FieldDescriptor::new("zip", FieldKind::Text)
            .validation(ValidationRule::new("^[0-9]{5}$", Some("Enter five digits")).unwrap());
        assert_eq!(validate(&field, Some(&text("10001"))), None);
        assert_eq!(
            validate(&field, Some(&text("1000"))).as_deref(),
            Some("Enter five digits")
        );
    }

    #[test]
    fn test_pattern_default_message() {
        let field = FieldDescriptor::new("code", FieldKind::Text)
            .validation(ValidationRule::new("^[A-Z]+$", None).unwrap());
        assert_eq!(validate(&field, Some(&text("abc"))).as_deref(), Some(INVALID_FORMAT));
    }

    #[test]
    fn test_pattern_is_unanchored_search() {
        let field = FieldDescriptor::new("code", FieldKind::Text)
            .validation(ValidationRule::new("[0-9]", None).unwrap());
        assert_eq!(validate(&field, Some(&text("abc1def"))), None);
    }

    #[test]
    fn test_pattern_skipped_for_empty_value() {
        let field = FieldDescriptor::new("code", FieldKind::Text)
            .validation(ValidationRule::new("^[A-Z]+$", None).unwrap());
        assert_eq!(validate(&field, Some(&text(""))), None);
        assert_eq!(validate(&field, None), None);
    }

    #[test]
    fn test_required_wins_over_format() {
        let field = FieldDescriptor::new("email", FieldKind::Email)
            .required(true)
            .validation(ValidationRule::new("^x", Some("x first")).unwrap());
        assert_eq!(validate(&field, Some(&text(""))).as_deref(), Some(REQUIRED));
    }

    #[test]
    fn test_email_wins_over_pattern() {
        let field = FieldDescriptor::new("email", FieldKind::Email)
            .validation(ValidationRule::new("^x", Some("x first")).unwrap());
        assert_eq!(validate(&field, Some(&text("nope"))).as_deref(), Some(INVALID_EMAIL));
        assert_eq!(validate(&field, Some(&text("y@b.com"))).as_deref(), Some("x first"));
    }

    #[test]
    fn test_pattern_on_checked_checkbox_sees_true() {
        let field = FieldDescriptor::new("agree", FieldKind::Checkbox)
            .validation(ValidationRule::new("^true$", None).unwrap());
        assert_eq!(validate(&field, Some(&FieldValue::Bool(true))), None);
    }

    #[test]
    fn test_section_never_validated() {
        let section = FieldDescriptor::section("s", "S", vec![]).required(true);
        assert_eq!(validate(&section, None), None);
    }

    #[test]
    fn test_validate_tree_recurses_per_leaf() {
        let fields = vec![FieldDescriptor::section(
            "s",
            "S",
            vec![
                FieldDescriptor::new("a", FieldKind::Text).required(true),
                FieldDescriptor::new("b", FieldKind::Text).required(true),
            ],
        )];
        let mut errors = FormErrors::new();
        validate_tree(&fields, &FormValues::new(), &mut errors);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("a").map(String::as_str), Some(REQUIRED));
        assert_eq!(errors.get("b").map(String::as_str), Some(REQUIRED));
        assert!(!errors.contains_key("s"));
    }

    #[test]
    fn test_validate_tree_deep_nesting() {
        let fields = vec![FieldDescriptor::section(
            "outer",
            "Outer",
            vec![FieldDescriptor::section(
                "inner",
                "Inner",
                vec![FieldDescriptor::new("deep", FieldKind::Email)],
            )],
        )];
        let mut values = FormValues::new();
        values.insert("deep".into(), text("bad"));
        let mut errors = FormErrors::new();
        validate_tree(&fields, &values, &mut errors);
        assert_eq!(errors.get("deep").map(String::as_str), Some(INVALID_EMAIL));
    }

    #[test]
    fn test_validate_tree_unknown_kind_still_validated() {
        let fields = vec![FieldDescriptor::new("color", FieldKind::Unknown).required(true)];
        let mut errors = FormErrors::new();
        validate_tree(&fields, &FormValues::new(), &mut errors);
        assert!(errors.contains_key("color"));
    }
}
