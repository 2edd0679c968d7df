//! Settings for dynaform.
//!
//! [`Settings`] holds the knobs the renderer and the tooling read: labels and
//! placeholders used when a schema does not supply its own, default textarea
//! size, the CSS class put on the `<form>` element, and logging configuration.
//! Every field has a sensible default so an empty settings file is valid.

use serde::{Deserialize, Serialize};

/// The complete set of engine settings.
///
/// # Examples
///
/// ```
/// use dynaform_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.submit_label, "Submit");
/// assert_eq!(settings.textarea_rows, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled (pretty logs instead of JSON).
    pub debug: bool,

    // ── Rendering ────────────────────────────────────────────────────

    /// Text of the default submit button.
    pub submit_label: String,
    /// Text of the leading empty `<option>` when a select field has no placeholder.
    pub select_placeholder: String,
    /// Visible rows for a textarea when the field does not set `rows`.
    pub textarea_rows: u32,
    /// Optional CSS class for the `<form>` element.
    pub form_class: Option<String>,
    /// Marker appended to the label of required fields.
    pub required_marker: String,

    // ── Output ───────────────────────────────────────────────────────

    /// Whether submitted snapshots are pretty-printed as JSON.
    pub pretty_json: bool,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log level (e.g. "info", "debug", "warn").
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            submit_label: "Submit".to_string(),
            select_placeholder: "Select an option".to_string(),
            textarea_rows: 3,
            form_class: None,
            required_marker: "*".to_string(),
            pretty_json: true,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let s = Settings::default();
        assert!(s.debug);
        assert_eq!(s.select_placeholder, "Select an option");
        assert_eq!(s.required_marker, "*");
        assert!(s.form_class.is_none());
        assert_eq!(s.log_level, "info");
    }

    #[test]
    fn test_settings_serde_round_trip() {
        let s = Settings {
            form_class: Some("p-8".into()),
            ..Settings::default()
        };
        let json = serde_json::to_string(&s).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_settings_missing_fields_use_defaults() {
        let s: Settings = serde_json::from_str(r#"{"submit_label": "Send"}"#).unwrap();
        assert_eq!(s.submit_label, "Send");
        assert_eq!(s.textarea_rows, 3);
    }
}
