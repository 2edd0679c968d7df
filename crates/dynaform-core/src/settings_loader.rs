//! Settings loading from configuration files.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (keys present in the file override defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `DYNAFORM_DEBUG` | `debug` |
//! | `DYNAFORM_LOG_LEVEL` | `log_level` |
//! | `DYNAFORM_SUBMIT_LABEL` | `submit_label` |
//! | `DYNAFORM_SELECT_PLACEHOLDER` | `select_placeholder` |
//! | `DYNAFORM_TEXTAREA_ROWS` | `textarea_rows` |
//! | `DYNAFORM_FORM_CLASS` | `form_class` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use dynaform_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file("dynaform.toml").unwrap();
//! let settings = settings_loader::from_path_with_env("dynaform.json").unwrap();
//! ```

use std::path::Path;

use crate::error::DynaformError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Any fields not present in the TOML keep their default values.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, DynaformError> {
    toml::from_str(toml_str)
        .map_err(|e| DynaformError::ConfigurationError(format!("Failed to parse TOML: {e}")))
}

/// Loads settings from a TOML file.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, DynaformError> {
    let content = read_config(path.as_ref(), "TOML")?;
    from_toml_str(&content)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, DynaformError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
pub fn from_json_str(json_str: &str) -> Result<Settings, DynaformError> {
    serde_json::from_str(json_str)
        .map_err(|e| DynaformError::ConfigurationError(format!("Failed to parse JSON: {e}")))
}

/// Loads settings from a JSON file.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, DynaformError> {
    let content = read_config(path.as_ref(), "JSON")?;
    from_json_str(&content)
}

/// Loads settings from a JSON file and then applies environment variable overrides.
pub fn from_json_file_with_env(path: impl AsRef<Path>) -> Result<Settings, DynaformError> {
    let mut settings = from_json_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a `.toml` or `.json` file (chosen by extension) and
/// applies environment variable overrides.
pub fn from_path_with_env(path: impl AsRef<Path>) -> Result<Settings, DynaformError> {
    let path = path.as_ref();
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => from_toml_file_with_env(path),
        Some("json") => from_json_file_with_env(path),
        _ => Err(DynaformError::ConfigurationError(format!(
            "Unsupported settings file '{}': expected .toml or .json",
            path.display()
        ))),
    }
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies `DYNAFORM_*` environment variable overrides to a settings struct.
pub fn apply_env_overrides(settings: &mut Settings) {
    apply_overrides_from(settings, |key| std::env::var(key).ok());
}

/// Applies overrides using `lookup` to resolve variable names.
///
/// - `DYNAFORM_DEBUG` -> `debug` (values: "true"/"1"/"yes" => true, anything else => false)
/// - `DYNAFORM_TEXTAREA_ROWS` is ignored unless it parses as a positive integer
/// - an empty `DYNAFORM_FORM_CLASS` clears `form_class`
pub fn apply_overrides_from(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(val) = lookup("DYNAFORM_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Some(val) = lookup("DYNAFORM_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Some(val) = lookup("DYNAFORM_SUBMIT_LABEL") {
        settings.submit_label = val;
    }

    if let Some(val) = lookup("DYNAFORM_SELECT_PLACEHOLDER") {
        settings.select_placeholder = val;
    }

    if let Some(val) = lookup("DYNAFORM_TEXTAREA_ROWS") {
        match val.parse::<u32>() {
            Ok(rows) if rows > 0 => settings.textarea_rows = rows,
            _ => tracing::warn!(value = %val, "ignoring invalid DYNAFORM_TEXTAREA_ROWS"),
        }
    }

    if let Some(val) = lookup("DYNAFORM_FORM_CLASS") {
        settings.form_class = if val.is_empty() { None } else { Some(val) };
    }
}

fn read_config(path: &Path, format: &str) -> Result<String, DynaformError> {
    std::fs::read_to_string(path).map_err(|e| {
        DynaformError::ConfigurationError(format!(
            "Failed to read {format} file '{}': {e}",
            path.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    // ── TOML loading ────────────────────────────────────────────────

    #[test]
    fn test_from_toml_str_basic() {
        let toml = r#"
            debug = false
            submit_label = "Send"
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert!(!settings.debug);
        assert_eq!(settings.submit_label, "Send");
        // Defaults preserved
        assert_eq!(settings.select_placeholder, "Select an option");
    }

    #[test]
    fn test_from_toml_str_empty() {
        let settings = from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_from_toml_str_invalid() {
        let result = from_toml_str("debug = [");
        assert!(matches!(result, Err(DynaformError::ConfigurationError(_))));
    }

    #[test]
    fn test_from_toml_str_wrong_type() {
        let result = from_toml_str("textarea_rows = \"many\"");
        assert!(result.is_err());
    }

    // ── JSON loading ────────────────────────────────────────────────

    #[test]
    fn test_from_json_str_basic() {
        let settings = from_json_str(r#"{"form_class": "p-8", "textarea_rows": 5}"#).unwrap();
        assert_eq!(settings.form_class.as_deref(), Some("p-8"));
        assert_eq!(settings.textarea_rows, 5);
    }

    #[test]
    fn test_from_json_str_empty_object() {
        let settings = from_json_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_from_json_str_invalid() {
        assert!(from_json_str("not json").is_err());
    }

    // ── Files ───────────────────────────────────────────────────────

    #[test]
    fn test_from_toml_file_missing() {
        let result = from_toml_file("/nonexistent/dynaform.toml");
        assert!(result.unwrap_err().to_string().contains("Failed to read TOML"));
    }

    #[test]
    fn test_from_path_with_env_rejects_unknown_extension() {
        let result = from_path_with_env("settings.yaml");
        assert!(matches!(result, Err(DynaformError::ConfigurationError(_))));
    }

    // ── Overrides ───────────────────────────────────────────────────

    #[test]
    fn test_overrides_debug() {
        let mut settings = Settings::default();
        apply_overrides_from(&mut settings, lookup_in(&[("DYNAFORM_DEBUG", "false")]));
        assert!(!settings.debug);

        apply_overrides_from(&mut settings, lookup_in(&[("DYNAFORM_DEBUG", "1")]));
        assert!(settings.debug);
    }

    #[test]
    fn test_overrides_labels_and_level() {
        let mut settings = Settings::default();
        apply_overrides_from(
            &mut settings,
            lookup_in(&[
                ("DYNAFORM_LOG_LEVEL", "debug"),
                ("DYNAFORM_SUBMIT_LABEL", "Go"),
                ("DYNAFORM_SELECT_PLACEHOLDER", "Pick one"),
            ]),
        );
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.submit_label, "Go");
        assert_eq!(settings.select_placeholder, "Pick one");
    }

    #[test]
    fn test_overrides_textarea_rows_invalid_ignored() {
        let mut settings = Settings::default();
        apply_overrides_from(&mut settings, lookup_in(&[("DYNAFORM_TEXTAREA_ROWS", "zero")]));
        assert_eq!(settings.textarea_rows, 3);

        apply_overrides_from(&mut settings, lookup_in(&[("DYNAFORM_TEXTAREA_ROWS", "0")]));
        assert_eq!(settings.textarea_rows, 3);

        apply_overrides_from(&mut settings, lookup_in(&[("DYNAFORM_TEXTAREA_ROWS", "8")]));
        assert_eq!(settings.textarea_rows, 8);
    }

    #[test]
    fn test_overrides_form_class_empty_clears() {
        let mut settings = Settings {
            form_class: Some("p-8".into()),
            ..Settings::default()
        };
        apply_overrides_from(&mut settings, lookup_in(&[("DYNAFORM_FORM_CLASS", "")]));
        assert!(settings.form_class.is_none());
    }

    #[test]
    fn test_overrides_absent_leave_settings_untouched() {
        let mut settings = Settings::default();
        apply_overrides_from(&mut settings, lookup_in(&[]));
        assert_eq!(settings, Settings::default());
    }
}
