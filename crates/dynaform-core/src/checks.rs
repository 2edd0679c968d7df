//! Diagnostic messages for configuration checks.
//!
//! Checks inspect something the engine was handed (a schema, a settings file)
//! and report problems that are not fatal but deserve attention. Each
//! [`CheckMessage`] carries a [`CheckLevel`], a message, an optional hint, the
//! object it relates to, and a stable identifier such as `schema.W001`.
//!
//! ## Examples
//!
//! ```
//! use dynaform_core::checks::{CheckLevel, CheckMessage};
//!
//! let msg = CheckMessage::warning(
//!     "Field kind 'color' is not rendered",
//!     Some("Use one of the supported kinds."),
//!     Some("favorite"),
//!     "schema.W001",
//! );
//! assert_eq!(msg.level, CheckLevel::Warning);
//! assert!(msg.to_string().starts_with("(schema.W001) WARNING"));
//! ```

use crate::settings::Settings;

/// How serious a check finding is. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckLevel {
    /// Worth knowing, nothing to fix.
    Info = 1,
    /// The engine will run, but probably not the way the author meant.
    Warning = 2,
    /// The input cannot be used as is.
    Error = 3,
}

impl CheckLevel {
    /// Returns the upper-case label printed in reports.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for CheckLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding reported by a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckMessage {
    /// Severity.
    pub level: CheckLevel,
    /// What is wrong.
    pub msg: String,
    /// How to fix it.
    pub hint: Option<String>,
    /// The field id or setting name the finding is about.
    pub obj: Option<String>,
    /// Stable identifier, e.g. `schema.W001`.
    pub id: String,
}

impl CheckMessage {
    /// Builds a finding at `level`.
    pub fn new(
        level: CheckLevel,
        msg: impl Into<String>,
        hint: Option<&str>,
        obj: Option<&str>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            level,
            msg: msg.into(),
            hint: hint.map(ToOwned::to_owned),
            obj: obj.map(ToOwned::to_owned),
            id: id.into(),
        }
    }

    /// Builds a [`CheckLevel::Info`] finding.
    pub fn info(msg: impl Into<String>, hint: Option<&str>, obj: Option<&str>, id: impl Into<String>) -> Self {
        Self::new(CheckLevel::Info, msg, hint, obj, id)
    }

    /// Builds a [`CheckLevel::Warning`] finding.
    pub fn warning(msg: impl Into<String>, hint: Option<&str>, obj: Option<&str>, id: impl Into<String>) -> Self {
        Self::new(CheckLevel::Warning, msg, hint, obj, id)
    }

    /// Builds a [`CheckLevel::Error`] finding.
    pub fn error(msg: impl Into<String>, hint: Option<&str>, obj: Option<&str>, id: impl Into<String>) -> Self {
        Self::new(CheckLevel::Error, msg, hint, obj, id)
    }

    /// `true` for warnings and errors.
    pub fn is_serious(&self) -> bool {
        self.level >= CheckLevel::Warning
    }
}

/// Formats as `(id) LEVEL: msg`, then indented `HINT:` and `Object:` lines when present.
impl std::fmt::Display for CheckMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}) {}: {}", self.id, self.level, self.msg)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n\tHINT: {hint}")?;
        }
        if let Some(obj) = &self.obj {
            write!(f, "\n\tObject: {obj}")?;
        }
        Ok(())
    }
}

/// Returns `true` if any message is error-level.
pub fn has_errors(messages: &[CheckMessage]) -> bool {
    messages.iter().any(|m| m.level >= CheckLevel::Error)
}

/// Checks the settings themselves.
///
/// - `settings.E001`: `textarea_rows` is zero
/// - `settings.W001`: `submit_label` is blank, so the default submit button has no text
pub fn check_settings(settings: &Settings) -> Vec<CheckMessage> {
    let mut messages = Vec::new();

    if settings.textarea_rows == 0 {
        messages.push(CheckMessage::error(
            "textarea_rows must be at least 1",
            Some("Remove the setting to use the default of 3."),
            Some("textarea_rows"),
            "settings.E001",
        ));
    }

    if settings.submit_label.trim().is_empty() {
        messages.push(CheckMessage::warning(
            "submit_label is blank",
            Some("Provide a label or a custom submit hook."),
            Some("submit_label"),
            "settings.W001",
        ));
    }

    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_level_ordering() {
        assert!(CheckLevel::Info < CheckLevel::Warning);
        assert!(CheckLevel::Warning < CheckLevel::Error);
    }

    #[test]
    fn test_check_message_display_full() {
        let msg = CheckMessage::error("bad", Some("fix it"), Some("city"), "schema.E001");
        let s = msg.to_string();
        assert!(s.contains("(schema.E001) ERROR: bad"));
        assert!(s.contains("HINT: fix it"));
        assert!(s.contains("Object: city"));
    }

    #[test]
    fn test_is_serious() {
        assert!(!CheckMessage::info("x", None, None, "i").is_serious());
        assert!(CheckMessage::warning("x", None, None, "w").is_serious());
        assert!(CheckMessage::error("x", None, None, "e").is_serious());
    }

    #[test]
    fn test_has_errors() {
        let warn = CheckMessage::warning("x", None, None, "w");
        assert!(!has_errors(&[warn.clone()]));
        assert!(has_errors(&[warn, CheckMessage::error("y", None, None, "e")]));
    }

    #[test]
    fn test_check_settings_defaults_clean() {
        assert!(check_settings(&Settings::default()).is_empty());
    }

    #[test]
    fn test_check_settings_problems() {
        let settings = Settings {
            textarea_rows: 0,
            submit_label: "  ".into(),
            ..Settings::default()
        };
        let ids: Vec<String> = check_settings(&settings).into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["settings.E001", "settings.W001"]);
    }
}
