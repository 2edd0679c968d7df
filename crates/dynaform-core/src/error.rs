//! Core error types for dynaform.
//!
//! Two layers of failure exist in the engine:
//!
//! - [`SchemaError`]: the field tree handed to the engine is unusable (a
//!   validation pattern that does not compile, duplicate names or ids,
//!   malformed JSON). These are detected once, when the schema is loaded.
//! - [`DynaformError`]: everything the surrounding tooling can hit (schema
//!   errors, configuration, serialization, IO).
//!
//! Per-field validation failures ("This field is required") are not errors
//! in this sense. They are plain messages collected into the form's error map.

use thiserror::Error;

/// A problem with a form schema, detected at load time.
///
/// # Examples
///
/// ```
/// use dynaform_core::error::SchemaError;
///
/// let err = SchemaError::DuplicateName("email".to_string());
/// assert_eq!(err.code(), "duplicate_name");
/// assert!(err.to_string().contains("email"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A field's `validation.pattern` is not a valid regular expression.
    #[error("Invalid validation pattern for field '{field}' ({pattern}): {reason}")]
    InvalidPattern {
        /// The `name` of the field carrying the pattern.
        field: String,
        /// The pattern source as written in the schema.
        pattern: String,
        /// The regex compiler's explanation.
        reason: String,
    },

    /// Two leaf fields share the same `name`.
    #[error("Duplicate field name: {0}")]
    DuplicateName(String),

    /// Two fields share the same `id`.
    #[error("Duplicate field id: {0}")]
    DuplicateId(String),

    /// The schema document could not be parsed.
    #[error("Malformed schema: {0}")]
    Malformed(String),
}

impl SchemaError {
    /// Returns a short, stable code identifying the kind of schema error.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidPattern { .. } => "invalid_pattern",
            Self::DuplicateName(_) => "duplicate_name",
            Self::DuplicateId(_) => "duplicate_id",
            Self::Malformed(_) => "malformed",
        }
    }
}

/// The primary error type for dynaform.
///
/// Each variant maps to a process exit code via [`DynaformError::exit_code`].
#[derive(Error, Debug)]
pub enum DynaformError {
    /// The form schema is unusable.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A value was addressed to a field name the schema does not contain.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DynaformError {
    /// Returns the process exit code associated with this error.
    ///
    /// - `Schema` -> 65 (data format error)
    /// - `SerializationError`, `UnknownField` -> 65
    /// - `ConfigurationError` -> 78 (configuration error)
    /// - `IoError` -> 74 (I/O error)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Schema(_) | Self::SerializationError(_) | Self::UnknownField(_) => 65,
            Self::ConfigurationError(_) => 78,
            Self::IoError(_) => 74,
        }
    }
}

impl From<serde_json::Error> for DynaformError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// A convenience type alias for `Result<T, DynaformError>`.
pub type DynaformResult<T> = Result<T, DynaformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_display_invalid_pattern() {
        let err = SchemaError::InvalidPattern {
            field: "zip".into(),
            pattern: "[0-9".into(),
            reason: "unclosed character class".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("zip"));
        assert!(msg.contains("[0-9"));
        assert!(msg.contains("unclosed"));
    }

    #[test]
    fn test_schema_error_codes() {
        assert_eq!(SchemaError::DuplicateName("a".into()).code(), "duplicate_name");
        assert_eq!(SchemaError::DuplicateId("a".into()).code(), "duplicate_id");
        assert_eq!(SchemaError::Malformed("a".into()).code(), "malformed");
        assert_eq!(
            SchemaError::InvalidPattern {
                field: String::new(),
                pattern: String::new(),
                reason: String::new(),
            }
            .code(),
            "invalid_pattern"
        );
    }

    #[test]
    fn test_dynaform_error_exit_codes() {
        assert_eq!(
            DynaformError::Schema(SchemaError::DuplicateId("x".into())).exit_code(),
            65
        );
        assert_eq!(DynaformError::ConfigurationError("x".into()).exit_code(), 78);
        assert_eq!(DynaformError::SerializationError("x".into()).exit_code(), 65);
        assert_eq!(DynaformError::UnknownField("x".into()).exit_code(), 65);
    }

    #[test]
    fn test_schema_error_conversion() {
        let err: DynaformError = SchemaError::DuplicateName("city".into()).into();
        assert_eq!(err.to_string(), "Schema error: Duplicate field name: city");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: DynaformError = io_err.into();
        assert_eq!(err.exit_code(), 74);
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: DynaformError = json_err.into();
        assert!(matches!(err, DynaformError::SerializationError(_)));
    }
}
