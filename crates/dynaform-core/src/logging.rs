//! Logging integration for dynaform.
//!
//! Installs the [`tracing`] subscriber described by
//! [`Settings`](crate::settings::Settings) and opens per-form spans.

use crate::settings::Settings;

/// Installs the global subscriber.
///
/// `settings.log_level` is an `EnvFilter` directive such as `"debug"` or
/// `"dynaform_forms=trace"`; an unparsable one falls back to `info`.
/// Debug mode logs pretty text with file and line; otherwise one JSON object
/// per event. Everything goes to stderr, leaving stdout to command output.
///
/// Installing a second subscriber is a no-op.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for one mounted form.
///
/// The form state store enters this span while it handles an event, so every
/// log line emitted during validation or reordering carries the form id.
///
/// # Examples
///
/// ```
/// use dynaform_core::logging::form_span;
///
/// let span = form_span("signup");
/// let _guard = span.enter();
/// tracing::info!("handling change");
/// ```
pub fn form_span(form_id: &str) -> tracing::Span {
    tracing::info_span!("form", id = form_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_logging_twice_is_harmless() {
        let settings = Settings {
            log_level: "not a valid filter[".into(),
            ..Settings::default()
        };
        setup_logging(&settings);
        setup_logging(&Settings::default());
    }

    #[test]
    fn test_form_span_enter() {
        let span = form_span("contact");
        let _guard = span.enter();
        tracing::debug!("inside form span");
    }
}
