//! Built-in management commands.
//!
//! Each command implements the [`ManagementCommand`](crate::command::ManagementCommand)
//! trait. The helpers here load the schema and values files the commands share.

pub mod check;
pub mod render;
pub mod reorder;
pub mod submit;

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use dynaform_core::{DynaformError, DynaformResult};
use dynaform_forms::{DynamicForm, FieldValue, FormValues, Schema};

pub use check::CheckCommand;
pub use render::RenderCommand;
pub use reorder::ReorderCommand;
pub use submit::SubmitCommand;

use crate::command::CommandRegistry;

/// Registers all built-in management commands into the given registry.
pub fn register_builtin_commands(registry: &mut CommandRegistry) {
    registry.register(Box::new(CheckCommand));
    registry.register(Box::new(RenderCommand));
    registry.register(Box::new(SubmitCommand));
    registry.register(Box::new(ReorderCommand));
}

/// Adds the positional `<SCHEMA>` argument.
pub(crate) fn schema_arg(cmd: clap::Command) -> clap::Command {
    cmd.arg(
        clap::Arg::new("schema")
            .required(true)
            .value_name("SCHEMA")
            .value_parser(clap::value_parser!(PathBuf))
            .help("Schema JSON file"),
    )
}

/// Loads the schema named by the `<SCHEMA>` argument.
pub(crate) fn load_schema(matches: &clap::ArgMatches) -> DynaformResult<Schema> {
    let path = required_path(matches, "schema")?;
    tracing::debug!(path = %path.display(), "loading schema");
    Schema::from_json_file(path)
}

/// Returns a required path argument.
pub(crate) fn required_path<'m>(matches: &'m clap::ArgMatches, id: &str) -> DynaformResult<&'m Path> {
    matches
        .get_one::<PathBuf>(id)
        .map(PathBuf::as_path)
        .ok_or_else(|| DynaformError::ConfigurationError(format!("Missing argument: {id}")))
}

/// Reads a JSON object of field values.
pub(crate) fn read_values(path: &Path) -> DynaformResult<FormValues> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Applies values to a form in name order so field-local errors are deterministic.
pub(crate) fn apply_values(form: &mut DynamicForm<'_>, values: FormValues) {
    let sorted: BTreeMap<String, FieldValue> = values.into_iter().collect();
    for (name, value) in sorted {
        form.set_value(&name, value);
    }
}

/// Writes a JSON value, pretty-printed or compact, followed by a newline.
pub(crate) fn write_json(
    out: &mut dyn Write,
    value: &serde_json::Value,
    pretty: bool,
) -> DynaformResult<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    writeln!(out, "{text}")?;
    Ok(())
}
