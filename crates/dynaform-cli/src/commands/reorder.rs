//! The `reorder` management command.

use std::io::Write;

use dynaform_core::{DynaformResult, Settings};
use dynaform_forms::{ContainerPath, DynamicForm};

use crate::command::{CommandStatus, ManagementCommand};

/// Moves one field onto another's position and prints the resulting schema.
///
/// Requests that cannot be honored (same field, unknown id, unknown or
/// mismatched container) leave the schema unchanged, exactly as a drop in the
/// browser would.
pub struct ReorderCommand;

impl ManagementCommand for ReorderCommand {
    fn name(&self) -> &'static str {
        "reorder"
    }

    fn help(&self) -> &'static str {
        "Move a field within its container and print the reordered schema"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        super::schema_arg(cmd)
            .arg(
                clap::Arg::new("container")
                    .long("container")
                    .value_name("PATH")
                    .default_value("/")
                    .help("Container path, e.g. / or /address"),
            )
            .arg(
                clap::Arg::new("source")
                    .required(true)
                    .value_name("SOURCE_ID")
                    .help("Id of the dragged field"),
            )
            .arg(
                clap::Arg::new("destination")
                    .required(true)
                    .value_name("DESTINATION_ID")
                    .help("Id of the field it is dropped onto"),
            )
    }

    fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
        out: &mut dyn Write,
    ) -> DynaformResult<CommandStatus> {
        let schema = super::load_schema(matches)?;
        let container: ContainerPath = matches
            .get_one::<String>("container")
            .map_or("/", String::as_str)
            .parse()
            .unwrap_or_default();
        let source = matches.get_one::<String>("source").map_or("", String::as_str);
        let destination = matches
            .get_one::<String>("destination")
            .map_or("", String::as_str);

        let mut form = DynamicForm::new("reorder", schema, |_| {});
        let outcome = form.reorder(&container, source, destination);
        tracing::info!(container = %container, source, destination, %outcome, "reorder");

        let document = serde_json::to_value(form.state().schema().to_document())?;
        super::write_json(out, &document, settings.pretty_json)?;
        Ok(CommandStatus::Success)
    }
}
