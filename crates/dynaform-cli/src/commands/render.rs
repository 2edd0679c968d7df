//! The `render` management command.

use std::io::Write;
use std::path::PathBuf;

use dynaform_core::{DynaformResult, Settings};
use dynaform_forms::DynamicForm;

use crate::command::{CommandStatus, ManagementCommand};

/// Prints the HTML form for a schema, optionally pre-filled with values.
pub struct RenderCommand;

impl ManagementCommand for RenderCommand {
    fn name(&self) -> &'static str {
        "render"
    }

    fn help(&self) -> &'static str {
        "Render a schema as an HTML form"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        super::schema_arg(cmd)
            .arg(
                clap::Arg::new("values")
                    .long("values")
                    .value_name("FILE")
                    .value_parser(clap::value_parser!(PathBuf))
                    .help("JSON object of field values to fill in"),
            )
            .arg(
                clap::Arg::new("id")
                    .long("id")
                    .default_value("dynaform")
                    .help("Id of the <form> element"),
            )
    }

    fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
        out: &mut dyn Write,
    ) -> DynaformResult<CommandStatus> {
        let schema = super::load_schema(matches)?;
        let id = matches
            .get_one::<String>("id")
            .map_or("dynaform", String::as_str);

        let mut form = DynamicForm::new(id, schema, |_| {}).with_settings(settings.clone());
        if let Some(path) = matches.get_one::<PathBuf>("values") {
            super::apply_values(&mut form, super::read_values(path)?);
        }

        writeln!(out, "{}", form.render())?;
        Ok(CommandStatus::Success)
    }
}
