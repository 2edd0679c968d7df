//! The `check` management command.
//!
//! Loads a schema (compiling every validation pattern) and runs the settings
//! and schema checks, printing one block per message.

use std::io::Write;

use dynaform_core::checks::{check_settings, has_errors};
use dynaform_core::{DynaformResult, Settings};
use dynaform_forms::checks::check_schema;

use crate::command::{CommandStatus, ManagementCommand};

/// Validates a schema file and reports silent capability gaps.
pub struct CheckCommand;

impl ManagementCommand for CheckCommand {
    fn name(&self) -> &'static str {
        "check"
    }

    fn help(&self) -> &'static str {
        "Load a schema and run the schema checks"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        super::schema_arg(cmd)
    }

    fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
        out: &mut dyn Write,
    ) -> DynaformResult<CommandStatus> {
        let schema = super::load_schema(matches)?;

        let mut messages = check_settings(settings);
        messages.extend(check_schema(&schema));

        for message in &messages {
            writeln!(out, "{message}")?;
        }

        match messages.len() {
            0 => writeln!(out, "System check identified no issues.")?,
            1 => writeln!(out, "System check identified 1 issue.")?,
            n => writeln!(out, "System check identified {n} issues.")?,
        }

        if has_errors(&messages) {
            Ok(CommandStatus::Failure)
        } else {
            Ok(CommandStatus::Success)
        }
    }
}
