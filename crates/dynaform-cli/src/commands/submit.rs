//! The `submit` management command.
//!
//! Feeds a values file through the form the way a user would (one change per
//! field, each validated on the spot), then submits. A clean submission
//! prints the values snapshot; a blocked one prints the error map and exits
//! with status 1.

use std::collections::BTreeMap;
use std::io::Write;

use dynaform_core::{DynaformResult, Settings};
use dynaform_forms::value::values_to_json;
use dynaform_forms::{DynamicForm, FormValues, SubmitOutcome};

use crate::command::{CommandStatus, ManagementCommand};

/// Validates and submits a values file against a schema.
pub struct SubmitCommand;

impl ManagementCommand for SubmitCommand {
    fn name(&self) -> &'static str {
        "submit"
    }

    fn help(&self) -> &'static str {
        "Validate a values file against a schema and print the submitted snapshot"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        super::schema_arg(cmd).arg(
            clap::Arg::new("values")
                .required(true)
                .value_name("VALUES")
                .value_parser(clap::value_parser!(std::path::PathBuf))
                .help("JSON object of field values"),
        )
    }

    fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
        out: &mut dyn Write,
    ) -> DynaformResult<CommandStatus> {
        let schema = super::load_schema(matches)?;
        let values = super::read_values(super::required_path(matches, "values")?)?;

        let mut snapshot: Option<FormValues> = None;
        let (outcome, errors) = {
            let mut form = DynamicForm::new("submit", schema, |values| snapshot = Some(values))
                .with_settings(settings.clone());
            super::apply_values(&mut form, values);
            let outcome = form.submit();
            let errors: BTreeMap<String, String> = form
                .state()
                .errors()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            (outcome, errors)
        };

        match (outcome, snapshot) {
            (SubmitOutcome::Submitted, Some(values)) => {
                super::write_json(out, &values_to_json(&values), settings.pretty_json)?;
                Ok(CommandStatus::Success)
            }
            _ => {
                tracing::info!(error_count = errors.len(), "submission blocked");
                let json = serde_json::json!({ "errors": errors });
                super::write_json(out, &json, settings.pretty_json)?;
                Ok(CommandStatus::Failure)
            }
        }
    }
}
