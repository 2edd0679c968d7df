//! # dynaform-cli
//!
//! The `dynaform` management utility. Every subcommand is a
//! [`ManagementCommand`] registered in a [`CommandRegistry`]:
//!
//! - `check <SCHEMA>` - load a schema and run the schema checks
//! - `render <SCHEMA> [--values FILE]` - print the HTML form
//! - `submit <SCHEMA> <VALUES>` - validate values and print the submitted snapshot
//! - `reorder <SCHEMA> [--container PATH] <SOURCE> <DESTINATION>` - move a field
//!
//! A global `--settings <FILE>` option loads a TOML or JSON settings file;
//! `DYNAFORM_*` environment variables override it.

pub mod command;
pub mod commands;

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use dynaform_core::logging::setup_logging;
use dynaform_core::{settings_loader, DynaformResult, Settings};

pub use command::{CommandRegistry, CommandStatus, ManagementCommand};

/// Returns a registry holding every built-in command.
pub fn default_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    commands::register_builtin_commands(&mut registry);
    registry
}

/// Parses `args`, runs the selected command, and returns the process exit code.
///
/// Command output goes to `out`; diagnostics and logs go to stderr.
pub fn run<I, T>(args: I, out: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let registry = default_registry();
    let matches = match registry.build_cli().try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(err) => {
            // --help and --version land here too
            let _ = err.print();
            return err.exit_code();
        }
    };

    let result = load_settings(&matches).and_then(|settings| {
        setup_logging(&settings);
        let status = registry.execute(&matches, &settings, out)?;
        out.flush()?;
        Ok(status)
    });

    match result {
        Ok(status) => status.exit_code(),
        Err(err) => {
            eprintln!("Error: {err}");
            err.exit_code()
        }
    }
}

/// Loads settings from the global `--settings` file, or from the environment alone.
fn load_settings(matches: &clap::ArgMatches) -> DynaformResult<Settings> {
    let path = matches
        .subcommand()
        .and_then(|(_, sub)| sub.get_one::<PathBuf>("settings"))
        .or_else(|| matches.get_one::<PathBuf>("settings"));

    match path {
        Some(path) => settings_loader::from_path_with_env(path),
        None => Ok(settings_loader::from_env()),
    }
}
