//! Management command framework for dynaform.
//!
//! A subcommand of the `dynaform` binary is a [`ManagementCommand`]. The
//! [`CommandRegistry`] collects them, builds the clap parser, and dispatches.
//!
//! ## Adding a command
//!
//! ```rust
//! use std::io::Write;
//!
//! use dynaform_cli::command::{CommandStatus, ManagementCommand};
//! use dynaform_core::{DynaformResult, Settings};
//!
//! struct PingCommand;
//!
//! impl ManagementCommand for PingCommand {
//!     fn name(&self) -> &'static str { "ping" }
//!     fn help(&self) -> &'static str { "Reply with pong" }
//!
//!     fn handle(
//!         &self,
//!         _matches: &clap::ArgMatches,
//!         _settings: &Settings,
//!         out: &mut dyn Write,
//!     ) -> DynaformResult<CommandStatus> {
//!         writeln!(out, "pong")?;
//!         Ok(CommandStatus::Success)
//!     }
//! }
//! ```

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;

use dynaform_core::{DynaformError, DynaformResult, Settings};

/// How a command finished when it did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// The command did what was asked.
    Success,
    /// The command ran but found problems (validation errors, failed checks).
    Failure,
}

impl CommandStatus {
    /// Returns the process exit code for this status.
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }
}

/// One `dynaform` subcommand.
///
/// Output goes to `out` so commands can be driven from tests.
pub trait ManagementCommand {
    /// The subcommand name.
    fn name(&self) -> &'static str;

    /// One-line description shown in `--help`.
    fn help(&self) -> &'static str;

    /// Declares the subcommand's arguments. None by default.
    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd
    }

    /// Runs the command against its parsed arguments.
    fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
        out: &mut dyn Write,
    ) -> DynaformResult<CommandStatus>;
}

/// The commands known to the binary, keyed by name.
pub struct CommandRegistry {
    commands: HashMap<&'static str, Box<dyn ManagementCommand>>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Adds `command`, replacing any earlier one with the same name.
    pub fn register(&mut self, command: Box<dyn ManagementCommand>) {
        self.commands.insert(command.name(), command);
    }

    /// Looks a command up by name.
    pub fn get(&self, name: &str) -> Option<&dyn ManagementCommand> {
        self.commands.get(name).map(AsRef::as_ref)
    }

    /// Registered names, sorted.
    pub fn list_commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Builds the top-level clap `Command` with every registered subcommand
    /// and the global `--settings` option.
    pub fn build_cli(&self) -> clap::Command {
        let mut app = clap::Command::new("dynaform")
            .about("dynaform management utility")
            .version(env!("CARGO_PKG_VERSION"))
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                clap::Arg::new("settings")
                    .long("settings")
                    .global(true)
                    .value_name("FILE")
                    .value_parser(clap::value_parser!(PathBuf))
                    .help("Settings file (.toml or .json)"),
            );

        let mut entries: Vec<_> = self.commands.values().collect();
        entries.sort_by_key(|cmd| cmd.name());

        for cmd in entries {
            let subcmd = clap::Command::new(cmd.name()).about(cmd.help());
            app = app.subcommand(cmd.add_arguments(subcmd));
        }

        app
    }

    /// Dispatches to the subcommand named in `matches`.
    pub fn execute(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
        out: &mut dyn Write,
    ) -> DynaformResult<CommandStatus> {
        let (name, sub_matches) = matches.subcommand().ok_or_else(|| {
            DynaformError::ConfigurationError("No subcommand specified".to_string())
        })?;

        let cmd = self.get(name).ok_or_else(|| {
            DynaformError::ConfigurationError(format!("Unknown command: {name}"))
        })?;

        tracing::debug!(command = name, "running management command");
        cmd.handle(sub_matches, settings, out)
    }
}
