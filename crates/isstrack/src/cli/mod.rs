//! Command-line interface for isstrack.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, FetchCommand};

use crate::logging::Verbosity;

/// isstrack - Record where the ISS is right now
///
/// Fetches the current ISS position from open-notify and appends it to
/// the `locations` collection of a MongoDB cluster. The password is read
/// from `MONGOPASS`; `MONGO_DB_NAME` overrides the database name.
#[derive(Debug, Parser)]
#[command(name = "isstrack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the position and store it
    Run,

    /// Fetch the position and print it without storing
    Fetch(FetchCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }

    /// Take the command to run, `run` when none was given.
    #[must_use]
    pub fn take_command(&mut self) -> Command {
        self.command.take().unwrap_or(Command::Run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "isstrack");
    }

    #[test]
    fn test_parse_no_command_is_run() {
        let mut cli = Cli::try_parse_from(["isstrack"]).unwrap();
        assert!(cli.command.is_none());
        assert!(matches!(cli.take_command(), Command::Run));
    }

    #[test]
    fn test_parse_run() {
        let mut cli = Cli::try_parse_from(["isstrack", "run"]).unwrap();
        assert!(matches!(cli.take_command(), Command::Run));
    }

    #[test]
    fn test_parse_fetch_json() {
        let mut cli = Cli::try_parse_from(["isstrack", "fetch", "--json"]).unwrap();
        assert!(matches!(
            cli.take_command(),
            Command::Fetch(FetchCommand { json: true })
        ));
    }

    #[test]
    fn test_parse_config_validate() {
        let mut cli =
            Cli::try_parse_from(["isstrack", "config", "validate", "-f", "/tmp/x.toml"]).unwrap();
        match cli.take_command() {
            Command::Config(ConfigCommand::Validate { file }) => {
                assert_eq!(file.as_deref(), Some(std::path::Path::new("/tmp/x.toml")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_with_config() {
        let cli = Cli::try_parse_from(["isstrack", "-c", "/custom/config.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_verbosity_flags() {
        let cli = Cli::try_parse_from(["isstrack", "-vv"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Trace);

        let cli = Cli::try_parse_from(["isstrack", "-q", "fetch"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Quiet);
    }
}
