//! `isstrack` - CLI for recording the ISS position
//!
//! With no subcommand, fetches the current position and stores it. Any
//! failure is logged and ends the process with exit status 1.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use isstrack::cli::{Cli, Command, ConfigCommand, FetchCommand};
use isstrack::{init_logging, pipeline, Config, Locator, MemorySink, Recorder, Result};

fn main() -> ExitCode {
    let mut cli = Cli::parse();

    init_logging(cli.verbosity());

    let command = cli.take_command();
    match execute(cli.config.take(), command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn execute(config_path: Option<PathBuf>, command: Command) -> Result<()> {
    match command {
        Command::Run => {
            let config = Config::load_from(config_path)?;
            block_on(handle_run(&config))
        }
        Command::Fetch(fetch_cmd) => {
            let config = Config::load_from(config_path)?;
            block_on(handle_fetch(&config, &fetch_cmd))
        }
        Command::Config(config_cmd) => handle_config(config_path, config_cmd),
    }
}

/// Drive `future` on a single-threaded runtime.
fn block_on<F>(future: F) -> Result<()>
where
    F: std::future::Future<Output = Result<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(future)
}

async fn handle_run(config: &Config) -> Result<()> {
    let locator = Locator::new(&config.locator)?;
    let recorder = Recorder::new(&config.recorder);
    pipeline::run(&locator, &recorder).await?;
    Ok(())
}

async fn handle_fetch(config: &Config, cmd: &FetchCommand) -> Result<()> {
    let locator = Locator::new(&config.locator)?;
    let sink = MemorySink::new();
    let reading = pipeline::run(&locator, &sink).await?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&reading)?);
    } else {
        println!("{reading}");
    }
    Ok(())
}

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print_config(&config);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path))?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}

fn print_config(config: &Config) {
    let locator = &config.locator;
    let recorder = &config.recorder;

    println!("Current Configuration");
    println!("=====================");
    println!();
    println!("[Locator]");
    println!("  URL:                {}", locator.url);
    println!("  Timeout:            {}s", locator.timeout_secs);
    println!(
        "  Time zone:          {}",
        locator
            .timezone
            .map_or_else(|| "local".to_string(), |tz| tz.name().to_string())
    );
    println!();
    println!("[Recorder]");
    println!("  Target:             {}://{}", recorder.scheme, recorder.host);
    println!("  User:               {}", recorder.user);
    println!("  Database:           {}", recorder.database);
    println!("  Collection:         {}", recorder.collection);
    println!(
        "  Selection timeout:  {}s",
        recorder.server_selection_timeout_secs
    );
    println!("  Password from:      ${}", recorder.password_env);
}
