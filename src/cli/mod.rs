use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

pub mod args;
pub mod commands;
pub mod exit_status;
pub mod report;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match args.command {
        Some(Command::Parse(cmd)) => commands::parse::parse(cmd),
        Some(Command::Init) => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            commands::init::init(&cwd)
        }
        None => Ok(ExitStatus::Success),
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `-v`.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
