//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `parse`: Extract references, closing actions and mentions from bodies
//! - `init`: Write a default `.issuerefsrc.json`

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Parse(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by commands that parse text.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Config file to use instead of searching for .issuerefsrc.json
    #[arg(long, env = "ISSUE_REFS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct ParseCommand {
    /// Files containing issue, pull request or comment bodies (reads stdin when omitted)
    pub files: Vec<PathBuf>,

    /// Pull request title, parsed before the body (single input only)
    #[arg(long)]
    pub title: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract issue references, closing actions and @mentions
    Parse(ParseCommand),
    /// Initialize a new .issuerefsrc.json configuration file
    Init,
}
