use std::process::ExitCode;

use clap::Parser;
use issue_refs::cli::{Arguments, ExitStatus, init_logging, run_cli};

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_logging(args.verbose());

    match run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
