use std::{
    fs,
    io::{self, Read},
};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;

use super::super::args::{CommonArgs, OutputFormat, ParseCommand};
use super::super::exit_status::ExitStatus;
use super::super::report::{self, ParsedDocument};
use crate::config::{Config, load_config, load_config_file};
use crate::parser::IssueParser;

const STDIN_SOURCE: &str = "<stdin>";

pub fn parse(cmd: ParseCommand) -> Result<ExitStatus> {
    let parser = build_parser(&cmd.common)?;

    if cmd.title.is_some() && cmd.files.len() > 1 {
        bail!("--title can only be used with a single input");
    }

    let documents = if cmd.files.is_empty() {
        let mut body = String::new();
        io::stdin()
            .read_to_string(&mut body)
            .context("Failed to read stdin")?;
        vec![parse_document(
            &parser,
            STDIN_SOURCE,
            cmd.title.as_deref(),
            &body,
        )]
    } else {
        // Parsing is pure, so inputs are independent; collect keeps argument order.
        cmd.files
            .par_iter()
            .map(|path| -> Result<ParsedDocument> {
                let body = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read input file: {:?}", path))?;
                Ok(parse_document(
                    &parser,
                    &path.to_string_lossy(),
                    cmd.title.as_deref(),
                    &body,
                ))
            })
            .collect::<Result<Vec<_>>>()?
    };

    match cmd.format {
        OutputFormat::Text => report::report(&documents),
        OutputFormat::Json => report::report_json(&documents)?,
    }

    Ok(ExitStatus::Success)
}

fn build_parser(args: &CommonArgs) -> Result<IssueParser> {
    let config = match &args.config {
        Some(path) => load_config_file(path)?,
        None => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            let loaded = load_config(&cwd)?;
            if let Some(path) = &loaded.path {
                tracing::debug!(path = %path.display(), "loaded config");
            }
            loaded.config
        }
    };
    parser_from_config(&config)
}

fn parser_from_config(config: &Config) -> Result<IssueParser> {
    let table = config.action_table()?;
    tracing::debug!(
        actions = ?table.action_names().collect::<Vec<_>>(),
        "building parser"
    );
    IssueParser::new(table)
}

fn parse_document(
    parser: &IssueParser,
    source: &str,
    title: Option<&str>,
    body: &str,
) -> ParsedDocument {
    let result = match title {
        Some(title) => parser.parse_pull_request(title, body),
        None => parser.parse(body),
    };
    tracing::debug!(
        source,
        fragments = result.fragments.len(),
        "parsed input"
    );
    ParsedDocument {
        source: source.to_string(),
        result,
    }
}
