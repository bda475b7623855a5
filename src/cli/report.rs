//! Report formatting and printing utilities.
//!
//! Separate from the parser so the crate can be used as a library.

use std::io::{self, Write};

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use crate::parser::{Fragment, ParsedIssue};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Width of the fragment label column.
const LABEL_WIDTH: usize = 8;

/// Parse result for one input, as printed by the `parse` command.
#[derive(Debug, Serialize)]
pub struct ParsedDocument {
    /// File path, or `<stdin>`.
    pub source: String,
    pub result: ParsedIssue,
}

/// Print parse results in text format to stdout.
pub fn report(documents: &[ParsedDocument]) {
    report_to(documents, &mut io::stdout().lock());
}

/// Print parse results to a custom writer.
pub fn report_to<W: Write>(documents: &[ParsedDocument], writer: &mut W) {
    for document in documents {
        print_document(document, writer);
    }
    print_summary(documents, writer);
}

/// Print parse results as a pretty JSON array to stdout.
pub fn report_json(documents: &[ParsedDocument]) -> Result<()> {
    report_json_to(documents, &mut io::stdout().lock())
}

pub fn report_json_to<W: Write>(documents: &[ParsedDocument], writer: &mut W) -> Result<()> {
    let json =
        serde_json::to_string_pretty(documents).context("Failed to serialize parse results")?;
    writeln!(writer, "{}", json).context("Failed to write parse results")?;
    Ok(())
}

// ============================================================
// Internal Functions
// ============================================================

fn print_document<W: Write>(document: &ParsedDocument, writer: &mut W) {
    let _ = writeln!(writer, "{}", document.source.bold());

    if document.result.is_empty() {
        let _ = writeln!(writer, "  {}", "no references or mentions".dimmed());
        return;
    }

    for fragment in &document.result.fragments {
        let _ = writeln!(writer, "  {}", format_fragment(fragment));
    }
}

fn format_fragment(fragment: &Fragment) -> String {
    match fragment {
        Fragment::Ref(r) => format!(
            "{} {}",
            format!("{:<LABEL_WIDTH$}", "ref").cyan(),
            format_target(r.slug.as_deref(), r.issue_number)
        ),
        Fragment::Action(a) => format!(
            "{} {}",
            format!("{:<LABEL_WIDTH$}", a.action).green().bold(),
            format_target(a.slug.as_deref(), a.issue_number)
        ),
        Fragment::Mention(m) => format!(
            "{} @{}",
            format!("{:<LABEL_WIDTH$}", "mention").yellow(),
            m.username
        ),
    }
}

fn format_target(slug: Option<&str>, issue_number: u64) -> String {
    match slug {
        Some(slug) => format!("{}#{}", slug, issue_number),
        None => format!("#{}", issue_number),
    }
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    format!("{} {}", count, if count == 1 { singular } else { plural })
}

fn print_summary<W: Write>(documents: &[ParsedDocument], writer: &mut W) {
    let refs: usize = documents.iter().map(|d| d.result.refs.len()).sum();
    let actions: usize = documents
        .iter()
        .flat_map(|d| d.result.actions.values())
        .map(Vec::len)
        .sum();
    let mentions: usize = documents.iter().map(|d| d.result.mentions.len()).sum();

    let msg = format!(
        "Parsed {}: {}, {}, {}",
        plural(documents.len(), "input", "inputs"),
        plural(refs, "reference", "references"),
        plural(actions, "action", "actions"),
        plural(mentions, "mention", "mentions"),
    );
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
}
