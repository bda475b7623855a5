//! issue-refs - issue reference and mention parser for GitHub bodies
//!
//! Extracts issue references (`#12`, `gh-12`, `owner/repo#12`, issue and pull
//! request URLs), keyword actions (`fixes #12`) and `@mentions` from the
//! Markdown body of an issue, pull request or comment.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, commands, reports)
//! - `config`: Configuration file loading and validation
//! - `markdown`: Markdown body to node tree adapter
//! - `parser`: Reference grammar, tree walker and parse results
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod markdown;
pub mod parser;
pub mod utils;
