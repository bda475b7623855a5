//! Issue reference and mention parser.
//!
//! Scans the body of an issue, pull request or comment and extracts:
//!
//! - references: `#123`, `gh-123`, `owner/repo#123`, GitHub issue/pull URLs
//! - actions: references preceded by a closing keyword (`fixes #123`)
//! - mentions: `@username`
//!
//! Code spans, code blocks and raw HTML are skipped. Link labels are never
//! scanned; a link counts only when its target is a GitHub issue/pull URL,
//! and it becomes an action when the text right before it ends with a
//! keyword (`Fixes: [the crash](https://github.com/o/r/issues/7)`).
//!
//! # Example
//!
//! ```
//! use issue_refs::parser::parse_issue_body;
//!
//! let issue = parse_issue_body("@alice fixes #9, see also other/repo#4");
//! assert_eq!(issue.mentions[0].username, "alice");
//! assert_eq!(issue.actions_for("close")[0].issue_number, 9);
//! assert_eq!(issue.refs[0].slug.as_deref(), Some("other/repo"));
//! ```

use std::sync::LazyLock;

use anyhow::Result;

use crate::markdown::{Node, parse_markdown};
use crate::utils::{body_after_title, normalize_title};

pub mod actions;
pub mod grammar;
pub mod results;
mod walker;


pub use actions::{ActionTable, CLOSE_ACTION, CLOSE_KEYWORDS};
pub use grammar::Grammar;
pub use results::{Fragment, IssueAction, IssueRef, IssueReference, Mention, ParsedIssue};

static DEFAULT_PARSER: LazyLock<IssueParser> = LazyLock::new(IssueParser::default);

/// Parser bound to one action table. Cheap to share between threads.
#[derive(Debug, Clone)]
pub struct IssueParser {
    table: ActionTable,
    grammar: Grammar,
}

impl IssueParser {
    pub fn new(table: ActionTable) -> Result<Self> {
        let grammar = Grammar::new(&table)?;
        Ok(Self { table, grammar })
    }

    pub fn action_table(&self) -> &ActionTable {
        &self.table
    }

    /// Parse a markdown body.
    pub fn parse(&self, body: &str) -> ParsedIssue {
        let mut issue = ParsedIssue::new(&self.table);
        self.parse_into(&mut issue, body);
        issue
    }

    /// Parse a node tree produced by some other markdown converter.
    pub fn parse_nodes(&self, nodes: &[Node]) -> ParsedIssue {
        let mut issue = ParsedIssue::new(&self.table);
        walker::walk_nodes(&self.grammar, nodes, &mut issue);
        issue
    }

    /// Parse a pull request title followed by its body into one result.
    ///
    /// A title GitHub truncated into the body is rejoined first, and the
    /// body line it was rejoined from is not parsed a second time.
    pub fn parse_pull_request(&self, title: &str, body: &str) -> ParsedIssue {
        let full_title = normalize_title(title, body);
        let mut issue = ParsedIssue::new(&self.table);
        self.parse_into(&mut issue, &full_title);
        self.parse_into(&mut issue, body_after_title(title, body));
        issue
    }

    fn parse_into(&self, issue: &mut ParsedIssue, body: &str) {
        let nodes = parse_markdown(body);
        let before = issue.fragments.len();
        walker::walk_nodes(&self.grammar, &nodes, issue);
        tracing::debug!(
            bytes = body.len(),
            fragments = issue.fragments.len() - before,
            "parsed body"
        );
    }
}

impl Default for IssueParser {
    fn default() -> Self {
        let table = ActionTable::default();
        let grammar = Grammar::new(&table).expect("built-in action table always compiles");
        Self { table, grammar }
    }
}

/// Parse `body` with the built-in `close` action table.
pub fn parse_issue_body(body: &str) -> ParsedIssue {
    DEFAULT_PARSER.parse(body)
}
