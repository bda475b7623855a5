//! Depth-first walk over the markdown node tree.

use super::grammar::{Grammar, RefMatch, TextMatch, match_issue_url};
use super::results::ParsedIssue;
use crate::markdown::{Node, NodeKind};

/// Visit `nodes` and their descendants in document order, filing every
/// reference and mention into `issue`.
pub fn walk_nodes(grammar: &Grammar, nodes: &[Node], issue: &mut ParsedIssue) {
    let mut previous: Option<&Node> = None;

    for node in nodes {
        if node.kind.is_opaque() {
            tracing::trace!(kind = ?node.kind, "skipping verbatim node");
        } else if node.kind == NodeKind::Link {
            // The label is never scanned, only the target.
            visit_link(grammar, node, previous, issue);
        } else {
            if let Some(text) = node.text.as_deref()
                && !text.is_empty()
            {
                scan_text(grammar, text, issue);
            }
            if !node.children.is_empty() {
                walk_nodes(grammar, &node.children, issue);
            }
        }

        previous = Some(node);
    }
}

/// Scan one run of plain text for auto-references and mentions.
pub fn scan_text(grammar: &Grammar, text: &str, issue: &mut ParsedIssue) {
    for found in grammar.scan(text) {
        match found {
            TextMatch::Reference(RefMatch {
                slug,
                issue_number,
                action,
            }) => {
                tracing::trace!(?slug, issue_number, ?action, "reference");
                issue.submit_reference(slug, issue_number, action);
            }
            TextMatch::Mention(username) => {
                tracing::trace!(username, "mention");
                issue.submit_mention(username);
            }
        }
    }
}

/// Handle a link node: only GitHub issue/pull URLs count, and a keyword
/// ending the previous text sibling turns the reference into an action.
fn visit_link(grammar: &Grammar, link: &Node, previous: Option<&Node>, issue: &mut ParsedIssue) {
    let Some((slug, issue_number)) = link.link.as_deref().and_then(match_issue_url) else {
        return;
    };

    let action = previous
        .filter(|node| node.kind == NodeKind::Text)
        .and_then(|node| node.text.as_deref())
        .and_then(|text| grammar.keyword_suffix(text));

    tracing::trace!(slug, issue_number, ?action, "linked reference");
    issue.submit_reference(Some(slug), issue_number, action);
}
