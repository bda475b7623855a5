//! Pattern rules for auto-references, mentions and closing keywords.
//!
//! The rules are compiled once per [`ActionTable`]:
//!
//! - keyword rule: a configured keyword, then optional spaces/tabs, exactly one
//!   space, tab or colon, then optional spaces/tabs (`fixes #1`, `fixes: #1`,
//!   `fixes:#1`)
//! - auto-reference rule: optional keyword, then either a GitHub issue/pull
//!   URL (the `https://github.com/` part is optional) or an optional
//!   `owner/repo` slug followed by `#` or `gh-`, then the issue number
//! - mention rule: `@` followed by word characters, hyphens and dots
//! - issue URL rule: a full `https://github.com/owner/repo/(issues|pull)/N`
//!   link target
//! - keyword lookback rule: a keyword rule match that ends the text
//!
//! Auto-references and mentions must start at the beginning of a line or
//! right after a non-word character, and the issue number must not be
//! followed by a word character.

use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::{Captures, Regex};

use super::actions::ActionTable;

/// Characters allowed in each half of an `owner/repo` slug.
const SLUG_PATTERN: &str = r"[\w\-.]+/[\w\-.]+";

/// Start boundary: start of line, or one consumed non-word character that
/// is not a line terminator.
const START_BOUNDARY: &str = r"(?:[^\w\n\x0B\r]|^)";

/// End boundary for issue numbers. Consumes the following character; the
/// scanner resumes right after the digits so it can serve as the next
/// start boundary.
const END_BOUNDARY: &str = r"(?:\W|\z)";

static ISSUE_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\Ahttps://github\.com/(?P<slug>{SLUG_PATTERN})/(?:issues|pull)/(?P<issue_number>[0-9]+){END_BOUNDARY}"
    ))
    .unwrap()
});

/// A reference found by the grammar, before it is filed into a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefMatch<'g, 't> {
    pub slug: Option<&'t str>,
    pub issue_number: u64,
    /// Action name resolved from the keyword, if one preceded the reference.
    pub action: Option<&'g str>,
}

/// One match of the text scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMatch<'g, 't> {
    Reference(RefMatch<'g, 't>),
    Mention(&'t str),
}

/// Compiled pattern rules for one action table.
#[derive(Debug, Clone)]
pub struct Grammar {
    text_regex: Regex,
    keyword_suffix_regex: Regex,
    /// Capture group name and action name, one per configured action.
    action_groups: Vec<(String, String)>,
}

impl Grammar {
    pub fn new(table: &ActionTable) -> Result<Self> {
        let action_groups: Vec<(String, String)> = table
            .action_names()
            .enumerate()
            .map(|(index, name)| (format!("action{index}"), name.to_string()))
            .collect();

        let keyword = keyword_pattern(table);
        // Issue numbers are ASCII digits only; runs too large for u64 are dropped by the scanner.
        let text_pattern = format!(
            r"(?mi){START_BOUNDARY}(?:(?:{keyword})?(?:(?:https://github\.com/)?(?P<url_slug>{SLUG_PATTERN})/(?:issues|pull)/|(?:(?P<ref_slug>{SLUG_PATTERN}))?(?:#|gh-))(?P<issue_number>[0-9]+){END_BOUNDARY}|@(?P<mention>[\w\-.]+))"
        );
        let suffix_pattern = format!(r"(?i){START_BOUNDARY}{keyword}\n?\z");

        Ok(Self {
            text_regex: Regex::new(&text_pattern)
                .context("Failed to compile auto-reference pattern")?,
            keyword_suffix_regex: Regex::new(&suffix_pattern)
                .context("Failed to compile keyword pattern")?,
            action_groups,
        })
    }

    /// Iterate over auto-references and mentions in `text`, left to right,
    /// without overlap.
    pub fn scan<'g, 't>(&'g self, text: &'t str) -> TextMatches<'g, 't> {
        TextMatches {
            grammar: self,
            text,
            cursor: 0,
        }
    }

    /// Resolve the action of a keyword that ends `text`, as in `"Fixes: "`
    /// right before a link.
    pub fn keyword_suffix(&self, text: &str) -> Option<&str> {
        self.keyword_suffix_regex
            .captures(text)
            .and_then(|caps| self.matched_action(&caps))
    }

    fn matched_action(&self, caps: &Captures<'_>) -> Option<&str> {
        self.action_groups
            .iter()
            .find(|(group, _)| caps.name(group).is_some())
            .map(|(_, action)| action.as_str())
    }
}

/// Match a link target against the full GitHub issue/pull URL rule.
///
/// Returns the slug and issue number. Anything after the number is ignored
/// as long as it does not continue the number with a word character.
pub fn match_issue_url(url: &str) -> Option<(&str, u64)> {
    let caps = ISSUE_URL_REGEX.captures(url)?;
    let slug = caps.name("slug")?.as_str();
    let issue_number = caps.name("issue_number")?.as_str().parse().ok()?;
    Some((slug, issue_number))
}

/// Iterator returned by [`Grammar::scan`].
#[derive(Debug)]
pub struct TextMatches<'g, 't> {
    grammar: &'g Grammar,
    text: &'t str,
    cursor: usize,
}

impl<'g, 't> Iterator for TextMatches<'g, 't> {
    type Item = TextMatch<'g, 't>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let caps = self
                .grammar
                .text_regex
                .captures_at(self.text, self.cursor)?;

            if let Some(mention) = caps.name("mention") {
                self.cursor = mention.end();
                return Some(TextMatch::Mention(mention.as_str()));
            }

            let Some(number) = caps.name("issue_number") else {
                self.cursor = caps.get(0).map_or(self.text.len(), |m| m.end());
                continue;
            };
            self.cursor = number.end();

            let Ok(issue_number) = number.as_str().parse::<u64>() else {
                tracing::trace!(digits = number.as_str(), "issue number out of range");
                continue;
            };

            let slug = caps
                .name("url_slug")
                .or_else(|| caps.name("ref_slug"))
                .map(|m| m.as_str());

            return Some(TextMatch::Reference(RefMatch {
                slug,
                issue_number,
                action: self.grammar.matched_action(&caps),
            }));
        }
    }
}

fn keyword_pattern(table: &ActionTable) -> String {
    let alternatives: Vec<String> = table
        .actions()
        .enumerate()
        .map(|(index, (_, keywords))| {
            let spellings: Vec<String> = keywords.iter().map(|k| regex::escape(k)).collect();
            format!("(?P<action{index}>{})", spellings.join("|"))
        })
        .collect();

    format!(r"(?:{})[ \t]*[ \t:][ \t]*", alternatives.join("|"))
}
