//! Closing actions and the keyword spellings that trigger them.

use std::collections::HashMap;

use anyhow::{Result, bail};

/// Name of the built-in action triggered by "fixes #1" and friends.
pub const CLOSE_ACTION: &str = "close";

/// Keyword spellings of the built-in `close` action, in match order.
pub const CLOSE_KEYWORDS: &[&str] = &[
    "close", "closes", "closed", "fix", "fixes", "fixed", "resolve", "resolves", "resolved",
];

/// Ordered mapping from action name to the keywords that trigger it,
/// plus the inverse lookup from lower-cased keyword to action name.
///
/// Immutable once built; share it freely between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTable {
    actions: Vec<(String, Vec<String>)>,
    keywords: HashMap<String, String>,
}

impl ActionTable {
    /// Build a table from `(action name, keywords)` pairs.
    ///
    /// Fails if there are no actions, an action name is empty or repeated,
    /// an action has no keywords, a keyword is empty, or one keyword
    /// (ignoring case) is claimed by two different actions.
    pub fn new<I, N, K, S>(actions: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, K)>,
        N: Into<String>,
        K: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self {
            actions: Vec::new(),
            keywords: HashMap::new(),
        };

        for (name, keywords) in actions {
            let name: String = name.into();
            if name.is_empty() {
                bail!("action name must not be empty");
            }
            if table.actions.iter().any(|(existing, _)| *existing == name) {
                bail!("action \"{}\" is defined more than once", name);
            }

            let mut spellings = Vec::new();
            for keyword in keywords {
                let keyword: String = keyword.into();
                if keyword.is_empty() {
                    bail!("action \"{}\" has an empty keyword", name);
                }
                let folded = keyword.to_lowercase();
                match table.keywords.get(&folded) {
                    Some(owner) if *owner != name => bail!(
                        "keyword \"{}\" is claimed by both \"{}\" and \"{}\"",
                        keyword,
                        owner,
                        name
                    ),
                    // Repeated spelling within the same action
                    Some(_) => continue,
                    None => {
                        table.keywords.insert(folded, name.clone());
                        spellings.push(keyword);
                    }
                }
            }

            if spellings.is_empty() {
                bail!("action \"{}\" has no keywords", name);
            }
            table.actions.push((name, spellings));
        }

        if table.actions.is_empty() {
            bail!("at least one action must be configured");
        }

        Ok(table)
    }

    /// Action names in configuration order.
    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(|(name, _)| name.as_str())
    }

    /// `(action name, keywords)` pairs in configuration order.
    pub fn actions(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.actions
            .iter()
            .map(|(name, keywords)| (name.as_str(), keywords.as_slice()))
    }

    /// Name of the action at `index` in configuration order.
    pub fn action_name(&self, index: usize) -> Option<&str> {
        self.actions.get(index).map(|(name, _)| name.as_str())
    }

    /// Look up the action a keyword triggers (case insensitive).
    pub fn resolve(&self, keyword: &str) -> Option<&str> {
        self.keywords
            .get(&keyword.to_lowercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Default for ActionTable {
    fn default() -> Self {
        let keywords = CLOSE_KEYWORDS.iter().map(|k| k.to_string()).collect();
        let mut lookup = HashMap::new();
        for keyword in CLOSE_KEYWORDS {
            lookup.insert(keyword.to_string(), CLOSE_ACTION.to_string());
        }
        Self {
            actions: vec![(CLOSE_ACTION.to_string(), keywords)],
            keywords: lookup,
        }
    }
}
