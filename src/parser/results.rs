//! Parse result types.
//!
//! A [`ParsedIssue`] keeps several views over the same fragments:
//! references without a keyword, references grouped by action, all
//! references in document order, all mentions, and every fragment in
//! document order.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::actions::ActionTable;

/// A reference to an issue or pull request without a closing keyword.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueRef {
    /// `owner/repo` when the reference points at another repository.
    pub slug: Option<String>,
    pub issue_number: u64,
}

/// A reference preceded by a keyword, with the action it triggers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueAction {
    pub slug: Option<String>,
    pub issue_number: u64,
    pub action: String,
}

/// An `@username` mention.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mention {
    pub username: String,
}

/// Any issue reference, with or without an action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IssueReference {
    Ref(IssueRef),
    Action(IssueAction),
}

impl IssueReference {
    pub fn slug(&self) -> Option<&str> {
        match self {
            Self::Ref(r) => r.slug.as_deref(),
            Self::Action(a) => a.slug.as_deref(),
        }
    }

    pub fn issue_number(&self) -> u64 {
        match self {
            Self::Ref(r) => r.issue_number,
            Self::Action(a) => a.issue_number,
        }
    }

    pub fn action(&self) -> Option<&str> {
        match self {
            Self::Ref(_) => None,
            Self::Action(a) => Some(&a.action),
        }
    }

    /// Whether this reference points into `repo` (`owner/repo`).
    ///
    /// References without a slug point at the repository the text came from.
    pub fn targets_repo(&self, repo: &str) -> bool {
        self.slug()
            .is_none_or(|slug| slug.eq_ignore_ascii_case(repo))
    }
}

impl From<IssueReference> for Fragment {
    fn from(reference: IssueReference) -> Self {
        match reference {
            IssueReference::Ref(r) => Fragment::Ref(r),
            IssueReference::Action(a) => Fragment::Action(a),
        }
    }
}

/// One recognized unit of output, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Fragment {
    Ref(IssueRef),
    Action(IssueAction),
    Mention(Mention),
}

impl Fragment {
    /// The reference view of this fragment, or `None` for mentions.
    pub fn as_reference(&self) -> Option<IssueReference> {
        match self {
            Self::Ref(r) => Some(IssueReference::Ref(r.clone())),
            Self::Action(a) => Some(IssueReference::Action(a.clone())),
            Self::Mention(_) => None,
        }
    }

    pub fn as_mention(&self) -> Option<&Mention> {
        match self {
            Self::Mention(m) => Some(m),
            _ => None,
        }
    }
}

/// Action lists keyed by action name, in action table order.
///
/// Serializes as a JSON object whose keys keep that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionLists {
    entries: Vec<(String, Vec<IssueAction>)>,
}

impl ActionLists {
    pub fn get(&self, name: &str) -> Option<&Vec<IssueAction>> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, actions)| actions)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Vec<IssueAction>> {
        self.entries
            .iter_mut()
            .find(|(key, _)| key == name)
            .map(|(_, actions)| actions)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &Vec<IssueAction>> {
        self.entries.iter().map(|(_, actions)| actions)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[IssueAction])> {
        self.entries
            .iter()
            .map(|(key, actions)| (key.as_str(), actions.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Vec<IssueAction>)> for ActionLists {
    fn from_iter<I: IntoIterator<Item = (String, Vec<IssueAction>)>>(iter: I) -> Self {
        let mut lists = Self::default();
        for (key, actions) in iter {
            match lists.get_mut(&key) {
                Some(existing) => *existing = actions,
                None => lists.entries.push((key, actions)),
            }
        }
        lists
    }
}

impl Serialize for ActionLists {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(key, actions)| (key, actions)))
    }
}

impl<'de> Deserialize<'de> for ActionLists {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ActionListsVisitor;

        impl<'de> Visitor<'de> for ActionListsVisitor {
            type Value = ActionLists;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map from action name to action list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Vec<IssueAction>>()? {
                    entries.push(entry);
                }
                Ok(entries.into_iter().collect())
            }
        }

        deserializer.deserialize_map(ActionListsVisitor)
    }
}

/// Everything found in one body of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedIssue {
    /// Keyed by every configured action name, even when nothing matched.
    pub actions: ActionLists,
    /// References that had no keyword.
    pub refs: Vec<IssueRef>,
    /// Every reference, with or without keyword.
    pub refs_and_actions: Vec<IssueReference>,
    pub mentions: Vec<Mention>,
    /// References, actions and mentions together.
    pub fragments: Vec<Fragment>,
}

impl ParsedIssue {
    /// Empty result with one empty list per action in `table`.
    pub fn new(table: &ActionTable) -> Self {
        Self {
            actions: table
                .action_names()
                .map(|name| (name.to_string(), Vec::new()))
                .collect(),
            refs: Vec::new(),
            refs_and_actions: Vec::new(),
            mentions: Vec::new(),
            fragments: Vec::new(),
        }
    }

    /// File a reference, under `action` when a keyword preceded it.
    ///
    /// # Panics
    ///
    /// Panics if `action` is not one of the actions this result was created
    /// with. That only happens when the grammar and the result were built
    /// from different action tables.
    pub fn submit_reference(&mut self, slug: Option<&str>, issue_number: u64, action: Option<&str>) {
        let slug = slug.map(str::to_string);
        let reference = match action {
            None => {
                let r = IssueRef { slug, issue_number };
                self.refs.push(r.clone());
                IssueReference::Ref(r)
            }
            Some(name) => {
                let a = IssueAction {
                    slug,
                    issue_number,
                    action: name.to_string(),
                };
                self.actions
                    .get_mut(name)
                    .unwrap_or_else(|| panic!("action \"{name}\" is not in the action table"))
                    .push(a.clone());
                IssueReference::Action(a)
            }
        };

        self.fragments.push(reference.clone().into());
        self.refs_and_actions.push(reference);
    }

    pub fn submit_mention(&mut self, username: &str) {
        let mention = Mention {
            username: username.to_string(),
        };
        self.fragments.push(Fragment::Mention(mention.clone()));
        self.mentions.push(mention);
    }

    /// Actions recorded for `name`; empty for unknown names.
    pub fn actions_for(&self, name: &str) -> &[IssueAction] {
        self.actions
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}
