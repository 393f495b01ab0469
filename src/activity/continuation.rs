use super::BranchTag;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one alternative branch, unique within its activity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BranchId(String);

impl BranchId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BranchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BranchId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for BranchId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A labeled path out of an alternatives activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub id: BranchId,
    pub label: String,
}

impl Branch {
    pub fn new(id: impl Into<BranchId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// What happens after an activity is performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Continuation {
    /// Continue to exactly one next step, referenced by its display position.
    /// An empty reference means "not set yet".
    #[serde(rename_all = "camelCase")]
    Individual { next_ref: String },
    /// A yes/no split.
    #[serde(rename_all = "camelCase")]
    Decision { yes_label: String, no_label: String },
    /// N labeled alternative paths, in declared order.
    Alternatives { branches: Vec<Branch> },
    /// The procedure ends here.
    Terminal,
}

impl Default for Continuation {
    fn default() -> Self {
        Continuation::Individual {
            next_ref: String::new(),
        }
    }
}

impl Continuation {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Continuation::Terminal)
    }

    /// The branch keys this continuation currently offers, in procedural order.
    pub fn branch_keys(&self) -> Vec<BranchKey> {
        match self {
            Continuation::Decision { .. } => vec![BranchKey::Yes, BranchKey::No],
            Continuation::Alternatives { branches } => branches
                .iter()
                .map(|b| BranchKey::Alternative(b.id.clone()))
                .collect(),
            Continuation::Individual { .. } | Continuation::Terminal => Vec::new(),
        }
    }

    /// Returns `true` if `key` names a branch that currently exists on this continuation.
    pub fn offers(&self, key: &BranchKey) -> bool {
        self.tag_for(key).is_some()
    }

    /// The structural tag for children created under `key`, if the branch exists.
    pub fn tag_for(&self, key: &BranchKey) -> Option<BranchTag> {
        match (self, key) {
            (Continuation::Decision { .. }, BranchKey::Yes) => Some(BranchTag::Yes),
            (Continuation::Decision { .. }, BranchKey::No) => Some(BranchTag::No),
            (Continuation::Alternatives { branches }, BranchKey::Alternative(id)) => branches
                .iter()
                .position(|b| &b.id == id)
                .map(|i| BranchTag::Alternative(i + 1)),
            _ => None,
        }
    }

    /// The human label of the branch named by `key`.
    pub fn label_for(&self, key: &BranchKey) -> Option<&str> {
        match (self, key) {
            (Continuation::Decision { yes_label, .. }, BranchKey::Yes) => {
                Some(yes_label.as_str())
            }
            (Continuation::Decision { no_label, .. }, BranchKey::No) => Some(no_label.as_str()),
            (Continuation::Alternatives { branches }, BranchKey::Alternative(id)) => branches
                .iter()
                .find(|b| &b.id == id)
                .map(|b| b.label.as_str()),
            _ => None,
        }
    }
}

/// Which branch of its parent an activity hangs from.
///
/// Serialized as a plain string: `"yes"`, `"no"`, or the alternative branch id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BranchKey {
    Yes,
    No,
    Alternative(BranchId),
}

impl From<String> for BranchKey {
    fn from(value: String) -> Self {
        match value.as_str() {
            "yes" => BranchKey::Yes,
            "no" => BranchKey::No,
            _ => BranchKey::Alternative(BranchId(value)),
        }
    }
}

impl From<&str> for BranchKey {
    fn from(value: &str) -> Self {
        BranchKey::from(value.to_string())
    }
}

impl From<BranchKey> for String {
    fn from(key: BranchKey) -> Self {
        match key {
            BranchKey::Yes => "yes".to_string(),
            BranchKey::No => "no".to_string(),
            BranchKey::Alternative(id) => id.0,
        }
    }
}

impl From<BranchId> for BranchKey {
    fn from(id: BranchId) -> Self {
        BranchKey::Alternative(id)
    }
}

impl fmt::Display for BranchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BranchKey::Yes => write!(f, "yes"),
            BranchKey::No => write!(f, "no"),
            BranchKey::Alternative(id) => write!(f, "{}", id),
        }
    }
}
