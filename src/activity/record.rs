use super::{BranchKey, Continuation, StructuralPosition};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque unique identifier of an activity. Assigned at creation, never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(String);

impl ActivityId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ActivityId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ActivityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One step of a procedure.
///
/// Records are values: an edit never changes a record in place inside the caller's
/// collection, it produces a new collection holding updated copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: ActivityId,
    /// Stable tree position, see [`StructuralPosition`].
    #[serde(alias = "systemNumber")]
    pub structural_position: StructuralPosition,
    /// Rank in procedural order, `"1"..="N"`. Recomputed after every structural change.
    #[serde(alias = "userNumber", default)]
    pub display_position: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub responsible: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub continuation: Continuation,
    #[serde(default)]
    pub parent_id: Option<ActivityId>,
    #[serde(alias = "parentBranchKey", default)]
    pub parent_branch: Option<BranchKey>,
}

impl Activity {
    /// Creates an empty top-level activity with an unset `Individual` continuation.
    pub fn new(
        id: impl Into<ActivityId>,
        structural_position: impl Into<StructuralPosition>,
    ) -> Self {
        Self {
            id: id.into(),
            structural_position: structural_position.into(),
            display_position: String::new(),
            name: String::new(),
            responsible: String::new(),
            description: String::new(),
            continuation: Continuation::default(),
            parent_id: None,
            parent_branch: None,
        }
    }

    /// Places this activity under `branch` of `parent`.
    pub fn in_branch(
        mut self,
        parent: impl Into<ActivityId>,
        branch: impl Into<BranchKey>,
    ) -> Self {
        self.parent_id = Some(parent.into());
        self.parent_branch = Some(branch.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_responsible(mut self, responsible: impl Into<String>) -> Self {
        self.responsible = responsible.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_continuation(mut self, continuation: Continuation) -> Self {
        self.continuation = continuation;
        self
    }

    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_terminal(&self) -> bool {
        self.continuation.is_terminal()
    }

    /// The display position parsed as a number, if it is one.
    pub fn display_number(&self) -> Option<usize> {
        self.display_position.trim().parse().ok()
    }
}
