//! The mutation engine.
//!
//! Every operation takes the current collection by reference and returns a new,
//! renumbered one inside an [`Edit`]; the input is never modified and the editor keeps
//! no document state between calls. Holding on to the "current" collection is the
//! caller's job.
//!
//! Three outcomes are possible:
//! * `Ok(edit)` with [`EditStatus::Applied`]: the edit happened.
//! * `Ok(edit)` with [`EditStatus::Unchanged`]: nothing to do (stale id, unknown branch,
//!   same index...). `edit.activities` equals the input.
//! * `Err(FlowError::Locked)`: the procedure is locked and the edit was refused.

use crate::activity::{
    Activity, ActivityId, Branch, BranchId, BranchKey, Continuation, StructuralPosition,
};
use crate::config::EditorConfig;
use crate::error::FlowError;
use crate::lock::{self, LockState};
use crate::numbering::{renumber, renumber_with_suggestion};
use crate::order::ActivityIndex;
use ahash::AHashSet;

mod builder;
mod cascade;
pub mod ids;
mod patch;

pub use builder::FlowEditorBuilder;
pub use ids::{IdSource, SequentialIds, UuidIds};
pub use patch::ActivityPatch;

/// Where a new activity goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Appended after the last top-level activity.
    TopLevel,
    /// Appended at the end of `branch` of `parent`.
    Branch {
        parent: ActivityId,
        branch: BranchKey,
    },
}

impl Placement {
    pub fn under(parent: impl Into<ActivityId>, branch: impl Into<BranchKey>) -> Self {
        Placement::Branch {
            parent: parent.into(),
            branch: branch.into(),
        }
    }
}

/// Why an edit left the collection as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoOpReason {
    UnknownActivity(ActivityId),
    UnknownBranch {
        activity_id: ActivityId,
        branch: BranchKey,
    },
    /// The activity exists but does not have alternative branches.
    NotAlternatives(ActivityId),
    SameIndex,
    IndexOutOfRange {
        index: usize,
        len: usize,
    },
    /// `unlock` on a procedure that is already open.
    NotLocked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditStatus {
    Applied,
    Unchanged(NoOpReason),
}

/// The result of one mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// The new collection, renumbered.
    pub activities: Vec<Activity>,
    pub status: EditStatus,
    /// The activity an insert created.
    pub created: Option<ActivityId>,
    /// The branch an `add_branch` created.
    pub created_branch: Option<BranchId>,
    /// Activities removed by a delete or branch removal, in cascade order.
    pub removed: Vec<ActivityId>,
}

impl Edit {
    fn applied(activities: Vec<Activity>) -> Self {
        Self {
            activities,
            status: EditStatus::Applied,
            created: None,
            created_branch: None,
            removed: Vec::new(),
        }
    }

    fn unchanged(activities: &[Activity], reason: NoOpReason) -> Self {
        tracing::debug!(?reason, "Edit left the procedure unchanged");
        Self {
            activities: activities.to_vec(),
            status: EditStatus::Unchanged(reason),
            created: None,
            created_branch: None,
            removed: Vec::new(),
        }
    }

    pub fn is_applied(&self) -> bool {
        self.status == EditStatus::Applied
    }

    pub fn into_activities(self) -> Vec<Activity> {
        self.activities
    }
}

/// Applies edit commands to procedure collections.
pub struct FlowEditor {
    config: EditorConfig,
    ids: Box<dyn IdSource>,
}

impl Default for FlowEditor {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl FlowEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> FlowEditorBuilder {
        FlowEditorBuilder::new()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn lock_state(&self, activities: &[Activity]) -> LockState {
        LockState::of(activities)
    }

    /// A decision continuation with the configured default labels.
    pub fn decision(&self) -> Continuation {
        Continuation::Decision {
            yes_label: self.config.yes_label.clone(),
            no_label: self.config.no_label.clone(),
        }
    }

    /// An alternatives continuation with `count` freshly labeled branches.
    pub fn alternatives(&self, count: usize) -> Continuation {
        Continuation::Alternatives {
            branches: (1..=count)
                .map(|n| self.new_branch(self.config.alternative_label_for(n)))
                .collect(),
        }
    }

    /// Appends a new, empty activity at `placement`.
    ///
    /// The new activity's structural position is derived from its parent and branch
    /// (`"{parent}.S{n}"`, `"{parent}.A2{n}"`, or `"{n}"` at the top level), and its
    /// next reference is pre-filled with the following display position.
    pub fn insert(
        &self,
        activities: &[Activity],
        placement: Placement,
    ) -> Result<Edit, FlowError> {
        lock::ensure_open(activities)?;
        let index = ActivityIndex::new(activities);

        let (structural_position, parent_id, parent_branch) = match placement {
            Placement::TopLevel => {
                let siblings: Vec<&StructuralPosition> = index
                    .roots()
                    .iter()
                    .map(|&slot| &index.at(slot).structural_position)
                    .collect();
                let position = appended_position("", &siblings, StructuralPosition::top_level);
                (position, None, None)
            }
            Placement::Branch { parent, branch } => {
                let Some(parent_activity) = index.get(&parent) else {
                    return Ok(Edit::unchanged(
                        activities,
                        NoOpReason::UnknownActivity(parent),
                    ));
                };
                let Some(tag) = parent_activity.continuation.tag_for(&branch) else {
                    return Ok(Edit::unchanged(
                        activities,
                        NoOpReason::UnknownBranch {
                            activity_id: parent,
                            branch,
                        },
                    ));
                };
                let base = &parent_activity.structural_position;
                let siblings: Vec<&StructuralPosition> = index
                    .branch_children(&parent, &branch)
                    .map(|slot| &index.at(slot).structural_position)
                    .collect();
                let prefix = base.branch_prefix(&tag);
                let position = appended_position(&prefix, &siblings, |n| base.child(&tag, n));
                (position, Some(parent), Some(branch))
            }
        };

        let id = ActivityId::new(self.ids.next_id());
        let activity = Activity {
            parent_id,
            parent_branch,
            ..Activity::new(id.clone(), structural_position)
        };
        tracing::debug!(
            activity_id = %id,
            position = %activity.structural_position,
            "Inserted activity"
        );

        let mut next = activities.to_vec();
        next.push(activity);
        let mut edit = Edit::applied(renumber_with_suggestion(&next, &id));
        edit.created = Some(id);
        Ok(edit)
    }

    /// Replaces fields of the activity named `id`.
    ///
    /// Switching to alternatives with no branches adds one empty placeholder branch.
    /// Children under branches the new continuation no longer offers are kept; they
    /// resolve as orphans until they are deleted or the branch comes back.
    pub fn update(
        &self,
        activities: &[Activity],
        id: &ActivityId,
        patch: ActivityPatch,
    ) -> Result<Edit, FlowError> {
        lock::ensure_open(activities)?;
        let Some(slot) = activities.iter().position(|a| &a.id == id) else {
            return Ok(Edit::unchanged(
                activities,
                NoOpReason::UnknownActivity(id.clone()),
            ));
        };

        let mut updated = patch.apply_to(&activities[slot]);
        if let Continuation::Alternatives { branches } = &mut updated.continuation {
            if branches.is_empty() {
                branches.push(self.new_branch(String::new()));
            }
        }

        let mut next = activities.to_vec();
        next[slot] = updated;
        tracing::debug!(activity_id = %id, "Updated activity");
        Ok(Edit::applied(renumber(&next)))
    }

    /// Deletes the activity named `id` together with every activity below it.
    pub fn delete(&self, activities: &[Activity], id: &ActivityId) -> Result<Edit, FlowError> {
        lock::ensure_open(activities)?;
        let index = ActivityIndex::new(activities);
        if !index.contains(id) {
            return Ok(Edit::unchanged(
                activities,
                NoOpReason::UnknownActivity(id.clone()),
            ));
        }

        let removed = cascade::collect_subtree(&index, [id]);
        tracing::debug!(activity_id = %id, removed = removed.len(), "Deleted activity");
        Ok(self.without(activities, removed))
    }

    /// Moves the top-level activity at `from` to `to` (indices into the top-level list in
    /// structural order), then renumbers top-level structural positions `1..=N`.
    /// Descendants travel with their top-level ancestor.
    pub fn reorder(
        &self,
        activities: &[Activity],
        from: usize,
        to: usize,
    ) -> Result<Edit, FlowError> {
        lock::ensure_open(activities)?;
        let index = ActivityIndex::new(activities);
        let len = index.roots().len();
        if from >= len || to >= len {
            let out_of_range = if from >= len { from } else { to };
            return Ok(Edit::unchanged(
                activities,
                NoOpReason::IndexOutOfRange {
                    index: out_of_range,
                    len,
                },
            ));
        }
        if from == to {
            return Ok(Edit::unchanged(activities, NoOpReason::SameIndex));
        }

        let mut roots = index.roots().to_vec();
        let moved = roots.remove(from);
        roots.insert(to, moved);

        let mut next = activities.to_vec();
        for (rank, slot) in roots.into_iter().enumerate() {
            next[slot].structural_position = StructuralPosition::top_level(rank + 1);
        }
        tracing::debug!(
            activity_id = %index.at(moved).id,
            from,
            to,
            "Reordered top-level activity"
        );
        Ok(Edit::applied(renumber(&next)))
    }

    /// Appends a new alternative branch to the activity named `activity_id`.
    /// No child activities are created.
    pub fn add_branch(
        &self,
        activities: &[Activity],
        activity_id: &ActivityId,
    ) -> Result<Edit, FlowError> {
        lock::ensure_open(activities)?;
        let Some(slot) = activities.iter().position(|a| &a.id == activity_id) else {
            return Ok(Edit::unchanged(
                activities,
                NoOpReason::UnknownActivity(activity_id.clone()),
            ));
        };
        let Continuation::Alternatives { branches } = &activities[slot].continuation else {
            return Ok(Edit::unchanged(
                activities,
                NoOpReason::NotAlternatives(activity_id.clone()),
            ));
        };

        let branch = self.new_branch(self.config.alternative_label_for(branches.len() + 1));
        let branch_id = branch.id.clone();
        let mut branches = branches.clone();
        branches.push(branch);

        let mut next = activities.to_vec();
        next[slot].continuation = Continuation::Alternatives { branches };
        tracing::debug!(activity_id = %activity_id, branch_id = %branch_id, "Added branch");

        let mut edit = Edit::applied(renumber(&next));
        edit.created_branch = Some(branch_id);
        Ok(edit)
    }

    /// Removes an alternative branch and everything inside it.
    ///
    /// An activity never ends up with zero alternatives: removing the last branch leaves
    /// a single empty placeholder branch in its place.
    pub fn remove_branch(
        &self,
        activities: &[Activity],
        activity_id: &ActivityId,
        branch_id: &BranchId,
    ) -> Result<Edit, FlowError> {
        lock::ensure_open(activities)?;
        let index = ActivityIndex::new(activities);
        let Some(slot) = index.slot_of(activity_id) else {
            return Ok(Edit::unchanged(
                activities,
                NoOpReason::UnknownActivity(activity_id.clone()),
            ));
        };
        let Continuation::Alternatives { branches } = &activities[slot].continuation else {
            return Ok(Edit::unchanged(
                activities,
                NoOpReason::NotAlternatives(activity_id.clone()),
            ));
        };
        if !branches.iter().any(|b| &b.id == branch_id) {
            return Ok(Edit::unchanged(
                activities,
                NoOpReason::UnknownBranch {
                    activity_id: activity_id.clone(),
                    branch: BranchKey::Alternative(branch_id.clone()),
                },
            ));
        }

        let mut branches: Vec<Branch> = branches
            .iter()
            .filter(|b| &b.id != branch_id)
            .cloned()
            .collect();
        if branches.is_empty() {
            branches.push(self.new_branch(String::new()));
        }

        let key = BranchKey::Alternative(branch_id.clone());
        let roots: Vec<&ActivityId> = index
            .branch_children(activity_id, &key)
            .map(|child| &index.at(child).id)
            .collect();
        let removed = cascade::collect_subtree(&index, roots);

        let mut next = activities.to_vec();
        next[slot].continuation = Continuation::Alternatives { branches };
        tracing::debug!(
            activity_id = %activity_id,
            branch_id = %branch_id,
            removed = removed.len(),
            "Removed branch"
        );
        Ok(self.without(&next, removed))
    }

    /// Reopens a locked procedure: every terminal activity goes back to `Individual`
    /// with an empty next reference. The only edit accepted while locked.
    pub fn unlock(&self, activities: &[Activity]) -> Result<Edit, FlowError> {
        if !LockState::of(activities).is_locked() {
            return Ok(Edit::unchanged(activities, NoOpReason::NotLocked));
        }
        let (next, reopened) = lock::reopen(activities);
        tracing::info!(reopened = reopened.len(), "Procedure unlocked");
        Ok(Edit::applied(renumber(&next)))
    }

    fn new_branch(&self, label: String) -> Branch {
        Branch::new(BranchId::new(self.ids.next_id()), label)
    }

    /// Drops every activity in `removed` and renumbers.
    fn without(&self, activities: &[Activity], removed: Vec<ActivityId>) -> Edit {
        let doomed: AHashSet<&ActivityId> = removed.iter().collect();
        let remaining: Vec<Activity> = activities
            .iter()
            .filter(|a| !doomed.contains(&a.id))
            .cloned()
            .collect();
        let mut edit = Edit::applied(renumber(&remaining));
        edit.removed = removed;
        edit
    }
}

/// The position for an activity appended after `siblings`.
///
/// Normally `{prefix}{count + 1}`. When deletions or branch removals left gaps or
/// higher suffixes behind, the index moves past the highest suffix under `prefix`.
/// Siblings created before a reorder or a branch removal carry an older prefix, and a
/// position under the current prefix may sort ahead of them; the new activity then
/// continues the last sibling's numbering instead, so it always sorts last.
fn appended_position(
    prefix: &str,
    siblings: &[&StructuralPosition],
    make: impl Fn(usize) -> StructuralPosition,
) -> StructuralPosition {
    let highest_suffix = siblings
        .iter()
        .filter_map(|p| p.as_str().strip_prefix(prefix)?.parse::<usize>().ok())
        .max()
        .unwrap_or(0);
    let candidate = make(siblings.len().max(highest_suffix) + 1);

    match siblings.iter().max() {
        Some(&last) if candidate <= *last => last
            .successor()
            .filter(|next| next > last)
            .unwrap_or(candidate),
        _ => candidate,
    }
}
