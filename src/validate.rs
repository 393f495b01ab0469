//! Integrity checks over a collection.
//!
//! The editor keeps collections consistent on its own; these checks are for data that
//! arrives from elsewhere (a loaded document, a converted legacy format) and for the
//! caller-side guards the editor deliberately does not enforce.

use crate::activity::{Activity, ActivityId, BranchKey, Continuation};
use crate::order::{self, ActivityIndex};
use ahash::{AHashMap, AHashSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

/// A problem found in a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowIssue {
    /// Two or more records share an id.
    DuplicateId(ActivityId),
    /// `parent_id` names an activity that is not in the collection.
    MissingParent {
        activity_id: ActivityId,
        parent_id: ActivityId,
    },
    /// The parent exists but does not offer this branch.
    MalformedBranchKey {
        activity_id: ActivityId,
        branch: Option<BranchKey>,
    },
    /// Following `parent_id` from this activity comes back to it.
    ParentCycle(ActivityId),
    /// More than one activity ends the procedure.
    MultipleTerminals(Vec<ActivityId>),
    /// An alternatives activity with no branches at all.
    EmptyAlternatives(ActivityId),
    /// A next reference that is not the display position of any activity.
    DanglingNextRef {
        activity_id: ActivityId,
        next_ref: String,
    },
    /// Display positions are not exactly `1..=N` in procedural order.
    NonContiguousDisplay,
}

impl FlowIssue {
    pub fn severity(&self) -> Severity {
        match self {
            FlowIssue::MultipleTerminals(_)
            | FlowIssue::DanglingNextRef { .. }
            | FlowIssue::NonContiguousDisplay => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for FlowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowIssue::DuplicateId(id) => write!(f, "Activity id '{}' is used more than once", id),
            FlowIssue::MissingParent {
                activity_id,
                parent_id,
            } => write!(
                f,
                "Activity '{}' references missing parent '{}'",
                activity_id, parent_id
            ),
            FlowIssue::MalformedBranchKey {
                activity_id,
                branch: Some(branch),
            } => write!(
                f,
                "Activity '{}' belongs to branch '{}', which its parent does not offer",
                activity_id, branch
            ),
            FlowIssue::MalformedBranchKey {
                activity_id,
                branch: None,
            } => write!(f, "Activity '{}' has a parent but no branch", activity_id),
            FlowIssue::ParentCycle(id) => write!(f, "Activity '{}' is its own ancestor", id),
            FlowIssue::MultipleTerminals(ids) => {
                write!(f, "{} activities end the procedure", ids.len())
            }
            FlowIssue::EmptyAlternatives(id) => {
                write!(f, "Activity '{}' has no alternative branches", id)
            }
            FlowIssue::DanglingNextRef {
                activity_id,
                next_ref,
            } => write!(
                f,
                "Activity '{}' continues to '{}', which is not a display position",
                activity_id, next_ref
            ),
            FlowIssue::NonContiguousDisplay => {
                write!(f, "Display positions are not contiguous; renumber the procedure")
            }
        }
    }
}

/// Runs every check over `activities`. An empty result means the collection is sound.
pub fn validate(activities: &[Activity]) -> Vec<FlowIssue> {
    let index = ActivityIndex::new(activities);
    let mut issues = Vec::new();

    check_unique_ids(activities, &mut issues);
    check_parents(&index, &mut issues);
    check_cycles(&index, &mut issues);
    check_continuations(activities, &mut issues);
    check_display(activities, &mut issues);

    issues
}

/// `true` when none of the issues is an error.
pub fn is_sound(issues: &[FlowIssue]) -> bool {
    issues.iter().all(|i| i.severity() < Severity::Error)
}

/// Whether the required content fields of an activity are filled.
pub fn is_complete(activity: &Activity) -> bool {
    [&activity.name, &activity.responsible, &activity.description]
        .iter()
        .all(|field| !field.trim().is_empty())
}

/// Whether a new activity may be appended: the last activity in procedural order must be
/// complete. An empty procedure is always ready.
///
/// This guard belongs to the caller; [`FlowEditor::insert`](crate::editor::FlowEditor::insert)
/// does not check it.
pub fn ready_for_append(activities: &[Activity]) -> bool {
    order::resolve(activities)
        .iter()
        .last()
        .is_none_or(is_complete)
}

fn check_unique_ids(activities: &[Activity], issues: &mut Vec<FlowIssue>) {
    let mut counts: AHashMap<&ActivityId, usize> = AHashMap::new();
    for activity in activities {
        *counts.entry(&activity.id).or_default() += 1;
    }
    let mut seen = AHashSet::new();
    for activity in activities {
        if counts[&activity.id] > 1 && seen.insert(&activity.id) {
            issues.push(FlowIssue::DuplicateId(activity.id.clone()));
        }
    }
}

fn check_parents(index: &ActivityIndex<'_>, issues: &mut Vec<FlowIssue>) {
    for activity in index.activities() {
        let Some(parent_id) = &activity.parent_id else {
            continue;
        };
        match index.get(parent_id) {
            None => issues.push(FlowIssue::MissingParent {
                activity_id: activity.id.clone(),
                parent_id: parent_id.clone(),
            }),
            Some(parent) => {
                let offered = activity
                    .parent_branch
                    .as_ref()
                    .is_some_and(|key| parent.continuation.offers(key));
                if !offered {
                    issues.push(FlowIssue::MalformedBranchKey {
                        activity_id: activity.id.clone(),
                        branch: activity.parent_branch.clone(),
                    });
                }
            }
        }
    }
}

fn check_cycles(index: &ActivityIndex<'_>, issues: &mut Vec<FlowIssue>) {
    for activity in index.activities() {
        let mut seen = AHashSet::new();
        let mut current = activity;
        while let Some(parent_id) = &current.parent_id {
            if parent_id == &activity.id {
                issues.push(FlowIssue::ParentCycle(activity.id.clone()));
                break;
            }
            if !seen.insert(parent_id) {
                // A cycle further up that does not include this activity.
                break;
            }
            match index.get(parent_id) {
                Some(parent) => current = parent,
                None => break,
            }
        }
    }
}

fn check_continuations(activities: &[Activity], issues: &mut Vec<FlowIssue>) {
    let terminals: Vec<ActivityId> = activities
        .iter()
        .filter(|a| a.is_terminal())
        .map(|a| a.id.clone())
        .collect();
    if terminals.len() > 1 {
        issues.push(FlowIssue::MultipleTerminals(terminals));
    }

    let display_positions: AHashSet<&str> = activities
        .iter()
        .map(|a| a.display_position.trim())
        .collect();

    for activity in activities {
        match &activity.continuation {
            Continuation::Alternatives { branches } if branches.is_empty() => {
                issues.push(FlowIssue::EmptyAlternatives(activity.id.clone()));
            }
            Continuation::Individual { next_ref }
                if !next_ref.trim().is_empty()
                    && !display_positions.contains(next_ref.trim()) =>
            {
                issues.push(FlowIssue::DanglingNextRef {
                    activity_id: activity.id.clone(),
                    next_ref: next_ref.clone(),
                });
            }
            _ => {}
        }
    }
}

fn check_display(activities: &[Activity], issues: &mut Vec<FlowIssue>) {
    let contiguous = order::resolve(activities)
        .iter()
        .enumerate()
        .all(|(rank, activity)| activity.display_number() == Some(rank + 1));
    if !contiguous {
        issues.push(FlowIssue::NonContiguousDisplay);
    }
}
