//! Property tests: random edit sequences must keep every collection consistent.
mod common;
use common::*;
use flujo::prelude::*;
use flujo::validate::is_sound;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    InsertTop,
    InsertChild { target: usize, branch: usize },
    Delete { target: usize },
    Reorder { from: usize, to: usize },
    MakeDecision { target: usize },
    MakeAlternatives { target: usize, count: usize },
    AddBranch { target: usize },
    RemoveBranch { target: usize, branch: usize },
    Describe { target: usize, text: String },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::InsertTop),
        4 => (0..50usize, 0..4usize).prop_map(|(target, branch)| Op::InsertChild { target, branch }),
        1 => (0..50usize).prop_map(|target| Op::Delete { target }),
        1 => (0..10usize, 0..10usize).prop_map(|(from, to)| Op::Reorder { from, to }),
        2 => (0..50usize).prop_map(|target| Op::MakeDecision { target }),
        2 => (0..50usize, 0..4usize).prop_map(|(target, count)| Op::MakeAlternatives { target, count }),
        1 => (0..50usize).prop_map(|target| Op::AddBranch { target }),
        1 => (0..50usize, 0..4usize).prop_map(|(target, branch)| Op::RemoveBranch { target, branch }),
        2 => (0..50usize, "[a-z ]{0,12}").prop_map(|(target, text)| Op::Describe { target, text }),
    ]
}

fn pick(activities: &[Activity], target: usize) -> Option<&Activity> {
    if activities.is_empty() {
        None
    } else {
        activities.get(target % activities.len())
    }
}

fn has_children(activities: &[Activity], id: &ActivityId) -> bool {
    activities.iter().any(|a| a.parent_id.as_ref() == Some(id))
}

/// Applies `op`, skipping continuation changes that would strand existing children.
fn apply(editor: &FlowEditor, activities: &[Activity], op: &Op) -> Option<Edit> {
    let result = match op {
        Op::InsertTop => editor.insert(activities, Placement::TopLevel),
        Op::InsertChild { target, branch } => {
            let parent = pick(activities, *target)?;
            let keys = parent.continuation.branch_keys();
            let key = keys.get(branch % keys.len().max(1))?.clone();
            editor.insert(activities, Placement::under(parent.id.clone(), key))
        }
        Op::Delete { target } => editor.delete(activities, &pick(activities, *target)?.id),
        Op::Reorder { from, to } => editor.reorder(activities, *from, *to),
        Op::MakeDecision { target } => {
            let activity = pick(activities, *target)?;
            if has_children(activities, &activity.id) {
                return None;
            }
            let patch = ActivityPatch::new().continuation(editor.decision());
            editor.update(activities, &activity.id, patch)
        }
        Op::MakeAlternatives { target, count } => {
            let activity = pick(activities, *target)?;
            if has_children(activities, &activity.id) {
                return None;
            }
            let patch = ActivityPatch::new().continuation(editor.alternatives(*count));
            editor.update(activities, &activity.id, patch)
        }
        Op::AddBranch { target } => editor.add_branch(activities, &pick(activities, *target)?.id),
        Op::RemoveBranch { target, branch } => {
            let activity = pick(activities, *target)?;
            let Continuation::Alternatives { branches } = &activity.continuation else {
                return None;
            };
            let branch_id = &branches.get(branch % branches.len().max(1))?.id;
            editor.remove_branch(activities, &activity.id, branch_id)
        }
        Op::Describe { target, text } => {
            let patch = ActivityPatch::new()
                .name(text.as_str())
                .responsible(text.as_str())
                .description(text.as_str());
            editor.update(activities, &pick(activities, *target)?.id, patch)
        }
    };
    Some(result.expect("nothing in these sequences locks the procedure"))
}

/// `(id, structural, display)` for every activity, in array order.
fn positions(activities: &[Activity]) -> Vec<(String, String, String)> {
    activities
        .iter()
        .map(|a| {
            (
                a.id.to_string(),
                a.structural_position.to_string(),
                a.display_position.clone(),
            )
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_edits_keep_the_collection_consistent(ops in proptest::collection::vec(op(), 1..40)) {
        let editor = editor();
        let mut activities: Vec<Activity> = Vec::new();

        for op in &ops {
            let Some(edit) = apply(&editor, &activities, op) else {
                continue;
            };
            if !edit.is_applied() {
                prop_assert_eq!(&edit.activities, &activities);
            }
            if let Op::Describe { .. } = op {
                // Content edits never move anything.
                prop_assert_eq!(positions(&edit.activities), positions(&activities));
                prop_assert_eq!(
                    resolve(&edit.activities).slots().to_vec(),
                    resolve(&activities).slots().to_vec()
                );
            }
            if let Some(created) = &edit.created {
                // Inserts append: everything that existed keeps its relative order.
                let before = ordered_ids(&activities);
                let mut after = ordered_ids(&edit.activities);
                after.retain(|id| id != created.as_str());
                prop_assert_eq!(after, before, "insert reordered existing activities");
            }
            activities = edit.into_activities();

            // Display positions are exactly 1..=N in procedural order.
            let ordered = resolve_order(&activities);
            prop_assert_eq!(ordered.len(), activities.len());
            for (rank, activity) in ordered.iter().enumerate() {
                prop_assert_eq!(activity.display_number(), Some(rank + 1));
            }

            // No dangling parents, duplicate ids, or missing branches.
            let issues = validate(&activities);
            prop_assert!(is_sound(&issues), "unsound after {:?}: {:?}", op, issues);

            // Every alternatives activity keeps at least one branch.
            for activity in &activities {
                if let Continuation::Alternatives { branches } = &activity.continuation {
                    prop_assert!(!branches.is_empty());
                }
            }

            prop_assert_eq!(renumber(&activities), activities.clone());
        }
    }

    #[test]
    fn prop_resolver_never_drops_an_activity(
        shape in proptest::collection::vec((0..12usize, any::<bool>(), 1..20usize), 0..12)
    ) {
        // Parents may point at later records, at themselves, or past the end.
        let activities: Vec<Activity> = shape
            .iter()
            .enumerate()
            .map(|(i, &(parent, yes, position))| {
                let id = format!("n{}", i);
                let record = decision(&id, &position.to_string());
                if parent >= shape.len() {
                    record
                } else {
                    let branch = if yes { BranchKey::Yes } else { BranchKey::No };
                    record.in_branch(format!("n{}", parent), branch)
                }
            })
            .collect();

        let mut slots = resolve(&activities).slots().to_vec();
        slots.sort_unstable();
        prop_assert_eq!(slots, (0..activities.len()).collect::<Vec<_>>());
    }
}
