//! Linear narrative of a procedure, one row per activity in execution order, for
//! document exporters.

use crate::activity::{Activity, Continuation};
use crate::order::{self, ActivityIndex};
use serde::Serialize;
use std::fmt;

/// Where a reader goes after finishing a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NextStep {
    /// Continue with the activity at this display position.
    Goto(String),
    /// An `Individual` activity whose next reference is not set.
    Unspecified,
    /// A decision or alternatives split.
    Branches(Vec<BranchTarget>),
    /// The procedure ends.
    End,
}

/// One outgoing branch of a row and the first activity inside it, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchTarget {
    pub label: String,
    /// Display position of the first activity in the branch.
    pub target: Option<String>,
}

impl fmt::Display for NextStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NextStep::Goto(target) => write!(f, "→ {}", target),
            NextStep::Unspecified => write!(f, "→ ?"),
            NextStep::Branches(targets) => {
                for (i, branch) in targets.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    match &branch.target {
                        Some(target) => write!(f, "{} → {}", branch.label, target)?,
                        None => write!(f, "{} → (empty)", branch.label)?,
                    }
                }
                Ok(())
            }
            NextStep::End => write!(f, "End"),
        }
    }
}

/// One activity as it appears in an exported document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeRow {
    pub display_position: String,
    pub structural_position: String,
    pub name: String,
    pub responsible: String,
    pub description: String,
    pub next: NextStep,
}

/// Linearizes `activities` in procedural order.
pub fn linearize(activities: &[Activity]) -> Vec<NarrativeRow> {
    let index = ActivityIndex::new(activities);
    order::resolve(activities)
        .iter()
        .map(|activity| NarrativeRow {
            display_position: activity.display_position.clone(),
            structural_position: activity.structural_position.to_string(),
            name: activity.name.clone(),
            responsible: activity.responsible.clone(),
            description: activity.description.clone(),
            next: next_step(&index, activity),
        })
        .collect()
}

fn next_step(index: &ActivityIndex<'_>, activity: &Activity) -> NextStep {
    match &activity.continuation {
        Continuation::Individual { next_ref } if next_ref.trim().is_empty() => {
            NextStep::Unspecified
        }
        Continuation::Individual { next_ref } => NextStep::Goto(next_ref.trim().to_string()),
        Continuation::Terminal => NextStep::End,
        continuation @ (Continuation::Decision { .. } | Continuation::Alternatives { .. }) => {
            let targets = continuation
                .branch_keys()
                .into_iter()
                .map(|key| BranchTarget {
                    label: continuation.label_for(&key).unwrap_or_default().to_string(),
                    target: index
                        .branch_children(&activity.id, &key)
                        .next()
                        .map(|slot| index.at(slot).display_position.clone()),
                })
                .collect();
            NextStep::Branches(targets)
        }
    }
}
