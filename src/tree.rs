//! Nested view of a flat collection, for UIs that render the procedure as a tree.

use crate::activity::{Activity, ActivityId, BranchKey};
use crate::order::{self, ActivityIndex};
use ahash::AHashSet;
use std::fmt;

/// One activity with the contents of its branches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowNode {
    pub activity: Activity,
    /// One entry per branch the activity offers, in procedural order. Empty for
    /// `Individual` and `Terminal` activities.
    pub branches: Vec<BranchNode>,
}

/// The activities inside one branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchNode {
    pub key: BranchKey,
    pub label: String,
    pub children: Vec<FlowNode>,
}

/// The whole procedure as a forest, plus anything that could not be placed in it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlowTree {
    pub roots: Vec<FlowNode>,
    /// Activities not reachable from any root, in structural order.
    pub orphans: Vec<Activity>,
}

impl FlowTree {
    /// Total number of activities in the tree, orphans included.
    pub fn len(&self) -> usize {
        fn count(node: &FlowNode) -> usize {
            1 + node
                .branches
                .iter()
                .flat_map(|b| &b.children)
                .map(count)
                .sum::<usize>()
        }
        self.roots.iter().map(count).sum::<usize>() + self.orphans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty() && self.orphans.is_empty()
    }
}

/// Regroups `activities` into a tree using `parent_id`/`parent_branch`.
pub fn build_tree(activities: &[Activity]) -> FlowTree {
    let index = ActivityIndex::new(activities);
    let mut visited = AHashSet::with_capacity(activities.len());
    let roots = index
        .roots()
        .iter()
        .filter_map(|&slot| build_node(&index, slot, &mut visited))
        .collect();
    let orphans = order::resolve(activities).orphans().cloned().collect();
    FlowTree { roots, orphans }
}

fn build_node<'a>(
    index: &ActivityIndex<'a>,
    slot: usize,
    visited: &mut AHashSet<&'a ActivityId>,
) -> Option<FlowNode> {
    let activity = index.at(slot);
    if !visited.insert(&activity.id) {
        return None;
    }

    let branches = activity
        .continuation
        .branch_keys()
        .into_iter()
        .map(|key| {
            let slots: Vec<usize> = index.branch_children(&activity.id, &key).collect();
            let children = slots
                .into_iter()
                .filter_map(|child| build_node(index, child, visited))
                .collect();
            let label = activity
                .continuation
                .label_for(&key)
                .unwrap_or_default()
                .to_string();
            BranchNode {
                key,
                label,
                children,
            }
        })
        .collect();

    Some(FlowNode {
        activity: activity.clone(),
        branches,
    })
}

/// Renders a [`FlowTree`] with box-drawing guides, one line per activity:
///
/// ```text
/// ├── 1. [1] Receive request
/// ├── 2. [2] Review request
/// │   ├── Aprobado
/// │   │   └── 3. [2.S1] Archive
/// │   └── Rechazado
/// └── 4. [3] Notify
/// ```
pub struct DisplayTree<'a> {
    pub tree: &'a FlowTree,
}

impl<'a> fmt::Display for DisplayTree<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.tree.roots.len();
        for (i, node) in self.tree.roots.iter().enumerate() {
            self.fmt_node(node, f, "", i + 1 == total)?;
        }
        if !self.tree.orphans.is_empty() {
            writeln!(f, "Unreachable:")?;
            let total = self.tree.orphans.len();
            for (i, activity) in self.tree.orphans.iter().enumerate() {
                let marker = if i + 1 == total { "└── " } else { "├── " };
                writeln!(f, "{}{}", marker, Self::line(activity))?;
            }
        }
        Ok(())
    }
}

impl<'a> DisplayTree<'a> {
    pub fn new(tree: &'a FlowTree) -> Self {
        Self { tree }
    }

    fn fmt_node(
        &self,
        node: &FlowNode,
        f: &mut fmt::Formatter<'_>,
        prefix: &str,
        is_last: bool,
    ) -> fmt::Result {
        let marker = if is_last { "└── " } else { "├── " };
        writeln!(f, "{}{}{}", prefix, marker, Self::line(&node.activity))?;

        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
        let total = node.branches.len();
        for (i, branch) in node.branches.iter().enumerate() {
            let last_branch = i + 1 == total;
            let branch_marker = if last_branch { "└── " } else { "├── " };
            let label = if branch.label.is_empty() {
                branch.key.to_string()
            } else {
                branch.label.clone()
            };
            writeln!(f, "{}{}{}", child_prefix, branch_marker, label)?;

            let branch_prefix = format!(
                "{}{}",
                child_prefix,
                if last_branch { "    " } else { "│   " }
            );
            let count = branch.children.len();
            for (j, child) in branch.children.iter().enumerate() {
                self.fmt_node(child, f, &branch_prefix, j + 1 == count)?;
            }
        }
        Ok(())
    }

    fn line(activity: &Activity) -> String {
        let name = if activity.name.trim().is_empty() {
            "(unnamed)"
        } else {
            activity.name.as_str()
        };
        format!(
            "{}. [{}] {}",
            activity.display_position, activity.structural_position, name
        )
    }
}
