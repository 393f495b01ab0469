//! Procedural order: the depth-first, branch-aware sequence in which a procedure's
//! activities are actually performed.
//!
//! Array order in a collection is insertion order and means nothing to a reader of the
//! procedure. Anything that linearizes a procedure (numbering, export, tree views) goes
//! through [`resolve`] instead.

use crate::activity::{Activity, ActivityId};
use ahash::AHashSet;
use itertools::Itertools;

mod index;

pub use index::ActivityIndex;
pub(crate) use index::compare_slots;

/// The outcome of resolving a collection into procedural order.
pub struct Resolution<'a> {
    activities: &'a [Activity],
    order: Vec<usize>,
    orphan_count: usize,
}

impl<'a> Resolution<'a> {
    /// Slots into the resolved collection, in procedural order.
    pub fn slots(&self) -> &[usize] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Activity> + '_ {
        self.order.iter().map(|&slot| &self.activities[slot])
    }

    /// Activities that were reachable from a top-level root.
    pub fn reachable(&self) -> impl Iterator<Item = &'a Activity> + '_ {
        self.iter().take(self.order.len() - self.orphan_count)
    }

    /// Activities appended at the end because no root reaches them: a missing parent,
    /// a branch key the parent no longer offers, a parent cycle, or a duplicate id.
    pub fn orphans(&self) -> impl Iterator<Item = &'a Activity> + '_ {
        self.iter().skip(self.order.len() - self.orphan_count)
    }

    pub fn has_orphans(&self) -> bool {
        self.orphan_count > 0
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

struct Walker<'i, 'a> {
    index: &'i ActivityIndex<'a>,
    visited: AHashSet<&'a ActivityId>,
    emitted: Vec<bool>,
    order: Vec<usize>,
}

impl<'i, 'a> Walker<'i, 'a> {
    fn visit(&mut self, slot: usize) {
        let activity = self.index.at(slot);
        if !self.visited.insert(&activity.id) {
            return;
        }
        self.emitted[slot] = true;
        self.order.push(slot);

        let index = self.index;
        for key in activity.continuation.branch_keys() {
            let children: Vec<usize> = index.branch_children(&activity.id, &key).collect();
            for child in children {
                self.visit(child);
            }
        }
    }
}

/// Resolves `activities` into procedural order without touching them.
///
/// Roots are taken in structural order; each activity is followed by the contents of
/// its branches (a decision's "yes" side before its "no" side, alternatives in declared
/// order), depth-first. Anything not reached is appended in structural order, so no
/// activity is ever dropped.
pub fn resolve(activities: &[Activity]) -> Resolution<'_> {
    let index = ActivityIndex::new(activities);
    let mut walker = Walker {
        index: &index,
        visited: AHashSet::with_capacity(activities.len()),
        emitted: vec![false; activities.len()],
        order: Vec::with_capacity(activities.len()),
    };

    for &root in index.roots() {
        walker.visit(root);
    }

    let orphans: Vec<usize> = (0..activities.len())
        .filter(|&slot| !walker.emitted[slot])
        .sorted_by(|&a, &b| compare_slots(activities, a, b))
        .collect();

    if !orphans.is_empty() {
        tracing::warn!(
            count = orphans.len(),
            ids = %orphans.iter().map(|&slot| &activities[slot].id).join(", "),
            "Activities unreachable from any top-level activity were appended at the end"
        );
    }

    let orphan_count = orphans.len();
    let mut order = walker.order;
    order.extend(orphans);

    Resolution {
        activities,
        order,
        orphan_count,
    }
}

/// Returns the activities in procedural order as a new collection.
pub fn resolve_order(activities: &[Activity]) -> Vec<Activity> {
    resolve(activities).iter().cloned().collect()
}
