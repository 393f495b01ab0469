use crate::activity::{Activity, ActivityId, BranchKey};
use ahash::AHashMap;
use std::cmp::Ordering;

/// A read-only index over a flat activity collection.
///
/// Activities are addressed by their slot in the slice; parent/child relations are
/// derived from `parent_id`/`parent_branch` when the index is built and never stored
/// on the records themselves. Build a fresh index after every mutation.
pub struct ActivityIndex<'a> {
    activities: &'a [Activity],
    by_id: AHashMap<&'a ActivityId, usize>,
    by_parent: AHashMap<&'a ActivityId, Vec<usize>>,
    roots: Vec<usize>,
}

impl<'a> ActivityIndex<'a> {
    pub fn new(activities: &'a [Activity]) -> Self {
        let mut by_id: AHashMap<&ActivityId, usize> = AHashMap::with_capacity(activities.len());
        let mut by_parent: AHashMap<&ActivityId, Vec<usize>> = AHashMap::new();
        let mut roots = Vec::new();

        for (slot, activity) in activities.iter().enumerate() {
            // First record wins on duplicate ids; later copies surface as orphans.
            by_id.entry(&activity.id).or_insert(slot);
            match &activity.parent_id {
                Some(parent) => by_parent.entry(parent).or_default().push(slot),
                None => roots.push(slot),
            }
        }

        roots.sort_by(|&a, &b| compare_slots(activities, a, b));
        for children in by_parent.values_mut() {
            children.sort_by(|&a, &b| compare_slots(activities, a, b));
        }

        Self {
            activities,
            by_id,
            by_parent,
            roots,
        }
    }

    pub fn activities(&self) -> &'a [Activity] {
        self.activities
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn at(&self, slot: usize) -> &'a Activity {
        &self.activities[slot]
    }

    pub fn slot_of(&self, id: &ActivityId) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn get(&self, id: &ActivityId) -> Option<&'a Activity> {
        self.slot_of(id).map(|slot| &self.activities[slot])
    }

    pub fn contains(&self, id: &ActivityId) -> bool {
        self.by_id.contains_key(id)
    }

    /// Top-level activities, sorted by structural position.
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Every activity whose `parent_id` is `parent`, regardless of branch.
    pub fn children_of(&self, parent: &ActivityId) -> &[usize] {
        self.by_parent
            .get(parent)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Activities hanging from `branch` of `parent`, sorted by structural position.
    pub fn branch_children<'s>(
        &'s self,
        parent: &ActivityId,
        branch: &'s BranchKey,
    ) -> impl Iterator<Item = usize> + 's {
        self.children_of(parent).iter().copied().filter(move |&slot| {
            self.activities[slot].parent_branch.as_ref() == Some(branch)
        })
    }

    /// Number of activities currently hanging from `branch` of `parent`.
    pub fn branch_len(&self, parent: &ActivityId, branch: &BranchKey) -> usize {
        self.branch_children(parent, branch).count()
    }
}

/// Structural order with the id and slot as tie-breakers, so sorting is total and
/// deterministic even when positions collide.
pub(crate) fn compare_slots(activities: &[Activity], a: usize, b: usize) -> Ordering {
    let (left, right) = (&activities[a], &activities[b]);
    left.structural_position
        .cmp(&right.structural_position)
        .then_with(|| left.id.cmp(&right.id))
        .then_with(|| a.cmp(&b))
}
