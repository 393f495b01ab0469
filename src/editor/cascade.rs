use crate::activity::ActivityId;
use crate::order::ActivityIndex;
use ahash::AHashSet;
use std::collections::VecDeque;

/// Breadth-first collection of `roots` and every activity below them, following
/// `parent_id` links regardless of branch. Ids come back in visiting order, each once.
pub(super) fn collect_subtree<'a>(
    index: &ActivityIndex<'a>,
    roots: impl IntoIterator<Item = &'a ActivityId>,
) -> Vec<ActivityId> {
    let mut seen: AHashSet<&ActivityId> = AHashSet::new();
    let mut queue: VecDeque<&ActivityId> = roots.into_iter().collect();
    let mut collected = Vec::new();

    while let Some(id) = queue.pop_front() {
        if !seen.insert(id) {
            continue;
        }
        collected.push(id.clone());
        queue.extend(index.children_of(id).iter().map(|&slot| &index.at(slot).id));
    }

    collected
}
