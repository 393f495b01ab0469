//! Display numbering.
//!
//! Structural positions are assigned once, when an activity is created. Display
//! positions are the activity's rank in procedural order and are recomputed here after
//! every structural change, always contiguous from 1.

use crate::activity::{Activity, ActivityId, Continuation};
use crate::order;

/// Assigns `display_position = rank + 1` in procedural order.
///
/// The returned collection keeps the input's array order and differs from it only in
/// `display_position`. Calling it twice yields the same collection.
pub fn renumber(activities: &[Activity]) -> Vec<Activity> {
    let resolution = order::resolve(activities);
    let mut ranks = vec![String::new(); activities.len()];
    for (rank, &slot) in resolution.slots().iter().enumerate() {
        ranks[slot] = (rank + 1).to_string();
    }

    activities
        .iter()
        .zip(ranks)
        .map(|(activity, display_position)| Activity {
            display_position,
            ..activity.clone()
        })
        .collect()
}

/// The suggested next reference for an `Individual` activity whose reference is empty
/// or not a positive number: its own display position plus one.
///
/// Returns `None` when there is nothing to suggest (not `Individual`, already holding a
/// usable reference, or no numeric display position yet).
pub fn suggest_next_ref(activity: &Activity) -> Option<String> {
    let Continuation::Individual { next_ref } = &activity.continuation else {
        return None;
    };
    if is_usable_ref(next_ref) {
        return None;
    }
    activity.display_number().map(|n| (n + 1).to_string())
}

/// Renumbers, then fills the suggested next reference on the activity named `id`.
///
/// This is what an insert runs for the activity it just created. The suggestion is a
/// convenience only: the field stays freely editable afterwards.
pub fn renumber_with_suggestion(activities: &[Activity], id: &ActivityId) -> Vec<Activity> {
    let mut renumbered = renumber(activities);
    if let Some(activity) = renumbered.iter_mut().find(|a| &a.id == id) {
        if let Some(suggestion) = suggest_next_ref(activity) {
            activity.continuation = Continuation::Individual {
                next_ref: suggestion,
            };
        }
    }
    renumbered
}

fn is_usable_ref(next_ref: &str) -> bool {
    matches!(next_ref.trim().parse::<usize>(), Ok(n) if n > 0)
}
