use crate::activity::{Activity, ActivityId, Continuation};
use crate::error::FlowError;

/// Whether a procedure may still be edited. Derived from the collection, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockState {
    Open,
    /// At least one activity ends the procedure.
    Locked { terminal_ids: Vec<ActivityId> },
}

impl LockState {
    /// Evaluates the lock state of `activities`: locked as soon as any activity is terminal.
    pub fn of(activities: &[Activity]) -> Self {
        let terminal_ids: Vec<ActivityId> = activities
            .iter()
            .filter(|a| a.is_terminal())
            .map(|a| a.id.clone())
            .collect();

        if terminal_ids.is_empty() {
            LockState::Open
        } else {
            if terminal_ids.len() > 1 {
                tracing::warn!(
                    count = terminal_ids.len(),
                    "More than one activity ends the procedure"
                );
            }
            LockState::Locked { terminal_ids }
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, LockState::Locked { .. })
    }
}

/// Fails with [`FlowError::Locked`] if any activity is terminal.
pub fn ensure_open(activities: &[Activity]) -> Result<(), FlowError> {
    match LockState::of(activities) {
        LockState::Open => Ok(()),
        LockState::Locked { terminal_ids } => {
            tracing::warn!(
                terminals = terminal_ids.len(),
                "Rejected an edit on a locked procedure"
            );
            Err(FlowError::Locked { terminal_ids })
        }
    }
}

/// Reopens the procedure: every terminal activity becomes `Individual` with an empty
/// next reference. Returns the new collection and the ids that were reopened.
///
/// This is the only transition out of [`LockState::Locked`]. The result is not
/// renumbered; the editor's `unlock` does that.
pub fn reopen(activities: &[Activity]) -> (Vec<Activity>, Vec<ActivityId>) {
    let mut reopened = Vec::new();
    let activities = activities
        .iter()
        .map(|activity| {
            if activity.is_terminal() {
                reopened.push(activity.id.clone());
                Activity {
                    continuation: Continuation::default(),
                    ..activity.clone()
                }
            } else {
                activity.clone()
            }
        })
        .collect();
    (activities, reopened)
}
