use crate::activity::{Activity, Continuation};

/// A field-level update for one activity. `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityPatch {
    pub name: Option<String>,
    pub responsible: Option<String>,
    pub description: Option<String>,
    pub continuation: Option<Continuation>,
}

impl ActivityPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn responsible(mut self, responsible: impl Into<String>) -> Self {
        self.responsible = Some(responsible.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn continuation(mut self, continuation: Continuation) -> Self {
        self.continuation = Some(continuation);
        self
    }

    pub(super) fn apply_to(self, activity: &Activity) -> Activity {
        let mut updated = activity.clone();
        if let Some(name) = self.name {
            updated.name = name;
        }
        if let Some(responsible) = self.responsible {
            updated.responsible = responsible;
        }
        if let Some(description) = self.description {
            updated.description = description;
        }
        if let Some(continuation) = self.continuation {
            updated.continuation = continuation;
        }
        updated
    }
}
