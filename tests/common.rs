//! Common test utilities for building procedures.
use flujo::prelude::*;

/// An editor with deterministic ids (`act-1`, `act-2`, ...) and the decision labels
/// used throughout the tests.
#[allow(dead_code)]
pub fn editor() -> FlowEditor {
    FlowEditor::builder()
        .with_labels("Aprobado", "Rechazado")
        .with_sequential_ids()
        .build()
}

/// Applies an edit that is expected to succeed and change something.
#[allow(dead_code)]
pub fn applied(result: std::result::Result<Edit, FlowError>) -> Edit {
    let edit = result.expect("edit was rejected");
    assert_eq!(edit.status, EditStatus::Applied, "edit was a no-op");
    edit
}

/// Three top-level activities `A(1) -> B(2) -> C(3)`, where C is a decision labeled
/// "Aprobado"/"Rechazado". Ids are `act-1`, `act-2` and `act-3`.
#[allow(dead_code)]
pub fn scenario(editor: &FlowEditor) -> Vec<Activity> {
    let mut activities: Vec<Activity> = Vec::new();
    for name in ["A", "B", "C"] {
        let edit = applied(editor.insert(&activities, Placement::TopLevel));
        let id = edit.created.clone().expect("insert reports the new id");
        activities = applied(editor.update(&edit.activities, &id, ActivityPatch::new().name(name)))
            .into_activities();
    }
    let decision = ActivityPatch::new().continuation(editor.decision());
    applied(editor.update(&activities, &ActivityId::from("act-3"), decision)).into_activities()
}

/// [`scenario`] plus one activity (`act-4`) in C's "yes" branch.
#[allow(dead_code)]
pub fn scenario_with_child(editor: &FlowEditor) -> Vec<Activity> {
    let activities = scenario(editor);
    applied(editor.insert(&activities, Placement::under("act-3", BranchKey::Yes)))
        .into_activities()
}

/// Looks up an activity by id, panicking if it is missing.
#[allow(dead_code)]
pub fn find<'a>(activities: &'a [Activity], id: &str) -> &'a Activity {
    activities
        .iter()
        .find(|a| a.id.as_str() == id)
        .unwrap_or_else(|| panic!("activity '{}' not found", id))
}

/// Ids in procedural order.
#[allow(dead_code)]
pub fn ordered_ids(activities: &[Activity]) -> Vec<String> {
    resolve_order(activities)
        .into_iter()
        .map(|a| a.id.to_string())
        .collect()
}

/// Display positions in array order.
#[allow(dead_code)]
pub fn display_positions(activities: &[Activity]) -> Vec<String> {
    activities
        .iter()
        .map(|a| a.display_position.clone())
        .collect()
}

/// A hand-built top-level activity.
#[allow(dead_code)]
pub fn top(id: &str, position: &str) -> Activity {
    Activity::new(id, position).with_name(id)
}

/// A hand-built activity inside `branch` of `parent`.
#[allow(dead_code)]
pub fn child(id: &str, position: &str, parent: &str, branch: impl Into<BranchKey>) -> Activity {
    Activity::new(id, position)
        .with_name(id)
        .in_branch(parent, branch)
}

/// A decision activity with the default test labels.
#[allow(dead_code)]
pub fn decision(id: &str, position: &str) -> Activity {
    top(id, position).with_continuation(Continuation::Decision {
        yes_label: "Aprobado".to_string(),
        no_label: "Rechazado".to_string(),
    })
}

/// Procedure document JSON in the current format.
#[allow(dead_code)]
pub const PROCEDURE_JSON: &str = r#"
{
    "title": "Solicitud de compra",
    "activities": [
        {
            "id": "review",
            "structuralPosition": "2",
            "displayPosition": "7",
            "name": "Review request",
            "continuation": { "decision": { "yesLabel": "Aprobado", "noLabel": "Rechazado" } }
        },
        {
            "id": "receive",
            "structuralPosition": "1",
            "name": "Receive request",
            "continuation": { "individual": { "nextRef": "2" } }
        },
        {
            "id": "archive",
            "structuralPosition": "2.S1",
            "name": "Archive",
            "parentId": "review",
            "parentBranch": "yes",
            "continuation": "terminal"
        }
    ]
}
"#;

/// The flat export format older tools produce.
#[allow(dead_code)]
pub const LEGACY_JSON: &str = r#"
[
    {
        "id": "a1",
        "systemNumber": "1",
        "userNumber": "1",
        "name": "Receive",
        "continuationType": "individual",
        "nextActivity": "2",
        "yesLabel": "unused",
        "alternativeBranches": []
    },
    {
        "id": "a2",
        "systemNumber": "2",
        "name": "Classify",
        "continuationType": "alternatives",
        "alternativeBranches": [
            { "id": "b-urgent", "label": "Urgent" },
            { "id": "b-normal", "label": "Normal" }
        ]
    },
    {
        "id": "a3",
        "systemNumber": "2.A21",
        "name": "Queue",
        "continuationType": "decision",
        "parentId": "a2",
        "parentBranchKey": "b-normal"
    }
]
"#;
