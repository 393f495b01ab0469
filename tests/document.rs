//! Tests for procedure documents, config loading and legacy conversion.
mod common;
use common::*;
use flujo::document::{LegacyActivity, LegacyProcedure};
use flujo::prelude::*;
use std::fs;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("flujo-{}-{}", std::process::id(), name))
}

#[test]
fn test_document_from_json_renumbers() {
    let document = ProcedureDocument::from_json(PROCEDURE_JSON).unwrap();

    assert_eq!(document.title, "Solicitud de compra");
    assert_eq!(find(&document.activities, "receive").display_position, "1");
    assert_eq!(find(&document.activities, "review").display_position, "2");
    assert_eq!(find(&document.activities, "archive").display_position, "3");

    let ordered: Vec<String> = document
        .ordered()
        .into_iter()
        .map(|a| a.id.to_string())
        .collect();
    assert_eq!(ordered, vec!["receive", "review", "archive"]);
    assert!(LockState::of(&document.activities).is_locked());
}

#[test]
fn test_document_json_shape() {
    let editor = editor();
    let document = ProcedureDocument::new("Compras", scenario_with_child(&editor));

    let json: serde_json::Value = serde_json::from_str(&document.to_json().unwrap()).unwrap();
    let child = &json["activities"][3];
    assert_eq!(child["structuralPosition"], "3.S1");
    assert_eq!(child["parentId"], "act-3");
    assert_eq!(child["parentBranch"], "yes");
    assert_eq!(child["continuation"]["individual"]["nextRef"], "5");
    assert_eq!(
        json["activities"][2]["continuation"]["decision"]["yesLabel"],
        "Aprobado"
    );
}

#[test]
fn test_document_accepts_legacy_field_names() {
    let json = r#"{
        "activities": [
            { "id": "a", "systemNumber": "1", "userNumber": "4" },
            { "id": "b", "systemNumber": "1.S1", "parentId": "a", "parentBranchKey": "yes" }
        ]
    }"#;

    let document = ProcedureDocument::from_json(json).unwrap();
    assert!(document.title.is_empty());
    assert_eq!(find(&document.activities, "a").display_position, "1");
    assert_eq!(
        find(&document.activities, "b").parent_branch,
        Some(BranchKey::Yes)
    );
}

#[test]
fn test_document_binary_round_trip() {
    let editor = editor();
    let document = ProcedureDocument::new("Compras", scenario_with_child(&editor));

    let bytes = document.to_bytes().unwrap();
    assert_eq!(ProcedureDocument::from_bytes(&bytes).unwrap(), document);
}

#[test]
fn test_document_save_and_load() {
    let editor = editor();
    let document = ProcedureDocument::new("Compras", scenario_with_child(&editor));

    for name in ["procedure.json", "procedure.bin"] {
        let path = temp_path(name);
        let path = path.to_str().unwrap();
        document.save(path).unwrap();
        assert_eq!(ProcedureDocument::from_file(path).unwrap(), document);
        fs::remove_file(path).unwrap();
    }
}

#[test]
fn test_document_errors() {
    let missing = ProcedureDocument::from_file("/definitely/not/here.json");
    assert!(matches!(missing, Err(DocumentError::Io { .. })));

    let malformed = ProcedureDocument::from_json("{ \"activities\": 3 }");
    assert!(matches!(malformed, Err(DocumentError::Json(_))));

    let garbage = ProcedureDocument::from_bytes(&[0xff, 0xff, 0xff]);
    assert!(matches!(garbage, Err(DocumentError::Decode(_))));
}

#[test]
fn test_editor_config_from_file() {
    let path = temp_path("config.json");
    fs::write(&path, r#"{ "alternativeLabel": "Opción", "idPrefix": "paso" }"#).unwrap();

    let config = EditorConfig::from_file(path.to_str().unwrap()).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(config.alternative_label, "Opción");
    assert_eq!(config.yes_label, "Sí");
    assert_eq!(config.alternative_label_for(2), "Opción 2");

    let editor = FlowEditor::builder()
        .with_config(config)
        .with_sequential_ids()
        .build();
    let edit = editor.insert(&[], Placement::TopLevel).unwrap();
    assert_eq!(edit.created, Some(ActivityId::from("paso-1")));
}

#[test]
fn test_editor_config_rejects_bad_json() {
    assert!(EditorConfig::from_json("{ \"yesLabel\": 1 }").is_err());
    assert_eq!(EditorConfig::from_json("{}").unwrap(), EditorConfig::default());
}

#[test]
fn test_legacy_conversion() {
    let activities = LegacyProcedure::from_json(LEGACY_JSON)
        .unwrap()
        .into_activities()
        .unwrap();

    assert_eq!(
        find(&activities, "a1").continuation,
        Continuation::Individual {
            next_ref: "2".to_string()
        }
    );
    match &find(&activities, "a2").continuation {
        Continuation::Alternatives { branches } => {
            assert_eq!(branches.len(), 2);
            assert_eq!(branches[1], Branch::new("b-normal", "Normal"));
        }
        other => panic!("expected alternatives, got {:?}", other),
    }
    let queued = find(&activities, "a3");
    assert_eq!(
        queued.continuation,
        Continuation::Decision {
            yes_label: "Sí".to_string(),
            no_label: "No".to_string(),
        }
    );
    assert_eq!(
        queued.parent_branch,
        Some(BranchKey::Alternative(BranchId::from("b-normal")))
    );
    assert_eq!(queued.display_position, "3");
    assert!(validate(&activities).is_empty());
}

fn legacy(id: &str, continuation_type: &str) -> LegacyActivity {
    let json = format!(
        r#"{{ "id": "{}", "systemNumber": "1", "continuationType": "{}" }}"#,
        id, continuation_type
    );
    serde_json::from_str(&json).unwrap()
}

#[test]
fn test_legacy_conversion_errors() {
    let unknown = LegacyProcedure::new(vec![legacy("a", "loop")]).into_activities();
    assert_eq!(
        unknown.unwrap_err(),
        ConversionError::UnknownContinuation {
            activity_id: "a".to_string(),
            type_name: "loop".to_string(),
        }
    );

    let duplicate =
        LegacyProcedure::new(vec![legacy("a", "terminal"), legacy("a", "individual")])
            .into_activities();
    assert_eq!(
        duplicate.unwrap_err(),
        ConversionError::DuplicateActivity("a".to_string())
    );

    let mut detached = legacy("b", "individual");
    detached.parent_branch_key = Some("yes".to_string());
    let detached = LegacyProcedure::new(vec![detached]).into_activities();
    assert!(matches!(
        detached,
        Err(ConversionError::BranchWithoutParent { .. })
    ));
}

#[test]
fn test_legacy_empty_alternatives_get_a_placeholder() {
    let activities = LegacyProcedure::new(vec![legacy("a", "Alternatives")])
        .into_activities()
        .unwrap();

    assert_eq!(
        activities[0].continuation,
        Continuation::Alternatives {
            branches: vec![Branch::new("a-branch-1", "")]
        }
    );
}
