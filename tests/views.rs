//! Tests for the collaborator views: nested tree and linear narrative.
mod common;
use common::*;
use flujo::narrative::BranchTarget;
use flujo::prelude::*;

#[test]
fn test_build_tree_groups_children_under_branches() {
    let editor = editor();
    let activities = scenario_with_child(&editor);

    let tree = build_tree(&activities);
    assert_eq!(tree.roots.len(), 3);
    assert_eq!(tree.len(), 4);
    assert!(tree.orphans.is_empty());

    let decision = &tree.roots[2];
    assert_eq!(decision.activity.id.as_str(), "act-3");
    assert_eq!(decision.branches.len(), 2);
    assert_eq!(decision.branches[0].key, BranchKey::Yes);
    assert_eq!(decision.branches[0].label, "Aprobado");
    assert_eq!(decision.branches[0].children.len(), 1);
    assert_eq!(decision.branches[1].label, "Rechazado");
    assert!(decision.branches[1].children.is_empty());
    assert!(tree.roots[0].branches.is_empty());
}

#[test]
fn test_display_tree() {
    let editor = editor();
    let activities = scenario_with_child(&editor);

    let tree = build_tree(&activities);
    let rendered = DisplayTree::new(&tree).to_string();
    let expected = "\
├── 1. [1] A
├── 2. [2] B
└── 3. [3] C
    ├── Aprobado
    │   └── 4. [3.S1] (unnamed)
    └── Rechazado
";
    assert_eq!(rendered, expected);
}

#[test]
fn test_display_tree_lists_unreachable_activities() {
    let activities = renumber(&[
        top("a", "1"),
        child("lost", "7.S1", "gone", BranchKey::Yes),
    ]);

    let tree = build_tree(&activities);
    assert_eq!(tree.orphans.len(), 1);
    let rendered = DisplayTree::new(&tree).to_string();
    assert_eq!(rendered, "└── 1. [1] a\nUnreachable:\n└── 2. [7.S1] lost\n");
}

#[test]
fn test_empty_tree() {
    let tree = build_tree(&[]);
    assert!(tree.is_empty());
    assert_eq!(DisplayTree::new(&tree).to_string(), "");
}

#[test]
fn test_linearize_follows_procedural_order() {
    let editor = editor();
    let activities = scenario_with_child(&editor);

    let rows = linearize(&activities);
    let positions: Vec<&str> = rows.iter().map(|r| r.display_position.as_str()).collect();
    assert_eq!(positions, vec!["1", "2", "3", "4"]);

    assert_eq!(rows[0].name, "A");
    assert_eq!(rows[0].next, NextStep::Goto("2".to_string()));
    assert_eq!(
        rows[2].next,
        NextStep::Branches(vec![
            BranchTarget {
                label: "Aprobado".to_string(),
                target: Some("4".to_string()),
            },
            BranchTarget {
                label: "Rechazado".to_string(),
                target: None,
            },
        ])
    );
    assert_eq!(rows[3].structural_position, "3.S1");
}

#[test]
fn test_next_step_display() {
    assert_eq!(NextStep::Goto("5".to_string()).to_string(), "→ 5");
    assert_eq!(NextStep::Unspecified.to_string(), "→ ?");
    assert_eq!(NextStep::End.to_string(), "End");

    let branches = NextStep::Branches(vec![
        BranchTarget {
            label: "Aprobado".to_string(),
            target: Some("4".to_string()),
        },
        BranchTarget {
            label: "Rechazado".to_string(),
            target: None,
        },
    ]);
    assert_eq!(branches.to_string(), "Aprobado → 4; Rechazado → (empty)");
}

#[test]
fn test_linearize_marks_terminal_and_unset_steps() {
    let activities = renumber(&[
        top("a", "1"),
        top("b", "2").with_continuation(Continuation::Terminal),
    ]);

    let rows = linearize(&activities);
    assert_eq!(rows[0].next, NextStep::Unspecified);
    assert_eq!(rows[1].next, NextStep::End);
}

#[test]
fn test_narrative_serializes_to_json() {
    let activities = renumber(&[top("a", "1").with_responsible("Compras")]);

    let json = serde_json::to_value(linearize(&activities)).unwrap();
    assert_eq!(json[0]["displayPosition"], "1");
    assert_eq!(json[0]["responsible"], "Compras");
    assert_eq!(json[0]["next"], "unspecified");
}
