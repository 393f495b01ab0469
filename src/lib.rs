//! # Flujo - Procedural Activity Flow Model
//!
//! **Flujo** edits and documents a procedure as a branching sequence of steps
//! ("activities"). Each activity either continues to one next step, splits into a yes/no
//! decision, splits into N labeled alternatives, or ends the procedure.
//!
//! The model works on a flat collection of [`Activity`](activity::Activity) records.
//! Tree relations live in `parent_id`/`parent_branch` and are derived on demand, never
//! held as live references. Every operation is a pure function from one collection to
//! a new one; the crate stores nothing between calls.
//!
//! ## Core Workflow
//!
//! 1.  **Load**: obtain a `Vec<Activity>` from your persistence layer, a
//!     [`ProcedureDocument`](document::ProcedureDocument), or any type implementing
//!     [`IntoActivities`](document::IntoActivities).
//! 2.  **Edit**: apply commands through a [`FlowEditor`](editor::FlowEditor). Each call
//!     returns an [`Edit`](editor::Edit) holding the new, renumbered collection, or
//!     [`FlowError::Locked`](error::FlowError::Locked) once the procedure has an end.
//! 3.  **Consume**: resolve the procedural order ([`order::resolve_order`]), render a
//!     nested view ([`tree::build_tree`]) or a linear narrative
//!     ([`narrative::linearize`]).
//!
//! ## Numbering
//!
//! Every activity carries two numbers:
//! * a *structural position* (`"3"`, `"3.S1"`, `"4.A21"`) encoding where it was created
//!   in the tree. Assigned once and never compacted.
//! * a *display position* (`"1"`..`"N"`), its rank in procedural order. Recomputed after
//!   every structural change.
//!
//! ## Quick Start
//!
//! ```rust
//! use flujo::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let editor = FlowEditor::builder()
//!         .with_labels("Aprobado", "Rechazado")
//!         .with_sequential_ids()
//!         .build();
//!
//!     // Three top-level steps.
//!     let mut activities: Vec<Activity> = Vec::new();
//!     for _ in 0..3 {
//!         activities = editor.insert(&activities, Placement::TopLevel)?.into_activities();
//!     }
//!
//!     // The third one becomes a decision.
//!     let review = activities[2].id.clone();
//!     let patch = ActivityPatch::new().name("Review").continuation(editor.decision());
//!     activities = editor.update(&activities, &review, patch)?.into_activities();
//!
//!     // A step inside the "yes" branch.
//!     let edit = editor.insert(&activities, Placement::under(review, BranchKey::Yes))?;
//!     let child = edit.created.clone().unwrap();
//!     let activities = edit.into_activities();
//!
//!     let created = activities.iter().find(|a| a.id == child).unwrap();
//!     assert_eq!(created.structural_position.as_str(), "3.S1");
//!     assert_eq!(created.display_position, "4");
//!
//!     for row in linearize(&activities) {
//!         println!("{} {} {}", row.display_position, row.name, row.next);
//!     }
//!     Ok(())
//! }
//! ```

pub mod activity;
pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod lock;
pub mod narrative;
pub mod numbering;
pub mod order;
pub mod prelude;
pub mod tree;
pub mod validate;
