//! Everything needed to edit a procedure in one import.
//!
//! Brings in the activity model, the editor with its placements and patches, the
//! order resolver and numbering passes, the lock state, the collaborator views (tree,
//! narrative, integrity report), document loading and the error types. A `Result`
//! alias with a boxed error is included for quick scripts and examples.
//!
//! # Example
//!
//! ```rust,no_run
//! use flujo::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let document = ProcedureDocument::from_file("path/to/procedure.json")?;
//! let editor = FlowEditor::new();
//!
//! let edit = editor.insert(&document.activities, Placement::TopLevel)?;
//! let tree = build_tree(&edit.activities);
//! println!("{}", DisplayTree::new(&tree));
//! # Ok(())
//! # }
//! ```

// Activity model
pub use crate::activity::{
    Activity, ActivityId, Branch, BranchId, BranchKey, BranchTag, Continuation,
    StructuralPosition,
};

// Ordering and numbering
pub use crate::numbering::{renumber, suggest_next_ref};
pub use crate::order::{resolve, resolve_order};

// Editing
pub use crate::config::EditorConfig;
pub use crate::editor::{
    ActivityPatch, Edit, EditStatus, FlowEditor, NoOpReason, Placement, SequentialIds,
};
pub use crate::lock::LockState;

// Collaborator views
pub use crate::document::{IntoActivities, ProcedureDocument};
pub use crate::narrative::{NarrativeRow, NextStep, linearize};
pub use crate::tree::{DisplayTree, FlowTree, build_tree};
pub use crate::validate::{FlowIssue, Severity, validate};

// Error types
pub use crate::error::{ConversionError, DocumentError, FlowError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
