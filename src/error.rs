use crate::activity::ActivityId;
use itertools::Itertools;
use thiserror::Error;

/// Errors that reject a mutation outright.
///
/// A rejection is different from a no-op: stale ids or unknown branches come back as
/// `Ok(Edit)` with an unchanged collection, while a rejection means the edit was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error(
        "The procedure is locked by terminal activity {}; unlock it before editing",
        join_ids(.terminal_ids)
    )]
    Locked { terminal_ids: Vec<ActivityId> },
}

/// Errors that can occur when converting a custom or legacy format into activities.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Activity '{activity_id}' has an unknown continuation type: '{type_name}'")]
    UnknownContinuation {
        activity_id: String,
        type_name: String,
    },

    #[error("Activity '{activity_id}' belongs to branch '{branch}' but has no parent")]
    BranchWithoutParent { activity_id: String, branch: String },

    #[error("Activity '{0}' appears more than once")]
    DuplicateActivity(String),

    #[error("Invalid custom data: {0}")]
    ValidationError(String),
}

/// Errors raised while loading or saving a procedure document.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Could not access '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse procedure JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Binary encoding failed: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("Binary decoding failed: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// Errors raised while reading an editor configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse editor config: {0}")]
    Parse(#[from] serde_json::Error),
}

fn join_ids(ids: &[ActivityId]) -> String {
    ids.iter().map(|id| format!("'{}'", id)).join(", ")
}
