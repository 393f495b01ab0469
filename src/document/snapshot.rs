use crate::activity::Activity;
use crate::error::DocumentError;
use crate::numbering::renumber;
use crate::order;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A procedure as handed to and from persistence: a title and the flat collection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProcedureDocument {
    #[serde(default)]
    pub title: String,
    pub activities: Vec<Activity>,
}

impl ProcedureDocument {
    pub fn new(title: impl Into<String>, activities: Vec<Activity>) -> Self {
        Self {
            title: title.into(),
            activities,
        }
    }

    /// The activities in procedural order. Array order is insertion order and must not
    /// be used for display.
    pub fn ordered(&self) -> Vec<Activity> {
        order::resolve_order(&self.activities)
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a document and renumbers it, so stale display positions are never served.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let document: Self = serde_json::from_str(json)?;
        Ok(document.renumbered())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, DocumentError> {
        Ok(encode_to_vec(self, standard())?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DocumentError> {
        // bincode 2 returns (value, bytes_read)
        let (document, _): (Self, usize) = decode_from_slice(bytes, standard())?;
        Ok(document.renumbered())
    }

    /// Writes the document to `path`: JSON for a `.json` extension, bincode otherwise.
    pub fn save(&self, path: &str) -> Result<(), DocumentError> {
        let bytes = if is_json(path) {
            self.to_json()?.into_bytes()
        } else {
            self.to_bytes()?
        };
        fs::write(path, bytes).map_err(|source| DocumentError::Io {
            path: path.to_string(),
            source,
        })
    }

    /// Loads a document written by [`ProcedureDocument::save`].
    pub fn from_file(path: &str) -> Result<Self, DocumentError> {
        let bytes = fs::read(path).map_err(|source| DocumentError::Io {
            path: path.to_string(),
            source,
        })?;
        if is_json(path) {
            let json = String::from_utf8_lossy(&bytes);
            Self::from_json(&json)
        } else {
            Self::from_bytes(&bytes)
        }
    }

    fn renumbered(self) -> Self {
        Self {
            activities: renumber(&self.activities),
            ..self
        }
    }
}

fn is_json(path: &str) -> bool {
    Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
