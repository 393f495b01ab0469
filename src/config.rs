use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;

/// Defaults the editor applies to activities and branches it creates.
///
/// Every field is optional in JSON; missing fields take the defaults below.
///
/// ```rust
/// use flujo::config::EditorConfig;
///
/// let config = EditorConfig::from_json(r#"{ "yesLabel": "Aprobado", "noLabel": "Rechazado" }"#).unwrap();
/// assert_eq!(config.yes_label, "Aprobado");
/// assert_eq!(config.alternative_label, "Alternativa");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Label of a new decision's "yes" branch.
    pub yes_label: String,
    /// Label of a new decision's "no" branch.
    pub no_label: String,
    /// Base label for new alternative branches; the nth branch is `"{label} {n}"`.
    pub alternative_label: String,
    /// Prefix for sequential ids.
    pub id_prefix: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            yes_label: "Sí".to_string(),
            no_label: "No".to_string(),
            alternative_label: "Alternativa".to_string(),
            id_prefix: "act".to_string(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// The label for the `n`th (1-based) alternative branch.
    pub fn alternative_label_for(&self, n: usize) -> String {
        format!("{} {}", self.alternative_label, n)
    }
}
