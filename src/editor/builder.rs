use super::FlowEditor;
use super::ids::{IdSource, SequentialIds, UuidIds};
use crate::config::EditorConfig;

/// Configures a [`FlowEditor`].
///
/// ```rust
/// use flujo::editor::FlowEditor;
///
/// let editor = FlowEditor::builder()
///     .with_labels("Aprobado", "Rechazado")
///     .with_sequential_ids()
///     .build();
/// assert_eq!(editor.config().yes_label, "Aprobado");
/// ```
pub struct FlowEditorBuilder {
    config: EditorConfig,
    ids: Option<Box<dyn IdSource>>,
}

impl FlowEditorBuilder {
    pub fn new() -> Self {
        Self {
            config: EditorConfig::default(),
            ids: None,
        }
    }

    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    /// Overrides the default labels given to new decisions.
    pub fn with_labels(mut self, yes_label: &str, no_label: &str) -> Self {
        self.config.yes_label = yes_label.to_string();
        self.config.no_label = no_label.to_string();
        self
    }

    pub fn with_id_source(mut self, ids: impl IdSource + 'static) -> Self {
        self.ids = Some(Box::new(ids));
        self
    }

    /// Uses `{id_prefix}-{n}` ids, with the prefix from the current config.
    pub fn with_sequential_ids(self) -> Self {
        let prefix = self.config.id_prefix.clone();
        self.with_id_source(SequentialIds::new(prefix))
    }

    pub fn build(self) -> FlowEditor {
        FlowEditor {
            config: self.config,
            ids: self.ids.unwrap_or_else(|| Box::new(UuidIds)),
        }
    }
}

impl Default for FlowEditorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
