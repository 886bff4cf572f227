//! Label registry.

use habitquest_core::{normalize_label_name, Label, LabelColor, LabelId};
use tracing::debug;
use crate::error::{EngineError, Result};

/// Ordered collection of labels.
///
/// Labels have no link to items; item tags are free text.
#[derive(Debug, Clone, Default)]
pub struct LabelRegistry {
    labels: Vec<Label>,
}

impl LabelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from previously stored labels.
    pub fn from_labels(labels: Vec<Label>) -> Self {
        Self { labels }
    }

    /// Register a label built by the caller.
    pub fn insert(&mut self, label: Label) -> Label {
        debug!(id = %label.id, name = %label.name, "label added");
        self.labels.push(label.clone());
        label
    }

    /// Rename and recolour a label.
    pub fn update(&mut self, id: LabelId, name: &str, color: LabelColor) -> Result<Label> {
        let name = normalize_label_name(name)?;
        let label = self
            .labels
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| EngineError::NotFound(format!("label {}", id)))?;

        label.name = name;
        label.color = color;
        debug!(%id, name = %label.name, color = %label.color, "label updated");
        Ok(label.clone())
    }

    /// Remove a label. Missing ids are ignored.
    pub fn remove(&mut self, id: LabelId) -> Option<Label> {
        let index = self.labels.iter().position(|l| l.id == id)?;
        debug!(%id, "label deleted");
        Some(self.labels.remove(index))
    }

    /// Get a label by ID.
    pub fn get(&self, id: LabelId) -> Option<&Label> {
        self.labels.iter().find(|l| l.id == id)
    }

    /// All labels in insertion order.
    pub fn list(&self) -> &[Label] {
        &self.labels
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
