// Axis module
// Ordered, relabelable positions along one grid dimension

use serde::{Deserialize, Serialize};

/// Maximum length of an axis label.
pub const MAX_LABEL_LENGTH: usize = 40;

/// An ordered list of labels. The index is the coordinate; labels can be
/// changed in place but positions are never reordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Axis {
    labels: Vec<String>,
}

impl Axis {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Index of the first position carrying `label` (exact, trimmed match).
    pub fn position(&self, label: &str) -> Option<usize> {
        let label = label.trim();
        self.labels.iter().position(|l| l.trim() == label)
    }

    /// Appends a label and returns its index.
    pub fn push(&mut self, label: impl Into<String>) -> usize {
        self.labels.push(label.into());
        self.labels.len() - 1
    }

    /// Returns the index of `label`, appending it when missing.
    pub fn position_or_push(&mut self, label: &str) -> usize {
        match self.position(label) {
            Some(index) => index,
            None => self.push(label.trim()),
        }
    }

    /// Replaces the label at `index`. Returns `false` when out of range.
    pub fn relabel(&mut self, index: usize, label: impl Into<String>) -> bool {
        match self.labels.get_mut(index) {
            Some(slot) => {
                *slot = label.into();
                true
            }
            None => false,
        }
    }

    /// Removes the label at `index`, shifting later positions down.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.labels.len() {
            Some(self.labels.remove(index))
        } else {
            None
        }
    }
}

/// Validate a label before it is stored on an axis.
pub fn validate_label(label: &str) -> Result<(), String> {
    if label.trim().is_empty() {
        return Err("Axis label cannot be empty".to_string());
    }
    if label.chars().count() > MAX_LABEL_LENGTH {
        return Err(format!(
            "Axis label cannot be longer than {} characters",
            MAX_LABEL_LENGTH
        ));
    }
    Ok(())
}
