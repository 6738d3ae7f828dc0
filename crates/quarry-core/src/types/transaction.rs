//! One mining record per document.

use serde::{Deserialize, Serialize};

use super::collections::FxHashSet;
use super::document::DocId;

/// Every hierarchy label activated in one document.
///
/// Labels are unique and kept in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub doc_id: DocId,
    labels: Vec<String>,
}

impl Transaction {
    /// Build a transaction from labels in activation order, dropping repeats.
    pub fn from_labels<I, S>(doc_id: DocId, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = FxHashSet::default();
        let labels = labels
            .into_iter()
            .map(Into::into)
            .filter(|label: &String| seen.insert(label.clone()))
            .collect();
        Self { doc_id, labels }
    }

    pub fn empty(doc_id: DocId) -> Self {
        Self {
            doc_id,
            labels: Vec::new(),
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}
