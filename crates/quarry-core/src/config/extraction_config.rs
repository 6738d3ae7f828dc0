//! Extraction configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_IGNORED_LABELS;
use crate::types::collections::FxHashSet;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Occurrences carrying any of these labels are skipped.
    /// Default: `["Item/Uncategorised", "FLOC"]`.
    pub ignored_labels: Option<Vec<String>>,
}

impl ExtractionConfig {
    pub fn effective_ignored_labels(&self) -> FxHashSet<String> {
        match &self.ignored_labels {
            Some(labels) => labels.iter().cloned().collect(),
            None => DEFAULT_IGNORED_LABELS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
