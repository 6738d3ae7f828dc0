//! Hierarchical category labels.
//!
//! A label is a full root-to-node path string such as
//! `Item/RotatingEquipment/Pump`. A `LabelPath` is the ordered list of labels
//! from the root down to one entity occurrence's leaf.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::HIERARCHY_SEPARATOR;
use crate::types::collections::FxHashSet;

/// Top-level category of a label: the text before the first separator.
pub fn top_level(label: &str) -> &str {
    label
        .split_once(HIERARCHY_SEPARATOR)
        .map_or(label, |(head, _)| head)
}

/// Short name of a label: the text after the last separator.
pub fn short_name(label: &str) -> &str {
    label
        .rsplit_once(HIERARCHY_SEPARATOR)
        .map_or(label, |(_, tail)| tail)
}

/// Ordered root-to-leaf labels for one entity occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelPath(Vec<String>);

impl LabelPath {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(labels.into_iter().map(Into::into).collect())
    }

    /// The root label, if any.
    pub fn root(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// The leaf label, if any.
    pub fn leaf(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// True when any label along the path is in `ignored`.
    pub fn touches(&self, ignored: &FxHashSet<String>) -> bool {
        self.0.iter().any(|label| ignored.contains(label))
    }
}

impl<'a> IntoIterator for &'a LabelPath {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Vec<String>> for LabelPath {
    fn from(labels: Vec<String>) -> Self {
        Self(labels)
    }
}

impl fmt::Display for LabelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(" > "))
    }
}
