//! Category hierarchy reconstructed from label paths.
//!
//! Every label gets an entry; a label seen below the root of a path records
//! the label just above it as its parent. The last path processed wins, so
//! when documents disagree on a label's parent the result depends on input
//! order.

use quarry_core::label::LabelPath;
use quarry_core::types::collections::{BTreeMap, FxHashSet};

/// label -> parent label (`None` for roots).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hierarchy {
    parents: BTreeMap<String, Option<String>>,
}

impl Hierarchy {
    /// Parent of `label`: `None` if unknown, `Some(None)` for a root.
    pub fn parent(&self, label: &str) -> Option<Option<&str>> {
        self.parents.get(label).map(|p| p.as_deref())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.parents.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// All labels in lexical order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.parents.keys().map(String::as_str)
    }

    /// `(child, parent)` for every recorded parent link.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.parents
            .iter()
            .filter_map(|(child, parent)| parent.as_deref().map(|p| (child.as_str(), p)))
    }

    /// Labels that are nobody's parent.
    pub fn leaves(&self) -> impl Iterator<Item = &str> {
        let parents: FxHashSet<&str> = self.parents.values().flatten().map(String::as_str).collect();
        self.labels().filter(move |label| !parents.contains(label))
    }
}

/// Incremental builder for [`Hierarchy`].
#[derive(Debug, Default)]
pub struct HierarchyBuilder {
    hierarchy: Hierarchy,
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a hierarchy from every path in order.
    pub fn build<'a, I>(paths: I) -> Hierarchy
    where
        I: IntoIterator<Item = &'a LabelPath>,
    {
        let mut builder = Self::new();
        for path in paths {
            builder.observe(path);
        }
        builder.finish()
    }

    /// Record one path. Empty paths contribute nothing.
    pub fn observe(&mut self, path: &LabelPath) {
        let labels = path.labels();
        for (depth, label) in labels.iter().enumerate() {
            let entry = self
                .hierarchy
                .parents
                .entry(label.clone())
                .or_insert(None);
            if depth > 0 {
                *entry = Some(labels[depth - 1].clone());
            }
        }
    }

    pub fn finish(self) -> Hierarchy {
        self.hierarchy
    }
}
