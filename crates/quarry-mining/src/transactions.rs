//! Multi-level transaction construction.
//!
//! Each kept occurrence contributes every label of its path, so a document
//! mentioning `Item/RotatingEquipment/Pump` activates the pump, rotating
//! equipment, and item levels at once. This is what lets rules form across
//! hierarchy levels, at the cost of many redundant same-branch rules that
//! [`crate::filter`] removes later.

use quarry_core::label::LabelPath;
use quarry_core::types::collections::{BTreeMap, FxHashMap, FxHashSet};
use quarry_core::types::{DocId, DocumentRecord, Transaction};

/// Where one leaf label occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafEntry {
    /// One entry per occurrence; a document repeats if the leaf occurs in it
    /// more than once.
    pub doc_ids: Vec<DocId>,
    /// The first path seen ending in this leaf.
    pub path: LabelPath,
}

/// leaf label -> occurrences.
pub type LeafIndex = BTreeMap<String, LeafEntry>;

/// Output of [`TransactionBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct TransactionSet {
    /// One transaction per document, in input order.
    pub transactions: Vec<Transaction>,
    pub leaf_index: LeafIndex,
    /// Occurrences dropped for carrying an ignored label or an empty path.
    pub skipped_occurrences: usize,
}

impl TransactionSet {
    pub fn get(&self, doc_id: DocId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.doc_id == doc_id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Expands per-document label paths into transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    ignored: FxHashSet<String>,
}

impl TransactionBuilder {
    pub fn new(ignored: FxHashSet<String>) -> Self {
        Self { ignored }
    }

    /// An occurrence is dropped when its path is empty or any of its labels
    /// is ignored.
    pub fn keeps(&self, path: &LabelPath) -> bool {
        !path.is_empty() && !path.touches(&self.ignored)
    }

    /// Every kept path across `documents`, in document then occurrence order.
    pub fn kept_paths<'a>(
        &'a self,
        documents: &'a [DocumentRecord],
    ) -> impl Iterator<Item = &'a LabelPath> + 'a {
        documents
            .iter()
            .flat_map(|doc| doc.occurrences.iter())
            .filter(move |path| self.keeps(path))
    }

    /// Build one transaction per document plus the leaf index.
    ///
    /// Documents sharing an id are folded into one transaction.
    pub fn build(&self, documents: &[DocumentRecord]) -> TransactionSet {
        let mut labels_by_doc: Vec<(DocId, Vec<&str>)> = Vec::with_capacity(documents.len());
        let mut slot_by_doc: FxHashMap<DocId, usize> = FxHashMap::default();
        let mut leaf_index = LeafIndex::new();
        let mut skipped_occurrences = 0;

        for doc in documents {
            let slot = *slot_by_doc.entry(doc.doc_id).or_insert_with(|| {
                labels_by_doc.push((doc.doc_id, Vec::new()));
                labels_by_doc.len() - 1
            });

            for path in &doc.occurrences {
                if !self.keeps(path) {
                    skipped_occurrences += 1;
                    continue;
                }
                labels_by_doc[slot]
                    .1
                    .extend(path.iter().map(String::as_str));

                if let Some(leaf) = path.leaf() {
                    leaf_index
                        .entry(leaf.to_string())
                        .or_insert_with(|| LeafEntry {
                            doc_ids: Vec::new(),
                            path: path.clone(),
                        })
                        .doc_ids
                        .push(doc.doc_id);
                }
            }
        }

        let transactions = labels_by_doc
            .into_iter()
            .map(|(doc_id, labels)| Transaction::from_labels(doc_id, labels))
            .collect::<Vec<_>>();

        tracing::info!(
            documents = transactions.len(),
            leaves = leaf_index.len(),
            skipped_occurrences,
            "built transactions"
        );

        TransactionSet {
            transactions,
            leaf_index,
            skipped_occurrences,
        }
    }
}
