//! Source documents as read from the store.

use serde::{Deserialize, Serialize};

use crate::label::LabelPath;

/// Document identifier as stored in the source graph.
pub type DocId = i64;

/// One document with its raw metadata and the label path of every linked
/// entity occurrence, in link order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub doc_id: DocId,
    /// Raw document text, if the store carries it.
    #[serde(default)]
    pub tokens: Option<String>,
    /// Any further document properties, copied verbatim to the output graph.
    #[serde(default)]
    pub properties: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub occurrences: Vec<LabelPath>,
}

impl DocumentRecord {
    pub fn new(doc_id: DocId, occurrences: Vec<LabelPath>) -> Self {
        Self {
            doc_id,
            tokens: None,
            properties: serde_json::Map::new(),
            occurrences,
        }
    }
}
