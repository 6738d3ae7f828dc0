//! JSON Lines corpus import.
//!
//! Each non-blank line is one document:
//! `{"doc_id": 1, "tokens": "...", "properties": {}, "entities": [{"name": "...", "labels": ["A", "A/1"]}]}`

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quarry_core::errors::{ImportError, PipelineError};
use quarry_storage::connection::writer::with_immediate_transaction;
use quarry_storage::queries::source::{self, SourceDocument};
use quarry_storage::DatabaseManager;

/// Totals from one import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub documents: usize,
    pub occurrences: usize,
}

/// Parse one corpus line. `line` is 1-based, for error reporting.
pub fn parse_line(line: usize, text: &str) -> Result<SourceDocument, ImportError> {
    serde_json::from_str(text).map_err(|e| ImportError::Json {
        line,
        message: e.to_string(),
    })
}

/// Read every document from `path` into the store in one transaction.
///
/// The whole file is parsed before anything is written, so a bad line leaves
/// the store untouched.
pub fn import_corpus(store: &DatabaseManager, path: &Path) -> Result<ImportSummary, PipelineError> {
    let io_err = |source: std::io::Error| ImportError::Io {
        path: path.display().to_string(),
        source,
    };

    let reader = BufReader::new(File::open(path).map_err(io_err)?);
    let mut documents = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(io_err)?;
        if line.trim().is_empty() {
            continue;
        }
        documents.push(parse_line(index + 1, &line)?);
    }

    let summary = store.with_conn(|conn| {
        with_immediate_transaction(conn, |tx| {
            let mut summary = ImportSummary::default();
            for doc in &documents {
                summary.occurrences += source::import_document(tx, doc)?;
                summary.documents += 1;
            }
            Ok(summary)
        })
    })?;

    tracing::info!(
        path = %path.display(),
        documents = summary.documents,
        occurrences = summary.occurrences,
        "imported corpus"
    );
    Ok(summary)
}
