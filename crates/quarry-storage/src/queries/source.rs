//! Source corpus queries: documents and their entity occurrences.

use quarry_core::errors::StorageError;
use quarry_core::label::LabelPath;
use quarry_core::types::{DocId, DocumentRecord};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::connection::to_storage_err;

/// One entity occurrence to import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceEntity {
    pub name: String,
    pub labels: LabelPath,
}

/// One document to import with its occurrences in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDocument {
    pub doc_id: DocId,
    #[serde(default)]
    pub tokens: Option<String>,
    #[serde(default)]
    pub properties: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub entities: Vec<SourceEntity>,
}

/// Every document linked to at least one occurrence, ordered by `doc_id`,
/// with occurrence paths in link order.
///
/// Occurrences whose stored labels are not a JSON array of strings are
/// skipped with a warning; the document itself is kept.
pub fn load_documents(conn: &Connection) -> Result<Vec<DocumentRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT d.doc_id, d.tokens, d.properties, i.id, i.labels
             FROM documents d
             JOIN instance_appearances a ON a.doc_id = d.doc_id
             JOIN instances i ON i.id = a.instance_id
             ORDER BY d.doc_id, a.position, a.rowid",
        )
        .map_err(to_storage_err)?;

    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, DocId>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, String>(4)?,
            ))
        })
        .map_err(to_storage_err)?;

    let mut documents: Vec<DocumentRecord> = Vec::new();
    let mut malformed = 0usize;
    for row in rows {
        let (doc_id, tokens, properties, instance_id, labels) = row.map_err(to_storage_err)?;

        if documents.last().map(|d| d.doc_id) != Some(doc_id) {
            documents.push(DocumentRecord {
                doc_id,
                tokens,
                properties: parse_properties(doc_id, &properties),
                occurrences: Vec::new(),
            });
        }

        match serde_json::from_str::<LabelPath>(&labels) {
            Ok(path) => {
                if let Some(doc) = documents.last_mut() {
                    doc.occurrences.push(path);
                }
            }
            Err(e) => {
                malformed += 1;
                tracing::warn!(doc_id, instance_id, error = %e, "skipping occurrence with malformed labels");
            }
        }
    }

    tracing::info!(documents = documents.len(), malformed, "loaded source documents");
    Ok(documents)
}

fn parse_properties(doc_id: DocId, raw: &str) -> serde_json::Map<String, serde_json::Value> {
    match serde_json::from_str(raw) {
        Ok(serde_json::Value::Object(map)) => map,
        Ok(_) | Err(_) => {
            tracing::warn!(doc_id, "document properties are not a JSON object, ignoring");
            serde_json::Map::new()
        }
    }
}

/// Insert or replace a document and append its occurrences.
///
/// Instances are shared across documents when name and labels match.
/// Returns the number of occurrences linked.
pub fn import_document(conn: &Connection, doc: &SourceDocument) -> Result<usize, StorageError> {
    let properties = serde_json::Value::Object(doc.properties.clone()).to_string();
    conn.execute(
        "INSERT INTO documents (doc_id, tokens, properties) VALUES (?1, ?2, ?3)
         ON CONFLICT(doc_id) DO UPDATE SET tokens = excluded.tokens, properties = excluded.properties",
        params![doc.doc_id, doc.tokens, properties],
    )
    .map_err(to_storage_err)?;

    let next_position: i64 = conn
        .query_row(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM instance_appearances WHERE doc_id = ?1",
            params![doc.doc_id],
            |row| row.get(0),
        )
        .map_err(to_storage_err)?;

    let mut linked = 0;
    for (offset, entity) in doc.entities.iter().enumerate() {
        let instance_id = upsert_instance(conn, entity)?;
        conn.execute(
            "INSERT INTO instance_appearances (instance_id, doc_id, position) VALUES (?1, ?2, ?3)",
            params![instance_id, doc.doc_id, next_position + offset as i64],
        )
        .map_err(to_storage_err)?;
        linked += 1;
    }
    Ok(linked)
}

fn upsert_instance(conn: &Connection, entity: &SourceEntity) -> Result<i64, StorageError> {
    let labels = serde_json::to_string(&entity.labels).map_err(|e| StorageError::MalformedRecord {
        record: entity.name.clone(),
        message: e.to_string(),
    })?;

    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM instances WHERE name = ?1 AND labels = ?2",
            params![entity.name, labels],
            |row| row.get(0),
        )
        .optional()
        .map_err(to_storage_err)?;
    if let Some(id) = existing {
        return Ok(id);
    }

    conn.execute(
        "INSERT INTO instances (name, labels) VALUES (?1, ?2)",
        params![entity.name, labels],
    )
    .map_err(to_storage_err)?;
    Ok(conn.last_insert_rowid())
}

/// Count source documents.
pub fn count_documents(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))
        .map_err(to_storage_err)
}
