//! Transaction graph: documents, category entities, CHILD_OF and APPEARS_IN.

use quarry_core::errors::StorageError;
use quarry_core::label::short_name;
use quarry_core::types::{DocId, DocumentRecord};
use rusqlite::{params, Connection};

use crate::connection::to_storage_err;
use crate::connection::writer::with_immediate_transaction;

/// Everything written by one transaction-graph rebuild.
#[derive(Debug, Clone, Default)]
pub struct TransactionGraph<'a> {
    pub documents: &'a [DocumentRecord],
    /// Every category label.
    pub entities: Vec<&'a str>,
    /// `(child, parent)` pairs.
    pub child_of: Vec<(&'a str, &'a str)>,
    /// `(leaf, doc_id)` pairs, one per occurrence.
    pub appears_in: Vec<(&'a str, DocId)>,
}

/// Rows written by a rebuild.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionGraphStats {
    pub documents: usize,
    pub entities: usize,
    pub child_of: usize,
    pub appears_in: usize,
}

/// Replace the whole transaction graph with `graph` in one transaction.
///
/// Removing entities also detaches any rule links pointing at them.
pub fn rebuild_transaction_graph(
    conn: &Connection,
    graph: &TransactionGraph<'_>,
) -> Result<TransactionGraphStats, StorageError> {
    with_immediate_transaction(conn, |tx| {
        tx.execute_batch("DELETE FROM q_documents; DELETE FROM q_entities;")
            .map_err(to_storage_err)?;

        let mut stats = TransactionGraphStats::default();

        {
            let mut stmt = tx
                .prepare_cached(
                    "INSERT OR REPLACE INTO q_documents (doc_id, tokens, properties) VALUES (?1, ?2, ?3)",
                )
                .map_err(to_storage_err)?;
            for doc in graph.documents {
                let properties = serde_json::Value::Object(doc.properties.clone()).to_string();
                stmt.execute(params![doc.doc_id, doc.tokens, properties])
                    .map_err(to_storage_err)?;
                stats.documents += 1;
            }
        }
        tracing::debug!(documents = stats.documents, "wrote document nodes");

        {
            let mut stmt = tx
                .prepare_cached("INSERT OR IGNORE INTO q_entities (name, short_name) VALUES (?1, ?2)")
                .map_err(to_storage_err)?;
            for name in &graph.entities {
                stats.entities += stmt
                    .execute(params![name, short_name(name)])
                    .map_err(to_storage_err)?;
            }
        }
        tracing::debug!(entities = stats.entities, "wrote entity nodes");

        {
            let mut stmt = tx
                .prepare_cached("INSERT OR IGNORE INTO q_child_of (child, parent) VALUES (?1, ?2)")
                .map_err(to_storage_err)?;
            for (child, parent) in &graph.child_of {
                stats.child_of += stmt
                    .execute(params![child, parent])
                    .map_err(to_storage_err)?;
            }
        }

        {
            let mut stmt = tx
                .prepare_cached(
                    "INSERT OR IGNORE INTO q_appears_in (entity, doc_id)
                     SELECT ?1, ?2
                     WHERE EXISTS (SELECT 1 FROM q_entities WHERE name = ?1)
                       AND EXISTS (SELECT 1 FROM q_documents WHERE doc_id = ?2)",
                )
                .map_err(to_storage_err)?;
            for (entity, doc_id) in &graph.appears_in {
                stats.appears_in += stmt
                    .execute(params![entity, doc_id])
                    .map_err(to_storage_err)?;
            }
        }

        tracing::info!(
            documents = stats.documents,
            entities = stats.entities,
            child_of = stats.child_of,
            appears_in = stats.appears_in,
            "rebuilt transaction graph"
        );
        Ok(stats)
    })
}

/// Parent of an entity in the stored graph.
pub fn get_parent(conn: &Connection, name: &str) -> Result<Option<String>, StorageError> {
    use rusqlite::OptionalExtension;

    conn.query_row(
        "SELECT parent FROM q_child_of WHERE child = ?1",
        params![name],
        |row| row.get(0),
    )
    .optional()
    .map_err(to_storage_err)
}

/// Documents a leaf entity appears in, ascending.
pub fn documents_for_entity(conn: &Connection, name: &str) -> Result<Vec<DocId>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT doc_id FROM q_appears_in WHERE entity = ?1 ORDER BY doc_id")
        .map_err(to_storage_err)?;
    let rows = stmt
        .query_map(params![name], |row| row.get(0))
        .map_err(to_storage_err)?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(to_storage_err)?);
    }
    Ok(result)
}

pub fn count_entities(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM q_entities", [], |row| row.get(0))
        .map_err(to_storage_err)
}

pub fn count_graph_documents(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM q_documents", [], |row| row.get(0))
        .map_err(to_storage_err)
}
