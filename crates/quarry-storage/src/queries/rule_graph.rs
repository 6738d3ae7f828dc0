//! Rule graph: one node per ranked rule, linked to its entities by ANTE and
//! CONS relationships.

use quarry_core::errors::StorageError;
use quarry_core::types::Rule;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::connection::to_storage_err;
use crate::connection::writer::with_immediate_transaction;

/// A stored rule node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleRow {
    pub rule_id: i64,
    pub name: String,
    pub short_name: String,
    pub confidence: f64,
    pub support: f64,
    pub lift: f64,
}

impl RuleRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            rule_id: row.get(0)?,
            name: row.get(1)?,
            short_name: row.get(2)?,
            confidence: row.get(3)?,
            support: row.get(4)?,
            lift: row.get(5)?,
        })
    }
}

/// Which side of a rule an entity sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleRole {
    Antecedent,
    Consequent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleGraphStats {
    pub rules: usize,
    pub antecedent_links: usize,
    pub consequent_links: usize,
}

const RULE_COLUMNS: &str = "rule_id, name, short_name, confidence, support, lift";

/// Replace every rule node with `rules`, numbered by position.
///
/// A link is only created when the entity node exists; labels missing from
/// the transaction graph are left unlinked.
pub fn rebuild_rule_graph(conn: &Connection, rules: &[Rule]) -> Result<RuleGraphStats, StorageError> {
    with_immediate_transaction(conn, |tx| {
        tx.execute("DELETE FROM q_rules", []).map_err(to_storage_err)?;

        let mut stats = RuleGraphStats::default();
        let mut insert_rule = tx
            .prepare_cached(
                "INSERT INTO q_rules (rule_id, name, short_name, confidence, support, lift)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )
            .map_err(to_storage_err)?;
        let mut link_ante = tx
            .prepare_cached(
                "INSERT OR IGNORE INTO q_antecedents (entity, rule_id)
                 SELECT ?1, ?2 WHERE EXISTS (SELECT 1 FROM q_entities WHERE name = ?1)",
            )
            .map_err(to_storage_err)?;
        let mut link_cons = tx
            .prepare_cached(
                "INSERT OR IGNORE INTO q_consequents (entity, rule_id)
                 SELECT ?1, ?2 WHERE EXISTS (SELECT 1 FROM q_entities WHERE name = ?1)",
            )
            .map_err(to_storage_err)?;

        for (rule_id, rule) in rules.iter().enumerate() {
            let rule_id = rule_id as i64;
            insert_rule
                .execute(params![
                    rule_id,
                    rule.full_name(),
                    rule.short_name(),
                    rule.confidence,
                    rule.support,
                    rule.lift,
                ])
                .map_err(to_storage_err)?;
            stats.rules += 1;

            for entity in &rule.lhs {
                stats.antecedent_links += link_ante
                    .execute(params![entity, rule_id])
                    .map_err(to_storage_err)?;
            }
            for entity in &rule.rhs {
                stats.consequent_links += link_cons
                    .execute(params![entity, rule_id])
                    .map_err(to_storage_err)?;
            }
        }

        tracing::info!(
            rules = stats.rules,
            antecedent_links = stats.antecedent_links,
            consequent_links = stats.consequent_links,
            "rebuilt rule graph"
        );
        Ok(stats)
    })
}

/// Stored rules in rank order, up to `limit`.
pub fn list_rules(conn: &Connection, limit: usize) -> Result<Vec<RuleRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {RULE_COLUMNS} FROM q_rules ORDER BY rule_id LIMIT ?1"
        ))
        .map_err(to_storage_err)?;
    let rows = stmt
        .query_map(params![limit as i64], RuleRow::from_row)
        .map_err(to_storage_err)?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(to_storage_err)?);
    }
    Ok(result)
}

/// Rules an entity takes part in, in rank order, with its role in each.
pub fn rules_for_entity(
    conn: &Connection,
    name: &str,
) -> Result<Vec<(RuleRow, RuleRole)>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {RULE_COLUMNS}, 'ante' FROM q_rules
             WHERE rule_id IN (SELECT rule_id FROM q_antecedents WHERE entity = ?1)
             UNION ALL
             SELECT {RULE_COLUMNS}, 'cons' FROM q_rules
             WHERE rule_id IN (SELECT rule_id FROM q_consequents WHERE entity = ?1)
             ORDER BY 1"
        ))
        .map_err(to_storage_err)?;
    let rows = stmt
        .query_map(params![name], |row| {
            let role = match row.get::<_, String>(6)?.as_str() {
                "ante" => RuleRole::Antecedent,
                _ => RuleRole::Consequent,
            };
            Ok((RuleRow::from_row(row)?, role))
        })
        .map_err(to_storage_err)?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(to_storage_err)?);
    }
    Ok(result)
}

/// Entities on one side of a rule, sorted.
pub fn rule_entities(
    conn: &Connection,
    rule_id: i64,
    role: RuleRole,
) -> Result<Vec<String>, StorageError> {
    let sql = match role {
        RuleRole::Antecedent => "SELECT entity FROM q_antecedents WHERE rule_id = ?1 ORDER BY entity",
        RuleRole::Consequent => "SELECT entity FROM q_consequents WHERE rule_id = ?1 ORDER BY entity",
    };
    let mut stmt = conn.prepare_cached(sql).map_err(to_storage_err)?;
    let rows = stmt
        .query_map(params![rule_id], |row| row.get(0))
        .map_err(to_storage_err)?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(to_storage_err)?);
    }
    Ok(result)
}

pub fn count_rules(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM q_rules", [], |row| row.get(0))
        .map_err(to_storage_err)
}
