//! Source corpus, transaction graph, and rule graph round trips.

use quarry_core::label::LabelPath;
use quarry_core::types::{DocumentRecord, Rule};
use quarry_storage::queries::rule_graph::{self, RuleRole};
use quarry_storage::queries::source::{self, SourceDocument, SourceEntity};
use quarry_storage::queries::transaction_graph::{self, TransactionGraph};
use quarry_storage::DatabaseManager;

fn entity(name: &str, labels: &[&str]) -> SourceEntity {
    SourceEntity {
        name: name.to_string(),
        labels: LabelPath::new(labels.iter().copied()),
    }
}

fn source_doc(doc_id: i64, entities: Vec<SourceEntity>) -> SourceDocument {
    SourceDocument {
        doc_id,
        tokens: Some(format!("document {doc_id}")),
        properties: serde_json::Map::new(),
        entities,
    }
}

fn rule(lhs: &[&str], rhs: &[&str], lift: f64) -> Rule {
    Rule {
        lhs: lhs.iter().map(|s| s.to_string()).collect(),
        rhs: rhs.iter().map(|s| s.to_string()).collect(),
        support: 0.5,
        confidence: 0.5,
        lift,
    }
}

fn seeded() -> DatabaseManager {
    let db = DatabaseManager::open_in_memory().unwrap();
    db.with_conn(|conn| {
        source::import_document(
            conn,
            &source_doc(
                2,
                vec![
                    entity("pump", &["A", "A/1"]),
                    entity("leak", &["C", "C/1"]),
                ],
            ),
        )?;
        source::import_document(
            conn,
            &source_doc(
                1,
                vec![
                    entity("pump", &["A", "A/1"]),
                    entity("seal", &["B", "B/1"]),
                ],
            ),
        )?;
        Ok(())
    })
    .unwrap();
    db
}

#[test]
fn load_documents_orders_by_doc_then_position() {
    let db = seeded();
    let docs = db.with_conn(source::load_documents).unwrap();

    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].doc_id, 1);
    assert_eq!(
        docs[0].occurrences,
        vec![LabelPath::new(["A", "A/1"]), LabelPath::new(["B", "B/1"])]
    );
    assert_eq!(docs[1].tokens.as_deref(), Some("document 2"));
}

#[test]
fn instances_are_shared_across_documents() {
    let db = seeded();
    let count: i64 = db
        .with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM instances", [], |row| row.get(0))
                .map_err(quarry_storage::connection::to_storage_err)
        })
        .unwrap();
    assert_eq!(count, 3);
}

#[test]
fn malformed_labels_are_skipped() {
    let db = seeded();
    let docs = db
        .with_conn(|conn| {
            conn.execute("INSERT INTO instances (name, labels) VALUES ('bad', 'not json')", [])
                .unwrap();
            let id = conn.last_insert_rowid();
            conn.execute(
                "INSERT INTO instance_appearances (instance_id, doc_id, position) VALUES (?1, 1, 99)",
                [id],
            )
            .unwrap();
            source::load_documents(conn)
        })
        .unwrap();

    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].occurrences.len(), 2);
}

#[test]
fn documents_without_occurrences_are_not_loaded() {
    let db = seeded();
    db.with_conn(|conn| source::import_document(conn, &source_doc(3, Vec::new())))
        .unwrap();
    let docs = db.with_conn(source::load_documents).unwrap();
    assert!(docs.iter().all(|d| d.doc_id != 3));
    assert_eq!(db.with_conn(source::count_documents).unwrap(), 3);
}

fn graph_for(docs: &[DocumentRecord]) -> TransactionGraph<'_> {
    TransactionGraph {
        documents: docs,
        entities: vec!["A", "A/1", "B", "B/1"],
        child_of: vec![("A/1", "A"), ("B/1", "B")],
        appears_in: vec![("A/1", 1), ("A/1", 1), ("B/1", 1), ("A/1", 2)],
    }
}

#[test]
fn transaction_graph_rebuild_is_idempotent() {
    let db = DatabaseManager::open_in_memory().unwrap();
    let docs = vec![DocumentRecord::new(1, Vec::new()), DocumentRecord::new(2, Vec::new())];
    let graph = graph_for(&docs);

    let first = db
        .with_conn(|conn| transaction_graph::rebuild_transaction_graph(conn, &graph))
        .unwrap();
    let second = db
        .with_conn(|conn| transaction_graph::rebuild_transaction_graph(conn, &graph))
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first.appears_in, 3, "duplicate occurrences merge into one link");
    assert_eq!(db.with_conn(transaction_graph::count_entities).unwrap(), 4);
    assert_eq!(
        db.with_conn(|conn| transaction_graph::get_parent(conn, "A/1")).unwrap(),
        Some("A".to_string())
    );
    assert_eq!(
        db.with_conn(|conn| transaction_graph::documents_for_entity(conn, "A/1")).unwrap(),
        vec![1, 2]
    );
}

#[test]
fn rule_graph_links_only_existing_entities() {
    let db = DatabaseManager::open_in_memory().unwrap();
    let docs = vec![DocumentRecord::new(1, Vec::new()), DocumentRecord::new(2, Vec::new())];
    db.with_conn(|conn| transaction_graph::rebuild_transaction_graph(conn, &graph_for(&docs)))
        .unwrap();

    let rules = vec![rule(&["A/1"], &["B/1"], 2.0), rule(&["A/1"], &["Z/9"], 1.0)];
    let stats = db
        .with_conn(|conn| rule_graph::rebuild_rule_graph(conn, &rules))
        .unwrap();
    assert_eq!(stats.rules, 2);
    assert_eq!(stats.antecedent_links, 2);
    assert_eq!(stats.consequent_links, 1);

    let stored = db.with_conn(|conn| rule_graph::list_rules(conn, 10)).unwrap();
    assert_eq!(stored[0].rule_id, 0);
    assert_eq!(stored[0].name, "A/1 -> B/1");
    assert_eq!(stored[0].short_name, "1 -> 1");

    let for_b1 = db.with_conn(|conn| rule_graph::rules_for_entity(conn, "B/1")).unwrap();
    assert_eq!(for_b1.len(), 1);
    assert_eq!(for_b1[0].1, RuleRole::Consequent);

    let ante = db
        .with_conn(|conn| rule_graph::rule_entities(conn, 1, RuleRole::Antecedent))
        .unwrap();
    assert_eq!(ante, vec!["A/1".to_string()]);
}

#[test]
fn rule_graph_rebuild_replaces_previous_rules() {
    let db = DatabaseManager::open_in_memory().unwrap();
    let docs = vec![DocumentRecord::new(1, Vec::new()), DocumentRecord::new(2, Vec::new())];
    db.with_conn(|conn| transaction_graph::rebuild_transaction_graph(conn, &graph_for(&docs)))
        .unwrap();

    let many = vec![rule(&["A/1"], &["B/1"], 2.0), rule(&["B/1"], &["A/1"], 2.0)];
    db.with_conn(|conn| rule_graph::rebuild_rule_graph(conn, &many)).unwrap();
    db.with_conn(|conn| rule_graph::rebuild_rule_graph(conn, &many[..1])).unwrap();

    assert_eq!(db.with_conn(rule_graph::count_rules).unwrap(), 1);
    let orphaned: i64 = db
        .with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM q_antecedents WHERE rule_id = 1", [], |row| row.get(0))
                .map_err(quarry_storage::connection::to_storage_err)
        })
        .unwrap();
    assert_eq!(orphaned, 0);
}

#[test]
fn transaction_graph_rebuild_detaches_rule_links() {
    let db = DatabaseManager::open_in_memory().unwrap();
    let docs = vec![DocumentRecord::new(1, Vec::new()), DocumentRecord::new(2, Vec::new())];
    db.with_conn(|conn| transaction_graph::rebuild_transaction_graph(conn, &graph_for(&docs)))
        .unwrap();
    db.with_conn(|conn| rule_graph::rebuild_rule_graph(conn, &[rule(&["A/1"], &["B/1"], 2.0)]))
        .unwrap();

    db.with_conn(|conn| transaction_graph::rebuild_transaction_graph(conn, &graph_for(&docs)))
        .unwrap();

    let links = db
        .with_conn(|conn| rule_graph::rule_entities(conn, 0, RuleRole::Antecedent))
        .unwrap();
    assert!(links.is_empty());
    assert_eq!(db.with_conn(rule_graph::count_rules).unwrap(), 1);
}
