//! End-to-end runs: import a corpus, mine it, and read the results back.

use std::path::Path;

use quarry_cli::{import_corpus, Pipeline};
use quarry_core::config::QuarryConfig;
use quarry_core::errors::{ImportError, PipelineError};
use quarry_storage::queries::rule_graph::{self, RuleRole};
use quarry_storage::queries::{source, transaction_graph};
use quarry_storage::DatabaseManager;
use tempfile::TempDir;

const CORPUS: &str = r#"{"doc_id": 1, "tokens": "pump seal", "entities": [{"name": "pump", "labels": ["A", "A/1"]}, {"name": "seal", "labels": ["B", "B/1"]}]}
{"doc_id": 2, "tokens": "pump seal again", "entities": [{"name": "pump", "labels": ["A", "A/1"]}, {"name": "seal", "labels": ["B", "B/1"]}]}

{"doc_id": 3, "entities": [{"name": "pump", "labels": ["A", "A/1"]}, {"name": "leak", "labels": ["C", "C/1"]}]}
{"doc_id": 4, "properties": {"site": "north"}, "entities": [{"name": "bay 4", "labels": ["FLOC", "FLOC/Bay4"]}]}
"#;

fn setup(dir: &Path) -> (DatabaseManager, QuarryConfig) {
    let corpus = dir.join("corpus.jsonl");
    std::fs::write(&corpus, CORPUS).unwrap();

    let store = DatabaseManager::open(&dir.join("quarry.db")).unwrap();
    let summary = import_corpus(&store, &corpus).unwrap();
    assert_eq!(summary.documents, 4);
    assert_eq!(summary.occurrences, 7);

    let config = QuarryConfig::from_toml(&format!(
        "[mining]\nmin_support = 0.5\nmin_confidence = 0.5\n\n[output]\ndir = {:?}\n",
        dir.join("out").display().to_string()
    ))
    .unwrap();
    (store, config)
}

#[test]
fn full_run_writes_reports_and_graphs() {
    let dir = TempDir::new().unwrap();
    let (store, config) = setup(dir.path());

    let summary = Pipeline::new(&store, &config).run().unwrap();
    assert_eq!(summary.documents, 4);
    assert_eq!(summary.transactions, 4);
    assert_eq!(summary.skipped_occurrences, 1);
    assert_eq!(summary.categories, 6);
    assert_eq!(summary.leaves, 3);
    // Every pairing of {A, A/1} with {B, B/1}, in both directions.
    assert_eq!(summary.ranked_rules, 8);
    assert!(summary.candidate_rules > summary.ranked_rules);

    let dump = std::fs::read_to_string(config.output.transactions_path()).unwrap();
    assert_eq!(dump, "A,A/1,B,B/1\nA,A/1,B,B/1\nA,A/1,C,C/1\n\n");

    let report = std::fs::read_to_string(config.output.rules_path()).unwrap();
    assert_eq!(report.lines().count(), 8);
    assert!(report.contains("A/1 -> B/1 (Lift: 1.33333, Conf: 0.66667, Supp: 0.50000)"));
    assert!(!report.contains("FLOC"));

    store
        .with_conn(|conn| {
            assert_eq!(transaction_graph::count_entities(conn)?, 6);
            assert_eq!(transaction_graph::count_graph_documents(conn)?, 4);
            assert_eq!(transaction_graph::get_parent(conn, "C/1")?, Some("C".to_string()));
            assert_eq!(transaction_graph::documents_for_entity(conn, "A/1")?, vec![1, 2, 3]);
            assert_eq!(rule_graph::count_rules(conn)?, 8);

            let for_b1 = rule_graph::rules_for_entity(conn, "B/1")?;
            assert_eq!(for_b1.len(), 4);
            assert_eq!(
                for_b1.iter().filter(|(_, role)| *role == RuleRole::Antecedent).count(),
                2
            );
            Ok(())
        })
        .unwrap();
}

#[test]
fn rerun_produces_identical_outputs() {
    let dir = TempDir::new().unwrap();
    let (store, config) = setup(dir.path());

    let first = Pipeline::new(&store, &config).run().unwrap();
    let report = std::fs::read_to_string(config.output.rules_path()).unwrap();
    let dump = std::fs::read_to_string(config.output.transactions_path()).unwrap();
    let rules = store.with_conn(|conn| rule_graph::list_rules(conn, 100)).unwrap();

    let second = Pipeline::new(&store, &config).run().unwrap();
    assert_eq!(first, second);
    assert_eq!(std::fs::read_to_string(config.output.rules_path()).unwrap(), report);
    assert_eq!(std::fs::read_to_string(config.output.transactions_path()).unwrap(), dump);
    assert_eq!(store.with_conn(|conn| rule_graph::list_rules(conn, 100)).unwrap(), rules);
}

#[test]
fn invalid_thresholds_abort_before_writing() {
    let dir = TempDir::new().unwrap();
    let (store, mut config) = setup(dir.path());
    config.mining.max_length = Some(1);

    let err = Pipeline::new(&store, &config).run().unwrap_err();
    assert!(matches!(err, PipelineError::Mining(_)));
    assert!(!config.output.rules_path().exists());
}

#[test]
fn empty_store_yields_empty_outputs() {
    let dir = TempDir::new().unwrap();
    let store = DatabaseManager::open(&dir.path().join("quarry.db")).unwrap();
    let config = QuarryConfig::from_toml(&format!(
        "[output]\ndir = {:?}\n",
        dir.path().join("out").display().to_string()
    ))
    .unwrap();

    let summary = Pipeline::new(&store, &config).run().unwrap();
    assert_eq!(summary.transactions, 0);
    assert_eq!(summary.ranked_rules, 0);
    assert_eq!(std::fs::read_to_string(config.output.rules_path()).unwrap(), "");
}

#[test]
fn bad_corpus_line_leaves_store_untouched() {
    let dir = TempDir::new().unwrap();
    let corpus = dir.path().join("corpus.jsonl");
    std::fs::write(&corpus, "{\"doc_id\": 1}\nnot json\n").unwrap();

    let store = DatabaseManager::open(&dir.path().join("quarry.db")).unwrap();
    let err = import_corpus(&store, &corpus).unwrap_err();
    assert!(matches!(err, PipelineError::Import(ImportError::Json { line: 2, .. })));
    assert_eq!(store.with_conn(source::count_documents).unwrap(), 0);
}

#[test]
fn missing_corpus_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let store = DatabaseManager::open(&dir.path().join("quarry.db")).unwrap();
    let err = import_corpus(&store, &dir.path().join("absent.jsonl")).unwrap_err();
    assert!(matches!(err, PipelineError::Import(ImportError::Io { .. })));
}
