//! One full mining run against the store.

use quarry_core::config::QuarryConfig;
use quarry_core::errors::PipelineError;
use quarry_core::types::DocId;
use quarry_mining::report::{write_rule_report, write_transaction_dump};
use quarry_mining::{
    filter_and_rank, Apriori, HierarchyBuilder, RuleMiner, Thresholds, TransactionBuilder,
};
use quarry_storage::queries::{rule_graph, source, transaction_graph};
use quarry_storage::queries::transaction_graph::TransactionGraph;
use quarry_storage::DatabaseManager;
use serde::Serialize;

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub documents: usize,
    pub transactions: usize,
    pub skipped_occurrences: usize,
    pub categories: usize,
    pub leaves: usize,
    pub frequent_itemsets: usize,
    pub candidate_rules: usize,
    pub ranked_rules: usize,
}

/// Extract, mine, filter, and persist with a pluggable mining engine.
pub struct Pipeline<'a, M = Apriori> {
    store: &'a DatabaseManager,
    config: &'a QuarryConfig,
    miner: M,
}

impl<'a> Pipeline<'a, Apriori> {
    pub fn new(store: &'a DatabaseManager, config: &'a QuarryConfig) -> Self {
        Self::with_miner(store, config, Apriori)
    }
}

impl<'a, M: RuleMiner> Pipeline<'a, M> {
    pub fn with_miner(store: &'a DatabaseManager, config: &'a QuarryConfig, miner: M) -> Self {
        Self {
            store,
            config,
            miner,
        }
    }

    /// Run every stage in order. Any failure aborts the run; graph rebuilds
    /// that already committed stay in place and are replaced by the next run.
    pub fn run(&self) -> Result<RunSummary, PipelineError> {
        let thresholds = Thresholds::from(&self.config.mining);
        thresholds.validate()?;

        let documents = self.store.with_conn(source::load_documents)?;
        let builder = TransactionBuilder::new(self.config.extraction.effective_ignored_labels());
        let set = builder.build(&documents);
        let hierarchy = HierarchyBuilder::build(builder.kept_paths(&documents));
        tracing::info!(
            categories = hierarchy.len(),
            leaves = hierarchy.leaves().count(),
            "built hierarchy"
        );

        write_transaction_dump(&self.config.output.transactions_path(), &set.transactions)?;

        let appears_in: Vec<(&str, DocId)> = set
            .leaf_index
            .iter()
            .flat_map(|(leaf, entry)| entry.doc_ids.iter().map(move |&doc_id| (leaf.as_str(), doc_id)))
            .collect();
        let graph = TransactionGraph {
            documents: &documents,
            entities: hierarchy.labels().collect(),
            child_of: hierarchy.edges().collect(),
            appears_in,
        };
        self.store
            .with_conn(|conn| transaction_graph::rebuild_transaction_graph(conn, &graph))?;

        let mined = self.miner.mine(&set.transactions, &thresholds)?;
        let candidate_rules = mined.rules.len();
        let ranked = filter_and_rank(mined.rules);

        write_rule_report(&self.config.output.rules_path(), &ranked)?;
        self.store
            .with_conn(|conn| rule_graph::rebuild_rule_graph(conn, &ranked))?;

        let summary = RunSummary {
            documents: documents.len(),
            transactions: set.len(),
            skipped_occurrences: set.skipped_occurrences,
            categories: hierarchy.len(),
            leaves: set.leaf_index.len(),
            frequent_itemsets: mined.itemsets.len(),
            candidate_rules,
            ranked_rules: ranked.len(),
        };
        tracing::info!(
            documents = summary.documents,
            candidate_rules = summary.candidate_rules,
            ranked_rules = summary.ranked_rules,
            "run complete"
        );
        Ok(summary)
    }
}
