use proptest::prelude::*;
use quarry_core::label::{top_level, LabelPath};
use quarry_core::types::collections::FxHashSet;
use quarry_core::types::{DocumentRecord, Rule};
use quarry_mining::{
    filter_and_rank, Apriori, HierarchyBuilder, RuleMiner, Thresholds, TransactionBuilder,
};

const ROOTS: [&str; 4] = ["Item", "Observation", "Activity", "FLOC"];

/// A root-to-leaf path such as `Item`, `Item/s1`, `Item/s1/s0`.
fn label_path() -> impl Strategy<Value = LabelPath> {
    (0..ROOTS.len(), prop::collection::vec(0..3usize, 0..3)).prop_map(|(root, segments)| {
        let mut labels = vec![ROOTS[root].to_string()];
        for segment in segments {
            let next = format!("{}/s{}", labels.last().unwrap(), segment);
            labels.push(next);
        }
        LabelPath::new(labels)
    })
}

fn documents() -> impl Strategy<Value = Vec<DocumentRecord>> {
    prop::collection::vec(prop::collection::vec(label_path(), 0..5), 0..12).prop_map(|docs| {
        docs.into_iter()
            .enumerate()
            .map(|(i, paths)| DocumentRecord::new(i as i64, paths))
            .collect()
    })
}

fn rule_strategy() -> impl Strategy<Value = Rule> {
    (
        prop::collection::vec(label_path(), 1..3),
        prop::collection::vec(label_path(), 1..2),
        0.0f64..20.0,
    )
        .prop_map(|(lhs, rhs, lift)| Rule {
            lhs: lhs.iter().filter_map(|p| p.leaf().map(String::from)).collect(),
            rhs: rhs.iter().filter_map(|p| p.leaf().map(String::from)).collect(),
            support: 0.1,
            confidence: 0.5,
            lift,
        })
}

proptest! {
    #[test]
    fn every_non_root_label_has_parent(docs in documents()) {
        let paths: Vec<&LabelPath> = docs.iter().flat_map(|d| d.occurrences.iter()).collect();
        let hierarchy = HierarchyBuilder::build(paths.iter().copied());
        for path in &paths {
            for label in path.labels().iter().skip(1) {
                prop_assert!(matches!(hierarchy.parent(label), Some(Some(_))));
            }
        }
    }

    #[test]
    fn transactions_cover_every_kept_path(docs in documents()) {
        let builder = TransactionBuilder::new(["FLOC".to_string()].into_iter().collect());
        let set = builder.build(&docs);
        prop_assert_eq!(set.len(), docs.len());

        for doc in &docs {
            let tx = set.get(doc.doc_id).unwrap();
            let unique: FxHashSet<&String> = tx.labels().iter().collect();
            prop_assert_eq!(unique.len(), tx.len());

            for path in doc.occurrences.iter().filter(|p| builder.keeps(p)) {
                for label in path {
                    prop_assert!(tx.contains(label));
                }
            }
            prop_assert!(!tx.labels().iter().any(|l| top_level(l) == "FLOC"));
        }
    }

    #[test]
    fn filtered_rules_have_distinct_top_levels(rules in prop::collection::vec(rule_strategy(), 0..30)) {
        let kept = filter_and_rank(rules);
        for rule in &kept {
            let labels: Vec<&str> = rule.labels().collect();
            let tops: FxHashSet<&str> = labels.iter().map(|l| top_level(l)).collect();
            prop_assert_eq!(tops.len(), labels.len());
        }
        for pair in kept.windows(2) {
            prop_assert!(pair[0].lift >= pair[1].lift);
        }
    }

    #[test]
    fn mined_rules_respect_thresholds(docs in documents()) {
        let set = TransactionBuilder::default().build(&docs);
        let thresholds = Thresholds { min_support: 0.2, min_confidence: 0.6, max_length: 3 };
        let out = Apriori.mine(&set.transactions, &thresholds).unwrap();
        for rule in &out.rules {
            prop_assert!(rule.support >= 0.2);
            prop_assert!(rule.confidence >= 0.6 && rule.confidence <= 1.0);
            prop_assert!(rule.lift >= 0.0);
            prop_assert!(rule.lhs.iter().all(|l| !rule.rhs.contains(l)));
        }
    }
}
