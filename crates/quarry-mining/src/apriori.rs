//! Level-wise Apriori over transaction-id lists.
//!
//! Labels are interned in lexical order, so comparing interned keys compares
//! labels and every itemset is a sorted key vector. Each frequent itemset
//! carries the sorted ids of the transactions containing it; the support of
//! a joined candidate is the size of the intersection of its two parents'
//! lists.

use std::collections::BTreeSet;

use lasso::{Rodeo, Spur};
use quarry_core::errors::MiningError;
use quarry_core::types::collections::{FxHashMap, SmallVec4};
use quarry_core::types::{Rule, Transaction};

use crate::miner::{Itemset, MiningOutput, RuleMiner, Thresholds};

type Items = SmallVec4<Spur>;

/// Apriori frequent-itemset and rule miner.
#[derive(Debug, Clone, Copy, Default)]
pub struct Apriori;

impl RuleMiner for Apriori {
    fn mine(
        &self,
        transactions: &[Transaction],
        thresholds: &Thresholds,
    ) -> Result<MiningOutput, MiningError> {
        thresholds.validate()?;
        if transactions.is_empty() {
            return Ok(MiningOutput::default());
        }

        let n = transactions.len();
        let vocabulary = Vocabulary::new(transactions);
        let levels = frequent_itemsets(&vocabulary, n, thresholds);

        let counts: FxHashMap<&Items, usize> = levels
            .iter()
            .flatten()
            .map(|(items, tids)| (items, tids.len()))
            .collect();

        let mut output = MiningOutput::default();
        for (items, tids) in levels.iter().flatten() {
            output.itemsets.push(Itemset {
                labels: vocabulary.resolve_all(items),
                count: tids.len(),
                support: tids.len() as f64 / n as f64,
            });
            if items.len() >= 2 {
                derive_rules(
                    items,
                    tids.len(),
                    &counts,
                    n,
                    thresholds.min_confidence,
                    &vocabulary,
                    &mut output.rules,
                );
            }
        }

        tracing::info!(
            transactions = n,
            itemsets = output.itemsets.len(),
            rules = output.rules.len(),
            "apriori finished"
        );
        Ok(output)
    }
}

/// Label interner whose key order matches lexical label order, plus the
/// transaction-id list of every label.
struct Vocabulary {
    rodeo: Rodeo,
    tids: FxHashMap<Spur, Vec<u32>>,
}

impl Vocabulary {
    fn new(transactions: &[Transaction]) -> Self {
        let sorted: BTreeSet<&str> = transactions
            .iter()
            .flat_map(|t| t.labels().iter().map(String::as_str))
            .collect();

        let mut rodeo = Rodeo::default();
        for label in sorted {
            rodeo.get_or_intern(label);
        }

        let mut tids: FxHashMap<Spur, Vec<u32>> = FxHashMap::default();
        for (tid, transaction) in transactions.iter().enumerate() {
            for label in transaction.labels() {
                if let Some(key) = rodeo.get(label) {
                    let list = tids.entry(key).or_default();
                    // tid lists stay sorted and unique.
                    if list.last() != Some(&(tid as u32)) {
                        list.push(tid as u32);
                    }
                }
            }
        }

        Self { rodeo, tids }
    }

    fn resolve_all(&self, items: &[Spur]) -> Vec<String> {
        items
            .iter()
            .map(|key| self.rodeo.resolve(key).to_string())
            .collect()
    }
}

fn is_frequent(count: usize, n: usize, min_support: f64) -> bool {
    count as f64 / n as f64 >= min_support
}

/// Frequent itemsets grouped by size, each level sorted lexically.
fn frequent_itemsets(
    vocabulary: &Vocabulary,
    n: usize,
    thresholds: &Thresholds,
) -> Vec<Vec<(Items, Vec<u32>)>> {
    let mut singles: Vec<(Items, Vec<u32>)> = vocabulary
        .tids
        .iter()
        .filter(|(_, tids)| is_frequent(tids.len(), n, thresholds.min_support))
        .map(|(key, tids)| (Items::from_slice(&[*key]), tids.clone()))
        .collect();
    singles.sort_by(|a, b| a.0.cmp(&b.0));

    let mut levels = vec![singles];
    while let Some(previous) = levels.last() {
        let Some(size) = previous.first().map(|(items, _)| items.len()) else {
            break;
        };
        if size >= thresholds.max_length {
            break;
        }
        let next = join_level(previous, n, thresholds.min_support);
        tracing::debug!(size = size + 1, frequent = next.len(), "apriori level");
        if next.is_empty() {
            break;
        }
        levels.push(next);
    }
    levels.retain(|level| !level.is_empty());
    levels
}

/// Join k-itemsets sharing their first k-1 items into frequent (k+1)-itemsets.
fn join_level(previous: &[(Items, Vec<u32>)], n: usize, min_support: f64) -> Vec<(Items, Vec<u32>)> {
    let known: BTreeSet<&Items> = previous.iter().map(|(items, _)| items).collect();
    let k = previous.first().map_or(0, |(items, _)| items.len());
    let mut next = Vec::new();

    for (i, (left, left_tids)) in previous.iter().enumerate() {
        for (right, right_tids) in &previous[i + 1..] {
            if left[..k - 1] != right[..k - 1] {
                break;
            }
            let mut candidate = left.clone();
            candidate.push(right[k - 1]);

            if !all_subsets_known(&candidate, &known) {
                continue;
            }
            let tids = intersect(left_tids, right_tids);
            if is_frequent(tids.len(), n, min_support) {
                next.push((candidate, tids));
            }
        }
    }
    next
}

/// True when every subset one item smaller than `candidate` is in `known`.
fn all_subsets_known(candidate: &Items, known: &BTreeSet<&Items>) -> bool {
    // The two subsets dropping one of the last two items are the join
    // parents; only the others need checking.
    (0..candidate.len().saturating_sub(2)).all(|skip| {
        let subset: Items = candidate
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != skip)
            .map(|(_, key)| *key)
            .collect();
        known.contains(&subset)
    })
}

fn intersect(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

fn difference(items: &Items, remove: &Items) -> Items {
    items.iter().filter(|key| !remove.contains(key)).copied().collect()
}

/// Emit every rule of one itemset meeting `min_confidence`.
///
/// Consequents grow one item at a time and only from consequents whose rule
/// passed, since moving items from lhs to rhs can only lower confidence.
fn derive_rules(
    items: &Items,
    count: usize,
    counts: &FxHashMap<&Items, usize>,
    n: usize,
    min_confidence: f64,
    vocabulary: &Vocabulary,
    rules: &mut Vec<Rule>,
) {
    let mut consequents: Vec<Items> = items.iter().map(|key| Items::from_slice(&[*key])).collect();

    while !consequents.is_empty() && consequents[0].len() < items.len() {
        let mut passed = Vec::new();
        for rhs in consequents {
            let lhs = difference(items, &rhs);
            let (Some(&lhs_count), Some(&rhs_count)) = (counts.get(&lhs), counts.get(&rhs)) else {
                continue;
            };
            let confidence = count as f64 / lhs_count as f64;
            if confidence < min_confidence {
                continue;
            }
            let rhs_support = rhs_count as f64 / n as f64;
            rules.push(Rule {
                lhs: vocabulary.resolve_all(&lhs),
                rhs: vocabulary.resolve_all(&rhs),
                support: count as f64 / n as f64,
                confidence,
                lift: confidence / rhs_support,
            });
            passed.push(rhs);
        }
        consequents = grow_consequents(&passed);
    }
}

/// Join passed m-item consequents into (m+1)-item candidates whose every
/// m-item subset also passed.
fn grow_consequents(passed: &[Items]) -> Vec<Items> {
    let Some(m) = passed.first().map(|items| items.len()) else {
        return Vec::new();
    };
    let known: BTreeSet<&Items> = passed.iter().collect();
    let mut next = Vec::new();
    for (i, left) in passed.iter().enumerate() {
        for right in &passed[i + 1..] {
            if left[..m - 1] != right[..m - 1] {
                break;
            }
            let mut candidate = left.clone();
            candidate.push(right[m - 1]);
            if all_subsets_known(&candidate, &known) {
                next.push(candidate);
            }
        }
    }
    next
}
