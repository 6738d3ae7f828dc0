//! Multi-level rule filtering and ranking.
//!
//! Transactions carry every ancestor of every label, so raw mining output is
//! dominated by trivially true rules inside one branch (`Item/Pump -> Item`)
//! and by rules pairing siblings of one branch. A rule survives only if each
//! of its labels comes from a different top-level category.

use quarry_core::constants::PROGRESS_INTERVAL;
use quarry_core::types::Rule;

/// Drop rules repeating a top-level category, then sort by lift descending.
///
/// The sort is stable: equal-lift rules keep the order they arrived in.
pub fn filter_and_rank<I>(rules: I) -> Vec<Rule>
where
    I: IntoIterator<Item = Rule>,
{
    let mut total = 0;
    let mut kept = Vec::new();
    for (i, rule) in rules.into_iter().enumerate() {
        total += 1;
        if !rule.repeats_top_level() {
            kept.push(rule);
        }
        if i % PROGRESS_INTERVAL == 0 {
            tracing::debug!(processed = i, kept = kept.len(), "filtering rules");
        }
    }

    kept.sort_by(|a, b| b.lift.total_cmp(&a.lift));

    tracing::info!(total, kept = kept.len(), "filtered rules");
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(lhs: &[&str], rhs: &[&str], lift: f64) -> Rule {
        Rule {
            lhs: lhs.iter().map(|s| s.to_string()).collect(),
            rhs: rhs.iter().map(|s| s.to_string()).collect(),
            support: 0.5,
            confidence: 0.5,
            lift,
        }
    }

    #[test]
    fn test_same_branch_rules_removed() {
        let rules = vec![
            rule(&["A"], &["A/1"], 1.0),
            rule(&["A/1"], &["A/2"], 3.0),
            rule(&["A/1"], &["C/1"], 1.0),
            rule(&["A/1", "B"], &["B/1"], 2.0),
        ];
        let kept = filter_and_rank(rules);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].full_name(), "A/1 -> C/1");
    }

    #[test]
    fn test_sorted_by_lift_descending_stable() {
        let rules = vec![
            rule(&["A"], &["B"], 1.0),
            rule(&["C"], &["D"], 4.0),
            rule(&["E"], &["F"], 1.0),
            rule(&["G"], &["H"], 2.5),
        ];
        let kept = filter_and_rank(rules);
        let names: Vec<String> = kept.iter().map(Rule::full_name).collect();
        assert_eq!(names, vec!["C -> D", "G -> H", "A -> B", "E -> F"]);
    }

    #[test]
    fn test_empty() {
        assert!(filter_and_rank(Vec::new()).is_empty());
    }
}
