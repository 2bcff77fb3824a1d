//! Property-based tests for the sort engine.
//!
//! These tests verify that:
//! - Applying a fix plan always yields a sequence that scans clean
//! - A fixed sequence needs no further fix
//! - Items with equal keys keep their relative order
//! - Already sorted sequences produce no violations
//! - Violations point at real drops against unflagged predecessors

use proptest::prelude::*;
use sortlint::engine::plan::plan;
use sortlint::engine::scan::scan;
use sortlint::engine::{check, Comparator, SortConfig, SortOrder, SortableItem};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

fn items(keys: &[String]) -> Vec<SortableItem<usize>> {
    keys.iter()
        .enumerate()
        .map(|(i, k)| SortableItem::new(k.as_str(), i, i))
        .collect()
}

/// Short keys mixing case and digits so case folding and natural order matter.
fn arb_keys() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::string::string_regex(r"[abAB]{0,2}[0-9]{0,3}[abAB]?").unwrap(),
        0..12,
    )
}

fn arb_config() -> impl Strategy<Value = SortConfig> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(desc, case_sensitive, natural)| {
        SortConfig {
            order: if desc {
                SortOrder::Descending
            } else {
                SortOrder::Ascending
            },
            case_sensitive,
            natural,
        }
    })
}

proptest! {
    /// Applying the plan removes every violation.
    #[test]
    fn fixed_sequence_scans_clean(keys in arb_keys(), config in arb_config()) {
        let cmp = Comparator::new(config);
        let fixed = plan(&items(&keys), &cmp).apply(keys.clone());
        prop_assert!(scan(&items(&fixed), &cmp).is_empty());
    }

    /// A fixed sequence yields an empty plan.
    #[test]
    fn plan_is_idempotent(keys in arb_keys(), config in arb_config()) {
        let cmp = Comparator::new(config);
        let fixed = plan(&items(&keys), &cmp).apply(keys.clone());
        prop_assert!(plan(&items(&fixed), &cmp).is_empty());
    }

    /// Equal keys keep their original relative order.
    #[test]
    fn plan_is_stable(keys in arb_keys(), config in arb_config()) {
        let cmp = Comparator::new(config);
        let tagged: Vec<(usize, String)> = keys.iter().cloned().enumerate().collect();
        let after = plan(&items(&keys), &cmp).apply(tagged);
        for (i, (orig_a, key_a)) in after.iter().enumerate() {
            for (orig_b, key_b) in &after[i + 1..] {
                if cmp.compare(key_a, key_b) == Ordering::Equal {
                    prop_assert!(orig_a < orig_b);
                }
            }
        }
    }

    /// A sequence sorted by the comparator has no violations and needs no moves.
    #[test]
    fn sorted_input_has_no_false_positives(keys in arb_keys(), config in arb_config()) {
        let cmp = Comparator::new(config);
        let mut sorted = keys.clone();
        sorted.sort_by(|a, b| cmp.compare(a, b));
        prop_assert!(scan(&items(&sorted), &cmp).is_empty());
        prop_assert!(plan(&items(&sorted), &cmp).is_empty());
    }

    /// Each violation is a real drop against the nearest unflagged prior item.
    #[test]
    fn violations_reference_unflagged_predecessors(keys in arb_keys(), config in arb_config()) {
        let cmp = Comparator::new(config);
        let violations = scan(&items(&keys), &cmp);
        let flagged: HashSet<usize> = violations.iter().map(|v| v.position).collect();
        for v in &violations {
            prop_assert!(v.previous_position < v.position);
            prop_assert!(!flagged.contains(&v.previous_position));
            prop_assert_eq!(
                cmp.compare(&keys[v.previous_position], &keys[v.position]),
                Ordering::Greater
            );
            for between in v.previous_position + 1..v.position {
                prop_assert!(flagged.contains(&between));
            }
        }
    }

    /// All diagnostics of one call carry the same plan, located at the flagged items.
    #[test]
    fn diagnostics_share_one_plan(keys in arb_keys(), config in arb_config()) {
        let input = items(&keys);
        let diags = check(&input, config, true);
        let violations = scan(&input, &Comparator::new(config));
        prop_assert_eq!(diags.len(), violations.len());
        for (d, v) in diags.iter().zip(&violations) {
            prop_assert_eq!(d.node, v.position);
        }
        if let Some(first) = diags.first() {
            let shared = first.fix.as_ref().unwrap();
            prop_assert!(!shared.is_empty());
            for d in &diags {
                prop_assert!(Arc::ptr_eq(shared, d.fix.as_ref().unwrap()));
            }
        }
    }
}

#[test]
fn scenario_swapped_pair_is_fixed() {
    let keys: Vec<String> = ["b", "a", "c"].iter().map(|s| s.to_string()).collect();
    let cmp = Comparator::new(SortConfig::default());
    let v = scan(&items(&keys), &cmp);
    assert_eq!(v.len(), 1);
    assert_eq!((v[0].position, v[0].previous_position), (1, 0));
    let fixed = plan(&items(&keys), &cmp).apply(keys);
    assert_eq!(fixed, vec!["a", "b", "c"]);
}

#[test]
fn scenario_descending_with_duplicates() {
    let keys: Vec<String> = ["c", "b", "b", "a"].iter().map(|s| s.to_string()).collect();
    let desc = Comparator::new(SortConfig {
        order: SortOrder::Descending,
        ..SortConfig::default()
    });
    assert!(scan(&items(&keys), &desc).is_empty());
    let rising: Vec<String> = ["c", "a", "b"].iter().map(|s| s.to_string()).collect();
    assert_eq!(scan(&items(&rising), &desc).len(), 1);
}
