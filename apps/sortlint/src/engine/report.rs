//! Diagnostics built from scan violations.

use super::plan::FixPlan;
use super::scan::Violation;
use super::SortableItem;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Stable identifier of the reported condition.
pub enum MessageId {
    InvalidOrder,
}

impl MessageId {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageId::InvalidOrder => "invalidOrder",
        }
    }
}

#[derive(Debug, Clone)]
/// One reported violation, located at the misplaced item.
pub struct Diagnostic<R> {
    pub message_id: MessageId,
    pub node: R,
    pub key: String,
    pub previous_key: String,
    /// The whole reordering, shared by every diagnostic of the same sequence.
    pub fix: Option<Arc<FixPlan>>,
}

/// Emit one diagnostic per violation, in scan order.
pub fn report<R: Clone>(
    violations: &[Violation],
    items: &[SortableItem<R>],
    fix: Option<FixPlan>,
) -> Vec<Diagnostic<R>> {
    let fix = fix.map(Arc::new);
    violations
        .iter()
        .filter_map(|v| {
            let item = items.get(v.position)?;
            let previous = items.get(v.previous_position)?;
            Some(Diagnostic {
                message_id: MessageId::InvalidOrder,
                node: item.node.clone(),
                key: item.key.clone(),
                previous_key: previous.key.clone(),
                fix: fix.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::comparator::{Comparator, SortConfig};
    use crate::engine::plan::plan;
    use crate::engine::scan::scan;
    use crate::engine::test_items;

    #[test]
    fn test_location_is_the_violating_item() {
        let items = test_items(&["b", "a", "c"]);
        let cmp = Comparator::new(SortConfig::default());
        let out = report(&scan(&items, &cmp), &items, None);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].node, 1);
        assert_eq!(out[0].key, "a");
        assert_eq!(out[0].previous_key, "b");
        assert_eq!(out[0].message_id.as_str(), "invalidOrder");
        assert!(out[0].fix.is_none());
    }

    #[test]
    fn test_every_diagnostic_shares_one_plan() {
        let items = test_items(&["d", "c", "b", "a"]);
        let cmp = Comparator::new(SortConfig::default());
        let violations = scan(&items, &cmp);
        let out = report(&violations, &items, Some(plan(&items, &cmp)));
        assert_eq!(out.len(), 3);
        let first = out[0].fix.as_ref().unwrap();
        for d in &out[1..] {
            assert!(Arc::ptr_eq(first, d.fix.as_ref().unwrap()));
        }
        let keys: Vec<&str> = out.iter().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, vec!["c", "b", "a"]);
    }
}
