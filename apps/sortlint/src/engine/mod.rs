//! Sort-order verification and fix computation.
//!
//! The engine sees a sequence only as keys plus positions; `node` is an
//! opaque handle passed back in diagnostics. One call runs:
//! - `comparator`: build the order relation from `SortConfig`.
//! - `scan`: find every item that sorts before the last accepted item.
//! - `plan`: stable-sort the sequence and derive the moves.
//! - `report`: one diagnostic per violation, sharing the plan.
//!
//! Calls share no state and may run in parallel.

pub mod comparator;
pub mod plan;
pub mod report;
pub mod scan;

pub use comparator::{Comparator, SortConfig, SortOrder};
pub use plan::{FixPlan, Move};
pub use report::{Diagnostic, MessageId};
pub use scan::Violation;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A key to compare, its index in the original sequence, and a caller handle.
pub struct SortableItem<R> {
    pub key: String,
    pub position: usize,
    pub node: R,
}

impl<R> SortableItem<R> {
    pub fn new(key: impl Into<String>, position: usize, node: R) -> Self {
        SortableItem {
            key: key.into(),
            position,
            node,
        }
    }
}

/// Check one sequence and return its diagnostics.
///
/// With `fix` set, every diagnostic carries the full reordering.
pub fn check<R: Clone>(
    items: &[SortableItem<R>],
    config: SortConfig,
    fix: bool,
) -> Vec<Diagnostic<R>> {
    let comparator = Comparator::new(config);
    let violations = scan::scan(items, &comparator);
    if violations.is_empty() {
        return Vec::new();
    }
    let fix_plan = fix.then(|| plan::plan(items, &comparator));
    report::report(&violations, items, fix_plan)
}

#[cfg(test)]
pub(crate) fn test_items(keys: &[&str]) -> Vec<SortableItem<usize>> {
    keys.iter()
        .enumerate()
        .map(|(i, k)| SortableItem::new(*k, i, i))
        .collect()
}
