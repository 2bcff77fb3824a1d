//! Violation scan over an ordered sequence.

use super::comparator::Comparator;
use super::SortableItem;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// An item that belongs before the item it is reported against.
pub struct Violation {
    pub position: usize,
    /// Nearest prior item that was never flagged itself.
    pub previous_position: usize,
}

/// Walk `items` left to right and report every drop in order.
///
/// The first item is always accepted. A later item that sorts before the
/// last accepted one is flagged and does not become the new reference, so a
/// single early offender yields reports only for the items it displaced.
pub fn scan<R>(items: &[SortableItem<R>], comparator: &Comparator) -> Vec<Violation> {
    let mut violations = Vec::new();
    let Some((first, rest)) = items.split_first() else {
        return violations;
    };
    let mut accepted = first;
    for item in rest {
        if comparator.compare(&accepted.key, &item.key) == Ordering::Greater {
            violations.push(Violation {
                position: item.position,
                previous_position: accepted.position,
            });
        } else {
            accepted = item;
        }
    }
    violations
}
