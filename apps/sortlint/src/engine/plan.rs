//! Fix planning: a stable target order and the moves that reach it.

use super::comparator::Comparator;
use super::SortableItem;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// The item originally at `from` belongs at `to`.
pub struct Move {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// A permutation of the original sequence into sorted order.
///
/// Items already in their target slot are left out, so a sorted input
/// produces an empty plan.
pub struct FixPlan {
    moves: Vec<Move>,
}

impl FixPlan {
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Reorder `items`, which must be the sequence the plan was computed from.
    ///
    /// Each item moves as a whole, so callers can carry attached structure
    /// (values, comments) along with the key. A plan whose moves do not fit
    /// `items` leaves the sequence untouched.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        let len = items.len();
        if self.moves.is_empty() || self.moves.iter().any(|m| m.from >= len || m.to >= len) {
            if !self.moves.is_empty() {
                tracing::warn!(len, moves = self.moves.len(), "fix plan does not fit sequence");
            }
            return items;
        }
        let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
        let mut moved: Vec<(usize, T)> = Vec::with_capacity(self.moves.len());
        for m in &self.moves {
            if let Some(item) = slots[m.from].take() {
                moved.push((m.to, item));
            }
        }
        for (to, item) in moved {
            slots[to] = Some(item);
        }
        slots.into_iter().flatten().collect()
    }
}

/// Compute the fix for `items` under `comparator`.
///
/// The target order is a stable sort by key: items with equal keys keep their
/// original relative order, which keeps repeated fixes deterministic.
pub fn plan<R>(items: &[SortableItem<R>], comparator: &Comparator) -> FixPlan {
    let mut sorted: Vec<&SortableItem<R>> = items.iter().collect();
    sorted.sort_by(|a, b| comparator.compare(&a.key, &b.key));
    let moves = sorted
        .iter()
        .enumerate()
        .filter(|(to, item)| item.position != *to)
        .map(|(to, item)| Move {
            from: item.position,
            to,
        })
        .collect();
    FixPlan { moves }
}
