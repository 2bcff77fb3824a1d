//! Adapters that turn a JSON node into a sequence the engine can check.
//!
//! Each kind is a separate `Extract` implementation. An adapter returns
//! `None` when the node does not satisfy its precondition, in which case the
//! node is skipped rather than reported.

mod array;
mod members;
pub mod path;

pub use array::StringArray;
pub use members::{ObjectKeys, StringEnum};
pub use path::{collect_targets, JsonPath, Segment, Selector};

use crate::engine::{FixPlan, SortableItem};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Which sequence inside a node gets sorted.
pub enum SortKind {
    /// Member names of any object.
    ObjectKeys,
    /// Member names of an object whose values are all strings.
    StringEnum,
    /// Items of an array whose items are all strings.
    StringArray,
}

impl SortKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKind::ObjectKeys => "object-keys",
            SortKind::StringEnum => "string-enum",
            SortKind::StringArray => "string-array",
        }
    }

    /// Plural noun used in messages.
    pub fn noun(&self) -> &'static str {
        match self {
            SortKind::ObjectKeys => "object keys",
            SortKind::StringEnum => "string enum members",
            SortKind::StringArray => "string array items",
        }
    }

    pub fn extractor(&self) -> &'static dyn Extract {
        match self {
            SortKind::ObjectKeys => &ObjectKeys,
            SortKind::StringEnum => &StringEnum,
            SortKind::StringArray => &StringArray,
        }
    }
}

/// Turn one node into an ordered sequence of sortable items.
pub trait Extract: Send + Sync {
    fn kind(&self) -> SortKind;

    /// Items in document order with positions `0..n`, each located at its
    /// member path. `None` when `node` is not a sequence of this kind.
    fn extract(&self, node: &Json, at: &JsonPath) -> Option<Vec<SortableItem<JsonPath>>>;
}

/// Reorder the members of an object or the items of an array.
///
/// Values travel with their keys. Returns whether anything moved.
pub fn apply_plan(node: &mut Json, plan: &FixPlan) -> bool {
    if plan.is_empty() {
        return false;
    }
    match node {
        Json::Object(map) => {
            let entries: Vec<(String, Json)> = std::mem::take(map).into_iter().collect();
            *map = plan.apply(entries).into_iter().collect();
            true
        }
        Json::Array(arr) => {
            let items = std::mem::take(arr);
            *arr = plan.apply(items);
            true
        }
        _ => false,
    }
}
