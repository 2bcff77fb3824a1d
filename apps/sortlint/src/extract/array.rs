//! String array extractor.

use super::{Extract, JsonPath, SortKind};
use crate::engine::SortableItem;
use serde_json::Value as Json;

/// Sorts array items by value when every item is a string.
pub struct StringArray;

impl Extract for StringArray {
    fn kind(&self) -> SortKind {
        SortKind::StringArray
    }

    fn extract(&self, node: &Json, at: &JsonPath) -> Option<Vec<SortableItem<JsonPath>>> {
        node.as_array()?
            .iter()
            .enumerate()
            .map(|(i, v)| v.as_str().map(|s| SortableItem::new(s, i, at.index(i))))
            .collect()
    }
}
