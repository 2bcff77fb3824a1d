//! Object member extractors.

use super::{Extract, JsonPath, SortKind};
use crate::engine::SortableItem;
use serde_json::{Map, Value as Json};

/// Sorts member names of every object.
pub struct ObjectKeys;

/// Sorts member names only when every value is a string.
pub struct StringEnum;

impl Extract for ObjectKeys {
    fn kind(&self) -> SortKind {
        SortKind::ObjectKeys
    }

    fn extract(&self, node: &Json, at: &JsonPath) -> Option<Vec<SortableItem<JsonPath>>> {
        node.as_object().map(|map| member_items(map, at))
    }
}

impl Extract for StringEnum {
    fn kind(&self) -> SortKind {
        SortKind::StringEnum
    }

    fn extract(&self, node: &Json, at: &JsonPath) -> Option<Vec<SortableItem<JsonPath>>> {
        let map = node.as_object()?;
        if !map.values().all(Json::is_string) {
            return None;
        }
        Some(member_items(map, at))
    }
}

fn member_items(map: &Map<String, Json>, at: &JsonPath) -> Vec<SortableItem<JsonPath>> {
    map.keys()
        .enumerate()
        .map(|(i, k)| SortableItem::new(k.as_str(), i, at.key(k)))
        .collect()
}
