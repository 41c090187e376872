//! Turning a selection back into its stored form.
//!
//! The stored form is the ordered list of `"<tag>:<uid>"` strings. It keeps
//! only the uid; names and handles are looked up again on load.

use serde_json::Value;
use source_field_id::{SourceCategory, SourceRef};
use tracing::debug;

use crate::selection::SelectionSet;

/// A field value handed to the serializer.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A normalized selection.
    Selection(SelectionSet),
    /// A list of `{handle?, uid}` records, as older callers pass it.
    Raw(Value),
}

impl From<SelectionSet> for FieldValue {
    fn from(set: SelectionSet) -> Self {
        Self::Selection(set)
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::Raw(value)
    }
}

/// Stored form of a selection.
#[must_use]
pub fn serialize(set: &SelectionSet) -> Vec<String> {
    set.values()
}

/// Stored form of a list of `{handle?, uid}` records.
///
/// Each record is tagged with `category`. Records without a string `uid`
/// are skipped, and anything other than an array or object of records
/// serializes to an empty list.
#[must_use]
pub fn serialize_records(category: SourceCategory, records: &Value) -> Vec<String> {
    let iter: Box<dyn Iterator<Item = &Value> + '_> = match records {
        Value::Array(items) => Box::new(items.iter()),
        Value::Object(map) => Box::new(map.values()),
        _ => return Vec::new(),
    };

    iter.filter_map(|record| {
        let uid = record.get("uid").and_then(Value::as_str);
        if uid.is_none() {
            debug!(%record, "skipping record without uid");
        }
        uid
    })
    .map(|uid| SourceRef::new(category, uid).to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SelectionItem;
    use serde_json::json;

    #[test]
    fn test_serialize_selection_in_order() {
        let set = SelectionSet::new(
            SourceCategory::CommerceProductType,
            vec![
                SelectionItem::new("Shirts", "shirts", "p-2", SourceCategory::CommerceProductType),
                SelectionItem::new("Hats", "hats", "p-1", SourceCategory::CommerceProductType),
            ],
        );
        assert_eq!(serialize(&set), vec!["commerce:p-2", "commerce:p-1"]);
    }

    #[test]
    fn test_serialize_empty_selection() {
        assert!(serialize(&SelectionSet::empty(SourceCategory::TagGroup)).is_empty());
    }

    #[test]
    fn test_serialize_records_uses_field_category() {
        let records = json!([
            {"handle": "news", "uid": "s-1"},
            {"uid": "s-2"},
        ]);
        assert_eq!(
            serialize_records(SourceCategory::EntrySection, &records),
            vec!["section:s-1", "section:s-2"]
        );
        assert_eq!(
            serialize_records(SourceCategory::CategoryGroup, &records),
            vec!["category:s-1", "category:s-2"]
        );
    }

    #[test]
    fn test_serialize_records_skips_records_without_uid() {
        let records = json!([{"handle": "news"}, {"uid": 4}, {"uid": "t-1"}, "tag:x"]);
        assert_eq!(
            serialize_records(SourceCategory::TagGroup, &records),
            vec!["tag:t-1"]
        );
    }

    #[test]
    fn test_serialize_records_non_collection_is_empty() {
        assert!(serialize_records(SourceCategory::TagGroup, &Value::Null).is_empty());
        assert!(serialize_records(SourceCategory::TagGroup, &json!("tag:x")).is_empty());
    }
}
