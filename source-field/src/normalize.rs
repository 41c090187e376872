//! Turning a stored value into a [`SelectionSet`].

use serde::Serialize;
use serde_json::Value;
use source_field_id::{SourceCategory, split_source_ref};
use tracing::debug;

use crate::raw::{decode_value, entries};
use crate::resolver::CategoryResolver;
use crate::selection::{SelectionItem, SelectionSet};

/// Why an entry of the stored value did not make it into the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// The entry has no `:` separator.
    MissingSeparator,
    /// The resolver does not know the entry's uid.
    Unresolved,
}

impl DropReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingSeparator => "missing_separator",
            Self::Unresolved => "unresolved",
        }
    }
}

/// An entry that was left out of the normalized selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedEntry {
    pub raw: String,
    pub reason: DropReason,
}

/// A normalized selection plus the entries that were dropped on the way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizeOutcome {
    pub selection: SelectionSet,
    pub dropped: Vec<DroppedEntry>,
}

impl NormalizeOutcome {
    /// Whether every stored entry resolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.dropped.is_empty()
    }
}

/// Normalize a stored value into a selection of `category` sources.
///
/// See [`normalize_with_report`]; this drops the report.
#[must_use]
pub fn normalize<R>(raw: Value, category: SourceCategory, fresh: bool, resolver: &R) -> SelectionSet
where
    R: CategoryResolver + ?Sized,
{
    normalize_with_report(raw, category, fresh, resolver).selection
}

/// Normalize a stored value and report which entries were dropped.
///
/// Every entry is looked up by the uid after its first `:` within the
/// field's configured `category`; the tag in front of the separator is not
/// consulted. Entries without a separator and uids the resolver does not
/// know are dropped. Nothing here fails: a malformed value simply yields
/// fewer (or zero) items.
#[must_use]
pub fn normalize_with_report<R>(
    raw: Value,
    category: SourceCategory,
    fresh: bool,
    resolver: &R,
) -> NormalizeOutcome
where
    R: CategoryResolver + ?Sized,
{
    let decoded = match decode_value(raw) {
        Value::Null if fresh => Value::Array(Vec::new()),
        other => other,
    };

    let mut items = Vec::new();
    let mut dropped = Vec::new();

    for entry in entries(&decoded) {
        let Some((_, uid)) = split_source_ref(&entry) else {
            debug!(entry = %entry, "dropping stored source without ':' separator");
            dropped.push(DroppedEntry {
                raw: entry,
                reason: DropReason::MissingSeparator,
            });
            continue;
        };

        let Some(record) = resolver.resolve(category, uid) else {
            debug!(entry = %entry, %category, "dropping unresolvable source");
            dropped.push(DroppedEntry {
                raw: entry,
                reason: DropReason::Unresolved,
            });
            continue;
        };

        items.push(SelectionItem::new(
            record.name,
            record.handle,
            record.uid,
            category,
        ));
    }

    NormalizeOutcome {
        selection: SelectionSet::new(category, items),
        dropped,
    }
}
