//! Option lists behind the editor input and the settings type picker.
//!
//! Rendering is left to the host; these are the label/value pairs it renders.

use serde::{Deserialize, Serialize};
use source_field_id::{SourceCategory, SourceRef, parse_source_ref};
use tracing::debug;

use crate::resolver::{CategoryEnumerator, CategoryResolver, SourceRecord};
use crate::selection::{SelectionItem, SelectionSet};
use crate::settings::{AllowedSources, FieldConfig, SelectionMode};

/// One choice offered to the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceOption {
    pub label: String,
    pub value: String,
}

impl SourceOption {
    fn from_record(category: SourceCategory, record: &SourceRecord) -> Self {
        Self {
            label: record.name.clone(),
            value: SourceRef::new(category, record.uid.as_str()).to_string(),
        }
    }
}

/// Every source of `category` the editor could be offered.
///
/// Single sections hold exactly one entry and are never offered.
#[must_use]
pub fn available_options<E>(category: SourceCategory, enumerator: &E) -> Vec<SourceOption>
where
    E: CategoryEnumerator + ?Sized,
{
    enumerator
        .list_all(category)
        .iter()
        .filter(|r| !(category == SourceCategory::EntrySection && r.is_single()))
        .map(|r| SourceOption::from_record(category, r))
        .collect()
}

/// The options allowed by the field configuration, in allow-list order.
///
/// Allow-list entries are parsed strictly: a missing separator, an unknown
/// tag or an empty uid skips the entry, as does a uid that no longer
/// resolves. Lookup uses the field's category.
#[must_use]
pub fn allowed_options<R, E>(config: &FieldConfig, resolver: &R, enumerator: &E) -> Vec<SourceOption>
where
    R: CategoryResolver + ?Sized,
    E: CategoryEnumerator + ?Sized,
{
    let category = config.source_category;
    let allowed = match &config.allowed_sources {
        AllowedSources::All => return available_options(category, enumerator),
        AllowedSources::Only(allowed) => allowed,
    };

    allowed
        .iter()
        .filter_map(|entry| {
            let source_ref = match parse_source_ref(entry) {
                Ok(source_ref) => source_ref,
                Err(e) => {
                    debug!(error = %e, "skipping malformed allowed source");
                    return None;
                }
            };
            let record = resolver.resolve(category, &source_ref.uid);
            if record.is_none() {
                debug!(entry = %entry, %category, "skipping unresolvable allowed source");
            }
            record
        })
        .map(|r| SourceOption::from_record(category, &r))
        .collect()
}

/// Options for the settings source type picker.
///
/// Commerce product types are only offered when the commerce extension is enabled.
#[must_use]
pub fn source_types(commerce_enabled: bool) -> Vec<SourceOption> {
    SourceCategory::ALL
        .into_iter()
        .filter(|c| commerce_enabled || !c.requires_commerce())
        .map(|c| SourceOption {
            label: c.label().to_owned(),
            value: c.tag().to_owned(),
        })
        .collect()
}

/// Everything the host needs to render the field input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldInput {
    pub mode: SelectionMode,
    pub options: Vec<SourceOption>,
    /// Stored values of the current selection; at most one in single mode.
    pub selected: Vec<String>,
}

impl FieldInput {
    #[must_use]
    pub fn new(mode: SelectionMode, options: Vec<SourceOption>, selection: &SelectionSet) -> Self {
        let selected = match mode {
            SelectionMode::Multiple => selection.values(),
            SelectionMode::Single => selection.first().map(SelectionItem::value).into_iter().collect(),
        };
        Self {
            mode,
            options,
            selected,
        }
    }
}
