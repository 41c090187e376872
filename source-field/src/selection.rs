use serde::{Deserialize, Serialize};
use source_field_id::{SourceCategory, SourceRef};
use tracing::warn;

/// One resolved source an editor picked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionItem {
    pub name: String,
    pub handle: String,
    pub uid: String,
    pub category: SourceCategory,
}

impl SelectionItem {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        handle: impl Into<String>,
        uid: impl Into<String>,
        category: SourceCategory,
    ) -> Self {
        Self {
            name: name.into(),
            handle: handle.into(),
            uid: uid.into(),
            category,
        }
    }

    /// The stored reference for this item.
    #[must_use]
    pub fn source_ref(&self) -> SourceRef {
        SourceRef::new(self.category, self.uid.as_str())
    }

    /// The stored `"<tag>:<uid>"` string for this item.
    #[must_use]
    pub fn value(&self) -> String {
        self.source_ref().to_string()
    }
}

/// An ordered, normalized list of selected sources that all share one category.
///
/// Built fresh on every normalization pass and never mutated afterwards.
/// Item order is the order of the stored value and drives [`first`](Self::first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionSet {
    items: Vec<SelectionItem>,
    category: SourceCategory,
}

impl SelectionSet {
    /// Build a set, keeping only items that belong to `category`.
    #[must_use]
    pub fn new(category: SourceCategory, items: Vec<SelectionItem>) -> Self {
        let items = items
            .into_iter()
            .filter(|item| {
                let keep = item.category == category;
                if !keep {
                    warn!(
                        uid = %item.uid,
                        item_category = %item.category,
                        set_category = %category,
                        "dropping selection item from a different category"
                    );
                }
                keep
            })
            .collect();
        Self { items, category }
    }

    #[must_use]
    pub fn empty(category: SourceCategory) -> Self {
        Self {
            items: Vec::new(),
            category,
        }
    }

    #[must_use]
    pub fn category(&self) -> SourceCategory {
        self.category
    }

    #[must_use]
    pub fn items(&self) -> &[SelectionItem] {
        &self.items
    }

    /// The first selected source, or `None` when nothing is selected.
    #[must_use]
    pub fn first(&self) -> Option<&SelectionItem> {
        self.items.first()
    }

    /// Every selected source in order, or `None` when nothing is selected.
    #[must_use]
    pub fn all(&self) -> Option<&[SelectionItem]> {
        if self.items.is_empty() {
            None
        } else {
            Some(&self.items)
        }
    }

    /// Handles of the selected sources, in selection order.
    #[must_use]
    pub fn handles(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.handle.as_str()).collect()
    }

    #[must_use]
    pub fn uids(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.uid.as_str()).collect()
    }

    /// Stored `"<tag>:<uid>"` strings of the selected sources, in selection order.
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        self.items.iter().map(SelectionItem::value).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SelectionItem> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a SelectionSet {
    type Item = &'a SelectionItem;
    type IntoIter = std::slice::Iter<'a, SelectionItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
