//! In-memory source providers and the category dispatch table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use source_field_id::SourceCategory;
use tracing::debug;

use crate::resolver::{CategoryEnumerator, CategoryResolver, SourceProvider, SourceRecord};

/// A [`SourceProvider`] over a fixed, ordered list of records.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<SourceRecord>,
}

impl StaticSource {
    #[must_use]
    pub fn new(records: Vec<SourceRecord>) -> Self {
        Self { records }
    }
}

impl SourceProvider for StaticSource {
    fn find_by_uid(&self, uid: &str) -> Option<SourceRecord> {
        self.records.iter().find(|r| r.uid == uid).cloned()
    }

    fn list_all(&self) -> Vec<SourceRecord> {
        self.records.clone()
    }
}

/// Dispatch table from category to the provider that serves it.
///
/// A category without a provider behaves as an empty collection: lookups
/// return `None` and enumeration returns nothing. This is how an absent
/// commerce extension is represented.
#[derive(Default)]
pub struct SourceRegistry {
    providers: HashMap<SourceCategory, Box<dyn SourceProvider>>,
}

impl SourceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `provider` for `category`, replacing any earlier one.
    #[must_use]
    pub fn with_provider(
        mut self,
        category: SourceCategory,
        provider: impl SourceProvider + 'static,
    ) -> Self {
        self.register(category, provider);
        self
    }

    pub fn register(&mut self, category: SourceCategory, provider: impl SourceProvider + 'static) {
        self.providers.insert(category, Box::new(provider));
    }

    #[must_use]
    pub fn has_provider(&self, category: SourceCategory) -> bool {
        self.providers.contains_key(&category)
    }

    /// Whether commerce product types can be resolved.
    #[must_use]
    pub fn commerce_enabled(&self) -> bool {
        self.has_provider(SourceCategory::CommerceProductType)
    }

    /// Categories with a registered provider, in picker order.
    #[must_use]
    pub fn categories(&self) -> Vec<SourceCategory> {
        SourceCategory::ALL
            .into_iter()
            .filter(|c| self.has_provider(*c))
            .collect()
    }
}

impl std::fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceRegistry")
            .field("categories", &self.categories())
            .finish_non_exhaustive()
    }
}

impl CategoryResolver for SourceRegistry {
    fn resolve(&self, category: SourceCategory, uid: &str) -> Option<SourceRecord> {
        let Some(provider) = self.providers.get(&category) else {
            debug!(%category, uid, "no provider registered for category");
            return None;
        };
        provider.find_by_uid(uid)
    }
}

impl CategoryEnumerator for SourceRegistry {
    fn list_all(&self, category: SourceCategory) -> Vec<SourceRecord> {
        self.providers
            .get(&category)
            .map(|p| p.list_all())
            .unwrap_or_default()
    }
}

/// Serializable snapshot of every source the host knows about.
///
/// `product_types` is absent when the commerce extension is not installed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceCatalog {
    pub sections: Vec<SourceRecord>,
    pub category_groups: Vec<SourceRecord>,
    pub tag_groups: Vec<SourceRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_types: Option<Vec<SourceRecord>>,
}

impl SourceCatalog {
    /// Build a registry with one [`StaticSource`] per catalog list.
    #[must_use]
    pub fn into_registry(self) -> SourceRegistry {
        let mut registry = SourceRegistry::new()
            .with_provider(SourceCategory::EntrySection, StaticSource::new(self.sections))
            .with_provider(
                SourceCategory::CategoryGroup,
                StaticSource::new(self.category_groups),
            )
            .with_provider(SourceCategory::TagGroup, StaticSource::new(self.tag_groups));

        if let Some(product_types) = self.product_types {
            registry.register(
                SourceCategory::CommerceProductType,
                StaticSource::new(product_types),
            );
        }

        registry
    }
}
