//! Collaborator contracts the field delegates to.
//!
//! The field never enumerates sections or runs queries itself. Callers hand it
//! a [`CategoryResolver`] for uid lookups, a [`CategoryEnumerator`] for option
//! lists and a [`QueryExecutor`] for running built criteria.

use serde::{Deserialize, Serialize};
use source_field_id::SourceCategory;

use crate::criteria::Criteria;

/// How a content section stores its entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Single,
    Channel,
    Structure,
}

/// A source as known to the host: a section, group or product type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub name: String,
    pub handle: String,
    pub uid: String,
    /// Only set for sections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_type: Option<SectionType>,
}

impl SourceRecord {
    #[must_use]
    pub fn new(name: impl Into<String>, handle: impl Into<String>, uid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handle: handle.into(),
            uid: uid.into(),
            section_type: None,
        }
    }

    #[must_use]
    pub fn with_section_type(mut self, section_type: SectionType) -> Self {
        self.section_type = Some(section_type);
        self
    }

    #[must_use]
    pub fn is_single(&self) -> bool {
        self.section_type == Some(SectionType::Single)
    }
}

/// Looks a source up by uid within a category.
pub trait CategoryResolver {
    /// Return the source with this uid, or `None` if the category has no such
    /// source or the category is unavailable.
    fn resolve(&self, category: SourceCategory, uid: &str) -> Option<SourceRecord>;
}

impl<F> CategoryResolver for F
where
    F: Fn(SourceCategory, &str) -> Option<SourceRecord>,
{
    fn resolve(&self, category: SourceCategory, uid: &str) -> Option<SourceRecord> {
        self(category, uid)
    }
}

/// Lists every source of a category, in host order.
pub trait CategoryEnumerator {
    fn list_all(&self, category: SourceCategory) -> Vec<SourceRecord>;
}

/// Runs built criteria against the host's content store.
///
/// `Output` is whatever the host returns, typically a lazy sequence of
/// content items.
pub trait QueryExecutor {
    type Output;

    fn execute(&self, category: SourceCategory, criteria: &Criteria) -> Self::Output;
}

/// One category's lookup and enumeration.
pub trait SourceProvider: Send + Sync {
    fn find_by_uid(&self, uid: &str) -> Option<SourceRecord>;

    fn list_all(&self) -> Vec<SourceRecord>;
}
