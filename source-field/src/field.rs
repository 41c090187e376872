//! The configured field: settings, stored values and editor input in one place.

use serde_json::Value;
use source_field_id::SourceCategory;

use crate::error::FieldError;
use crate::normalize::{NormalizeOutcome, normalize_with_report};
use crate::options::{FieldInput, allowed_options};
use crate::resolver::{CategoryEnumerator, CategoryResolver};
use crate::selection::SelectionSet;
use crate::serialize::{FieldValue, serialize, serialize_records};
use crate::settings::{FieldConfig, FieldSettings, SelectionMode};

/// A configured source field instance.
///
/// Holds no selection state of its own; every read builds a fresh
/// [`SelectionSet`] from the stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceField {
    config: FieldConfig,
}

impl SourceField {
    #[must_use]
    pub fn new(config: FieldConfig) -> Self {
        Self { config }
    }

    /// Build a field from persisted settings.
    ///
    /// # Errors
    /// Returns [`FieldError::UnknownSourceType`] if the settings name an
    /// unknown source category.
    pub fn from_settings(settings: &FieldSettings) -> Result<Self, FieldError> {
        Ok(Self::new(settings.resolve()?))
    }

    #[must_use]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    #[must_use]
    pub fn category(&self) -> SourceCategory {
        self.config.source_category
    }

    #[must_use]
    pub fn selection_mode(&self) -> SelectionMode {
        self.config.selection_mode()
    }

    /// Normalize a stored value. `fresh` marks an element that has never been saved.
    #[must_use]
    pub fn normalize_value<R>(&self, raw: Value, fresh: bool, resolver: &R) -> SelectionSet
    where
        R: CategoryResolver + ?Sized,
    {
        self.normalize_value_with_report(raw, fresh, resolver).selection
    }

    #[must_use]
    pub fn normalize_value_with_report<R>(
        &self,
        raw: Value,
        fresh: bool,
        resolver: &R,
    ) -> NormalizeOutcome
    where
        R: CategoryResolver + ?Sized,
    {
        normalize_with_report(raw, self.category(), fresh, resolver)
    }

    /// Stored form of a field value.
    ///
    /// Raw record lists are tagged with the field's category.
    #[must_use]
    pub fn serialize_value(&self, value: &FieldValue) -> Vec<String> {
        match value {
            FieldValue::Selection(set) => serialize(set),
            FieldValue::Raw(records) => serialize_records(self.category(), records),
        }
    }

    /// The options and current selection the editor input shows.
    #[must_use]
    pub fn input<R, E>(&self, selection: &SelectionSet, resolver: &R, enumerator: &E) -> FieldInput
    where
        R: CategoryResolver + ?Sized,
        E: CategoryEnumerator + ?Sized,
    {
        let options = allowed_options(&self.config, resolver, enumerator);
        FieldInput::new(self.selection_mode(), options, selection)
    }
}
