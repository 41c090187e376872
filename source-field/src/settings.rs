//! Field settings as stored by the host and the resolved field configuration.

use serde::{Deserialize, Deserializer, Serialize, de};
use source_field_id::SourceCategory;

use crate::error::FieldError;

const ALLOW_ALL: &str = "*";

/// Which sources an editor may pick from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AllowedSourcesRepr", into = "AllowedSourcesRepr")]
pub enum AllowedSources {
    /// No restriction; offer every source of the category.
    All,
    /// Only these `"<tag>:<uid>"` references, in this order.
    Only(Vec<String>),
}

impl Default for AllowedSources {
    fn default() -> Self {
        Self::Only(Vec::new())
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum AllowedSourcesRepr {
    Wildcard(String),
    List(Vec<String>),
}

impl TryFrom<AllowedSourcesRepr> for AllowedSources {
    type Error = String;

    fn try_from(repr: AllowedSourcesRepr) -> Result<Self, Self::Error> {
        match repr {
            AllowedSourcesRepr::Wildcard(s) if s == ALLOW_ALL => Ok(Self::All),
            AllowedSourcesRepr::Wildcard(s) if s.is_empty() => Ok(Self::Only(Vec::new())),
            AllowedSourcesRepr::Wildcard(s) => Err(format!(
                "allowed sources must be \"{ALLOW_ALL}\" or a list, got \"{s}\""
            )),
            AllowedSourcesRepr::List(list) => Ok(Self::Only(list)),
        }
    }
}

impl From<AllowedSources> for AllowedSourcesRepr {
    fn from(allowed: AllowedSources) -> Self {
        match allowed {
            AllowedSources::All => Self::Wildcard(ALLOW_ALL.to_owned()),
            AllowedSources::Only(list) => Self::List(list),
        }
    }
}

/// Whether the editor picks one source or several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    Multiple,
    Single,
}

impl SelectionMode {
    /// A limit of exactly one means single selection; no limit, zero, or
    /// anything above one means multiple.
    #[must_use]
    pub fn from_limit(limit: Option<u32>) -> Self {
        match limit {
            Some(1) => Self::Single,
            _ => Self::Multiple,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LimitRepr {
    Number(u32),
    Text(String),
}

fn deserialize_limit<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<LimitRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(LimitRepr::Number(n)) => Ok(Some(n)),
        Some(LimitRepr::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(LimitRepr::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("limit must be a number, got \"{s}\""))),
    }
}

/// Field settings in the shape the host persists them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldSettings {
    /// Category name: a tag such as `section`, or a host element type name.
    pub source_type: String,
    /// Stored as a number or, by the host, as a string; `""` means no limit.
    #[serde(deserialize_with = "deserialize_limit")]
    pub limit: Option<u32>,
    pub entry_sources: AllowedSources,
    pub category_sources: AllowedSources,
    pub tag_sources: AllowedSources,
    pub commerce_sources: AllowedSources,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            source_type: SourceCategory::EntrySection.tag().to_owned(),
            limit: None,
            entry_sources: AllowedSources::default(),
            category_sources: AllowedSources::default(),
            tag_sources: AllowedSources::default(),
            commerce_sources: AllowedSources::default(),
        }
    }
}

impl FieldSettings {
    /// Decode settings from a JSON value.
    ///
    /// # Errors
    /// Returns [`FieldError::InvalidSettings`] if the value does not have the
    /// settings shape.
    pub fn from_json(value: serde_json::Value) -> Result<Self, FieldError> {
        Ok(serde_json::from_value(value)?)
    }

    /// The allow-list stored for `category`.
    #[must_use]
    pub fn sources_for(&self, category: SourceCategory) -> &AllowedSources {
        match category {
            SourceCategory::EntrySection => &self.entry_sources,
            SourceCategory::CategoryGroup => &self.category_sources,
            SourceCategory::TagGroup => &self.tag_sources,
            SourceCategory::CommerceProductType => &self.commerce_sources,
        }
    }

    /// Resolve the configured category and pick its allow-list.
    ///
    /// # Errors
    /// Returns [`FieldError::UnknownSourceType`] if `source_type` names no
    /// known category. The field cannot be used until this is fixed.
    pub fn resolve(&self) -> Result<FieldConfig, FieldError> {
        let source_category: SourceCategory = self.source_type.parse()?;
        Ok(FieldConfig {
            source_category,
            allowed_sources: self.sources_for(source_category).clone(),
            selection_limit: self.limit,
        })
    }
}

/// The configuration one field instance runs with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub source_category: SourceCategory,
    pub allowed_sources: AllowedSources,
    pub selection_limit: Option<u32>,
}

impl FieldConfig {
    #[must_use]
    pub fn new(source_category: SourceCategory) -> Self {
        Self {
            source_category,
            allowed_sources: AllowedSources::All,
            selection_limit: None,
        }
    }

    #[must_use]
    pub fn with_allowed_sources(mut self, allowed_sources: AllowedSources) -> Self {
        self.allowed_sources = allowed_sources;
        self
    }

    #[must_use]
    pub fn with_selection_limit(mut self, limit: Option<u32>) -> Self {
        self.selection_limit = limit;
        self
    }

    #[must_use]
    pub fn selection_mode(&self) -> SelectionMode {
        SelectionMode::from_limit(self.selection_limit)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_selection_mode_from_limit() {
        assert_eq!(SelectionMode::from_limit(None), SelectionMode::Multiple);
        assert_eq!(SelectionMode::from_limit(Some(0)), SelectionMode::Multiple);
        assert_eq!(SelectionMode::from_limit(Some(1)), SelectionMode::Single);
        assert_eq!(SelectionMode::from_limit(Some(2)), SelectionMode::Multiple);
    }

    #[test]
    fn test_allowed_sources_wildcard() {
        let a: AllowedSources = serde_json::from_value(json!("*")).unwrap();
        assert_eq!(a, AllowedSources::All);
        assert_eq!(serde_json::to_value(&a).unwrap(), json!("*"));
    }

    #[test]
    fn test_allowed_sources_list_and_empty_string() {
        let a: AllowedSources = serde_json::from_value(json!(["section:s-1"])).unwrap();
        assert_eq!(a, AllowedSources::Only(vec!["section:s-1".to_owned()]));
        let empty: AllowedSources = serde_json::from_value(json!("")).unwrap();
        assert_eq!(empty, AllowedSources::Only(Vec::new()));
    }

    #[test]
    fn test_allowed_sources_rejects_other_strings() {
        let err = serde_json::from_value::<AllowedSources>(json!("some")).unwrap_err();
        assert!(err.to_string().contains("must be \"*\""), "got: {err}");
    }

    #[test]
    fn test_settings_defaults() {
        let s = FieldSettings::from_json(json!({})).unwrap();
        assert_eq!(s, FieldSettings::default());
        let config = s.resolve().unwrap();
        assert_eq!(config.source_category, SourceCategory::EntrySection);
        assert_eq!(config.allowed_sources, AllowedSources::Only(Vec::new()));
        assert_eq!(config.selection_mode(), SelectionMode::Multiple);
    }

    #[test]
    fn test_settings_resolve_picks_category_list() {
        let s = FieldSettings::from_json(json!({
            "sourceType": r"craft\elements\Tag",
            "limit": 1,
            "entrySources": "*",
            "tagSources": ["tag:t-1", "tag:t-2"]
        }))
        .unwrap();
        let config = s.resolve().unwrap();
        assert_eq!(config.source_category, SourceCategory::TagGroup);
        assert_eq!(
            config.allowed_sources,
            AllowedSources::Only(vec!["tag:t-1".to_owned(), "tag:t-2".to_owned()])
        );
        assert_eq!(config.selection_mode(), SelectionMode::Single);
    }

    #[test]
    fn test_settings_unknown_source_type_is_fatal() {
        let s = FieldSettings {
            source_type: r"craft\elements\Asset".to_owned(),
            ..FieldSettings::default()
        };
        let err = s.resolve().unwrap_err();
        assert!(matches!(err, FieldError::UnknownSourceType(_)), "got: {err}");
        assert!(err.to_string().contains("misconfigured"), "got: {err}");
    }

    #[test]
    fn test_settings_invalid_shape() {
        let err = FieldSettings::from_json(json!({"limit": "many"})).unwrap_err();
        assert!(matches!(err, FieldError::InvalidSettings(_)), "got: {err}");
        assert!(err.to_string().contains("limit must be a number"), "got: {err}");
    }

    #[test]
    fn test_settings_limit_stored_as_string() {
        let empty = FieldSettings::from_json(json!({
            "sourceType": "section",
            "limit": "",
            "entrySources": "*"
        }))
        .unwrap();
        assert_eq!(empty.limit, None);
        assert_eq!(empty.resolve().unwrap().selection_mode(), SelectionMode::Multiple);

        let two = FieldSettings::from_json(json!({"limit": "2"})).unwrap();
        assert_eq!(two.limit, Some(2));

        let one = FieldSettings::from_json(json!({"limit": "1"})).unwrap();
        assert_eq!(one.resolve().unwrap().selection_mode(), SelectionMode::Single);
    }

    #[test]
    fn test_settings_limit_number_or_null() {
        let s = FieldSettings::from_json(json!({"limit": 3})).unwrap();
        assert_eq!(s.limit, Some(3));
        let s = FieldSettings::from_json(json!({"limit": null})).unwrap();
        assert_eq!(s.limit, None);
    }
}
