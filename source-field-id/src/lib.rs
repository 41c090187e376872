//! Source category and source reference primitives.
//!
//! This crate is the single source of truth for the `"<tag>:<uid>"` strings a
//! source field stores, and for the mapping between a [`SourceCategory`] and
//! its tag, criterion key and display label. It is used by the `source-field`
//! library and the `source-field` CLI.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Separator between the category tag and the uid in a stored source reference.
pub const SOURCE_REF_SEPARATOR: char = ':';

/// Host element type names legacy field settings use for each category.
const ELEMENT_TYPE_ENTRY: &str = r"craft\elements\Entry";
const ELEMENT_TYPE_CATEGORY: &str = r"craft\elements\Category";
const ELEMENT_TYPE_TAG: &str = r"craft\elements\Tag";
const ELEMENT_TYPE_PRODUCT: &str = r"craft\commerce\elements\Product";

/// The kind of source an editor can pick.
///
/// Determines which downstream collection a handle resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceCategory {
    /// Content-entry sections.
    EntrySection,
    /// Taxonomy category groups.
    CategoryGroup,
    /// Taxonomy tag groups.
    TagGroup,
    /// Commerce product types (requires the commerce extension).
    CommerceProductType,
}

impl SourceCategory {
    /// Every category, in the order the settings type picker lists them.
    pub const ALL: [Self; 4] = [
        Self::EntrySection,
        Self::CategoryGroup,
        Self::TagGroup,
        Self::CommerceProductType,
    ];

    /// Short fixed prefix identifying this category in serialized form.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::EntrySection => "section",
            Self::CategoryGroup => "category",
            Self::TagGroup => "tag",
            Self::CommerceProductType => "commerce",
        }
    }

    /// Filter key the selected handles are merged under when building query criteria.
    #[must_use]
    pub const fn criterion_key(self) -> &'static str {
        match self {
            Self::EntrySection => "section",
            Self::CategoryGroup | Self::TagGroup => "group",
            Self::CommerceProductType => "type",
        }
    }

    /// Display label for the source type picker.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::EntrySection => "Entries",
            Self::CategoryGroup => "Categories",
            Self::TagGroup => "Tags",
            Self::CommerceProductType => "Products",
        }
    }

    /// Host element type name for this category.
    #[must_use]
    pub const fn element_type(self) -> &'static str {
        match self {
            Self::EntrySection => ELEMENT_TYPE_ENTRY,
            Self::CategoryGroup => ELEMENT_TYPE_CATEGORY,
            Self::TagGroup => ELEMENT_TYPE_TAG,
            Self::CommerceProductType => ELEMENT_TYPE_PRODUCT,
        }
    }

    /// Whether this category is only available with the commerce extension.
    #[must_use]
    pub const fn requires_commerce(self) -> bool {
        matches!(self, Self::CommerceProductType)
    }

    /// Look up a category by its serialized tag (`section`, `category`, `tag`, `commerce`).
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.tag() == tag)
    }
}

impl fmt::Display for SourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A category name that matches no tag, variant name or host element type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown source category '{name}'")]
pub struct UnknownCategoryError {
    /// The name that failed to map.
    pub name: String,
}

impl FromStr for SourceCategory {
    type Err = UnknownCategoryError;

    /// Accepts the tag, the `snake_case` variant name, or the host element type
    /// name (with or without a leading backslash).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let unqualified = name.strip_prefix('\\').unwrap_or(name);

        Self::ALL
            .into_iter()
            .find(|c| {
                c.tag() == name
                    || c.element_type() == unqualified
                    || variant_name(*c) == name
            })
            .ok_or_else(|| UnknownCategoryError {
                name: s.to_owned(),
            })
    }
}

const fn variant_name(category: SourceCategory) -> &'static str {
    match category {
        SourceCategory::EntrySection => "entry_section",
        SourceCategory::CategoryGroup => "category_group",
        SourceCategory::TagGroup => "tag_group",
        SourceCategory::CommerceProductType => "commerce_product_type",
    }
}

/// Errors from parsing a stored `"<tag>:<uid>"` source reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceRefError {
    /// The string has no `:` separator.
    #[error("Invalid source reference '{raw}': missing ':' separator")]
    MissingSeparator {
        /// The raw string that failed to parse.
        raw: String,
    },

    /// The part before the separator is not a known category tag.
    #[error("Invalid source reference '{raw}': unknown category tag '{tag}'")]
    UnknownTag {
        /// The raw string that failed to parse.
        raw: String,
        /// The unrecognized tag.
        tag: String,
    },

    /// Nothing follows the separator.
    #[error("Invalid source reference '{raw}': empty uid")]
    EmptyUid {
        /// The raw string that failed to parse.
        raw: String,
    },
}

/// A parsed `"<tag>:<uid>"` entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceRef {
    /// Category named by the tag.
    pub category: SourceCategory,
    /// Unique id of the source within its category.
    pub uid: String,
}

impl SourceRef {
    /// Create a reference from a category and uid.
    #[must_use]
    pub fn new(category: SourceCategory, uid: impl Into<String>) -> Self {
        Self {
            category,
            uid: uid.into(),
        }
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SOURCE_REF_SEPARATOR}{}", self.category.tag(), self.uid)
    }
}

impl FromStr for SourceRef {
    type Err = SourceRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_source_ref(s)
    }
}

/// Split a stored entry on its first `:` into `(tag, uid)`.
///
/// No validation is applied to either half. Returns `None` when the entry
/// has no separator.
#[inline]
#[must_use]
pub fn split_source_ref(raw: &str) -> Option<(&str, &str)> {
    raw.split_once(SOURCE_REF_SEPARATOR)
}

/// Parse and validate a stored `"<tag>:<uid>"` entry.
///
/// The entry is split on the first `:`, so the uid may itself contain `:`.
/// Surrounding whitespace is ignored.
///
/// # Errors
/// Returns [`SourceRefError`] if the separator is missing, the tag is not a
/// known category tag, or the uid is empty.
pub fn parse_source_ref(raw: &str) -> Result<SourceRef, SourceRefError> {
    let trimmed = raw.trim();

    let Some((tag, uid)) = split_source_ref(trimmed) else {
        return Err(SourceRefError::MissingSeparator {
            raw: raw.to_owned(),
        });
    };

    let category = SourceCategory::from_tag(tag).ok_or_else(|| SourceRefError::UnknownTag {
        raw: raw.to_owned(),
        tag: tag.to_owned(),
    })?;

    if uid.is_empty() {
        return Err(SourceRefError::EmptyUid {
            raw: raw.to_owned(),
        });
    }

    Ok(SourceRef::new(category, uid))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    // ---- SourceCategory tables ----

    #[test]
    fn test_tags() {
        assert_eq!(SourceCategory::EntrySection.tag(), "section");
        assert_eq!(SourceCategory::CategoryGroup.tag(), "category");
        assert_eq!(SourceCategory::TagGroup.tag(), "tag");
        assert_eq!(SourceCategory::CommerceProductType.tag(), "commerce");
    }

    #[test]
    fn test_criterion_keys() {
        assert_eq!(SourceCategory::EntrySection.criterion_key(), "section");
        assert_eq!(SourceCategory::CategoryGroup.criterion_key(), "group");
        assert_eq!(SourceCategory::TagGroup.criterion_key(), "group");
        assert_eq!(SourceCategory::CommerceProductType.criterion_key(), "type");
    }

    #[test]
    fn test_only_commerce_requires_commerce() {
        let requiring: Vec<_> = SourceCategory::ALL
            .into_iter()
            .filter(|c| c.requires_commerce())
            .collect();
        assert_eq!(requiring, vec![SourceCategory::CommerceProductType]);
    }

    #[test]
    fn test_from_tag_round_trips_every_category() {
        for category in SourceCategory::ALL {
            assert_eq!(SourceCategory::from_tag(category.tag()), Some(category));
        }
        assert_eq!(SourceCategory::from_tag("sections"), None);
        assert_eq!(SourceCategory::from_tag(""), None);
    }

    // ---- SourceCategory::from_str ----

    #[test]
    fn test_from_str_accepts_tag_variant_and_element_type() {
        assert_eq!(
            "section".parse::<SourceCategory>().unwrap(),
            SourceCategory::EntrySection
        );
        assert_eq!(
            "tag_group".parse::<SourceCategory>().unwrap(),
            SourceCategory::TagGroup
        );
        assert_eq!(
            r"craft\elements\Category".parse::<SourceCategory>().unwrap(),
            SourceCategory::CategoryGroup
        );
        assert_eq!(
            r"\craft\commerce\elements\Product"
                .parse::<SourceCategory>()
                .unwrap(),
            SourceCategory::CommerceProductType
        );
    }

    #[test]
    fn test_from_str_unknown_category() {
        let err = r"craft\elements\Asset".parse::<SourceCategory>().unwrap_err();
        assert!(err.to_string().contains("Unknown source category"), "got: {err}");
        assert_eq!(err.name, r"craft\elements\Asset");
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&SourceCategory::CommerceProductType).unwrap();
        assert_eq!(json, "\"commerce_product_type\"");
        let back: SourceCategory = serde_json::from_str("\"category_group\"").unwrap();
        assert_eq!(back, SourceCategory::CategoryGroup);
    }

    // ---- parse_source_ref ----

    #[test]
    fn test_parse_valid_ref() {
        let parsed = parse_source_ref("section:uid-1").unwrap();
        assert_eq!(parsed.category, SourceCategory::EntrySection);
        assert_eq!(parsed.uid, "uid-1");
    }

    #[test]
    fn test_parse_splits_on_first_colon_only() {
        let parsed = parse_source_ref("tag:a:b").unwrap();
        assert_eq!(parsed.category, SourceCategory::TagGroup);
        assert_eq!(parsed.uid, "a:b");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let parsed = parse_source_ref("  commerce:pt-9 ").unwrap();
        assert_eq!(parsed, SourceRef::new(SourceCategory::CommerceProductType, "pt-9"));
    }

    #[test]
    fn test_parse_missing_separator() {
        let err = parse_source_ref("uid-1").unwrap_err();
        assert!(
            matches!(err, SourceRefError::MissingSeparator { .. }),
            "got: {err}"
        );
        assert!(err.to_string().contains("missing ':'"), "got: {err}");
    }

    #[test]
    fn test_parse_unknown_tag() {
        let err = parse_source_ref("volume:uid-1").unwrap_err();
        match err {
            SourceRefError::UnknownTag { tag, .. } => assert_eq!(tag, "volume"),
            other => panic!("expected UnknownTag, got: {other}"),
        }
    }

    #[test]
    fn test_parse_empty_uid() {
        let err = parse_source_ref("category:").unwrap_err();
        assert!(matches!(err, SourceRefError::EmptyUid { .. }), "got: {err}");
    }

    #[test]
    fn test_display_formats_tag_and_uid() {
        let r = SourceRef::new(SourceCategory::CategoryGroup, "cg-1");
        assert_eq!(r.to_string(), "category:cg-1");
        assert_eq!(r.to_string().parse::<SourceRef>().unwrap(), r);
    }

    // ---- split_source_ref ----

    #[test]
    fn test_split_does_not_validate_tag() {
        assert_eq!(split_source_ref("whatever:uid"), Some(("whatever", "uid")));
        assert_eq!(split_source_ref(":uid"), Some(("", "uid")));
        assert_eq!(split_source_ref("nouid"), None);
    }
}
