//! # source-field
//!
//! A field type that lets an editor pick one or more content sources (entry
//! sections, category groups, tag groups or commerce product types) and turns
//! that pick into query criteria.
//!
//! ```rust
//! use serde_json::json;
//! use source_field::{Criteria, SourceCatalog, SourceField, SourceRecord, FieldConfig};
//! use source_field_id::SourceCategory;
//!
//! let registry = SourceCatalog {
//!     sections: vec![SourceRecord::new("News", "news", "uid-1")],
//!     ..SourceCatalog::default()
//! }
//! .into_registry();
//!
//! let field = SourceField::new(FieldConfig::new(SourceCategory::EntrySection));
//! let selection = field.normalize_value(json!(["section:uid-1", "section:uid-2"]), false, &registry);
//!
//! assert_eq!(selection.handles(), vec!["news"]);
//! assert_eq!(
//!     selection.criteria(Criteria::new()).get("section"),
//!     Some(&json!(["news"]))
//! );
//! ```

pub mod criteria;
pub mod error;
pub mod field;
pub mod normalize;
pub mod options;
pub mod raw;
pub mod registry;
pub mod resolver;
pub mod selection;
pub mod serialize;
pub mod settings;



// Re-export commonly used types
pub use criteria::{Criteria, build_criteria};
pub use error::FieldError;
pub use field::SourceField;
pub use normalize::{DropReason, DroppedEntry, NormalizeOutcome, normalize, normalize_with_report};
pub use options::{FieldInput, SourceOption, allowed_options, available_options, source_types};
pub use registry::{SourceCatalog, SourceRegistry, StaticSource};
pub use resolver::{
    CategoryEnumerator, CategoryResolver, QueryExecutor, SectionType, SourceProvider, SourceRecord,
};
pub use selection::{SelectionItem, SelectionSet};
pub use serialize::{FieldValue, serialize, serialize_records};
pub use settings::{AllowedSources, FieldConfig, FieldSettings, SelectionMode};
pub use source_field_id::{SourceCategory, SourceRef, SourceRefError, UnknownCategoryError};
