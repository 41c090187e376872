//! Query criteria built from a selection.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::FieldError;
use crate::resolver::QueryExecutor;
use crate::selection::SelectionSet;

/// A mapping of filter key to value, handed to the host's query executor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Criteria(Map<String, Value>);

impl Criteria {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing any existing value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set `key`, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.0.iter()
    }

    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Criteria {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Criteria {
    type Error = FieldError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::new()),
            other => Err(FieldError::InvalidCriteria(format!(
                "expected a JSON object, got {other}"
            ))),
        }
    }
}

impl<'a> IntoIterator for &'a Criteria {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Merge the selection's handles into `base` under the category's criterion key.
///
/// The handles overwrite any value `base` already has for that key. An empty
/// selection still writes an empty list, which restricts the query to nothing.
#[must_use]
pub fn build_criteria(set: &SelectionSet, base: Criteria) -> Criteria {
    let handles: Vec<Value> = set
        .handles()
        .into_iter()
        .map(|h| Value::String(h.to_owned()))
        .collect();
    base.with(set.category().criterion_key(), Value::Array(handles))
}

impl SelectionSet {
    /// Criteria restricting a query to the selected sources.
    #[must_use]
    pub fn criteria(&self, base: Criteria) -> Criteria {
        build_criteria(self, base)
    }

    /// Build criteria and hand them to `executor`.
    pub fn query<E>(&self, executor: &E, base: Criteria) -> E::Output
    where
        E: QueryExecutor + ?Sized,
    {
        let criteria = self.criteria(base);
        executor.execute(self.category(), &criteria)
    }
}
