//! State parameters (path + query)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{NavError, NavResult};
use crate::types::EntityId;

/// Raw parameter values of a state, keyed by parameter name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateParams(BTreeMap<String, String>);

impl StateParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters holding only an `id`
    #[must_use]
    pub fn with_id(id: EntityId) -> Self {
        Self::new().with("id", id.to_string())
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy of these parameters restricted to `names`
    #[must_use]
    pub fn subset<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut out = Self::new();
        for name in names {
            if let Some(value) = self.get(name) {
                out.set(name, value);
            }
        }
        out
    }

    /// Overlay `other` on top of these parameters
    pub fn merge(&mut self, other: &Self) {
        for (k, v) in other.iter() {
            self.set(k, v);
        }
    }

    /// Entity identifier taken from the `id` path parameter
    pub fn id(&self) -> NavResult<EntityId> {
        let raw = self
            .get("id")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| NavError::MissingParam("id".to_string()))?;
        raw.parse().map_err(|_| NavError::InvalidParam {
            name: "id".to_string(),
            value: raw.to_string(),
        })
    }
}
