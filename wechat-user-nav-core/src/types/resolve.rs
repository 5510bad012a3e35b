//! Resolve declarations and resolved values

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{PagingParams, StateId, StateParams, WechatUser};

/// A value a state needs before it may activate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolve {
    /// `pagingParams` parsed from `page`, `sort` and `search`
    PagingParams,
    /// `translatePartialLoader` for the named translation parts
    Translations(&'static [&'static str]),
    /// `entity` fetched by the `id` path parameter
    Entity,
    /// `entity` as an all-null snapshot, no fetch
    EmptyEntity,
    /// `previousState` captured from the state being left
    PreviousState,
}

impl Resolve {
    /// Name under which the value is exposed to views and dialogs
    pub fn key(&self) -> &'static str {
        match self {
            Self::PagingParams => "pagingParams",
            Self::Translations(_) => "translatePartialLoader",
            Self::Entity | Self::EmptyEntity => "entity",
            Self::PreviousState => "previousState",
        }
    }
}

/// Where the user came from before entering the detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviousState {
    pub name: String,
    pub params: StateParams,
    pub url: Option<String>,
}

impl PreviousState {
    /// State to go back to, falling back to the list
    pub fn state(&self) -> StateId {
        StateId::from_name(&self.name).unwrap_or(StateId::List)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ResolvedValue {
    PagingParams(PagingParams),
    /// Parts that are now loaded
    Translations(Vec<String>),
    Entity(WechatUser),
    PreviousState(PreviousState),
}

/// Resolved values keyed by resolve name
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedValues(BTreeMap<&'static str, ResolvedValue>);

impl ResolvedValues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &'static str, value: ResolvedValue) {
        self.0.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&ResolvedValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    /// Values of `other` shadow values with the same key
    pub fn extend(&mut self, other: &Self) {
        for (k, v) in &other.0 {
            self.0.insert(*k, v.clone());
        }
    }

    pub fn paging_params(&self) -> Option<&PagingParams> {
        match self.get("pagingParams") {
            Some(ResolvedValue::PagingParams(p)) => Some(p),
            _ => None,
        }
    }

    pub fn entity(&self) -> Option<&WechatUser> {
        match self.get("entity") {
            Some(ResolvedValue::Entity(e)) => Some(e),
            _ => None,
        }
    }

    pub fn previous_state(&self) -> Option<&PreviousState> {
        match self.get("previousState") {
            Some(ResolvedValue::PreviousState(p)) => Some(p),
            _ => None,
        }
    }

    pub fn translation_parts(&self) -> Option<&[String]> {
        match self.get("translatePartialLoader") {
            Some(ResolvedValue::Translations(parts)) => Some(parts),
            _ => None,
        }
    }
}
