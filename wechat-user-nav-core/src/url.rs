//! URL patterns: `/path/{param}?query&params`
//!
//! A state's own pattern is only a fragment; the full pattern of a state is the concatenation of
//! its ancestors' fragments (see [`StateTree::href`](crate::states::StateTree::href)).

use crate::error::{NavError, NavResult};
use crate::types::StateParams;

/// One path segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
}

/// Declared query parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParam {
    pub name: String,
    /// Value used when absent; equal values are squashed out of generated URLs
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlPattern {
    pub segments: Vec<Segment>,
    pub query: Vec<QueryParam>,
}

impl UrlPattern {
    /// Parse a fragment such as `/wechat-user?page&sort&search` or `/{id}/edit`.
    pub fn parse(pattern: &str) -> NavResult<Self> {
        let (path, query) = pattern.split_once('?').unwrap_or((pattern, ""));

        let mut segments = Vec::new();
        for raw in path.split('/').filter(|s| !s.is_empty()) {
            if let Some(inner) = raw.strip_prefix('{') {
                let name = inner.strip_suffix('}').filter(|n| !n.is_empty()).ok_or_else(|| {
                    NavError::InvalidStateTree(format!("malformed parameter segment '{raw}'"))
                })?;
                segments.push(Segment::Param(name.to_string()));
            } else {
                segments.push(Segment::Literal(raw.to_string()));
            }
        }

        let query = query
            .split('&')
            .filter(|s| !s.is_empty())
            .map(|name| QueryParam {
                name: name.to_string(),
                default: None,
            })
            .collect();

        Ok(Self { segments, query })
    }

    /// Give a declared query parameter a default value.
    #[must_use]
    pub fn with_default(mut self, name: &str, value: &str) -> Self {
        if let Some(q) = self.query.iter_mut().find(|q| q.name == name) {
            q.default = Some(value.to_string());
        }
        self
    }

    /// Names of all parameters (path first, then query)
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Param(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .chain(self.query.iter().map(|q| q.name.as_str()))
    }
}

/// A URL split into decoded path segments and query pairs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    pub segments: Vec<String>,
    pub query: StateParams,
}

/// Split and decode a URL; a leading `#` or `#!` is ignored.
pub fn parse_url(url: &str) -> NavResult<ParsedUrl> {
    let url = url.trim();
    let url = url
        .strip_prefix("#!")
        .or_else(|| url.strip_prefix('#'))
        .unwrap_or(url);
    let (path, query) = url.split_once('?').unwrap_or((url, ""));

    let segments = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(decode)
        .collect::<NavResult<Vec<_>>>()?;

    let mut params = StateParams::new();
    for pair in query.split('&').filter(|s| !s.is_empty()) {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        params.set(decode(k)?, decode(v)?);
    }

    Ok(ParsedUrl {
        segments,
        query: params,
    })
}

pub(crate) fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn decode(value: &str) -> NavResult<String> {
    urlencoding::decode(&value.replace('+', " "))
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| NavError::InvalidParam {
            name: "url".to_string(),
            value: format!("{value}: {e}"),
        })
}
