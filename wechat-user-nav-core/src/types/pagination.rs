//! 分页参数类型定义

use serde::{Deserialize, Serialize};

/// Default `page` query value
pub const DEFAULT_PAGE: &str = "1";

/// Default `sort` query value
pub const DEFAULT_SORT: &str = "id,asc";

/// Pagination parameters resolved for the list view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagingParams {
    /// 1-based page number
    pub page: u32,
    /// Raw sort string, e.g. `name,desc`
    pub sort: String,
    /// Sort field
    pub predicate: String,
    /// Sort direction
    pub ascending: bool,
    /// Free-text search
    pub search: Option<String>,
}

impl Default for PagingParams {
    fn default() -> Self {
        Self {
            page: 1,
            sort: DEFAULT_SORT.to_string(),
            predicate: "id".to_string(),
            ascending: true,
            search: None,
        }
    }
}
