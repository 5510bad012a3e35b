//! Wechat user entity snapshot

use serde::{Deserialize, Serialize};

/// Server-side identifier of a wechat user
pub type EntityId = i64;

/// Wechat user snapshot handed to views and dialogs
///
/// Every field is optional: a snapshot for the create dialog has all of them `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WechatUser {
    pub id: Option<EntityId>,
    pub open_id: Option<String>,
    pub nick_name: Option<String>,
    pub icon: Option<String>,
    pub area: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub language: Option<String>,
}

impl WechatUser {
    /// Snapshot used by the create dialog
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether no field carries a value
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
