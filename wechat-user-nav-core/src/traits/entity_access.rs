//! Entity access abstract Trait

use async_trait::async_trait;

use crate::error::NavResult;
use crate::types::{EntityId, WechatUser};

/// Read access to wechat users
///
/// Platform implementation:
/// - Console: `HttpEntityAccess` (reqwest, `GET /api/wechat-users/{id}`)
/// - Tests: counting mocks
#[async_trait]
pub trait EntityAccess: Send + Sync {
    /// Get a wechat user by ID
    ///
    /// # Arguments
    /// * `id` - Entity ID
    ///
    /// # Errors
    /// `NavError::EntityNotFound` when no such user exists.
    async fn get(&self, id: EntityId) -> NavResult<WechatUser>;
}
