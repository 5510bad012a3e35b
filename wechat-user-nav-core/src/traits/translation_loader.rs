//! Translation loading abstract Trait

use async_trait::async_trait;

use crate::error::NavResult;

/// Makes named translation parts available before a view renders
#[async_trait]
pub trait TranslationLoader: Send + Sync {
    /// Load (or confirm already loaded) the given parts
    ///
    /// # Arguments
    /// * `parts` - Part names, e.g. `["wechatUser", "global"]`
    async fn load_parts(&self, parts: &[&str]) -> NavResult<()>;
}
