//! Authorization abstract Trait

use async_trait::async_trait;

use crate::types::{AuthDecision, DeniedRedirect, Session};

/// Checks a session against the authorities a state requires
///
/// Provides a default implementation of `RoleAuthorizer`.
#[async_trait]
pub trait Authorizer: Send + Sync {
    /// # Arguments
    /// * `session` - Current session
    /// * `required` - Authorities of which one is enough; empty means public
    async fn authorize(&self, session: &Session, required: &[&str]) -> AuthDecision;
}

/// Authority check over the session's own authority list
#[derive(Debug, Default, Clone, Copy)]
pub struct RoleAuthorizer;

#[async_trait]
impl Authorizer for RoleAuthorizer {
    async fn authorize(&self, session: &Session, required: &[&str]) -> AuthDecision {
        if required.is_empty() {
            return AuthDecision::Granted;
        }
        if !session.is_authenticated() {
            return AuthDecision::Denied(DeniedRedirect::Login);
        }
        if session.has_any_authority(required) {
            AuthDecision::Granted
        } else {
            AuthDecision::Denied(DeniedRedirect::AccessDenied)
        }
    }
}
