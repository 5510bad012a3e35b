//! Session and authorization types

use serde::{Deserialize, Serialize};

/// The signed-in user, passed explicitly into every transition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub login: Option<String>,
    #[serde(default)]
    pub authorities: Vec<String>,
}

impl Session {
    /// Session without a signed-in user
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn user(login: impl Into<String>, authorities: &[&str]) -> Self {
        Self {
            login: Some(login.into()),
            authorities: authorities.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.login.is_some()
    }

    pub fn has_any_authority(&self, required: &[&str]) -> bool {
        required
            .iter()
            .any(|r| self.authorities.iter().any(|a| a == r))
    }
}

/// Where a denied navigation is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeniedRedirect {
    /// Not signed in
    Login,
    /// Signed in without the required authority
    AccessDenied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthDecision {
    Granted,
    Denied(DeniedRedirect),
}
