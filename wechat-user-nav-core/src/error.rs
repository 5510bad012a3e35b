//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

use crate::types::DeniedRedirect;

/// Navigation layer error type
#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum NavError {
    /// State not registered in the tree
    #[error("State not found: {0}")]
    StateNotFound(String),

    /// Abstract states cannot be entered directly
    #[error("State is abstract: {0}")]
    AbstractState(String),

    /// Invalid state tree registration
    #[error("Invalid state tree: {0}")]
    InvalidStateTree(String),

    /// No state matches the URL
    #[error("No state matches URL: {0}")]
    UrlNotMatched(String),

    /// Required parameter missing
    #[error("Missing parameter: {0}")]
    MissingParam(String),

    /// Parameter present but malformed
    #[error("Invalid parameter {name}: {value}")]
    InvalidParam { name: String, value: String },

    /// Authorization denied
    #[error("Access denied to {state}")]
    AccessDenied {
        state: String,
        redirect: DeniedRedirect,
    },

    /// Entity not found
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    /// API error
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// network error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Translation bundle could not be loaded
    #[error("Translation error: {0}")]
    TranslationError(String),

    /// A resolve of a state being entered failed
    #[error("Resolve '{resolve}' of {state} failed: {cause}")]
    ResolveFailed {
        state: String,
        resolve: String,
        cause: Box<NavError>,
    },

    /// Modal dialog could not be presented
    #[error("Modal error: {0}")]
    ModalError(String),

    /// View could not be rendered
    #[error("View error: {0}")]
    ViewError(String),

    /// Invalid configuration or missing bootstrap component
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A newer transition started before this one finished
    #[error("Transition superseded")]
    Superseded,
}

impl NavError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::UrlNotMatched(_)
            | Self::MissingParam(_)
            | Self::InvalidParam { .. }
            | Self::AccessDenied { .. }
            | Self::EntityNotFound(_)
            | Self::Superseded => true,
            Self::ResolveFailed { cause, .. } => cause.is_expected(),
            _ => false,
        }
    }

    /// Unwraps `ResolveFailed` down to the collaborator error that caused it.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::ResolveFailed { cause, .. } => cause.root_cause(),
            other => other,
        }
    }
}

/// Navigation layer Result type alias
pub type NavResult<T> = std::result::Result<T, NavError>;
