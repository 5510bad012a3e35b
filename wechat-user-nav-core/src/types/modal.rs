//! Modal dialog protocol types

use serde::{Deserialize, Serialize};

use crate::types::{StateId, WechatUser};

/// Dialog width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModalSize {
    #[serde(rename = "md")]
    Medium,
    #[serde(rename = "lg")]
    Large,
}

impl ModalSize {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Medium => "md",
            Self::Large => "lg",
        }
    }
}

/// Backdrop behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backdrop {
    /// Clicking outside dismisses the dialog
    Dismissible,
    /// Clicking outside does nothing
    Static,
}

/// Where a dialog outcome leads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitTarget {
    /// Immediate parent of the dialog state
    Parent,
    State(StateId),
}

/// Which resolves are forced to run again on the follow-up transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reload {
    /// Retained states keep their resolved values
    #[default]
    None,
    /// The given state and its descendants re-resolve
    From(StateId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalExit {
    pub target: ExitTarget,
    pub reload: Reload,
}

impl ModalExit {
    pub const fn parent() -> Self {
        Self {
            target: ExitTarget::Parent,
            reload: Reload::None,
        }
    }

    pub const fn to(state: StateId) -> Self {
        Self {
            target: ExitTarget::State(state),
            reload: Reload::None,
        }
    }

    pub const fn reload(state: StateId) -> Self {
        Self {
            target: ExitTarget::State(state),
            reload: Reload::From(state),
        }
    }
}

/// Dialog declared by a modal state
#[derive(Debug, Clone)]
pub struct ModalSpec {
    pub template: &'static str,
    pub controller: &'static str,
    pub size: ModalSize,
    pub backdrop: Backdrop,
    pub on_confirm: ModalExit,
    pub on_dismiss: ModalExit,
}

/// Everything the presenter needs to show a dialog
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalRequest {
    pub state: StateId,
    pub template: &'static str,
    pub controller: &'static str,
    pub size: ModalSize,
    pub backdrop: Backdrop,
    /// Sole editable input of the dialog
    pub entity: WechatUser,
}

/// Why a dialog closed without confirming
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DismissReason {
    Cancel,
    BackdropClick,
    Escape,
    /// Closed because navigation left the dialog state
    Navigation,
    /// The presenter failed to show or run the dialog
    Failed(String),
}

/// Result of a dialog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "value", rename_all = "camelCase")]
pub enum ModalOutcome {
    /// User saved or deleted
    Confirmed(serde_json::Value),
    Dismissed(DismissReason),
}

impl ModalOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }
}
