//! Wechat User Navigation Core Library
//!
//! Provides the navigation state machine behind the wechat-user screens:
//! - State tree (list, detail and the modal-driven create/edit/delete states)
//! - Resolve evaluation that gates view activation
//! - Modal transition protocol (confirmed → list reload, dismissed → parent)
//!
//! Rendering, dialogs, data access, translations and authorization are reached through traits,
//! so the same machine can drive a console front end, a web shell or tests.

pub mod error;
pub mod services;
pub mod states;
pub mod traits;
pub mod types;
pub mod url;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{NavError, NavResult};
pub use services::{NavContext, Navigator};
pub use states::StateTree;
pub use traits::{
    Authorizer, EntityAccess, ModalPresenter, Notifier, PaginationParser, TranslationLoader,
    ViewRenderer,
};
