//! Collaborator abstraction trait definition

mod authorizer;
mod entity_access;
mod modal_presenter;
mod notifier;
mod pagination_parser;
mod translation_loader;
mod view_renderer;

pub use authorizer::{Authorizer, RoleAuthorizer};
pub use entity_access::EntityAccess;
pub use modal_presenter::ModalPresenter;
pub use notifier::{LogNotifier, Notifier};
pub use pagination_parser::{DefaultPaginationParser, PaginationParser};
pub use translation_loader::TranslationLoader;
pub use view_renderer::ViewRenderer;
