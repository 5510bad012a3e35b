//! 平台适配器

mod bundled_translations;
mod console;
mod http_entity_access;

pub use bundled_translations::{BundledTranslations, Language};
pub use console::{ConsoleInput, ConsoleViewRenderer, PromptModalPresenter};
pub use http_entity_access::HttpEntityAccess;
