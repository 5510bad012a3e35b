//! Application bootstrap for the wechat-user navigation core.
//!
//! Provides `AppState` (navigator + session), `AppStateBuilder` (adapter injection),
//! the JSON `AppConfig` and the console/HTTP adapters.

pub mod adapters;
pub mod config;

use std::sync::Arc;

use wechat_user_nav_core::services::ActiveState;
use wechat_user_nav_core::types::Session;
use wechat_user_nav_core::{
    Authorizer, EntityAccess, ModalPresenter, NavContext, NavError, NavResult, Navigator,
    Notifier, StateTree, TranslationLoader, ViewRenderer,
};

use crate::adapters::{BundledTranslations, HttpEntityAccess};
use crate::config::AppConfig;

/// Application state.
///
/// Every front end constructs this once at startup via `AppStateBuilder`.
pub struct AppState {
    /// Navigation context (holds all collaborators)
    pub ctx: Arc<NavContext>,
    pub navigator: Arc<Navigator>,
    /// Session every transition is authorized against
    pub session: Session,
}

impl AppState {
    /// Navigate to a URL with the application session.
    pub async fn open_url(&self, url: &str) -> NavResult<ActiveState> {
        self.navigator.navigate_url(&self.session, url).await
    }

    pub async fn reload(&self) -> NavResult<ActiveState> {
        self.navigator.reload(&self.session).await
    }

    pub async fn back(&self) -> NavResult<ActiveState> {
        self.navigator.return_to_previous(&self.session).await
    }

    pub async fn current_url(&self) -> Option<String> {
        self.navigator.current_url().await
    }
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Required adapters
/// - `entity_access`: where wechat users are fetched from
/// - `view_renderer`: how views are shown
/// - `modal_presenter`: how dialogs are shown
///
/// # Optional
/// - `translation_loader`: defaults to `BundledTranslations` (English)
/// - `authorizer`, `notifier`: default to the core's role check and log notifier
/// - `tree`: defaults to `StateTree::wechat_user()`
/// - `session`: defaults to an anonymous session
pub struct AppStateBuilder {
    tree: Option<StateTree>,
    entity_access: Option<Arc<dyn EntityAccess>>,
    translation_loader: Option<Arc<dyn TranslationLoader>>,
    view_renderer: Option<Arc<dyn ViewRenderer>>,
    modal_presenter: Option<Arc<dyn ModalPresenter>>,
    authorizer: Option<Arc<dyn Authorizer>>,
    notifier: Option<Arc<dyn Notifier>>,
    session: Option<Session>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: None,
            entity_access: None,
            translation_loader: None,
            view_renderer: None,
            modal_presenter: None,
            authorizer: None,
            notifier: None,
            session: None,
        }
    }

    /// HTTP entity access and session taken from `config`.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new()
            .entity_access(Arc::new(HttpEntityAccess::new(
                config.api_base_url.clone(),
                config.api_token.clone(),
            )))
            .session(config.session())
    }

    #[must_use]
    pub fn tree(mut self, tree: StateTree) -> Self {
        self.tree = Some(tree);
        self
    }

    #[must_use]
    pub fn entity_access(mut self, access: Arc<dyn EntityAccess>) -> Self {
        self.entity_access = Some(access);
        self
    }

    #[must_use]
    pub fn translation_loader(mut self, loader: Arc<dyn TranslationLoader>) -> Self {
        self.translation_loader = Some(loader);
        self
    }

    #[must_use]
    pub fn view_renderer(mut self, renderer: Arc<dyn ViewRenderer>) -> Self {
        self.view_renderer = Some(renderer);
        self
    }

    #[must_use]
    pub fn modal_presenter(mut self, presenter: Arc<dyn ModalPresenter>) -> Self {
        self.modal_presenter = Some(presenter);
        self
    }

    #[must_use]
    pub fn authorizer(mut self, authorizer: Arc<dyn Authorizer>) -> Self {
        self.authorizer = Some(authorizer);
        self
    }

    #[must_use]
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    #[must_use]
    pub fn session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `NavError::ConfigError` if required adapters are missing, or the state tree error
    /// when the default tree fails validation.
    pub fn build(self) -> NavResult<AppState> {
        let entity_access = self
            .entity_access
            .ok_or_else(|| NavError::ConfigError("entity_access is required".to_string()))?;
        let view_renderer = self
            .view_renderer
            .ok_or_else(|| NavError::ConfigError("view_renderer is required".to_string()))?;
        let modal_presenter = self
            .modal_presenter
            .ok_or_else(|| NavError::ConfigError("modal_presenter is required".to_string()))?;
        let translation_loader = self
            .translation_loader
            .unwrap_or_else(|| Arc::new(BundledTranslations::new(Default::default())));
        let tree = match self.tree {
            Some(tree) => tree,
            None => StateTree::wechat_user()?,
        };

        let mut ctx = NavContext::new(
            Arc::new(tree),
            entity_access,
            translation_loader,
            view_renderer,
            modal_presenter,
        );
        if let Some(authorizer) = self.authorizer {
            ctx = ctx.with_authorizer(authorizer);
        }
        if let Some(notifier) = self.notifier {
            ctx = ctx.with_notifier(notifier);
        }

        let ctx = Arc::new(ctx);
        let navigator = Arc::new(Navigator::new(Arc::clone(&ctx)));
        Ok(AppState {
            ctx,
            navigator,
            session: self.session.unwrap_or_else(Session::anonymous),
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
