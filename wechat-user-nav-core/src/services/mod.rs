//! 导航服务层

mod navigator;
mod resolver;

pub use navigator::{ActiveState, Navigator, PathNode, TransitionOptions};
pub use resolver::Resolver;

use std::sync::Arc;

use crate::states::StateTree;
use crate::traits::{
    Authorizer, DefaultPaginationParser, EntityAccess, LogNotifier, ModalPresenter, Notifier,
    PaginationParser, RoleAuthorizer, TranslationLoader, ViewRenderer,
};

/// 导航上下文 - 持有状态树与所有协作者
///
/// 平台层需要创建此上下文，并注入平台特定的实现。
pub struct NavContext {
    /// 状态树
    pub tree: Arc<StateTree>,
    /// 实体读取
    pub entity_access: Arc<dyn EntityAccess>,
    /// 翻译加载
    pub translation_loader: Arc<dyn TranslationLoader>,
    /// 分页参数解析
    pub pagination_parser: Arc<dyn PaginationParser>,
    /// 权限检查
    pub authorizer: Arc<dyn Authorizer>,
    /// 视图渲染
    pub view_renderer: Arc<dyn ViewRenderer>,
    /// 弹窗
    pub modal_presenter: Arc<dyn ModalPresenter>,
    /// 失败通知
    pub notifier: Arc<dyn Notifier>,
}

impl NavContext {
    /// 创建导航上下文
    ///
    /// 分页解析、权限检查与通知使用默认实现，可通过 `with_*` 替换。
    #[must_use]
    pub fn new(
        tree: Arc<StateTree>,
        entity_access: Arc<dyn EntityAccess>,
        translation_loader: Arc<dyn TranslationLoader>,
        view_renderer: Arc<dyn ViewRenderer>,
        modal_presenter: Arc<dyn ModalPresenter>,
    ) -> Self {
        Self {
            tree,
            entity_access,
            translation_loader,
            pagination_parser: Arc::new(DefaultPaginationParser),
            authorizer: Arc::new(RoleAuthorizer),
            view_renderer,
            modal_presenter,
            notifier: Arc::new(LogNotifier),
        }
    }

    #[must_use]
    pub fn with_pagination_parser(mut self, parser: Arc<dyn PaginationParser>) -> Self {
        self.pagination_parser = parser;
        self
    }

    #[must_use]
    pub fn with_authorizer(mut self, authorizer: Arc<dyn Authorizer>) -> Self {
        self.authorizer = authorizer;
        self
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }
}
