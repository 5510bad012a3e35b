//! 类型定义模块

mod entity;
mod modal;
mod pagination;
mod params;
mod resolve;
mod session;
mod state;

pub use entity::{EntityId, WechatUser};
pub use modal::{
    Backdrop, DismissReason, ExitTarget, ModalExit, ModalOutcome, ModalRequest, ModalSize,
    ModalSpec, Reload,
};
pub use pagination::{PagingParams, DEFAULT_PAGE, DEFAULT_SORT};
pub use params::StateParams;
pub use resolve::{PreviousState, Resolve, ResolvedValue, ResolvedValues};
pub use session::{AuthDecision, DeniedRedirect, Session};
pub use state::{StateDescriptor, StateId, ViewBinding};
