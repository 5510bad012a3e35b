//! Modal dialog abstract Trait

use async_trait::async_trait;

use crate::error::NavResult;
use crate::types::{ModalOutcome, ModalRequest};

/// Shows modal dialogs
///
/// The returned future completes when the user confirms or dismisses. Dropping it before then
/// means navigation left the dialog state: implementations must close the dialog.
#[async_trait]
pub trait ModalPresenter: Send + Sync {
    async fn open(&self, request: ModalRequest) -> NavResult<ModalOutcome>;
}
