//! View rendering abstract Trait

use crate::error::NavResult;
use crate::types::{ResolvedValues, StateDescriptor, ViewBinding};

/// Renders the content area
///
/// Called only after every resolve of the state and its ancestors has settled, and before the
/// state is committed as active. An error aborts the transition.
pub trait ViewRenderer: Send + Sync {
    /// # Arguments
    /// * `state` - State owning the view
    /// * `view` - Template + controller
    /// * `resolved` - Resolved values of the state and its ancestors
    fn render(
        &self,
        state: &StateDescriptor,
        view: &ViewBinding,
        resolved: &ResolvedValues,
    ) -> NavResult<()>;
}
