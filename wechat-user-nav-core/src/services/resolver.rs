//! Resolve evaluation

use std::sync::Arc;

use futures::future::try_join_all;

use crate::error::{NavError, NavResult};
use crate::services::{ActiveState, NavContext};
use crate::types::{
    PagingParams, PreviousState, Resolve, ResolvedValue, ResolvedValues, StateDescriptor, StateId,
    StateParams, WechatUser, DEFAULT_PAGE, DEFAULT_SORT,
};

/// Runs the resolves a state declares
pub struct Resolver {
    ctx: Arc<NavContext>,
}

impl Resolver {
    #[must_use]
    pub fn new(ctx: Arc<NavContext>) -> Self {
        Self { ctx }
    }

    /// Run every resolve of `state` concurrently.
    ///
    /// # Arguments
    /// * `state` - State being entered
    /// * `params` - Parameters of the transition target
    /// * `from` - State being left, if any
    ///
    /// # Errors
    /// The first failing resolve, wrapped in `NavError::ResolveFailed`.
    pub async fn resolve_state(
        &self,
        state: &StateDescriptor,
        params: &StateParams,
        from: Option<&ActiveState>,
    ) -> NavResult<ResolvedValues> {
        let pending = state.resolves.iter().map(|resolve| async move {
            match self.resolve_one(resolve, params, from).await {
                Ok(value) => Ok((resolve.key(), value)),
                Err(e) => Err(NavError::ResolveFailed {
                    state: state.name().to_string(),
                    resolve: resolve.key().to_string(),
                    cause: Box::new(e),
                }),
            }
        });

        let mut values = ResolvedValues::new();
        for (key, value) in try_join_all(pending).await? {
            values.insert(key, value);
        }
        Ok(values)
    }

    async fn resolve_one(
        &self,
        resolve: &Resolve,
        params: &StateParams,
        from: Option<&ActiveState>,
    ) -> NavResult<ResolvedValue> {
        match resolve {
            Resolve::PagingParams => self.paging_params(params).map(ResolvedValue::PagingParams),
            Resolve::Translations(parts) => {
                self.ctx.translation_loader.load_parts(parts).await?;
                Ok(ResolvedValue::Translations(
                    parts.iter().map(ToString::to_string).collect(),
                ))
            }
            Resolve::Entity => {
                let id = params.id()?;
                log::debug!("Fetching wechat user {id}");
                let entity = self.ctx.entity_access.get(id).await?;
                Ok(ResolvedValue::Entity(entity))
            }
            Resolve::EmptyEntity => Ok(ResolvedValue::Entity(WechatUser::empty())),
            Resolve::PreviousState => Ok(ResolvedValue::PreviousState(self.previous_state(from))),
        }
    }

    /// Pagination parameters from the raw `page`, `sort` and `search` values
    pub fn paging_params(&self, params: &StateParams) -> NavResult<PagingParams> {
        let parser = &self.ctx.pagination_parser;
        let page = parser.parse_page(params.get("page").unwrap_or(DEFAULT_PAGE))?;
        let sort = params
            .get("sort")
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SORT)
            .to_string();

        Ok(PagingParams {
            page,
            predicate: parser.parse_predicate(&sort),
            ascending: parser.parse_ascending(&sort),
            sort,
            search: params
                .get("search")
                .filter(|s| !s.is_empty())
                .map(ToString::to_string),
        })
    }

    fn previous_state(&self, from: Option<&ActiveState>) -> PreviousState {
        match from {
            Some(active) => PreviousState {
                name: active.state.name().to_string(),
                params: active.params.clone(),
                url: self.ctx.tree.href(active.state, &active.params).ok(),
            },
            None => PreviousState {
                name: StateId::List.name().to_string(),
                params: StateParams::new(),
                url: None,
            },
        }
    }
}
