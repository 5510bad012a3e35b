//! State tree
//!
//! Built once at startup. Parent links are `StateId` lookups; registration order is parents
//! before children, which also rules out cycles.

use std::collections::HashMap;

use crate::error::{NavError, NavResult};
use crate::types::{
    Backdrop, ModalExit, ModalSize, ModalSpec, Resolve, StateDescriptor, StateId, StateParams,
    DEFAULT_PAGE, DEFAULT_SORT,
};
use crate::url::{encode, parse_url, QueryParam, Segment, UrlPattern};

/// Authority every wechat-user screen requires
pub const ROLE_USER: &str = "ROLE_USER";

const DIALOG_TEMPLATE: &str = "app/entities/wechat-user/wechat-user-dialog.html";
const DIALOG_CONTROLLER: &str = "WechatUserDialogController";

/// Immutable tree of state descriptors
#[derive(Debug, Clone)]
pub struct StateTree {
    states: Vec<StateDescriptor>,
    index: HashMap<StateId, usize>,
}

impl StateTree {
    /// Validate and index a set of descriptors.
    ///
    /// Exactly one root; every other state's parent must be registered before it.
    pub fn new(states: Vec<StateDescriptor>) -> NavResult<Self> {
        let mut index = HashMap::new();
        let mut roots = 0;
        for (i, state) in states.iter().enumerate() {
            match state.parent {
                None => roots += 1,
                Some(parent) if !index.contains_key(&parent) => {
                    return Err(NavError::InvalidStateTree(format!(
                        "parent {parent} of {} is not registered before it",
                        state.id
                    )));
                }
                Some(_) => {}
            }
            if index.insert(state.id, i).is_some() {
                return Err(NavError::InvalidStateTree(format!(
                    "duplicate state {}",
                    state.id
                )));
            }
            if state.modal.is_some() && !state.resolves.iter().any(|r| r.key() == "entity") {
                return Err(NavError::InvalidStateTree(format!(
                    "modal state {} has no entity resolve",
                    state.id
                )));
            }
        }
        if roots != 1 {
            return Err(NavError::InvalidStateTree(format!(
                "expected exactly one root, found {roots}"
            )));
        }
        Ok(Self { states, index })
    }

    /// The wechat-user screens under the abstract `entity` root.
    pub fn wechat_user() -> NavResult<Self> {
        Self::new(wechat_user_states()?)
    }

    pub fn get(&self, id: StateId) -> NavResult<&StateDescriptor> {
        self.index
            .get(&id)
            .map(|&i| &self.states[i])
            .ok_or_else(|| NavError::StateNotFound(id.name().to_string()))
    }

    pub fn parent(&self, id: StateId) -> Option<StateId> {
        self.get(id).ok().and_then(|s| s.parent)
    }

    pub fn states(&self) -> impl Iterator<Item = &StateDescriptor> {
        self.states.iter()
    }

    /// States from the root down to `id`, inclusive
    pub fn path(&self, id: StateId) -> NavResult<Vec<StateId>> {
        let mut path = vec![id];
        let mut current = self.get(id)?.parent;
        while let Some(parent) = current {
            path.push(parent);
            current = self.get(parent)?.parent;
        }
        path.reverse();
        Ok(path)
    }

    /// Whether `id` is `ancestor` or one of its descendants
    pub fn is_descendant_or_self(&self, id: StateId, ancestor: StateId) -> bool {
        self.path(id).is_ok_and(|p| p.contains(&ancestor))
    }

    /// Full path segments of `id` (ancestor fragments concatenated)
    fn full_segments(&self, id: StateId) -> NavResult<Vec<&Segment>> {
        let mut segments = Vec::new();
        for state in self.path(id)? {
            if let Some(url) = &self.get(state)?.url {
                segments.extend(url.segments.iter());
            }
        }
        Ok(segments)
    }

    /// Query parameters declared by `id` and its ancestors
    fn full_query(&self, id: StateId) -> NavResult<Vec<&QueryParam>> {
        let mut query = Vec::new();
        for state in self.path(id)? {
            if let Some(url) = &self.get(state)?.url {
                query.extend(url.query.iter());
            }
        }
        Ok(query)
    }

    /// Every parameter name visible to `id`
    pub fn param_names(&self, id: StateId) -> NavResult<Vec<&str>> {
        let mut names = Vec::new();
        for state in self.path(id)? {
            if let Some(url) = &self.get(state)?.url {
                names.extend(url.param_names());
            }
        }
        Ok(names)
    }

    /// Fill in query defaults that are absent.
    pub fn apply_defaults(&self, id: StateId, params: &mut StateParams) -> NavResult<()> {
        for q in self.full_query(id)? {
            if let (Some(default), false) = (&q.default, params.contains(&q.name)) {
                params.set(q.name.clone(), default.clone());
            }
        }
        Ok(())
    }

    /// Generate the URL of `id` with `params`; default-valued query params are squashed.
    pub fn href(&self, id: StateId, params: &StateParams) -> NavResult<String> {
        if self.get(id)?.is_abstract {
            return Err(NavError::AbstractState(id.name().to_string()));
        }

        let mut url = String::new();
        for segment in self.full_segments(id)? {
            url.push('/');
            match segment {
                Segment::Literal(lit) => url.push_str(lit),
                Segment::Param(name) => {
                    let value = params
                        .get(name)
                        .filter(|v| !v.is_empty())
                        .ok_or_else(|| NavError::MissingParam(name.clone()))?;
                    url.push_str(&encode(value));
                }
            }
        }
        if url.is_empty() {
            url.push('/');
        }

        let mut sep = '?';
        for q in self.full_query(id)? {
            let Some(value) = params.get(&q.name) else {
                continue;
            };
            if q.default.as_deref() == Some(value) || value.is_empty() {
                continue;
            }
            url.push(sep);
            url.push_str(&encode(&q.name));
            url.push('=');
            url.push_str(&encode(value));
            sep = '&';
        }
        Ok(url)
    }

    /// Find the state a URL addresses.
    ///
    /// Patterns with more literal segments win; ties go to the earlier registration.
    /// Query parameters not declared along the matched path are dropped.
    pub fn match_url(&self, url: &str) -> NavResult<(StateId, StateParams)> {
        let parsed = parse_url(url)?;

        let mut best: Option<(usize, StateId, StateParams)> = None;
        for state in self.states.iter().filter(|s| !s.is_abstract) {
            let segments = self.full_segments(state.id)?;
            if segments.len() != parsed.segments.len() {
                continue;
            }

            let mut params = StateParams::new();
            let mut literals = 0;
            let matched = segments.iter().zip(&parsed.segments).all(|(seg, actual)| match seg {
                Segment::Literal(lit) => {
                    literals += 1;
                    lit == actual
                }
                Segment::Param(name) => {
                    params.set(name.clone(), actual.clone());
                    true
                }
            });
            if !matched || best.as_ref().is_some_and(|(l, _, _)| *l >= literals) {
                continue;
            }

            for q in self.full_query(state.id)? {
                if let Some(value) = parsed.query.get(&q.name) {
                    params.set(q.name.clone(), value);
                }
            }
            best = Some((literals, state.id, params));
        }

        best.map(|(_, id, params)| (id, params))
            .ok_or_else(|| NavError::UrlNotMatched(url.to_string()))
    }
}

fn wechat_user_states() -> NavResult<Vec<StateDescriptor>> {
    Ok(vec![
        StateDescriptor::abstract_root(StateId::Entity),
        StateDescriptor::new(StateId::List)
            .parent(StateId::Entity)
            .url(
                UrlPattern::parse("/wechat-user?page&sort&search")?
                    .with_default("page", DEFAULT_PAGE)
                    .with_default("sort", DEFAULT_SORT),
            )
            .authorities(&[ROLE_USER])
            .page_title("ziranliserverApp.wechatUser.home.title")
            .view(
                "app/entities/wechat-user/wechat-users.html",
                "WechatUserController",
            )
            .resolve(Resolve::PagingParams)
            .resolve(Resolve::Translations(&["wechatUser", "global"])),
        StateDescriptor::new(StateId::Detail)
            .parent(StateId::List)
            .url(UrlPattern::parse("/wechat-user/{id}")?)
            .authorities(&[ROLE_USER])
            .page_title("ziranliserverApp.wechatUser.detail.title")
            .view(
                "app/entities/wechat-user/wechat-user-detail.html",
                "WechatUserDetailController",
            )
            .resolve(Resolve::Translations(&["wechatUser"]))
            .resolve(Resolve::Entity)
            .resolve(Resolve::PreviousState),
        StateDescriptor::new(StateId::DetailEdit)
            .parent(StateId::Detail)
            .url(UrlPattern::parse("/detail/edit")?)
            .authorities(&[ROLE_USER])
            .resolve(Resolve::Entity)
            .modal(ModalSpec {
                template: DIALOG_TEMPLATE,
                controller: DIALOG_CONTROLLER,
                size: ModalSize::Large,
                backdrop: Backdrop::Static,
                on_confirm: ModalExit::parent(),
                on_dismiss: ModalExit::parent(),
            }),
        StateDescriptor::new(StateId::New)
            .parent(StateId::List)
            .url(UrlPattern::parse("/new")?)
            .authorities(&[ROLE_USER])
            .resolve(Resolve::EmptyEntity)
            .modal(ModalSpec {
                template: DIALOG_TEMPLATE,
                controller: DIALOG_CONTROLLER,
                size: ModalSize::Large,
                backdrop: Backdrop::Static,
                on_confirm: ModalExit::reload(StateId::List),
                on_dismiss: ModalExit::to(StateId::List),
            }),
        StateDescriptor::new(StateId::Edit)
            .parent(StateId::List)
            .url(UrlPattern::parse("/{id}/edit")?)
            .authorities(&[ROLE_USER])
            .resolve(Resolve::Entity)
            .modal(ModalSpec {
                template: DIALOG_TEMPLATE,
                controller: DIALOG_CONTROLLER,
                size: ModalSize::Large,
                backdrop: Backdrop::Static,
                on_confirm: ModalExit::reload(StateId::List),
                on_dismiss: ModalExit::parent(),
            }),
        StateDescriptor::new(StateId::Delete)
            .parent(StateId::List)
            .url(UrlPattern::parse("/{id}/delete")?)
            .authorities(&[ROLE_USER])
            .resolve(Resolve::Entity)
            .modal(ModalSpec {
                template: "app/entities/wechat-user/wechat-user-delete-dialog.html",
                controller: "WechatUserDeleteController",
                size: ModalSize::Medium,
                backdrop: Backdrop::Dismissible,
                on_confirm: ModalExit::reload(StateId::List),
                on_dismiss: ModalExit::parent(),
            }),
    ])
}
