//! Navigation state machine
//!
//! A transition runs in three phases:
//! 1. authorization of every state on the target path, before anything else runs
//! 2. resolves of the entered states, parent first (retained states keep their values)
//! 3. commit: the view is rendered and the new state becomes active
//!
//! Every transition gets an id. Starting a new transition supersedes the one in flight: its
//! pending resolves are dropped and it can no longer commit. An open dialog stays open until a
//! newer transition commits; a transition that fails leaves both the active state and its dialog
//! alone.
//! Entering a modal state opens its dialog; the outcome picks the follow-up transition, which the
//! driver loop in [`Navigator::go`] runs next.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::{watch, RwLock};

use crate::error::{NavError, NavResult};
use crate::services::{NavContext, Resolver};
use crate::types::{
    AuthDecision, DismissReason, ExitTarget, ModalOutcome, ModalRequest, Reload, ResolvedValues,
    Session, StateId, StateParams,
};

/// Options of a single transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionOptions {
    /// Which states re-resolve even when retained
    pub reload: Reload,
    /// Start from the current parameters the target also declares
    pub inherit: bool,
}

impl Default for TransitionOptions {
    fn default() -> Self {
        Self {
            reload: Reload::None,
            inherit: true,
        }
    }
}

impl TransitionOptions {
    /// Options for a URL-driven transition: the URL carries every parameter.
    #[must_use]
    pub fn from_url() -> Self {
        Self {
            reload: Reload::None,
            inherit: false,
        }
    }

    #[must_use]
    pub fn reload(state: StateId) -> Self {
        Self {
            reload: Reload::From(state),
            inherit: true,
        }
    }
}

/// One entered state of the active path
#[derive(Debug, Clone, PartialEq)]
pub struct PathNode {
    pub state: StateId,
    /// Parameters visible to this state
    pub params: StateParams,
    /// Values of this state's own resolves
    pub resolved: ResolvedValues,
}

/// The committed navigation state
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveState {
    pub state: StateId,
    pub params: StateParams,
    /// Root first
    pub path: Vec<PathNode>,
}

impl ActiveState {
    pub fn node(&self, state: StateId) -> Option<&PathNode> {
        self.path.iter().find(|n| n.state == state)
    }

    /// Resolved values of the whole path; deeper states shadow their ancestors.
    pub fn resolved(&self) -> ResolvedValues {
        let mut values = ResolvedValues::new();
        for node in &self.path {
            values.extend(&node.resolved);
        }
        values
    }
}

type Request = (StateId, StateParams, TransitionOptions);

/// Navigation state machine
pub struct Navigator {
    ctx: Arc<NavContext>,
    resolver: Resolver,
    active: RwLock<Option<ActiveState>>,
    /// Id of the most recently started transition
    latest: watch::Sender<u64>,
    /// Id of the most recently committed transition
    committed: watch::Sender<u64>,
}

impl Navigator {
    #[must_use]
    pub fn new(ctx: Arc<NavContext>) -> Self {
        let (latest, _) = watch::channel(0);
        let (committed, _) = watch::channel(0);
        Self {
            resolver: Resolver::new(Arc::clone(&ctx)),
            ctx,
            active: RwLock::new(None),
            latest,
            committed,
        }
    }

    pub fn context(&self) -> &Arc<NavContext> {
        &self.ctx
    }

    /// Currently active state, `None` before the first successful transition
    pub async fn current(&self) -> Option<ActiveState> {
        self.active.read().await.clone()
    }

    /// URL of the active state
    pub async fn current_url(&self) -> Option<String> {
        let active = self.active.read().await;
        active
            .as_ref()
            .and_then(|a| self.ctx.tree.href(a.state, &a.params).ok())
    }

    pub fn href(&self, state: StateId, params: &StateParams) -> NavResult<String> {
        self.ctx.tree.href(state, params)
    }

    /// Navigate to the state a URL addresses (deep links, back/forward).
    pub async fn navigate_url(&self, session: &Session, url: &str) -> NavResult<ActiveState> {
        let (state, params) = match self.ctx.tree.match_url(url) {
            Ok(found) => found,
            Err(e) => {
                self.report(url, &e);
                return Err(e);
            }
        };
        self.go(session, state, params, TransitionOptions::from_url())
            .await
    }

    /// Re-enter the active state, re-running all of its resolves.
    pub async fn reload(&self, session: &Session) -> NavResult<ActiveState> {
        let Some(active) = self.current().await else {
            return self.go(session, StateId::List, StateParams::new(), TransitionOptions::default())
                .await;
        };
        self.go(
            session,
            active.state,
            active.params,
            TransitionOptions::reload(active.state),
        )
        .await
    }

    /// Go back to the state recorded by the active path's `previousState` resolve.
    ///
    /// Falls back to the list when nothing was recorded.
    pub async fn return_to_previous(&self, session: &Session) -> NavResult<ActiveState> {
        let previous = self
            .current()
            .await
            .and_then(|a| a.resolved().previous_state().cloned());
        match previous {
            Some(previous) => {
                self.go(
                    session,
                    previous.state(),
                    previous.params,
                    TransitionOptions::from_url(),
                )
                .await
            }
            None => {
                self.go(session, StateId::List, StateParams::new(), TransitionOptions::default())
                    .await
            }
        }
    }

    /// Transition to `target`.
    ///
    /// When the target is a modal state this returns only after the dialog closed and the
    /// follow-up transition finished; the returned state is where navigation ended up.
    ///
    /// # Errors
    /// The first failing step. The previously active state stays active, and every error but
    /// `Superseded` is also sent to the notifier.
    pub async fn go(
        &self,
        session: &Session,
        target: StateId,
        params: StateParams,
        options: TransitionOptions,
    ) -> NavResult<ActiveState> {
        let mut request: Request = (target, params, options);
        loop {
            let (target, params, options) = request;
            let tid = self.begin_transition();

            let active = match self.transition(tid, session, target, params, options).await {
                Ok(active) => active,
                Err(e) => {
                    self.report(target.name(), &e);
                    return Err(e);
                }
            };

            match self.run_modal(tid, &active).await {
                Ok(Some(follow_up)) => request = follow_up,
                Ok(None) => return Ok(active),
                Err(e) => {
                    self.report(active.state.name(), &e);
                    return Err(e);
                }
            }
        }
    }

    fn begin_transition(&self) -> u64 {
        let mut tid = 0;
        self.latest.send_modify(|latest| {
            *latest += 1;
            tid = *latest;
        });
        tid
    }

    async fn transition(
        &self,
        tid: u64,
        session: &Session,
        target: StateId,
        explicit: StateParams,
        options: TransitionOptions,
    ) -> NavResult<ActiveState> {
        let tree = &self.ctx.tree;
        if tree.get(target)?.is_abstract {
            return Err(NavError::AbstractState(target.name().to_string()));
        }
        let path = tree.path(target)?;

        for id in &path {
            let state = tree.get(*id)?;
            if state.authorities.is_empty() {
                continue;
            }
            if let AuthDecision::Denied(redirect) =
                self.ctx.authorizer.authorize(session, &state.authorities).await
            {
                return Err(NavError::AccessDenied {
                    state: target.name().to_string(),
                    redirect,
                });
            }
        }

        let from = self.current().await;
        let params = self.build_params(target, explicit, options.inherit, from.as_ref())?;

        let mut nodes = Vec::with_capacity(path.len());
        if let Some(from) = &from {
            for (id, old) in path.iter().zip(&from.path) {
                if old.state != *id {
                    break;
                }
                if let Reload::From(reload) = options.reload {
                    if tree.is_descendant_or_self(*id, reload) {
                        break;
                    }
                }
                if old.params != params.subset(tree.param_names(*id)?) {
                    break;
                }
                nodes.push(old.clone());
            }
        }
        let retained = nodes.len();

        log::debug!(
            "Transition #{tid} to {target}: retaining {retained} of {} states",
            path.len()
        );

        for id in &path[retained..] {
            let state = tree.get(*id)?;
            let resolved = self
                .unless_superseded(tid, self.resolver.resolve_state(state, &params, from.as_ref()))
                .await?;
            nodes.push(PathNode {
                state: *id,
                params: params.subset(tree.param_names(*id)?),
                resolved,
            });
        }

        let next = ActiveState {
            state: target,
            params,
            path: nodes,
        };
        self.commit(tid, from.as_ref(), next, retained).await
    }

    fn build_params(
        &self,
        target: StateId,
        explicit: StateParams,
        inherit: bool,
        from: Option<&ActiveState>,
    ) -> NavResult<StateParams> {
        let names = self.ctx.tree.param_names(target)?;
        let mut params = match from {
            Some(from) if inherit => from.params.subset(names.iter().copied()),
            _ => StateParams::new(),
        };
        params.merge(&explicit.subset(names.iter().copied()));
        self.ctx.tree.apply_defaults(target, &mut params)?;
        Ok(params)
    }

    /// Index of the deepest path node that owns a view
    fn view_index(&self, active: &ActiveState) -> Option<usize> {
        active.path.iter().rposition(|node| {
            self.ctx
                .tree
                .get(node.state)
                .is_ok_and(|s| s.view.is_some())
        })
    }

    async fn commit(
        &self,
        tid: u64,
        from: Option<&ActiveState>,
        next: ActiveState,
        retained: usize,
    ) -> NavResult<ActiveState> {
        let mut active = self.active.write().await;
        if *self.latest.borrow() != tid {
            return Err(NavError::Superseded);
        }

        if let Some(index) = self.view_index(&next) {
            let view_state = next.path[index].state;
            let previous_view = from.and_then(|f| self.view_index(f).map(|i| f.path[i].state));
            if index >= retained || previous_view != Some(view_state) {
                let descriptor = self.ctx.tree.get(view_state)?;
                if let Some(view) = &descriptor.view {
                    let mut values = ResolvedValues::new();
                    for node in &next.path[..=index] {
                        values.extend(&node.resolved);
                    }
                    self.ctx.view_renderer.render(descriptor, view, &values)?;
                }
            }
        }

        log::debug!("Entered {} with {:?}", next.state, next.params);
        *active = Some(next.clone());
        self.committed.send_replace(tid);
        Ok(next)
    }

    /// Open the dialog of a modal state and work out where its outcome leads.
    async fn run_modal(&self, tid: u64, active: &ActiveState) -> NavResult<Option<Request>> {
        let descriptor = self.ctx.tree.get(active.state)?;
        let Some(spec) = &descriptor.modal else {
            return Ok(None);
        };

        let entity = active
            .path
            .last()
            .and_then(|node| node.resolved.entity())
            .cloned()
            .ok_or_else(|| NavError::ModalError(format!("{} resolved no entity", active.state)))?;

        let request = ModalRequest {
            state: active.state,
            template: spec.template,
            controller: spec.controller,
            size: spec.size,
            backdrop: spec.backdrop,
            entity,
        };
        log::debug!("Opening {} for {}", spec.template, active.state);

        let outcome = match until_changed(
            &self.committed,
            tid,
            self.ctx.modal_presenter.open(request),
        )
        .await
        {
            Ok(outcome) => outcome,
            Err(NavError::Superseded) => ModalOutcome::Dismissed(DismissReason::Navigation),
            Err(e) => {
                self.report(active.state.name(), &e);
                ModalOutcome::Dismissed(DismissReason::Failed(e.to_string()))
            }
        };
        // navigation already moved on; the dialog state has no exit of its own to take
        if outcome == ModalOutcome::Dismissed(DismissReason::Navigation) {
            log::debug!("Dialog of {} closed by navigation", active.state);
            return Err(NavError::Superseded);
        }

        let exit = if outcome.is_confirmed() {
            spec.on_confirm
        } else {
            spec.on_dismiss
        };
        let target = match exit.target {
            ExitTarget::Parent => self
                .ctx
                .tree
                .parent(active.state)
                .ok_or_else(|| NavError::StateNotFound(format!("parent of {}", active.state)))?,
            ExitTarget::State(state) => state,
        };
        log::debug!("Dialog of {} closed with {outcome:?}, going to {target}", active.state);

        Ok(Some((
            target,
            StateParams::new(),
            TransitionOptions {
                reload: exit.reload,
                inherit: true,
            },
        )))
    }

    /// Run `fut` unless transition `tid` is superseded first, in which case `fut` is dropped.
    async fn unless_superseded<T>(
        &self,
        tid: u64,
        fut: impl Future<Output = NavResult<T>>,
    ) -> NavResult<T> {
        until_changed(&self.latest, tid, fut).await
    }

    fn report(&self, target: &str, error: &NavError) {
        if matches!(error, NavError::Superseded) {
            log::debug!("Transition to {target} superseded");
            return;
        }
        self.ctx.notifier.transition_failed(target, error);
    }
}

/// Run `fut` while `signal` still holds `tid`; `Superseded` once it moves on.
async fn until_changed<T>(
    signal: &watch::Sender<u64>,
    tid: u64,
    fut: impl Future<Output = NavResult<T>>,
) -> NavResult<T> {
    let mut rx = signal.subscribe();
    tokio::select! {
        biased;
        () = changed_from(&mut rx, tid) => Err(NavError::Superseded),
        result = fut => result,
    }
}

async fn changed_from(rx: &mut watch::Receiver<u64>, tid: u64) {
    loop {
        if *rx.borrow_and_update() != tid {
            return;
        }
        if rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::test_utils::{create_test_navigator, test_session};
    use crate::types::{Backdrop, DeniedRedirect, ModalSize, PagingParams};

    async fn enter_list(nav: &Navigator) -> ActiveState {
        nav.go(
            &test_session(),
            StateId::List,
            StateParams::new(),
            TransitionOptions::default(),
        )
        .await
        .unwrap()
    }

    async fn go_to(nav: &Navigator, state: StateId, params: StateParams) -> NavResult<ActiveState> {
        nav.go(&test_session(), state, params, TransitionOptions::default())
            .await
    }

    #[tokio::test]
    async fn list_url_parses_paging_params() {
        let (nav, mocks) = create_test_navigator();

        let active = nav
            .navigate_url(&test_session(), "/wechat-user?page=3&sort=name,desc&search=foo")
            .await
            .unwrap();

        assert_eq!(active.state, StateId::List);
        let paging = active.resolved().paging_params().cloned().unwrap();
        assert_eq!(paging.page, 3);
        assert_eq!(paging.predicate, "name");
        assert!(!paging.ascending);
        assert_eq!(paging.search.as_deref(), Some("foo"));
        assert_eq!(mocks.views.rendered_states(), vec![StateId::List]);
        assert_eq!(mocks.translations.loads_of("global"), 1);
    }

    #[tokio::test]
    async fn list_without_query_uses_defaults() {
        let (nav, _) = create_test_navigator();

        let active = nav
            .navigate_url(&test_session(), "/wechat-user")
            .await
            .unwrap();

        assert_eq!(active.resolved().paging_params(), Some(&PagingParams::default()));
        assert_eq!(nav.current_url().await.as_deref(), Some("/wechat-user"));
    }

    #[tokio::test]
    async fn new_confirmed_reloads_list_without_fetch() {
        let (nav, mocks) = create_test_navigator();
        enter_list(&nav).await;
        mocks.modals.confirm();

        let active = go_to(&nav, StateId::New, StateParams::new()).await.unwrap();

        assert_eq!(active.state, StateId::List);
        assert_eq!(mocks.translations.loads_of("global"), 2);
        assert_eq!(mocks.views.renders_of(StateId::List), 2);
        assert_eq!(mocks.entity_access.total_fetches(), 0);

        let requests = mocks.modals.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].entity.is_empty());
        assert_eq!(requests[0].size, ModalSize::Large);
        assert_eq!(requests[0].backdrop, Backdrop::Static);
    }

    #[tokio::test]
    async fn new_dismissed_returns_to_list_without_reload() {
        let (nav, mocks) = create_test_navigator();
        enter_list(&nav).await;
        mocks.modals.dismiss();

        let active = go_to(&nav, StateId::New, StateParams::new()).await.unwrap();

        assert_eq!(active.state, StateId::List);
        assert_eq!(mocks.translations.loads_of("global"), 1);
        assert_eq!(mocks.views.renders_of(StateId::List), 1);
    }

    #[tokio::test]
    async fn edit_fetches_once_before_dialog_and_reloads_list() {
        let (nav, mocks) = create_test_navigator();
        enter_list(&nav).await;
        mocks.modals.confirm();

        let active = go_to(&nav, StateId::Edit, StateParams::with_id(42))
            .await
            .unwrap();

        assert_eq!(mocks.entity_access.fetches(), vec![42]);
        let requests = mocks.modals.requests();
        assert_eq!(requests[0].state, StateId::Edit);
        assert_eq!(requests[0].entity.id, Some(42));
        assert_eq!(active.state, StateId::List);
        assert!(!active.params.contains("id"));
        assert_eq!(mocks.translations.loads_of("global"), 2);
    }

    #[tokio::test]
    async fn delete_dismissed_returns_to_parent_without_reload() {
        let (nav, mocks) = create_test_navigator();
        enter_list(&nav).await;
        mocks.modals.dismiss();

        let active = go_to(&nav, StateId::Delete, StateParams::with_id(42))
            .await
            .unwrap();

        assert_eq!(active.state, StateId::List);
        assert_eq!(mocks.entity_access.fetches(), vec![42]);
        let requests = mocks.modals.requests();
        assert_eq!(requests[0].size, ModalSize::Medium);
        assert_eq!(requests[0].backdrop, Backdrop::Dismissible);
        assert_eq!(mocks.translations.loads_of("global"), 1);
    }

    #[tokio::test]
    async fn edit_dismissed_returns_to_list_without_reload() {
        let (nav, mocks) = create_test_navigator();
        enter_list(&nav).await;
        mocks.modals.dismiss();

        let active = go_to(&nav, StateId::Edit, StateParams::with_id(42))
            .await
            .unwrap();

        assert_eq!(active.state, StateId::List);
        assert!(!active.params.contains("id"));
        assert_eq!(mocks.entity_access.fetches(), vec![42]);
        assert_eq!(mocks.modals.requests()[0].state, StateId::Edit);
        assert_eq!(mocks.translations.loads_of("global"), 1);
        assert_eq!(mocks.views.renders_of(StateId::List), 1);
        assert!(mocks.notifier.failures().is_empty());
    }

    #[tokio::test]
    async fn confirmed_sequence_always_ends_on_reloaded_list() {
        let (nav, mocks) = create_test_navigator();
        enter_list(&nav).await;

        for (state, params) in [
            (StateId::New, StateParams::new()),
            (StateId::Edit, StateParams::with_id(1)),
            (StateId::Delete, StateParams::with_id(2)),
        ] {
            mocks.modals.confirm();
            let active = go_to(&nav, state, params).await.unwrap();
            assert_eq!(active.state, StateId::List);
        }

        assert_eq!(mocks.translations.loads_of("global"), 4);
        assert_eq!(mocks.views.renders_of(StateId::List), 4);
        assert_eq!(mocks.entity_access.fetches(), vec![1, 2]);
    }

    #[tokio::test]
    async fn list_query_survives_dialog_round_trip() {
        let (nav, mocks) = create_test_navigator();
        nav.navigate_url(&test_session(), "/wechat-user?page=2&search=bob")
            .await
            .unwrap();
        mocks.modals.confirm();

        let active = go_to(&nav, StateId::Edit, StateParams::with_id(7))
            .await
            .unwrap();

        let paging = active.resolved().paging_params().cloned().unwrap();
        assert_eq!(paging.page, 2);
        assert_eq!(paging.search.as_deref(), Some("bob"));
        assert_eq!(
            nav.current_url().await.as_deref(),
            Some("/wechat-user?page=2&search=bob")
        );
    }

    #[tokio::test]
    async fn detail_edit_confirmed_returns_to_detail_of_active_id() {
        let (nav, mocks) = create_test_navigator();
        let session = test_session();
        nav.navigate_url(&session, "/wechat-user/wechat-user/1")
            .await
            .unwrap();
        nav.navigate_url(&session, "/wechat-user/wechat-user/7")
            .await
            .unwrap();
        mocks.modals.confirm();

        let active = go_to(&nav, StateId::DetailEdit, StateParams::new())
            .await
            .unwrap();

        assert_eq!(active.state, StateId::Detail);
        assert_eq!(active.params.id().unwrap(), 7);
        // the recorded previous state points at detail 1 and is not used
        let previous = active.resolved().previous_state().cloned().unwrap();
        assert_eq!(previous.state(), StateId::Detail);
        assert_eq!(previous.params.id().unwrap(), 1);
        // detail 1, detail 7, dialog 7; no forced re-fetch of the detail
        assert_eq!(mocks.entity_access.fetches(), vec![1, 7, 7]);
        assert_eq!(mocks.modals.requests()[0].entity.id, Some(7));
        assert_eq!(mocks.views.renders_of(StateId::Detail), 2);
        assert_eq!(mocks.translations.loads_of("global"), 1);
    }

    #[tokio::test]
    async fn detail_edit_dismissed_returns_to_detail() {
        let (nav, mocks) = create_test_navigator();
        nav.navigate_url(&test_session(), "/wechat-user/wechat-user/42")
            .await
            .unwrap();
        mocks.modals.dismiss();

        let active = go_to(&nav, StateId::DetailEdit, StateParams::new())
            .await
            .unwrap();

        assert_eq!(active.state, StateId::Detail);
        assert_eq!(mocks.entity_access.fetches(), vec![42, 42]);
        assert_eq!(mocks.views.renders_of(StateId::Detail), 1);
    }

    #[tokio::test]
    async fn deep_link_to_dialog_enters_list_first() {
        let (nav, mocks) = create_test_navigator();
        mocks.modals.dismiss();

        let active = nav
            .navigate_url(&test_session(), "/wechat-user/42/edit")
            .await
            .unwrap();

        assert_eq!(active.state, StateId::List);
        assert_eq!(mocks.views.rendered_states(), vec![StateId::List]);
        assert_eq!(mocks.modals.requests().len(), 1);
        assert_eq!(mocks.entity_access.fetches(), vec![42]);
    }

    #[tokio::test]
    async fn missing_role_blocks_every_resolve() {
        let (nav, mocks) = create_test_navigator();
        let guest = Session::user("guest", &["ROLE_GUEST"]);

        let err = nav
            .navigate_url(&guest, "/wechat-user/42/edit")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            NavError::AccessDenied {
                redirect: DeniedRedirect::AccessDenied,
                ..
            }
        ));
        assert_eq!(mocks.entity_access.total_fetches(), 0);
        assert_eq!(mocks.translations.total_loads(), 0);
        assert!(mocks.views.rendered_states().is_empty());
        assert!(mocks.modals.requests().is_empty());
        assert!(nav.current().await.is_none());
        assert_eq!(mocks.notifier.failures().len(), 1);
    }

    #[tokio::test]
    async fn anonymous_session_is_sent_to_login() {
        let (nav, mocks) = create_test_navigator();

        let err = nav
            .go(
                &Session::anonymous(),
                StateId::List,
                StateParams::new(),
                TransitionOptions::default(),
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            NavError::AccessDenied {
                redirect: DeniedRedirect::Login,
                ..
            }
        ));
        assert_eq!(mocks.translations.total_loads(), 0);
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_state() {
        let (nav, mocks) = create_test_navigator();
        let list = enter_list(&nav).await;

        let err = go_to(&nav, StateId::Detail, StateParams::with_id(999))
            .await
            .unwrap_err();

        assert!(matches!(err.root_cause(), NavError::EntityNotFound(_)));
        assert_eq!(nav.current().await, Some(list));
        assert_eq!(mocks.views.rendered_states(), vec![StateId::List]);
        let failures = mocks.notifier.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, "wechat-user-detail");
    }

    #[tokio::test]
    async fn invalid_id_fails_without_fetch() {
        let (nav, mocks) = create_test_navigator();

        let err = nav
            .navigate_url(&test_session(), "/wechat-user/abc/delete")
            .await
            .unwrap_err();

        assert!(matches!(err.root_cause(), NavError::InvalidParam { .. }));
        assert_eq!(mocks.entity_access.total_fetches(), 0);
        assert!(mocks.modals.requests().is_empty());
        assert!(nav.current().await.is_none());
    }

    #[tokio::test]
    async fn translation_failure_blocks_entry() {
        let (nav, mocks) = create_test_navigator();
        mocks.translations.fail_part("global");

        let err = nav
            .navigate_url(&test_session(), "/wechat-user")
            .await
            .unwrap_err();

        assert!(matches!(err.root_cause(), NavError::TranslationError(_)));
        assert!(nav.current().await.is_none());
        assert!(mocks.views.rendered_states().is_empty());
    }

    #[tokio::test]
    async fn unknown_url_is_reported() {
        let (nav, mocks) = create_test_navigator();

        let err = nav
            .navigate_url(&test_session(), "/artwork/1")
            .await
            .unwrap_err();

        assert!(matches!(err, NavError::UrlNotMatched(_)));
        assert_eq!(mocks.notifier.failures()[0].0, "/artwork/1");
    }

    #[tokio::test]
    async fn abstract_root_cannot_be_entered() {
        let (nav, _) = create_test_navigator();
        let err = go_to(&nav, StateId::Entity, StateParams::new())
            .await
            .unwrap_err();
        assert!(matches!(err, NavError::AbstractState(_)));
    }

    #[tokio::test]
    async fn superseded_transition_never_commits() {
        let (nav, mocks) = create_test_navigator();
        mocks.entity_access.hold(2);
        let session = test_session();

        let slow = nav.go(
            &session,
            StateId::Detail,
            StateParams::with_id(2),
            TransitionOptions::default(),
        );
        let fast = async {
            while !mocks.entity_access.fetches().contains(&2) {
                tokio::task::yield_now().await;
            }
            nav.navigate_url(&session, "/wechat-user?page=4").await
        };
        let (slow, fast) = tokio::join!(slow, fast);

        assert!(matches!(slow, Err(NavError::Superseded)));
        let fast = fast.unwrap();
        assert_eq!(fast.state, StateId::List);
        assert_eq!(nav.current().await, Some(fast));
        assert_eq!(mocks.views.rendered_states(), vec![StateId::List]);
        assert!(mocks.notifier.failures().is_empty());
    }

    #[tokio::test]
    async fn leaving_dialog_state_closes_dialog() {
        let (nav, mocks) = create_test_navigator();
        enter_list(&nav).await;
        mocks.modals.hold();
        let session = test_session();

        let editing = nav.go(
            &session,
            StateId::Edit,
            StateParams::with_id(42),
            TransitionOptions::default(),
        );
        let back = async {
            while mocks.modals.requests().is_empty() {
                tokio::task::yield_now().await;
            }
            nav.navigate_url(&session, "/wechat-user").await
        };
        let (editing, back) = tokio::join!(editing, back);

        assert!(matches!(editing, Err(NavError::Superseded)));
        assert_eq!(back.unwrap().state, StateId::List);
        assert_eq!(nav.current().await.unwrap().state, StateId::List);
        assert_eq!(mocks.translations.loads_of("global"), 1);
    }

    #[tokio::test]
    async fn failed_transition_leaves_open_dialog_alone() {
        let (nav, mocks) = create_test_navigator();
        enter_list(&nav).await;
        mocks.modals.hold();
        let session = test_session();
        let editing_done = AtomicBool::new(false);

        let editing = async {
            let result = nav
                .go(
                    &session,
                    StateId::Edit,
                    StateParams::with_id(42),
                    TransitionOptions::default(),
                )
                .await;
            editing_done.store(true, Ordering::SeqCst);
            result
        };
        let other = async {
            while mocks.modals.requests().is_empty() {
                tokio::task::yield_now().await;
            }

            let missing = go_to(&nav, StateId::Detail, StateParams::with_id(999)).await;
            assert!(matches!(
                missing.unwrap_err().root_cause(),
                NavError::EntityNotFound(_)
            ));
            let denied = nav
                .navigate_url(&Session::anonymous(), "/wechat-user/wechat-user/7")
                .await;
            assert!(matches!(denied, Err(NavError::AccessDenied { .. })));
            tokio::task::yield_now().await;

            // the dialog is still open on the committed dialog state
            assert!(!editing_done.load(Ordering::SeqCst));
            assert_eq!(nav.current().await.unwrap().state, StateId::Edit);

            nav.navigate_url(&session, "/wechat-user").await
        };
        let (editing, other) = tokio::join!(editing, other);

        assert!(matches!(editing, Err(NavError::Superseded)));
        assert_eq!(other.unwrap().state, StateId::List);
        assert_eq!(nav.current().await.unwrap().state, StateId::List);
        assert_eq!(mocks.modals.requests().len(), 1);
        assert_eq!(mocks.entity_access.fetches(), vec![42, 999]);
        assert_eq!(mocks.notifier.failures().len(), 2);
    }

    #[tokio::test]
    async fn presenter_failure_counts_as_dismissal() {
        let (nav, mocks) = create_test_navigator();
        enter_list(&nav).await;

        // nothing scripted: the presenter fails
        let active = go_to(&nav, StateId::Edit, StateParams::with_id(1))
            .await
            .unwrap();

        assert_eq!(active.state, StateId::List);
        assert_eq!(mocks.translations.loads_of("global"), 1);
        assert!(matches!(
            mocks.notifier.failures()[0].1,
            NavError::ModalError(_)
        ));
    }

    #[tokio::test]
    async fn detail_records_where_it_was_entered_from() {
        let (nav, mocks) = create_test_navigator();
        let session = test_session();
        nav.navigate_url(&session, "/wechat-user?page=2").await.unwrap();

        let detail = go_to(&nav, StateId::Detail, StateParams::with_id(7))
            .await
            .unwrap();

        let previous = detail.resolved().previous_state().cloned().unwrap();
        assert_eq!(previous.name, "wechat-user");
        assert_eq!(previous.url.as_deref(), Some("/wechat-user?page=2"));

        let (state, values) = mocks.views.last().unwrap();
        assert_eq!(state, StateId::Detail);
        assert_eq!(values.entity().unwrap().id, Some(7));
        assert!(values.paging_params().is_some());

        let back = nav.return_to_previous(&session).await.unwrap();
        assert_eq!(back.state, StateId::List);
        assert_eq!(back.params.get("page"), Some("2"));
        assert!(!back.params.contains("id"));
    }

    #[tokio::test]
    async fn reload_reruns_active_resolves() {
        let (nav, mocks) = create_test_navigator();
        let session = test_session();
        nav.navigate_url(&session, "/wechat-user/wechat-user/42")
            .await
            .unwrap();

        let active = nav.reload(&session).await.unwrap();

        assert_eq!(active.state, StateId::Detail);
        assert_eq!(mocks.entity_access.fetches(), vec![42, 42]);
        assert_eq!(mocks.translations.loads_of("global"), 1);
        assert_eq!(mocks.views.renders_of(StateId::Detail), 2);
    }
}
