//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{NavError, NavResult};
use crate::services::{NavContext, Navigator};
use crate::states::StateTree;
use crate::traits::{EntityAccess, ModalPresenter, Notifier, TranslationLoader, ViewRenderer};
use crate::types::{
    EntityId, ModalOutcome, ModalRequest, ResolvedValues, Session, StateDescriptor, StateId,
    ViewBinding, WechatUser,
};

// ===== MockEntityAccess =====

pub struct MockEntityAccess {
    users: Mutex<HashMap<EntityId, WechatUser>>,
    fetches: Mutex<Vec<EntityId>>,
    /// 这些 ID 的请求永远不会完成（用于测试取消路径）
    held: Mutex<HashSet<EntityId>>,
}

impl MockEntityAccess {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            fetches: Mutex::new(Vec::new()),
            held: Mutex::new(HashSet::new()),
        }
    }

    pub fn insert(&self, user: WechatUser) {
        if let Some(id) = user.id {
            self.users.lock().unwrap().insert(id, user);
        }
    }

    pub fn hold(&self, id: EntityId) {
        self.held.lock().unwrap().insert(id);
    }

    pub fn fetches(&self) -> Vec<EntityId> {
        self.fetches.lock().unwrap().clone()
    }

    pub fn total_fetches(&self) -> usize {
        self.fetches.lock().unwrap().len()
    }
}

#[async_trait]
impl EntityAccess for MockEntityAccess {
    async fn get(&self, id: EntityId) -> NavResult<WechatUser> {
        self.fetches.lock().unwrap().push(id);
        let held = self.held.lock().unwrap().contains(&id);
        if held {
            std::future::pending::<()>().await;
        }
        self.users
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| NavError::EntityNotFound(id.to_string()))
    }
}

// ===== MockTranslationLoader =====

pub struct MockTranslationLoader {
    loads: Mutex<Vec<Vec<String>>>,
    failing: Mutex<HashSet<String>>,
}

impl MockTranslationLoader {
    pub fn new() -> Self {
        Self {
            loads: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
        }
    }

    pub fn fail_part(&self, part: &str) {
        self.failing.lock().unwrap().insert(part.to_string());
    }

    /// 包含某个 part 的加载次数
    pub fn loads_of(&self, part: &str) -> usize {
        self.loads
            .lock()
            .unwrap()
            .iter()
            .filter(|parts| parts.iter().any(|p| p == part))
            .count()
    }

    pub fn total_loads(&self) -> usize {
        self.loads.lock().unwrap().len()
    }
}

#[async_trait]
impl TranslationLoader for MockTranslationLoader {
    async fn load_parts(&self, parts: &[&str]) -> NavResult<()> {
        self.loads
            .lock()
            .unwrap()
            .push(parts.iter().map(ToString::to_string).collect());
        let failing = self.failing.lock().unwrap();
        if let Some(part) = parts.iter().find(|p| failing.contains(**p)) {
            return Err(NavError::TranslationError(format!("part {part} unavailable")));
        }
        Ok(())
    }
}

// ===== RecordingViewRenderer =====

pub struct RecordingViewRenderer {
    renders: Mutex<Vec<(StateId, ResolvedValues)>>,
}

impl RecordingViewRenderer {
    pub fn new() -> Self {
        Self {
            renders: Mutex::new(Vec::new()),
        }
    }

    pub fn rendered_states(&self) -> Vec<StateId> {
        self.renders.lock().unwrap().iter().map(|(s, _)| *s).collect()
    }

    pub fn renders_of(&self, state: StateId) -> usize {
        self.rendered_states().iter().filter(|s| **s == state).count()
    }

    pub fn last(&self) -> Option<(StateId, ResolvedValues)> {
        self.renders.lock().unwrap().last().cloned()
    }
}

impl ViewRenderer for RecordingViewRenderer {
    fn render(
        &self,
        state: &StateDescriptor,
        _view: &ViewBinding,
        resolved: &ResolvedValues,
    ) -> NavResult<()> {
        self.renders
            .lock()
            .unwrap()
            .push((state.id, resolved.clone()));
        Ok(())
    }
}

// ===== ScriptedModalPresenter =====

/// 按脚本返回弹窗结果；`None` 表示弹窗一直保持打开
pub struct ScriptedModalPresenter {
    script: Mutex<VecDeque<Option<ModalOutcome>>>,
    requests: Mutex<Vec<ModalRequest>>,
}

impl ScriptedModalPresenter {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn confirm(&self) {
        self.push(Some(ModalOutcome::Confirmed(serde_json::Value::Bool(true))));
    }

    pub fn dismiss(&self) {
        self.push(Some(ModalOutcome::Dismissed(
            crate::types::DismissReason::Cancel,
        )));
    }

    pub fn hold(&self) {
        self.push(None);
    }

    fn push(&self, outcome: Option<ModalOutcome>) {
        self.script.lock().unwrap().push_back(outcome);
    }

    pub fn requests(&self) -> Vec<ModalRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModalPresenter for ScriptedModalPresenter {
    async fn open(&self, request: ModalRequest) -> NavResult<ModalOutcome> {
        self.requests.lock().unwrap().push(request);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Some(outcome)) => Ok(outcome),
            Some(None) => std::future::pending().await,
            None => Err(NavError::ModalError("no scripted outcome".to_string())),
        }
    }
}

// ===== RecordingNotifier =====

pub struct RecordingNotifier {
    failures: Mutex<Vec<(String, NavError)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            failures: Mutex::new(Vec::new()),
        }
    }

    pub fn failures(&self) -> Vec<(String, NavError)> {
        self.failures.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn transition_failed(&self, target: &str, error: &NavError) {
        self.failures
            .lock()
            .unwrap()
            .push((target.to_string(), error.clone()));
    }
}

// ===== 工厂方法 =====

pub struct TestMocks {
    pub entity_access: Arc<MockEntityAccess>,
    pub translations: Arc<MockTranslationLoader>,
    pub views: Arc<RecordingViewRenderer>,
    pub modals: Arc<ScriptedModalPresenter>,
    pub notifier: Arc<RecordingNotifier>,
}

/// 创建一个用于测试的 `WechatUser`
pub fn test_user(id: EntityId) -> WechatUser {
    WechatUser {
        id: Some(id),
        open_id: Some(format!("openid-{id}")),
        nick_name: Some(format!("user{id}")),
        language: Some("zh_CN".to_string()),
        ..WechatUser::default()
    }
}

/// 拥有 `ROLE_USER` 的会话
pub fn test_session() -> Session {
    Session::user("user", &["ROLE_USER"])
}

/// 创建测试用 `NavContext`，预置 ID 为 1、2、7、42 的用户
pub fn create_test_context() -> (Arc<NavContext>, TestMocks) {
    let mocks = TestMocks {
        entity_access: Arc::new(MockEntityAccess::new()),
        translations: Arc::new(MockTranslationLoader::new()),
        views: Arc::new(RecordingViewRenderer::new()),
        modals: Arc::new(ScriptedModalPresenter::new()),
        notifier: Arc::new(RecordingNotifier::new()),
    };
    for id in [1, 2, 7, 42] {
        mocks.entity_access.insert(test_user(id));
    }

    let tree = StateTree::wechat_user().unwrap();
    let ctx = NavContext::new(
        Arc::new(tree),
        mocks.entity_access.clone(),
        mocks.translations.clone(),
        mocks.views.clone(),
        mocks.modals.clone(),
    )
    .with_notifier(mocks.notifier.clone());

    (Arc::new(ctx), mocks)
}

/// 创建测试用 `Navigator`
pub fn create_test_navigator() -> (Navigator, TestMocks) {
    let (ctx, mocks) = create_test_context();
    (Navigator::new(ctx), mocks)
}
