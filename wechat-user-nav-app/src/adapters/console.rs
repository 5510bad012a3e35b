//! 控制台前端：文本视图 + 确认提示弹窗

use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::Mutex;
use wechat_user_nav_core::types::{
    Backdrop, DismissReason, ModalOutcome, ModalRequest, ResolvedValues, StateDescriptor,
    ViewBinding, WechatUser,
};
use wechat_user_nav_core::{ModalPresenter, NavError, NavResult, ViewRenderer};

use super::BundledTranslations;

type LineReader = Lines<Box<dyn AsyncBufRead + Send + Unpin>>;

/// 共享的行输入（主循环与弹窗共用同一个 stdin）
pub struct ConsoleInput {
    lines: Mutex<LineReader>,
}

impl ConsoleInput {
    pub fn new(reader: Box<dyn AsyncBufRead + Send + Unpin>) -> Self {
        Self {
            lines: Mutex::new(reader.lines()),
        }
    }

    pub fn stdin() -> Self {
        Self::new(Box::new(tokio::io::BufReader::new(tokio::io::stdin())))
    }

    /// 读取下一行，输入结束时返回 `None`
    pub async fn next_line(&self) -> std::io::Result<Option<String>> {
        self.lines.lock().await.next_line().await
    }
}

const ENTITY_FIELDS: [&str; 8] = [
    "openId", "nickName", "icon", "area", "name", "phone", "address", "language",
];

fn field_value<'a>(user: &'a WechatUser, field: &str) -> Option<&'a str> {
    let value = match field {
        "openId" => &user.open_id,
        "nickName" => &user.nick_name,
        "icon" => &user.icon,
        "area" => &user.area,
        "name" => &user.name,
        "phone" => &user.phone,
        "address" => &user.address,
        "language" => &user.language,
        _ => return None,
    };
    value.as_deref()
}

fn write_entity(out: &mut String, translations: &BundledTranslations, user: &WechatUser) {
    let id = user.id.map_or_else(|| "-".to_string(), |id| id.to_string());
    let _ = writeln!(out, "  {}: {id}", translations.translate("global.field.id"));
    for field in ENTITY_FIELDS {
        let key = format!("ziranliserverApp.wechatUser.{field}");
        let _ = writeln!(
            out,
            "  {}: {}",
            translations.translate(&key),
            field_value(user, field).unwrap_or("")
        );
    }
}

/// 把视图渲染为文本写到 stdout
pub struct ConsoleViewRenderer {
    translations: Arc<BundledTranslations>,
}

impl ConsoleViewRenderer {
    pub fn new(translations: Arc<BundledTranslations>) -> Self {
        Self { translations }
    }

    pub fn format(&self, state: &StateDescriptor, resolved: &ResolvedValues) -> String {
        let mut out = String::new();
        let title = state
            .page_title
            .map_or_else(|| state.name(), |key| self.translations.translate(key));
        let _ = writeln!(out, "== {title} ==");

        if let Some(user) = resolved.entity() {
            write_entity(&mut out, &self.translations, user);
        } else if let Some(paging) = resolved.paging_params() {
            let direction = if paging.ascending { "asc" } else { "desc" };
            let _ = write!(
                out,
                "  page {} | sort {} {direction}",
                paging.page, paging.predicate
            );
            if let Some(search) = &paging.search {
                let _ = write!(out, " | search \"{search}\"");
            }
            out.push('\n');
        }
        out
    }
}

impl ViewRenderer for ConsoleViewRenderer {
    fn render(
        &self,
        state: &StateDescriptor,
        view: &ViewBinding,
        resolved: &ResolvedValues,
    ) -> NavResult<()> {
        log::debug!("Rendering {} via {}", view.template, view.controller);
        print!("{}", self.format(state, resolved));
        Ok(())
    }
}

/// 在控制台询问确认/取消的弹窗
pub struct PromptModalPresenter {
    input: Arc<ConsoleInput>,
    translations: Arc<BundledTranslations>,
}

impl PromptModalPresenter {
    pub fn new(input: Arc<ConsoleInput>, translations: Arc<BundledTranslations>) -> Self {
        Self {
            input,
            translations,
        }
    }

    pub fn format(&self, request: &ModalRequest) -> String {
        let mut out = String::new();
        let is_delete = request.template.ends_with("delete-dialog.html");
        let heading = if is_delete {
            self.translations.translate("entity.delete.title")
        } else {
            self.translations
                .translate("ziranliserverApp.wechatUser.home.createOrEditLabel")
        };
        let _ = writeln!(out, "-- {heading} [{}] --", request.size.as_str());

        if is_delete {
            let id = request
                .entity
                .id
                .map_or_else(String::new, |id| id.to_string());
            let question = self
                .translations
                .translate("ziranliserverApp.wechatUser.delete.question")
                .replace("{id}", &id);
            let _ = writeln!(out, "  {question}");
        } else {
            write_entity(&mut out, &self.translations, &request.entity);
        }

        let hint = match request.backdrop {
            Backdrop::Static => "[y] confirm / [n] cancel",
            Backdrop::Dismissible => "[y] confirm / [n] cancel / [empty] close",
        };
        let _ = write!(out, "{hint} > ");
        out
    }
}

/// 把一行输入解释为弹窗结果
pub(crate) fn interpret_answer(
    answer: Option<&str>,
    request: &ModalRequest,
) -> NavResult<Option<ModalOutcome>> {
    let Some(answer) = answer else {
        return Ok(Some(ModalOutcome::Dismissed(DismissReason::Escape)));
    };
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => {
            let value = serde_json::to_value(&request.entity)
                .map_err(|e| NavError::SerializationError(e.to_string()))?;
            Ok(Some(ModalOutcome::Confirmed(value)))
        }
        "n" | "no" => Ok(Some(ModalOutcome::Dismissed(DismissReason::Cancel))),
        "" if request.backdrop == Backdrop::Dismissible => {
            Ok(Some(ModalOutcome::Dismissed(DismissReason::BackdropClick)))
        }
        _ => Ok(None),
    }
}

#[async_trait]
impl ModalPresenter for PromptModalPresenter {
    async fn open(&self, request: ModalRequest) -> NavResult<ModalOutcome> {
        loop {
            print!("{}", self.format(&request));
            let _ = std::io::Write::flush(&mut std::io::stdout());

            let line = self
                .input
                .next_line()
                .await
                .map_err(|e| NavError::ModalError(format!("读取输入失败: {e}")))?;
            if let Some(outcome) = interpret_answer(line.as_deref(), &request)? {
                return Ok(outcome);
            }
        }
    }
}
