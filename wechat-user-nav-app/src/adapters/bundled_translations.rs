//! 内置翻译
//!
//! 每种语言按 part 分组（`global`、`wechatUser`），加载后才能查询。

use std::collections::BTreeSet;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use wechat_user_nav_core::{NavError, NavResult, TranslationLoader};

/// 支持的语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    /// 英语
    #[default]
    En,
    /// 简体中文
    ZhCn,
}

impl Language {
    pub fn all() -> &'static [Language] {
        &[Language::En, Language::ZhCn]
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::ZhCn => "zh-cn",
        }
    }

    /// 从语言代码解析（大小写不敏感）
    pub fn from_code(code: &str) -> Option<Language> {
        match code.to_ascii_lowercase().as_str() {
            "en" | "en-us" => Some(Language::En),
            "zh-cn" | "zh" => Some(Language::ZhCn),
            _ => None,
        }
    }

    fn bundle(self, part: &str) -> Option<&'static [(&'static str, &'static str)]> {
        match (self, part) {
            (Language::En, "global") => Some(EN_GLOBAL),
            (Language::En, "wechatUser") => Some(EN_WECHAT_USER),
            (Language::ZhCn, "global") => Some(ZH_CN_GLOBAL),
            (Language::ZhCn, "wechatUser") => Some(ZH_CN_WECHAT_USER),
            _ => None,
        }
    }
}

const EN_GLOBAL: &[(&str, &str)] = &[
    ("global.title", "Ziranli Server"),
    ("global.field.id", "ID"),
    ("entity.action.back", "Back"),
    ("entity.action.cancel", "Cancel"),
    ("entity.action.delete", "Delete"),
    ("entity.action.edit", "Edit"),
    ("entity.action.save", "Save"),
    ("entity.action.view", "View"),
    ("entity.delete.title", "Confirm delete operation"),
    ("entity.detail.field", "Field"),
    ("entity.detail.value", "Value"),
];

const EN_WECHAT_USER: &[(&str, &str)] = &[
    ("ziranliserverApp.wechatUser.home.title", "Wechat Users"),
    ("ziranliserverApp.wechatUser.home.createLabel", "Create new Wechat User"),
    ("ziranliserverApp.wechatUser.detail.title", "Wechat User"),
    ("ziranliserverApp.wechatUser.home.createOrEditLabel", "Create or edit a Wechat User"),
    (
        "ziranliserverApp.wechatUser.delete.question",
        "Are you sure you want to delete Wechat User {id}?",
    ),
    ("ziranliserverApp.wechatUser.openId", "Open Id"),
    ("ziranliserverApp.wechatUser.nickName", "Nick Name"),
    ("ziranliserverApp.wechatUser.icon", "Icon"),
    ("ziranliserverApp.wechatUser.area", "Area"),
    ("ziranliserverApp.wechatUser.name", "Name"),
    ("ziranliserverApp.wechatUser.phone", "Phone"),
    ("ziranliserverApp.wechatUser.address", "Address"),
    ("ziranliserverApp.wechatUser.language", "Language"),
];

const ZH_CN_GLOBAL: &[(&str, &str)] = &[
    ("global.title", "自然里服务端"),
    ("global.field.id", "ID"),
    ("entity.action.back", "返回"),
    ("entity.action.cancel", "取消"),
    ("entity.action.delete", "删除"),
    ("entity.action.edit", "编辑"),
    ("entity.action.save", "保存"),
    ("entity.action.view", "查看"),
    ("entity.delete.title", "确认删除操作"),
    ("entity.detail.field", "字段"),
    ("entity.detail.value", "值"),
];

const ZH_CN_WECHAT_USER: &[(&str, &str)] = &[
    ("ziranliserverApp.wechatUser.home.title", "微信用户"),
    ("ziranliserverApp.wechatUser.home.createLabel", "创建新微信用户"),
    ("ziranliserverApp.wechatUser.detail.title", "微信用户"),
    ("ziranliserverApp.wechatUser.home.createOrEditLabel", "创建或编辑微信用户"),
    (
        "ziranliserverApp.wechatUser.delete.question",
        "你确定要删除微信用户 {id} 吗？",
    ),
    ("ziranliserverApp.wechatUser.openId", "Open Id"),
    ("ziranliserverApp.wechatUser.nickName", "昵称"),
    ("ziranliserverApp.wechatUser.icon", "头像"),
    ("ziranliserverApp.wechatUser.area", "地区"),
    ("ziranliserverApp.wechatUser.name", "姓名"),
    ("ziranliserverApp.wechatUser.phone", "电话"),
    ("ziranliserverApp.wechatUser.address", "地址"),
    ("ziranliserverApp.wechatUser.language", "语言"),
];

/// 进程内翻译加载器
pub struct BundledTranslations {
    language: Language,
    loaded: RwLock<BTreeSet<String>>,
}

impl BundledTranslations {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            loaded: RwLock::new(BTreeSet::new()),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// 查询已加载 part 中的文本；未加载或不存在时返回 `None`
    pub fn text(&self, key: &str) -> Option<&'static str> {
        let loaded = self.loaded.read().unwrap_or_else(PoisonError::into_inner);
        let text = loaded
            .iter()
            .filter_map(|part| self.language.bundle(part))
            .flat_map(|bundle| bundle.iter())
            .find(|(k, _)| *k == key)
            .map(|(_, text)| *text);
        text
    }

    /// 同 [`text`](Self::text)，找不到时返回 key 本身
    pub fn translate<'a>(&self, key: &'a str) -> &'a str {
        self.text(key).unwrap_or(key)
    }

    pub fn is_loaded(&self, part: &str) -> bool {
        self.loaded
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(part)
    }
}

#[async_trait]
impl TranslationLoader for BundledTranslations {
    async fn load_parts(&self, parts: &[&str]) -> NavResult<()> {
        let mut found = Vec::with_capacity(parts.len());
        for part in parts {
            if self.language.bundle(part).is_none() {
                return Err(NavError::TranslationError(format!(
                    "no '{part}' bundle for {}",
                    self.language.code()
                )));
            }
            found.push(*part);
        }

        let mut loaded = self.loaded.write().unwrap_or_else(PoisonError::into_inner);
        for part in found {
            if loaded.insert(part.to_string()) {
                log::debug!("Loaded translation part {part} ({})", self.language.code());
            }
        }
        Ok(())
    }
}
