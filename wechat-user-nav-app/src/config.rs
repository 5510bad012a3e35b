//! 应用配置
//!
//! 以 JSON 文件保存，默认位置为 `<config_dir>/wechat-user-nav/config.json`。
//! 文件不存在时使用默认配置。

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use wechat_user_nav_core::types::Session;
use wechat_user_nav_core::{NavError, NavResult};

use crate::adapters::Language;

const APP_DIR: &str = "wechat-user-nav";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// 后端地址，不含 `/api`
    pub api_base_url: String,
    /// Bearer token
    pub api_token: Option<String>,
    /// 语言代码（`en` / `zh-cn`）
    pub language: String,
    /// 当前会话的登录名，`None` 表示未登录
    pub login: Option<String>,
    pub authorities: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            api_token: None,
            language: Language::default().code().to_string(),
            login: Some("user".to_string()),
            authorities: vec!["ROLE_USER".to_string()],
        }
    }
}

impl AppConfig {
    /// 默认配置文件路径
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// 从指定文件加载，文件不存在时返回默认配置
    pub fn load(path: &Path) -> NavResult<Self> {
        if !path.exists() {
            log::info!("Config {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|e| NavError::ConfigError(format!("读取 {} 失败: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| NavError::ConfigError(format!("解析 {} 失败: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// 从默认位置加载
    pub fn load_default() -> NavResult<Self> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => {
                log::warn!("No config directory on this platform, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// 写入配置文件（会创建父目录）
    pub fn save(&self, path: &Path) -> NavResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| NavError::ConfigError(format!("创建 {} 失败: {e}", parent.display())))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| NavError::SerializationError(e.to_string()))?;
        std::fs::write(path, json)
            .map_err(|e| NavError::ConfigError(format!("写入 {} 失败: {e}", path.display())))
    }

    fn validate(&self) -> NavResult<()> {
        let base = self.api_base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(NavError::ConfigError(format!(
                "apiBaseUrl must be an http(s) URL, got '{base}'"
            )));
        }
        if Language::from_code(&self.language).is_none() {
            return Err(NavError::ConfigError(format!(
                "unsupported language '{}'",
                self.language
            )));
        }
        Ok(())
    }

    pub fn language(&self) -> Language {
        Language::from_code(&self.language).unwrap_or_default()
    }

    /// 由配置构造会话
    pub fn session(&self) -> Session {
        match &self.login {
            Some(login) => {
                let authorities: Vec<&str> = self.authorities.iter().map(String::as_str).collect();
                Session::user(login.clone(), &authorities)
            }
            None => Session::anonymous(),
        }
    }
}
