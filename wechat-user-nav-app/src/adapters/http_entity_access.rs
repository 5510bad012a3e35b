//! 基于 HTTP 的实体读取
//!
//! `GET {base}/api/wechat-users/{id}`

use async_trait::async_trait;
use reqwest::Client;
use wechat_user_nav_core::types::{EntityId, WechatUser};
use wechat_user_nav_core::{EntityAccess, NavError, NavResult};

/// 响应体日志截断长度
const MAX_LOG_BODY: usize = 512;

pub struct HttpEntityAccess {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpEntityAccess {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self::with_client(Client::new(), base_url, token)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            token,
        }
    }

    pub fn entity_url(&self, id: EntityId) -> String {
        format!("{}/api/wechat-users/{id}", self.base_url)
    }
}

/// 按状态码解释响应
pub(crate) fn parse_response(id: EntityId, status: u16, body: &str) -> NavResult<WechatUser> {
    match status {
        200..=299 => serde_json::from_str(body).map_err(|e| {
            log::error!("JSON 解析失败: {e}");
            log::error!("原始响应: {}", truncate(body));
            NavError::SerializationError(e.to_string())
        }),
        404 => Err(NavError::EntityNotFound(id.to_string())),
        _ => Err(NavError::ApiError {
            status,
            message: truncate(body).to_string(),
        }),
    }
}

fn truncate(body: &str) -> &str {
    match body.char_indices().nth(MAX_LOG_BODY) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[async_trait]
impl EntityAccess for HttpEntityAccess {
    async fn get(&self, id: EntityId) -> NavResult<WechatUser> {
        let url = self.entity_url(id);
        log::debug!("GET {url}");

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| NavError::NetworkError(e.to_string()))?;
        let status = response.status().as_u16();
        log::debug!("Response Status: {status}");

        let body = response
            .text()
            .await
            .map_err(|e| NavError::NetworkError(format!("读取响应失败: {e}")))?;

        parse_response(id, status, &body)
    }
}
