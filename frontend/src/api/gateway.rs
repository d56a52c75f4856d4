//! API 网关
//!
//! 所有 REST 调用的唯一通道，实现两个拦截器：
//! - 请求侧：存在访问令牌时附加 `Authorization: Bearer`
//! - 响应侧：401 时静默刷新访问令牌并重放原请求，最多一次；
//!   刷新失败则清除两个令牌并按原始 401 返回
//!
//! 刷新请求本身不经过拦截器，避免递归。

use crate::api::error::{ApiError, ApiResult};
use crate::api::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::config;
use crate::web::storage::TokenStore;
use leptos::logging::warn;
use nexus_hub_shared::protocol::{ErrorBody, HttpMethod, RefreshRequest, RefreshResponse};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// 令牌刷新端点（匿名访问）
pub const REFRESH_PATH: &str = "/api/auth/token/refresh/";

#[derive(Clone)]
pub struct ApiGateway<T, S> {
    transport: T,
    tokens: S,
    base_url: String,
}

impl<T, S> ApiGateway<T, S>
where
    T: HttpTransport,
    S: TokenStore,
{
    pub fn new(transport: T, tokens: S, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            transport,
            tokens,
            base_url,
        }
    }

    /// 令牌存储（会话层需要读取刷新令牌、清除会话）
    pub fn tokens(&self) -> &S {
        &self.tokens
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 完整拦截器管线；返回原始响应，状态码判定交给上层
    pub async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
    ) -> ApiResult<HttpResponse> {
        let mut request = HttpRequest {
            method,
            url: self.url(path),
            bearer: self.tokens.access_token(),
            body,
        };
        let response = self.transport.execute(&request).await?;
        if response.status != 401 {
            return Ok(response);
        }

        // 401：持有刷新令牌时尝试一次刷新后重放，否则原样返回
        let Some(refresh) = self.tokens.refresh_token() else {
            return Ok(response);
        };
        match self.refresh_access(&refresh).await {
            Ok(access) => {
                self.tokens.replace_access(&access);
                request.bearer = Some(access);
                // 重放结果不再进入刷新逻辑
                self.transport.execute(&request).await
            }
            Err(err) => {
                warn!("token refresh failed: {}", err);
                self.tokens.clear();
                Ok(response)
            }
        }
    }

    /// 用刷新令牌换取新的访问令牌（绕过拦截器）
    async fn refresh_access(&self, refresh: &str) -> ApiResult<String> {
        let body = serde_json::to_string(&RefreshRequest {
            refresh: refresh.to_string(),
        })
        .map_err(|e| ApiError::serialization(e.to_string()))?;

        let request = HttpRequest {
            method: HttpMethod::Post,
            url: self.url(REFRESH_PATH),
            bearer: None,
            body: Some(body),
        };
        let response = self.transport.execute(&request).await?;
        if !response.is_success() {
            return Err(ApiError::status(response.status, "token refresh rejected"));
        }
        let parsed: RefreshResponse = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::serialization(e.to_string()))?;
        Ok(parsed.access)
    }

    // --- 带类型的动词 ---

    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> ApiResult<R> {
        let response = self.send(HttpMethod::Get, path, None).await?;
        Self::decode(response)
    }

    pub async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<R> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::serialization(e.to_string()))?;
        let response = self.send(HttpMethod::Post, path, Some(body)).await?;
        Self::decode(response)
    }

    pub async fn put_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<R> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::serialization(e.to_string()))?;
        let response = self.send(HttpMethod::Put, path, Some(body)).await?;
        Self::decode(response)
    }

    /// DELETE 只关心状态码（服务端返回 204 空响应体）
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        let response = self.send(HttpMethod::Delete, path, None).await?;
        if response.is_success() {
            Ok(())
        } else {
            Err(Self::status_error(response))
        }
    }

    fn decode<R: DeserializeOwned>(response: HttpResponse) -> ApiResult<R> {
        if !response.is_success() {
            return Err(Self::status_error(response));
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::serialization(e.to_string()))
    }

    /// 尽量从错误响应体里取出人类可读的消息
    fn status_error(response: HttpResponse) -> ApiError {
        let message = serde_json::from_str::<ErrorBody>(&response.body)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| format!("request failed with status {}", response.status));
        ApiError::status(response.status, message)
    }
}

// =========================================================
// 生产环境组装
// =========================================================

use crate::api::transport::FetchTransport;
use crate::web::storage::BrowserTokens;

/// 浏览器环境下的具体网关类型
pub type AppGateway = ApiGateway<FetchTransport, BrowserTokens>;

impl AppGateway {
    /// 按编译期配置组装生产网关
    pub fn from_config() -> Self {
        Self::new(FetchTransport, BrowserTokens, config::api_base_url())
    }
}

#[cfg(test)]
mod tests;
