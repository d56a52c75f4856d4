//! HTTP 传输层
//!
//! `HttpTransport` 是网关与浏览器 fetch 之间的接缝：生产实现走 gloo-net，
//! 测试实现回放脚本化响应并记录每个请求。

use crate::api::error::{ApiError, ApiResult};
use async_trait::async_trait;
use nexus_hub_shared::protocol::HttpMethod;

// =========================================================
// 请求与响应
// =========================================================

/// 即将发出的请求（拦截器处理完毕后的最终形态）
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    /// 已附加的 Bearer 令牌
    pub bearer: Option<String>,
    /// JSON 请求体
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// =========================================================
// 抽象传输接口
// =========================================================

#[async_trait(?Send)]
pub trait HttpTransport {
    /// 发出请求并返回响应；非 2xx 状态不在此层判定为错误
    async fn execute(&self, request: &HttpRequest) -> ApiResult<HttpResponse>;
}

// =========================================================
// 生产环境实现 (fetch)
// =========================================================

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn execute(&self, request: &HttpRequest) -> ApiResult<HttpResponse> {
        use gloo_net::http::Request;
        use wasm_bindgen::JsValue;

        let builder = match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
            HttpMethod::Put => Request::put(&request.url),
            HttpMethod::Delete => Request::delete(&request.url),
        };

        let mut builder = builder.header("Accept", "application/json");
        if let Some(token) = &request.bearer {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }

        let sent = match &request.body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(JsValue::from_str(json))
                .map_err(|e| ApiError::network(e.to_string()))?
                .send()
                .await,
            None => builder.send().await,
        };

        let response = sent.map_err(|e| ApiError::network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

// =========================================================
// 测试环境实现 (Mock)
// =========================================================

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    /// Shared state between a test and the transport it handed out.
    pub struct MockContext {
        /// Every request the gateway issued, in order
        pub requests: RefCell<Vec<HttpRequest>>,
        /// Scripted responses, popped front to back
        pub responses: RefCell<VecDeque<ApiResult<HttpResponse>>>,
    }

    impl MockContext {
        pub fn new() -> Rc<Self> {
            Rc::new(Self {
                requests: RefCell::new(Vec::new()),
                responses: RefCell::new(VecDeque::new()),
            })
        }

        pub fn push_response(&self, status: u16, body: &str) {
            self.responses
                .borrow_mut()
                .push_back(Ok(HttpResponse {
                    status,
                    body: body.to_string(),
                }));
        }

        pub fn push_error(&self, error: ApiError) {
            self.responses.borrow_mut().push_back(Err(error));
        }

        pub fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }

        pub fn request(&self, index: usize) -> HttpRequest {
            self.requests.borrow()[index].clone()
        }
    }

    pub struct MockTransport {
        ctx: Rc<MockContext>,
    }

    impl MockTransport {
        pub fn new(ctx: Rc<MockContext>) -> Self {
            Self { ctx }
        }
    }

    #[async_trait(?Send)]
    impl HttpTransport for MockTransport {
        async fn execute(&self, request: &HttpRequest) -> ApiResult<HttpResponse> {
            self.ctx.requests.borrow_mut().push(request.clone());
            self.ctx
                .responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::network("no scripted response left")))
        }
    }
}
