//! HTTP 请求封装模块
//!
//! 定义与具体实现无关的 `HttpClient` 抽象：
//! - 生产环境使用 `FetchHttpClient`（基于 `gloo-net` 的 fetch）
//! - 测试环境使用 `MockHttpClient`（记录请求并返回预设响应）

use gloo_net::http::Request;
use scholars_shared::protocol::HttpMethod;
use thiserror::Error;

#[cfg(test)]
use std::{cell::RefCell, collections::HashMap, rc::Rc};

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// HTTP 错误类型
#[derive(Debug, Error)]
pub enum HttpError {
    /// 请求构建失败
    #[error("请求构建失败: {0}")]
    RequestBuildFailed(String),
    /// 网络请求失败
    #[error("网络错误: {0}")]
    NetworkError(String),
    /// 响应读取失败
    #[error("响应解析失败: {0}")]
    ResponseParseFailed(String),
}

/// 通用 HTTP 请求结构
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    /// 查找请求头（大小写不敏感）
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 检查响应是否成功 (2xx)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP 客户端特性 (Trait)
///
/// 使用 async_trait 的 (?Send) 形式，因为浏览器中的 fetch Future 不是 Send 的。
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError>;
}

// =========================================================
// 实现层: Fetch 客户端 (Production)
// =========================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = match req.method {
            HttpMethod::Get => Request::get(&req.url),
            HttpMethod::Post => Request::post(&req.url),
        };

        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        if !req.query.is_empty() {
            builder = builder.query(req.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| HttpError::RequestBuildFailed(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| HttpError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| HttpError::ResponseParseFailed(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
#[derive(Clone, Default)]
pub struct MockHttpClient {
    // ("METHOD url", (Status, Response Body))
    responses: Rc<RefCell<HashMap<String, (u16, String)>>>,
    // 记录发出的请求
    pub requests: Rc<RefCell<Vec<HttpRequest>>>,
    // 设置后所有请求都以网络错误失败
    offline: Rc<RefCell<bool>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mock_response(&self, method: HttpMethod, url: &str, status: u16, body: serde_json::Value) {
        self.responses.borrow_mut().insert(
            format!("{} {}", method.as_str(), url),
            (status, body.to_string()),
        );
    }

    pub fn go_offline(&self) {
        *self.offline.borrow_mut() = true;
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.borrow_mut().push(req.clone());

        if *self.offline.borrow() {
            return Err(HttpError::NetworkError("connection refused".to_string()));
        }

        let responses = self.responses.borrow();
        let key = format!("{} {}", req.method.as_str(), req.url);
        if let Some((status, body)) = responses.get(&key) {
            Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            })
        } else {
            Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            })
        }
    }
}
