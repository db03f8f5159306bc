//! 传输与存储抽象层
//!
//! 核心逻辑（网关客户端、会话、各页面状态）只依赖这里的 trait，
//! 浏览器实现位于 `web` 模块，测试实现位于 `testing` 模块。

use mentorlink_shared::protocol::HttpMethod;

// =========================================================
// HTTP 抽象
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
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

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 检查响应是否成功 (2xx)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP 错误类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpError {
    /// 请求构建失败
    RequestBuildFailed(String),
    /// 网络请求失败
    NetworkError(String),
    /// 响应体读取失败
    ResponseReadFailed(String),
}

impl core::fmt::Display for HttpError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HttpError::RequestBuildFailed(msg) => write!(f, "request build failed: {}", msg),
            HttpError::NetworkError(msg) => write!(f, "network error: {}", msg),
            HttpError::ResponseReadFailed(msg) => write!(f, "response read failed: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

/// 单次发送，不重试
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError>;
}

// =========================================================
// 持久化存储抽象
// =========================================================

/// 键值存储（浏览器中即 LocalStorage）
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    /// 返回是否写入成功
    fn set(&self, key: &str, value: &str) -> bool;
    fn delete(&self, key: &str) -> bool;
}
