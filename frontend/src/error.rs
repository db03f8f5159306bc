use std::fmt;

// =========================================================
// 错误类型枚举
// =========================================================

/// 错误分类
///
/// 显示层对所有分类一视同仁（显示一条消息，页面状态不变），
/// 区分类型只为日志和会话处理。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientErrorKind {
    /// 网络/传输失败，没有收到响应
    Network,
    /// 后端返回非 2xx
    Backend { status: u16 },
    /// 本地校验失败（图片类型/大小、必填项为空）
    Validation,
    /// 成功响应体无法解析
    Decode,
}

impl ClientErrorKind {
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientErrorKind::Network => "NETWORK_ERROR",
            ClientErrorKind::Backend { status: 401 } => "UNAUTHORIZED",
            ClientErrorKind::Backend { status: 403 } => "FORBIDDEN",
            ClientErrorKind::Backend { status: 404 } => "RESOURCE_NOT_FOUND",
            ClientErrorKind::Backend { status } if *status >= 500 => "SERVER_ERROR",
            ClientErrorKind::Backend { .. } => "REQUEST_REJECTED",
            ClientErrorKind::Validation => "INVALID_INPUT",
            ClientErrorKind::Decode => "RESPONSE_PARSE_ERROR",
        }
    }
}

// =========================================================
// 错误上下文追踪
// =========================================================

/// 结构化的错误追踪片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSpan {
    /// 操作名称，如 "api.call", "session.login"
    pub operation: String,
    /// 额外细节，如请求路径
    pub detail: Option<String>,
}

impl ErrorSpan {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: None,
        }
    }

    pub fn with_detail(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: Some(detail.into()),
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// 客户端错误
///
/// - kind: 错误分类
/// - message: 内部消息（写日志用）
/// - detail: 后端 `{"detail": ...}` 中的消息（给用户看）
/// - spans: 调用追踪栈
#[derive(Debug)]
pub struct ClientError {
    pub kind: ClientErrorKind,
    pub message: String,
    detail: Option<String>,
    source: Option<Box<dyn std::error::Error + 'static>>,
    spans: Vec<ErrorSpan>,
}

impl ClientError {
    pub fn new(kind: ClientErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
            source: None,
            spans: Vec::new(),
        }
    }

    // --- Convenience constructors ---

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Network, message)
    }

    /// 后端失败；`detail` 为响应体中携带的消息（若有）
    pub fn backend(status: u16, detail: Option<String>) -> Self {
        let message = match &detail {
            Some(detail) => format!("HTTP {}: {}", status, detail),
            None => format!("HTTP {}", status),
        };
        Self {
            detail,
            ..Self::new(ClientErrorKind::Backend { status }, message)
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Validation, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Decode, message)
    }

    // --- Context builders ---

    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::new(operation));
        self
    }

    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::with_detail(operation, detail));
        self
    }

    pub fn with_source<E: std::error::Error + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // --- Accessors ---

    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }

    pub fn status(&self) -> Option<u16> {
        match self.kind {
            ClientErrorKind::Backend { status } => Some(status),
            _ => None,
        }
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    pub fn spans(&self) -> &[ErrorSpan] {
        &self.spans
    }

    /// 令牌无效或已过期
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// 给用户显示的消息
    ///
    /// 后端消息优先；本地校验错误显示自身消息；其余显示调用方给的兜底文案。
    pub fn user_message(&self, fallback: &str) -> String {
        match (&self.detail, self.kind) {
            (Some(detail), _) => detail.clone(),
            (None, ClientErrorKind::Validation) => self.message.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;

        if !self.spans.is_empty() {
            write!(f, " | trace: ")?;
            for (i, span) in self.spans.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", span.operation)?;
                if let Some(detail) = &span.detail {
                    write!(f, "({})", detail)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_deref()
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

impl From<crate::transport::HttpError> for ClientError {
    fn from(e: crate::transport::HttpError) -> Self {
        ClientError::network(e.to_string())
    }
}

impl From<serde_json_wasm::de::Error> for ClientError {
    fn from(e: serde_json_wasm::de::Error) -> Self {
        ClientError::decode(e.to_string())
    }
}

impl From<serde_json_wasm::ser::Error> for ClientError {
    fn from(e: serde_json_wasm::ser::Error) -> Self {
        ClientError::validation(format!("request body could not be encoded: {}", e))
    }
}
