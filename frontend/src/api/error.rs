use std::fmt;

// =========================================================
// 错误类别
// =========================================================

/// 网关错误类别
/// 区分请求到达服务端之前与之后的失败
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// fetch 未能完成（断网、CORS、DNS）
    Network,
    /// 服务端返回非 2xx，携带状态码
    Status(u16),
    /// 请求体编码或响应体解析失败
    Serialization,
}

impl ApiErrorKind {
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiErrorKind::Network => "NETWORK_ERROR",
            ApiErrorKind::Status(_) => "HTTP_STATUS",
            ApiErrorKind::Serialization => "SERIALIZATION_ERROR",
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// 网关与资源客户端共用的错误类型
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    // --- Convenience constructors ---

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network, message)
    }

    pub fn status(code: u16, message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Status(code), message)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Serialization, message)
    }

    // --- Accessors ---

    /// 服务端返回的状态码（网络/解析错误时为 None）
    pub fn status_code(&self) -> Option<u16> {
        match self.kind {
            ApiErrorKind::Status(code) => Some(code),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(401)
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// 面向用户的消息（不带错误代码前缀）
    pub fn ui_message(&self) -> String {
        self.message.clone()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ApiErrorKind::Status(code) => write!(f, "[HTTP {}] {}", code, self.message),
            _ => write!(f, "[{}] {}", self.kind.error_code(), self.message),
        }
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
