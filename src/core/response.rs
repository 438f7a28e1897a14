//! 核心响应处理模块

use serde::{Deserialize, Serialize};

/// 统一响应信封 `{success, data|message, error?}`
///
/// 服务端用它序列化所有响应，客户端用它反序列化。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotas_disponiveis: Option<Vec<String>>,
}

impl<T> Envelope<T> {
    fn empty(success: bool) -> Self {
        Self {
            success,
            message: None,
            data: None,
            total: None,
            timestamp: None,
            error: None,
            rotas_disponiveis: None,
        }
    }

    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::empty(true)
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_total(mut self, total: usize) -> Self {
        self.total = Some(total);
        self
    }

    pub fn with_timestamp(mut self) -> Self {
        self.timestamp = Some(chrono::Utc::now().to_rfc3339());
        self
    }
}

impl Envelope<()> {
    /// 只带消息的成功响应（健康检查）
    pub fn notice(message: impl Into<String>) -> Self {
        Self::empty(true).with_message(message)
    }

    /// 失败响应，`message` 面向用户
    pub fn failure(message: impl Into<String>) -> Self {
        Self::empty(false).with_message(message)
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_routes(mut self, routes: &[&str]) -> Self {
        self.rotas_disponiveis = Some(routes.iter().map(|r| r.to_string()).collect());
        self
    }
}
