//! 核心错误处理模块

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use super::response::Envelope;
use crate::infrastructure::store::StoreError;

/// 未匹配路由时返回的可用路由列表
pub const AVAILABLE_ROUTES: [&str; 4] = [
    "GET /api/test",
    "GET /api/produtos",
    "POST /api/produtos",
    "DELETE /api/produtos/:id",
];

/// 核心错误类型
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 客户端输入不合法，未访问存储
    Validation(String),
    /// 外部存储拒绝或执行失败，消息原样返回
    Store(String),
    NotFound(String),
    RouteNotFound,
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Store(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Validation(msg) => write!(f, "参数校验失败: {}", msg),
            ApiError::Store(msg) => write!(f, "存储错误: {}", msg),
            ApiError::NotFound(msg) => write!(f, "资源不存在: {}", msg),
            ApiError::RouteNotFound => write!(f, "路由不存在"),
            ApiError::Internal(msg) => write!(f, "内部错误: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let envelope = match self {
            ApiError::Validation(msg) | ApiError::NotFound(msg) => Envelope::failure(msg),
            ApiError::Store(msg) => {
                warn!("存储返回错误: {}", msg);
                Envelope::failure(msg)
            }
            ApiError::RouteNotFound => {
                Envelope::failure("Rota não encontrada").with_routes(&AVAILABLE_ROUTES)
            }
            ApiError::Internal(detail) => {
                error!("内部错误: {}", detail);
                Envelope::failure("Erro interno do servidor").with_error(detail)
            }
        };

        (status, Json(envelope)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Rejected(msg) | StoreError::Unavailable(msg) => ApiError::Store(msg),
            StoreError::Decode(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = err
            .field_errors()
            .into_iter()
            .flat_map(|(_, errors)| {
                errors.iter().map(|error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| "Dados inválidos".to_string())
                })
            })
            .collect();
        messages.sort();
        messages.dedup();

        ApiError::Validation(messages.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_status_codes() {
        assert_eq!(ApiError::Validation("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Store("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::RouteNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_errors_keep_message_verbatim() {
        let err: ApiError = StoreError::Rejected("duplicate key value".into()).into();
        assert_eq!(err, ApiError::Store("duplicate key value".into()));

        let err: ApiError = StoreError::Decode("expected array".into()).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
