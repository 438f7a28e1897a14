//! 路由装配

use std::{any::Any, sync::Arc};

use axum::{
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};

use super::produtos::{handler, ProductService};
use crate::core::{error::ApiError, middleware::request_logging_middleware};
use crate::infrastructure::store::ProductStore;

#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self {
            product_service: ProductService::new(store),
        }
    }
}

/// 路径存在但方法不匹配时也走 `route_not_found`，而不是空的 405
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/test",
            get(handler::health_check).fallback(handler::route_not_found),
        )
        .route(
            "/api/produtos",
            get(handler::list_products)
                .post(handler::create_product)
                .fallback(handler::route_not_found),
        )
        .route(
            "/api/produtos/:id",
            delete(handler::delete_product).fallback(handler::route_not_found),
        )
        .fallback(handler::route_not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(AnyOrigin)
                .allow_methods(AnyOrigin)
                .allow_headers(AnyOrigin),
        )
        .with_state(state)
}

/// 处理器 panic 时返回统一的 500 信封，进程继续服务
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "panic".to_string()
    };

    ApiError::Internal(detail).into_response()
}
