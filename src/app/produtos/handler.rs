//! 产品处理器

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use super::model::{CreateProductRequest, Product};
use crate::app::routes::AppState;
use crate::core::{error::ApiError, response::Envelope};

/// 健康检查
pub async fn health_check() -> Json<Envelope<()>> {
    Json(Envelope::notice("API funcionando!").with_timestamp())
}

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<Product>>>, ApiError> {
    let products = state.product_service.list().await?;
    let total = products.len();
    Ok(Json(Envelope::success(products).with_total(total)))
}

pub async fn create_product(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Envelope<Product>>), ApiError> {
    let request = CreateProductRequest::from_body(&body)?;
    let product = state.product_service.create(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::success(product).with_message("Produto criado com sucesso")),
    ))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Product>>, ApiError> {
    let product = state.product_service.delete(&id).await?;
    Ok(Json(
        Envelope::success(product).with_message("Produto deletado com sucesso"),
    ))
}

/// 未匹配的路由
pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}
