//! 产品业务服务：输入校验 + 委托给存储

use std::sync::Arc;

use tracing::{debug, info};
use validator::Validate;

use super::model::{CreateProductRequest, Product};
use crate::core::error::ApiError;
use crate::infrastructure::store::ProductStore;

#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    /// 全表查询，按创建时间倒序
    pub async fn list(&self) -> Result<Vec<Product>, ApiError> {
        let products = self.store.list().await?;
        debug!("查询到 {} 个产品", products.len());
        Ok(products)
    }

    /// 校验失败时不会访问存储
    pub async fn create(&self, request: CreateProductRequest) -> Result<Product, ApiError> {
        let new_product = request.into_new_product()?;
        new_product.validate()?;

        let product = self.store.insert(new_product).await?;
        info!("创建产品: {} (id={})", product.name, product.id);
        Ok(product)
    }

    pub async fn delete(&self, raw_id: &str) -> Result<Product, ApiError> {
        let id = parse_id(raw_id)?;

        match self.store.delete(id).await? {
            Some(product) => {
                info!("删除产品: {} (id={})", product.name, product.id);
                Ok(product)
            }
            None => Err(ApiError::NotFound("Produto não encontrado".to_string())),
        }
    }
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::Validation("ID inválido".to_string()))
}
