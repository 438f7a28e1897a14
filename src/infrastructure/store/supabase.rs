//! 托管数据库存储（Supabase 的 REST 接口）

use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder};
use serde::Deserialize;
use tracing::debug;

use super::{ProductStore, StoreError};
use crate::app::produtos::model::{NewProduct, Product};
use crate::config::StoreConfig;

/// 存储返回的错误体，只关心 `message`
#[derive(Debug, Deserialize)]
struct RestError {
    message: String,
}

pub struct SupabaseStore {
    client: Client,
    endpoint: String,
    key: String,
}

impl SupabaseStore {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .build()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/rest/v1/{}",
                config.url.trim_end_matches('/'),
                config.table
            ),
            key: config.key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.client
            .request(method, &self.endpoint)
            .header("apikey", &self.key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.key))
    }

    /// 发送请求并把响应解析成行集合
    async fn rows(&self, request: RequestBuilder) -> Result<Vec<Product>, StoreError> {
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        if !status.is_success() {
            return Err(StoreError::Rejected(rejection_message(status, &body)));
        }

        serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))
    }
}

/// 优先使用存储给出的 `message`，否则退回原始响应体
fn rejection_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<RestError>(body) {
        Ok(err) => err.message,
        Err(_) if body.trim().is_empty() => format!("HTTP {}", status),
        Err(_) => body.trim().to_string(),
    }
}

#[async_trait]
impl ProductStore for SupabaseStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        debug!("SELECT {}", self.endpoint);
        self.rows(
            self.request(Method::GET)
                .query(&[("select", "*"), ("order", "created_at.desc,id.desc")]),
        )
        .await
    }

    async fn insert(&self, product: NewProduct) -> Result<Product, StoreError> {
        debug!("INSERT {} nome={}", self.endpoint, product.name);
        let rows = self
            .rows(
                self.request(Method::POST)
                    .header("Prefer", "return=representation")
                    .json(&product),
            )
            .await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("insert não retornou nenhuma linha".to_string()))
    }

    async fn delete(&self, id: i64) -> Result<Option<Product>, StoreError> {
        debug!("DELETE {} id={}", self.endpoint, id);
        let rows = self
            .rows(
                self.request(Method::DELETE)
                    .header("Prefer", "return=representation")
                    .query(&[("id", format!("eq.{}", id))]),
            )
            .await?;

        Ok(rows.into_iter().next())
    }
}
