//! 产品 API 的 HTTP 客户端

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::app::produtos::model::{NewProduct, Product};
use crate::core::response::Envelope;

/// 客户端错误类型
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    /// 服务端返回了失败信封
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("Falha de conexão: {0}")]
    Network(String),
    #[error("Resposta inválida do servidor: {0}")]
    Decode(String),
}

/// 客户端应用使用的四个调用
#[async_trait]
pub trait ProductsApi: Send + Sync {
    async fn health(&self) -> Result<(), ClientError>;
    async fn list(&self) -> Result<Vec<Product>, ClientError>;
    async fn create(&self, product: &NewProduct) -> Result<Product, ClientError>;
    async fn delete(&self, id: i64) -> Result<Product, ClientError>;
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Envelope<T>, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let status = response.status();
        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        if !status.is_success() || !envelope.success {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: envelope
                    .message
                    .unwrap_or_else(|| format!("HTTP {}", status)),
            });
        }

        Ok(envelope)
    }
}

fn require_data<T>(envelope: Envelope<T>) -> Result<T, ClientError> {
    envelope
        .data
        .ok_or_else(|| ClientError::Decode("campo data ausente".to_string()))
}

#[async_trait]
impl ProductsApi for ApiClient {
    async fn health(&self) -> Result<(), ClientError> {
        self.send::<serde_json::Value>(self.client.get(self.url("/api/test")))
            .await
            .map(|_| ())
    }

    async fn list(&self) -> Result<Vec<Product>, ClientError> {
        let envelope = self
            .send::<Vec<Product>>(self.client.get(self.url("/api/produtos")))
            .await?;
        Ok(envelope.data.unwrap_or_default())
    }

    async fn create(&self, product: &NewProduct) -> Result<Product, ClientError> {
        let request = self.client.post(self.url("/api/produtos")).json(product);
        require_data(self.send(request).await?)
    }

    async fn delete(&self, id: i64) -> Result<Product, ClientError> {
        let request = self
            .client
            .delete(self.url(&format!("/api/produtos/{}", id)));
        require_data(self.send(request).await?)
    }
}
