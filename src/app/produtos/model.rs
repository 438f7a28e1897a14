//! 产品数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::core::error::ApiError;

pub const MISSING_FIELDS: &str = "Nome e preço são obrigatórios";
pub const INVALID_PRICE: &str = "Preço deve ser um número positivo";

/// 存储中的产品记录，`id` 与 `created_at` 由存储分配
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// 已清洗、待插入的产品
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct NewProduct {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, message = "Nome e preço são obrigatórios"))]
    pub name: String,
    #[serde(rename = "preco")]
    #[validate(range(exclusive_min = 0.0, message = "Preço deve ser um número positivo"))]
    pub price: f64,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
}

/// 创建产品请求（原始输入）
///
/// `preco` 可以是数字，也可以是数字字符串。
#[derive(Debug, Default, Deserialize)]
pub struct CreateProductRequest {
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub preco: Option<Value>,
    #[serde(default)]
    pub descricao: Option<String>,
}

impl CreateProductRequest {
    /// 解析请求体，空请求体视为 `{}`
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|_| ApiError::Validation("Corpo da requisição inválido".to_string()))
    }

    /// 去除首尾空白、把价格转换成数字
    pub fn into_new_product(self) -> Result<NewProduct, ApiError> {
        let name = self
            .nome
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        let price = match self.preco {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(raw) => Some(coerce_price(&raw)?),
        };

        let (name, price) = match (name, price) {
            (Some(name), Some(price)) => (name, price),
            _ => return Err(ApiError::Validation(MISSING_FIELDS.to_string())),
        };

        let description = self
            .descricao
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(NewProduct {
            name,
            price,
            description,
        })
    }
}

/// 数字原样接受；字符串严格按十进制解析；拒绝非有限值
pub fn coerce_price(raw: &Value) -> Result<f64, ApiError> {
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed
        .filter(|p| p.is_finite())
        .ok_or_else(|| ApiError::Validation(INVALID_PRICE.to_string()))
}
