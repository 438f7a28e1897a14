//! 产品存储
//!
//! 业务层只依赖 [`ProductStore`]，托管数据库（REST 接口）与内存实现可互换。

mod memory;
mod supabase;

pub use memory::MemoryStore;
pub use supabase::SupabaseStore;

use async_trait::async_trait;

use crate::app::produtos::model::{NewProduct, Product};

/// 存储错误类型
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// 存储拒绝了操作，消息来自存储本身
    #[error("{0}")]
    Rejected(String),
    #[error("{0}")]
    Unavailable(String),
    /// 存储返回的数据无法解析
    #[error("resposta inválida do banco: {0}")]
    Decode(String),
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// 全部记录，按 `created_at` 倒序，时间相同时按 `id` 倒序
    async fn list(&self) -> Result<Vec<Product>, StoreError>;

    /// 返回存储回显的新记录
    async fn insert(&self, product: NewProduct) -> Result<Product, StoreError>;

    /// 没有匹配行时返回 `None`
    async fn delete(&self, id: i64) -> Result<Option<Product>, StoreError>;
}
