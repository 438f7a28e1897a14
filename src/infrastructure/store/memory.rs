//! 内存存储

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{ProductStore, StoreError};
use crate::app::produtos::model::{NewProduct, Product};

#[derive(Debug)]
struct Inner {
    next_id: i64,
    rows: Vec<Product>,
}

/// 进程内存储，id 从 1 开始递增
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: 1,
                rows: Vec::new(),
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let inner = self.inner.read().await;
        let mut rows = inner.rows.clone();
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(rows)
    }

    async fn insert(&self, product: NewProduct) -> Result<Product, StoreError> {
        let mut inner = self.inner.write().await;
        let row = Product {
            id: inner.next_id,
            name: product.name,
            price: product.price,
            description: product.description,
            created_at: Utc::now(),
        };
        inner.next_id += 1;
        inner.rows.push(row.clone());
        Ok(row)
    }

    async fn delete(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let mut inner = self.inner.write().await;
        let position = inner.rows.iter().position(|p| p.id == id);
        Ok(position.map(|index| inner.rows.remove(index)))
    }
}
