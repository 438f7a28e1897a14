//! 产品管理：模型、服务、处理器

pub mod handler;
pub mod model;
pub mod service;

pub use model::{CreateProductRequest, NewProduct, Product};
pub use service::ProductService;
