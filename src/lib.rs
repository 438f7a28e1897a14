//! # 产品管理服务
//!
//! 一个最小的产品 CRUD 应用：
//! - `app`：产品的模型、业务服务与 HTTP 处理器
//! - `core`：统一响应信封、错误处理、中间件
//! - `infrastructure`：日志与外部存储（托管数据库的 REST 接口 / 内存实现）
//! - `client`：客户端应用（API 客户端、视图绑定、界面状态）

pub mod app;
pub mod client;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use app::routes::{build_router, AppState};
pub use config::Config;
