//! 基础设施层：日志、存储

pub mod logger;
pub mod store;

pub use logger::Logger;
