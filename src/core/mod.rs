//! 核心层：响应信封、错误处理、中间件

pub mod error;
pub mod middleware;
pub mod response;

pub use error::ApiError;
pub use response::Envelope;
