//! 客户端应用：API 客户端、视图绑定、控制器

pub mod api;
pub mod app;
pub mod render;
pub mod terminal;
pub mod view;

pub use api::{ApiClient, ClientError, ProductsApi};
pub use app::{ClientApp, ClientState, ProductForm};
pub use terminal::TerminalView;
pub use view::View;
