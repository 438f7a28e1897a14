//! 应用层

pub mod produtos;
pub mod routes;
