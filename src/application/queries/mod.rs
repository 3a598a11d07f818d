//! 应用层 - 查询（读操作）
//!
//! 网关只读：每个请求一次访问判定

mod file_queries;

pub mod handlers;

pub use file_queries::*;
