//! HTTP Routes
//!
//! - /api/ping   GET  健康检查
//! - 其余路径        交给静态文件服务（public_dir）
//!
//! 受保护前缀下的请求在到达这里之前由网关中间件处理

use axum::{routing::get, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes(public_dir: impl AsRef<Path>) -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .fallback_service(ServeDir::new(public_dir))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new().route("/ping", get(handlers::ping))
}
