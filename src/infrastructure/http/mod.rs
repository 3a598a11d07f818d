//! HTTP Layer - 受保护文件网关 + 静态文件服务

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use middleware::file_gate_middleware;
pub use routes::create_routes;
pub use server::{HttpServer, ServerConfig};
pub use state::{AppState, DEFAULT_SESSION_COOKIE};
